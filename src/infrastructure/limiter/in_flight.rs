use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::{mapref::entry::Entry, DashMap};

use crate::errors::AppError;

type Key = String;

/// Tracks which controls have a request outstanding.
///
/// A control may not start a second request for the same entity while its
/// first one is running; this is the only backpressure the client applies.
#[derive(Clone, Debug, Default)]
pub struct InFlightRegistry {
    map: Arc<DashMap<Key, Instant>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `operation:entity`, or fails if it is already claimed.
    pub fn acquire(&self, operation: &str, entity: &str) -> Result<InFlightGuard, AppError> {
        let key = format!("{}:{}", operation, entity);

        match self.map.entry(key.clone()) {
            Entry::Occupied(started) => {
                tracing::debug!(
                    %key,
                    elapsed_ms = started.get().elapsed().as_millis() as u64,
                    "request already in flight"
                );
                Err(AppError::RequestInFlight(key))
            }
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                Ok(InFlightGuard {
                    map: self.map.clone(),
                    key,
                })
            }
        }
    }

    pub fn is_in_flight(&self, operation: &str, entity: &str) -> bool {
        self.map.contains_key(&format!("{}:{}", operation, entity))
    }

    /// How long the request for `operation:entity` has been running.
    pub fn elapsed(&self, operation: &str, entity: &str) -> Option<Duration> {
        self.map
            .get(&format!("{}:{}", operation, entity))
            .map(|started| started.elapsed())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Releases its key when dropped, whichever way the request ended.
#[derive(Debug)]
pub struct InFlightGuard {
    map: Arc<DashMap<Key, Instant>>,
    key: Key,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.map.remove(&self.key);
    }
}
