use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::{
    entities::notice::{describe, Notice, NoticeLevel},
    errors::AppError,
};

const MAX_NOTICES: usize = 20;

/// Queue of transient messages; each one disappears after `ttl`.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    notices: Arc<Mutex<VecDeque<Notice>>>,
    next_id: Arc<AtomicU64>,
    ttl: chrono::Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        NoticeBoard {
            notices: Arc::new(Mutex::new(VecDeque::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(5)),
        }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.push_at(level, message, Utc::now())
    }

    fn push_at(&self, level: NoticeLevel, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notice = Notice {
            id,
            level,
            message: message.into(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut notices = self.notices.lock();
        notices.push_back(notice);
        while notices.len() > MAX_NOTICES {
            notices.pop_front();
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Success, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message)
    }

    /// Surfaces an error to the user. Network failures are also logged.
    pub fn report(&self, err: &AppError) -> u64 {
        if err.is_retryable() {
            tracing::warn!(error = %err, "operation failed");
        }
        self.push(NoticeLevel::from(err), describe(err))
    }

    pub fn active(&self) -> Vec<Notice> {
        self.active_at(Utc::now())
    }

    fn active_at(&self, now: DateTime<Utc>) -> Vec<Notice> {
        let mut notices = self.notices.lock();
        notices.retain(|n| !n.is_expired(now));
        notices.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: u64) -> bool {
        let mut notices = self.notices.lock();
        let before = notices.len();
        notices.retain(|n| n.id != id);
        notices.len() != before
    }

    /// Removes and returns everything still active.
    pub fn drain(&self) -> Vec<Notice> {
        let now = Utc::now();
        let mut notices = self.notices.lock();
        notices.drain(..).filter(|n| !n.is_expired(now)).collect()
    }
}
