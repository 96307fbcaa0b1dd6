use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::Serialize;

use crate::errors::{AppError, ErrorCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    #[display("info")]
    Info,

    #[display("success")]
    Success,

    #[display("warning")]
    Warning,

    #[display("error")]
    Error,
}

/// Short-lived message shown to the user, dismissed automatically once expired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl From<&AppError> for NoticeLevel {
    fn from(err: &AppError) -> Self {
        match err.category() {
            ErrorCategory::Validation | ErrorCategory::BusinessRule => NoticeLevel::Warning,
            ErrorCategory::Network => NoticeLevel::Error,
        }
    }
}

/// What the user sees for an error; retryable failures say so.
pub fn describe(err: &AppError) -> String {
    match err {
        AppError::AlreadyApplied(_) => "You have already applied for this job.".to_string(),
        AppError::RequestInFlight(_) => "Please wait, the previous request is still running.".to_string(),
        e if e.is_retryable() => format!("{}. Please try again.", e),
        e => e.to_string(),
    }
}
