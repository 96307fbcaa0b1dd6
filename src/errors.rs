use std::fmt;

use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

use crate::entities::application_draft::ListSection;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    IndexOutOfRange {
        section: ListSection,
        index: usize,
        len: usize,
    },
    InvalidInput(String),
    Network(String),
    NotFound(String),
    Unauthorized(String),
    AlreadyApplied(String),
    Forbidden(String),
    RequestInFlight(String),
    InternalError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// How an error can be recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorCategory {
    /// Raised before any request; fixed by editing input.
    #[display("validation")]
    Validation,

    /// Transport or backend failure; fixed by retrying.
    #[display("network")]
    Network,

    /// Conflicts with a business rule; retrying does not help.
    #[display("business rule")]
    BusinessRule,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::IndexOutOfRange { section, index, len } => {
                write!(f, "index {} is out of range for {} ({} entries)", index, section, len)
            }
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::AlreadyApplied(job_id) => write!(f, "Already applied for job {}", job_id),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::RequestInFlight(key) => write!(f, "Request already in progress: {}", key),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ValidationError(_)
            | AppError::IndexOutOfRange { .. }
            | AppError::InvalidInput(_) => ErrorCategory::Validation,
            AppError::Network(_)
            | AppError::NotFound(_)
            | AppError::Unauthorized(_)
            | AppError::InternalError(_) => ErrorCategory::Network,
            AppError::AlreadyApplied(_)
            | AppError::Forbidden(_)
            | AppError::RequestInFlight(_) => ErrorCategory::BusinessRule,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    /// Process exit status for the command line front end.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Unauthorized(_) | AppError::Forbidden(_) => 77,
            AppError::InternalError(_) => 70,
            _ => match self.category() {
                ErrorCategory::Validation => 65,
                ErrorCategory::BusinessRule => 75,
                ErrorCategory::Network => 69,
            },
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationError(vec![FieldError::new(field, message)])
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            AppError::Network(format!("malformed response: {}", err))
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Network(format!("malformed response: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_recovery_path() {
        assert_eq!(AppError::validation("name", "required").category(), ErrorCategory::Validation);
        assert_eq!(AppError::Network("boom".into()).category(), ErrorCategory::Network);
        assert_eq!(AppError::AlreadyApplied("42".into()).category(), ErrorCategory::BusinessRule);

        assert!(AppError::Network("boom".into()).is_retryable());
        assert!(!AppError::AlreadyApplied("42".into()).is_retryable());
        assert!(!AppError::validation("name", "required").is_retryable());
    }

    #[test]
    fn validation_message_lists_fields() {
        let err = AppError::ValidationError(vec![
            FieldError::new("email", "Email is required"),
            FieldError::new("name", "Name is required"),
        ]);

        assert_eq!(
            err.to_string(),
            "validation error: email: Email is required, name: Name is required"
        );
    }

    #[test]
    fn exit_codes_separate_auth_from_other_failures() {
        assert_eq!(AppError::Unauthorized("x".into()).exit_code(), 77);
        assert_eq!(AppError::validation("name", "required").exit_code(), 65);
        assert_eq!(AppError::RequestInFlight("submit".into()).exit_code(), 75);
        assert_eq!(AppError::NotFound("job".into()).exit_code(), 69);
    }
}
