use thiserror::Error;

/// Failures raised by the recurrence engine. Both are terminal for the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("Invalid repeat rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Invalid date '{value}': expected YYYYMMDD")]
    InvalidDate { value: String },
}

impl RecurrenceError {
    pub(crate) fn rule(rule: &str, reason: impl Into<String>) -> Self {
        RecurrenceError::InvalidRule {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn date(value: &str) -> Self {
        RecurrenceError::InvalidDate {
            value: value.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}
