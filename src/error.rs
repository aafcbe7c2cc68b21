//! Unified error hierarchy for Tracker
//!
//! Every failure carries the offending field name and value where one exists,
//! so a caller can report exactly which part of a record was rejected.

use thiserror::Error;

/// Top-level error type for all Tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Record has the wrong number of comma-separated fields
    #[error("Invalid record format: expected {expected} fields, got {actual} in {record:?}")]
    Format {
        expected: usize,
        actual: usize,
        record: String,
    },

    /// A field could not be parsed
    #[error("Failed to parse {field} from {value:?}: {reason}")]
    Parse {
        field: String,
        value: String,
        reason: String,
    },

    /// A value failed the positivity check
    #[error("Invalid {field}: {value} (must be positive)")]
    Validation { field: String, value: String },

    /// Derived value is degenerate
    #[error("Calculation error: {reason}")]
    Compute { reason: String },

    /// Activity label is not one of the recognized labels
    #[error("Unknown activity type: {label:?}")]
    UnknownActivity { label: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub(crate) fn parse(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        TrackerError::Parse {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn validation(field: impl Into<String>, value: impl ToString) -> Self {
        TrackerError::Validation {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::Format { .. }
            | TrackerError::Parse { .. }
            | TrackerError::Validation { .. }
            | TrackerError::UnknownActivity { .. } => ErrorSeverity::Warning,
            TrackerError::Compute { .. } => ErrorSeverity::Error,
            TrackerError::Configuration(_) => ErrorSeverity::Error,
            TrackerError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Format { expected, actual, .. } => {
                format!("Record must have {} comma-separated fields, found {}", expected, actual)
            }
            TrackerError::Parse { field, value, .. } => {
                format!("Could not read {} from '{}'", field, value)
            }
            TrackerError::Validation { field, .. } => {
                format!("The {} must be greater than zero", field)
            }
            TrackerError::UnknownActivity { label } => {
                format!("Activity '{}' is not supported", label)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
