//! Error propagation policy for the report entry points

use serde::{Deserialize, Serialize};
use tracing::{error, warn, Level};

use crate::error::Result;

/// How a reporter treats a failed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Return the error to the caller
    Strict,
    /// Log one warning and produce an empty report
    Lenient,
}

impl ErrorPolicy {
    /// Apply the policy to the outcome of one report.
    ///
    /// Under [`ErrorPolicy::Lenient`] the result is always `Ok`, with the
    /// default (empty) value standing in for a failure. The single event
    /// logged for the failure takes its level from the error's severity.
    pub fn resolve<T: Default>(self, result: Result<T>, operation: &str, record: &str) -> Result<T> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (ErrorPolicy::Strict, Err(err)) => Err(err),
            (ErrorPolicy::Lenient, Err(err)) => {
                let severity = err.severity();
                if severity.to_tracing_level() == Level::ERROR {
                    error!(operation, record, ?severity, error = %err, "Record skipped");
                } else {
                    warn!(operation, record, ?severity, error = %err, "Record skipped");
                }
                Ok(T::default())
            }
        }
    }
}

impl std::str::FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ErrorPolicy::Strict),
            "lenient" => Ok(ErrorPolicy::Lenient),
            _ => Err(format!("Invalid error policy: {}", s)),
        }
    }
}
