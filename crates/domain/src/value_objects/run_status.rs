//! Run status value object
//!
//! Represents the state the service reports for a task while it is polled.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a task run as reported by the status endpoint
///
/// `Pending` is the only non-terminal state. Status strings the service
/// does not document are kept verbatim in `Unknown` and treated as a
/// terminal failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    /// Task is queued or still being processed
    #[default]
    Pending,
    /// Task finished and its result can be fetched
    Success,
    /// Task ran out of time on the service side
    Timeout,
    /// Task failed on the service side
    Error,
    /// Account has insufficient credit to run the task
    PaymentRequired,
    /// Undocumented status string
    Unknown(String),
}

impl RunStatus {
    /// Check if polling can stop
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Check if the run finished successfully
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Timeout => "TIMEOUT",
            Self::Error => "ERROR",
            Self::PaymentRequired => "PAYMENT_REQUIRED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for RunStatus {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Self::Pending,
            "SUCCESS" => Self::Success,
            "TIMEOUT" => Self::Timeout,
            "ERROR" => Self::Error,
            "PAYMENT_REQUIRED" => Self::PaymentRequired,
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(RunStatus::default(), RunStatus::Pending);
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!RunStatus::Pending.is_terminal());
        assert!(RunStatus::Success.is_terminal());
        assert!(RunStatus::Timeout.is_terminal());
        assert!(RunStatus::Error.is_terminal());
        assert!(RunStatus::PaymentRequired.is_terminal());
        assert!(RunStatus::Unknown("CANCELLED".to_string()).is_terminal());
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!(RunStatus::from("SUCCESS"), RunStatus::Success);
        assert_eq!(RunStatus::from("payment_required"), RunStatus::PaymentRequired);
        assert_eq!(RunStatus::from(" PENDING "), RunStatus::Pending);
        assert_eq!(
            RunStatus::from("CANCELLED"),
            RunStatus::Unknown("CANCELLED".to_string())
        );
    }

    #[test]
    fn serialization() {
        let status: RunStatus = serde_json::from_str(r#""TIMEOUT""#).unwrap();
        assert_eq!(status, RunStatus::Timeout);
        assert_eq!(
            serde_json::to_string(&RunStatus::PaymentRequired).unwrap(),
            r#""PAYMENT_REQUIRED""#
        );
        assert_eq!(
            serde_json::to_string(&RunStatus::Unknown("QUEUED".to_string())).unwrap(),
            r#""QUEUED""#
        );
    }
}
