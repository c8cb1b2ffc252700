//! Camb AI error types

use domain::{RunId, TaskId, TaskKind};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the Camb AI service
#[derive(Debug, Error)]
pub enum CambError {
    /// No API key in configuration or environment
    #[error(
        "All methods require a Camb AI API key. Set CAMB_API_KEY or see https://studio.camb.ai for how to retrieve one"
    )]
    ApiKeyMissing,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied request parameters are invalid
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// API key rejected
    #[error("Authentication failed (HTTP {status})")]
    Unauthorized {
        /// Status code returned by the service
        status: u16,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Service is temporarily unavailable
    #[error("Service unavailable: HTTP {status}")]
    ServiceUnavailable {
        /// Status code returned by the service
        status: u16,
    },

    /// Any other non-success HTTP status
    #[error("Request failed: HTTP {status}: {body}")]
    RequestFailed {
        /// Status code returned by the service
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// Failed to parse response from the service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The account has no credit left, either on submission or while the task ran
    #[error("{} payment required{}", kind.map_or("Camb AI", |k| k.label()), describe_task(task_id.as_ref(), *run_id))]
    PaymentRequired {
        /// Task kind, when the failure came from a polled task
        kind: Option<TaskKind>,
        /// Task id, when the failure came from a polled task
        task_id: Option<TaskId>,
        /// Run id reported with the status, if any
        run_id: Option<RunId>,
    },

    /// Task reached the TIMEOUT status on the service side
    #[error("{kind} task {task_id} timed out (run id: {})", run_label(*run_id))]
    TaskTimedOut {
        /// Task kind
        kind: TaskKind,
        /// Task id
        task_id: TaskId,
        /// Run id reported with the status, if any
        run_id: Option<RunId>,
    },

    /// Task reached the ERROR status on the service side
    #[error("{kind} task {task_id} failed (run id: {})", run_label(*run_id))]
    TaskFailed {
        /// Task kind
        kind: TaskKind,
        /// Task id
        task_id: TaskId,
        /// Run id reported with the status, if any
        run_id: Option<RunId>,
    },

    /// Task reached a status string the client does not know
    #[error("{kind} task {task_id} reported unexpected status {status}")]
    UnexpectedStatus {
        /// Task kind
        kind: TaskKind,
        /// Task id
        task_id: TaskId,
        /// Raw status string
        status: String,
    },

    /// Task succeeded but the service did not report a run id
    #[error("{kind} task {task_id} succeeded without a run id")]
    MissingRunId {
        /// Task kind
        kind: TaskKind,
        /// Task id
        task_id: TaskId,
    },

    /// Polling stopped before the task reached a terminal status
    #[error("{kind} task {task_id} still pending after {attempts} status checks")]
    PollAttemptsExhausted {
        /// Task kind
        kind: TaskKind,
        /// Task id
        task_id: TaskId,
        /// Number of status requests made
        attempts: u32,
    },

    /// Writing a result to disk failed
    #[error("I/O error: {0}")]
    Io(String),
}

fn run_label(run_id: Option<RunId>) -> String {
    run_id.map_or_else(|| "none".to_string(), |id| id.to_string())
}

fn describe_task(task_id: Option<&TaskId>, run_id: Option<RunId>) -> String {
    task_id.map_or_else(String::new, |id| {
        format!(" for task {id} (run id: {})", run_label(run_id))
    })
}

impl CambError {
    /// Map a non-success HTTP status to an error
    #[must_use]
    pub fn from_status(status: StatusCode, retry_after: Option<u64>, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized {
                status: status.as_u16(),
            },
            StatusCode::PAYMENT_REQUIRED => Self::PaymentRequired {
                kind: None,
                task_id: None,
                run_id: None,
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded {
                retry_after_secs: retry_after,
            },
            s if s.is_server_error() => Self::ServiceUnavailable {
                status: status.as_u16(),
            },
            _ => Self::RequestFailed {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Map a transport-level reqwest error
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }

    /// Returns true if this error is retryable
    ///
    /// The client never retries on its own; this is advice for callers.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
                | Self::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error describes the outcome of a polled task
    #[must_use]
    pub const fn is_task_outcome(&self) -> bool {
        matches!(
            self,
            Self::TaskTimedOut { .. }
                | Self::TaskFailed { .. }
                | Self::UnexpectedStatus { .. }
                | Self::MissingRunId { .. }
                | Self::PollAttemptsExhausted { .. }
                | Self::PaymentRequired {
                    task_id: Some(_),
                    ..
                }
        )
    }
}

impl From<std::io::Error> for CambError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<domain::DomainError> for CambError {
    fn from(err: domain::DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_id() -> TaskId {
        TaskId::new("task-1").unwrap()
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            CambError::from_status(StatusCode::UNAUTHORIZED, None, String::new()),
            CambError::Unauthorized { status: 401 }
        ));
        assert!(matches!(
            CambError::from_status(StatusCode::FORBIDDEN, None, String::new()),
            CambError::Unauthorized { status: 403 }
        ));
        assert!(matches!(
            CambError::from_status(StatusCode::PAYMENT_REQUIRED, None, String::new()),
            CambError::PaymentRequired { task_id: None, .. }
        ));
        assert!(matches!(
            CambError::from_status(StatusCode::TOO_MANY_REQUESTS, Some(30), String::new()),
            CambError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
        ));
        assert!(matches!(
            CambError::from_status(StatusCode::BAD_GATEWAY, None, String::new()),
            CambError::ServiceUnavailable { status: 502 }
        ));
        assert!(matches!(
            CambError::from_status(StatusCode::UNPROCESSABLE_ENTITY, None, "bad".to_string()),
            CambError::RequestFailed { status: 422, .. }
        ));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(CambError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(CambError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(CambError::ServiceUnavailable { status: 503 }.is_retryable());
        assert!(
            CambError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!CambError::ApiKeyMissing.is_retryable());
        assert!(!CambError::InvalidInput("test".to_string()).is_retryable());
        assert!(!CambError::ParseError("test".to_string()).is_retryable());
        assert!(!CambError::Unauthorized { status: 401 }.is_retryable());
        assert!(
            !CambError::TaskFailed {
                kind: TaskKind::Dubbing,
                task_id: task_id(),
                run_id: None,
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_task_outcome_errors() {
        assert!(
            CambError::PaymentRequired {
                kind: Some(TaskKind::Tts),
                task_id: Some(task_id()),
                run_id: None,
            }
            .is_task_outcome()
        );
        assert!(
            !CambError::PaymentRequired {
                kind: None,
                task_id: None,
                run_id: None,
            }
            .is_task_outcome()
        );
        assert!(!CambError::ConnectionFailed("refused".to_string()).is_task_outcome());
    }

    #[test]
    fn test_error_display() {
        let err = CambError::TaskFailed {
            kind: TaskKind::Dubbing,
            task_id: task_id(),
            run_id: Some(RunId::new(77)),
        };
        assert_eq!(err.to_string(), "Dubbing task task-1 failed (run id: 77)");

        let err = CambError::TaskTimedOut {
            kind: TaskKind::Tts,
            task_id: task_id(),
            run_id: None,
        };
        assert_eq!(err.to_string(), "TTS task task-1 timed out (run id: none)");

        let err = CambError::PaymentRequired {
            kind: Some(TaskKind::Translation),
            task_id: Some(task_id()),
            run_id: None,
        };
        assert_eq!(
            err.to_string(),
            "Translation payment required for task task-1 (run id: none)"
        );

        let err = CambError::PaymentRequired {
            kind: None,
            task_id: None,
            run_id: None,
        };
        assert_eq!(err.to_string(), "Camb AI payment required");

        let err = CambError::PollAttemptsExhausted {
            kind: TaskKind::Transcription,
            task_id: task_id(),
            attempts: 5,
        };
        assert!(err.to_string().contains("after 5 status checks"));

        assert!(CambError::ApiKeyMissing.to_string().contains("CAMB_API_KEY"));
    }
}
