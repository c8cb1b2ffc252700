//! Poll-until-done loop shared by every task kind
//!
//! A submitted task is polled sequentially: one status request, then a
//! sleep, until the service reports a terminal status or the attempt
//! budget runs out. Status request failures are returned as-is; the loop
//! never retries them.

use async_trait::async_trait;
use domain::{Run, RunId, RunStatus, TaskId, TaskKind};
#[cfg(test)]
use mockall::automock;
use tracing::{debug, instrument, warn};

use crate::config::PollSettings;
use crate::error::CambError;

/// Port for reading the current status of a submitted task
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskStatusSource: Send + Sync {
    /// Fetch the current run observation for a task
    async fn task_status(&self, kind: TaskKind, task_id: &TaskId) -> Result<Run, CambError>;
}

/// Poll a task until it reaches a terminal status
///
/// Returns the run id from the SUCCESS observation. Every status request
/// counts as one attempt; at most `settings.max_attempts` are made, with
/// `settings.interval` between consecutive requests.
///
/// # Errors
///
/// - `TaskTimedOut`, `TaskFailed`, `PaymentRequired` or `UnexpectedStatus`
///   for the matching terminal status
/// - `MissingRunId` if SUCCESS carries no run id
/// - `PollAttemptsExhausted` if no terminal status arrives in time
/// - whatever the status source returns, unchanged
#[instrument(skip_all, fields(kind = %kind, task_id = %task_id))]
pub async fn poll_until_complete<S>(
    source: &S,
    kind: TaskKind,
    task_id: &TaskId,
    settings: &PollSettings,
) -> Result<RunId, CambError>
where
    S: TaskStatusSource + ?Sized,
{
    let mut attempts: u32 = 0;

    while attempts < settings.max_attempts {
        if attempts > 0 {
            tokio::time::sleep(settings.interval).await;
        }
        attempts += 1;

        let run = source.task_status(kind, task_id).await?;
        debug!(attempt = attempts, status = %run.status, run_id = ?run.run_id, "Task status");

        if run.status.is_terminal() {
            return resolve_terminal(kind, task_id, run);
        }
    }

    warn!(attempts, "Task still pending, giving up");
    Err(CambError::PollAttemptsExhausted {
        kind,
        task_id: task_id.clone(),
        attempts,
    })
}

/// Turn a terminal run observation into the run id or a classified error
fn resolve_terminal(kind: TaskKind, task_id: &TaskId, run: Run) -> Result<RunId, CambError> {
    let task_id = task_id.clone();
    let run_id = run.run_id;

    match run.status {
        RunStatus::Success => run_id.ok_or(CambError::MissingRunId { kind, task_id }),
        RunStatus::Timeout => Err(CambError::TaskTimedOut {
            kind,
            task_id,
            run_id,
        }),
        RunStatus::Error => Err(CambError::TaskFailed {
            kind,
            task_id,
            run_id,
        }),
        RunStatus::PaymentRequired => Err(CambError::PaymentRequired {
            kind: Some(kind),
            task_id: Some(task_id),
            run_id,
        }),
        RunStatus::Unknown(status) => Err(CambError::UnexpectedStatus {
            kind,
            task_id,
            status,
        }),
        // Not terminal; the loop never hands it over
        RunStatus::Pending => Err(CambError::UnexpectedStatus {
            kind,
            task_id,
            status: RunStatus::Pending.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::Sequence;

    use super::*;

    fn settings(max_attempts: u32) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    fn task_id() -> TaskId {
        TaskId::new("task-42").unwrap()
    }

    fn pending_then(source: &mut MockTaskStatusSource, pending: usize, last: Run) {
        let mut seq = Sequence::new();
        if pending > 0 {
            source
                .expect_task_status()
                .times(pending)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(Run::pending()));
        }
        source
            .expect_task_status()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(last.clone()));
    }

    #[tokio::test]
    async fn returns_reported_run_id_on_success() {
        let mut source = MockTaskStatusSource::new();
        pending_then(
            &mut source,
            3,
            Run::new(RunStatus::Success, Some(RunId::new(8123))),
        );

        let run_id = poll_until_complete(&source, TaskKind::Dubbing, &task_id(), &settings(10))
            .await
            .unwrap();
        assert_eq!(run_id, RunId::new(8123));
    }

    #[tokio::test]
    async fn success_on_last_allowed_attempt() {
        let mut source = MockTaskStatusSource::new();
        pending_then(&mut source, 4, Run::new(RunStatus::Success, Some(RunId::new(5))));

        let result = poll_until_complete(&source, TaskKind::Tts, &task_id(), &settings(5)).await;
        assert_eq!(result.unwrap(), RunId::new(5));
    }

    #[tokio::test]
    async fn timeout_status_is_classified() {
        let mut source = MockTaskStatusSource::new();
        pending_then(&mut source, 1, Run::new(RunStatus::Timeout, Some(RunId::new(9))));

        let err = poll_until_complete(&source, TaskKind::Tts, &task_id(), &settings(10))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CambError::TaskTimedOut {
                kind: TaskKind::Tts,
                run_id: Some(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn error_status_is_classified() {
        let mut source = MockTaskStatusSource::new();
        pending_then(&mut source, 0, Run::new(RunStatus::Error, None));

        let err = poll_until_complete(&source, TaskKind::Translation, &task_id(), &settings(10))
            .await
            .unwrap_err();
        assert!(matches!(err, CambError::TaskFailed { run_id: None, .. }));
    }

    #[tokio::test]
    async fn payment_required_status_is_classified() {
        let mut source = MockTaskStatusSource::new();
        pending_then(&mut source, 2, Run::new(RunStatus::PaymentRequired, None));

        let err = poll_until_complete(&source, TaskKind::Dubbing, &task_id(), &settings(10))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CambError::PaymentRequired {
                kind: Some(TaskKind::Dubbing),
                task_id: Some(_),
                ..
            }
        ));
        assert!(err.is_task_outcome());
    }

    #[tokio::test]
    async fn unknown_status_is_terminal() {
        let mut source = MockTaskStatusSource::new();
        pending_then(
            &mut source,
            0,
            Run::new(RunStatus::Unknown("CANCELLED".to_string()), None),
        );

        let err = poll_until_complete(&source, TaskKind::Transcription, &task_id(), &settings(10))
            .await
            .unwrap_err();
        match err {
            CambError::UnexpectedStatus { status, .. } => assert_eq!(status, "CANCELLED"),
            other => unreachable!("Expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_without_run_id_fails() {
        let mut source = MockTaskStatusSource::new();
        pending_then(&mut source, 0, Run::new(RunStatus::Success, None));

        let err = poll_until_complete(&source, TaskKind::Tts, &task_id(), &settings(10))
            .await
            .unwrap_err();
        assert!(matches!(err, CambError::MissingRunId { .. }));
    }

    #[tokio::test]
    async fn exhausting_attempts_is_a_timeout() {
        let mut source = MockTaskStatusSource::new();
        source
            .expect_task_status()
            .times(3)
            .returning(|_, _| Ok(Run::pending()));

        let err = poll_until_complete(&source, TaskKind::Dubbing, &task_id(), &settings(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CambError::PollAttemptsExhausted { attempts: 3, .. }
        ));
    }

    #[tokio::test]
    async fn status_errors_are_not_retried() {
        let mut source = MockTaskStatusSource::new();
        source
            .expect_task_status()
            .times(1)
            .returning(|_, _| Err(CambError::ConnectionFailed("reset".to_string())));

        let err = poll_until_complete(&source, TaskKind::Tts, &task_id(), &settings(10))
            .await
            .unwrap_err();
        assert!(matches!(err, CambError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn passes_kind_and_task_id_through() {
        let mut source = MockTaskStatusSource::new();
        source
            .expect_task_status()
            .withf(|kind, id| *kind == TaskKind::Translation && id.as_str() == "task-42")
            .times(1)
            .returning(|_, _| Ok(Run::new(RunStatus::Success, Some(RunId::new(1)))));

        let result =
            poll_until_complete(&source, TaskKind::Translation, &task_id(), &settings(1)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn sleeps_between_polls_only() {
        let mut source = MockTaskStatusSource::new();
        pending_then(&mut source, 2, Run::new(RunStatus::Success, Some(RunId::new(3))));

        let pacing = PollSettings {
            interval: Duration::from_millis(20),
            max_attempts: 10,
        };
        let started = std::time::Instant::now();
        poll_until_complete(&source, TaskKind::Tts, &task_id(), &pacing)
            .await
            .unwrap();
        // Three status requests, two sleeps
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
