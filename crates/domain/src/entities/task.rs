//! Task and run entities

use serde::{Deserialize, Serialize};

use crate::value_objects::{RunId, RunStatus, TaskId, TaskKind};

/// A job submitted to the service, awaiting processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier returned by the create endpoint
    pub task_id: TaskId,
    /// Which workflow the task belongs to
    pub kind: TaskKind,
}

impl Task {
    /// Create a new task handle
    #[must_use]
    pub const fn new(task_id: TaskId, kind: TaskKind) -> Self {
        Self { task_id, kind }
    }
}

/// One observation of a task's run, as returned by a status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Current status
    pub status: RunStatus,
    /// Run identifier; absent until the service assigns one
    #[serde(default)]
    pub run_id: Option<RunId>,
}

impl Run {
    /// Create a pending run without an identifier
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            status: RunStatus::Pending,
            run_id: None,
        }
    }

    /// Create a run observation
    #[must_use]
    pub const fn new(status: RunStatus, run_id: Option<RunId>) -> Self {
        Self { status, run_id }
    }
}
