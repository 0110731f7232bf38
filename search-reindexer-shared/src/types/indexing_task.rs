//! Asynchronous indexing task types.
//!
//! The search engine accepts writes by queueing a task and returning its id.
//! These types describe the handle and what a status query reports about it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a task queued by the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle {
    pub uid: u64,
}

impl TaskHandle {
    pub fn new(uid: u64) -> Self {
        Self { uid }
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {}", self.uid)
    }
}

/// Lifecycle state of an indexing task.
///
/// `Enqueued -> Processing* -> Succeeded | Failed | Canceled`. `Processing`
/// may never be observed when the task completes between two polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Enqueued,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl TaskStatus {
    /// Whether the task will not change state any more.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::Canceled
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskStatus::Enqueued => "enqueued",
            TaskStatus::Processing => "processing",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::Canceled => "canceled",
        };
        f.write_str(name)
    }
}

/// One observation of a task's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub uid: u64,
    pub status: TaskStatus,
    /// Engine-reported failure detail, present when `status` is `Failed`.
    pub error: Option<String>,
}

impl TaskSnapshot {
    pub fn new(uid: u64, status: TaskStatus) -> Self {
        Self {
            uid,
            status,
            error: None,
        }
    }

    pub fn failed(uid: u64, detail: impl Into<String>) -> Self {
        Self {
            uid,
            status: TaskStatus::Failed,
            error: Some(detail.into()),
        }
    }
}
