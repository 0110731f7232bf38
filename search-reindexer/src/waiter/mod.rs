//! Completion waiter for asynchronous indexing tasks.
//!
//! Polls the task status with exponential backoff until the engine reports a
//! terminal state, or until the [`WaitPolicy`] bounds are exhausted.

mod clock;

pub use clock::{Clock, TokioClock};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use crate::errors::WaitError;
use search_reindexer_repository::SearchIndexProvider;
use search_reindexer_shared::{TaskHandle, TaskSnapshot, TaskStatus};

/// Polling schedule and bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Delay before the second poll. The first poll is immediate.
    pub initial_interval: Duration,
    pub backoff_factor: u32,
    pub max_interval: Duration,
    /// Deadline measured from the first poll. `None` waits forever.
    pub max_wait: Option<Duration>,
    /// Maximum number of status queries. `None` is unbounded.
    pub max_polls: Option<u32>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(50),
            backoff_factor: 2,
            max_interval: Duration::from_secs(1),
            max_wait: Some(Duration::from_secs(300)),
            max_polls: None,
        }
    }
}

impl WaitPolicy {
    fn next_interval(&self, current: Duration) -> Duration {
        current
            .saturating_mul(self.backoff_factor.max(1))
            .min(self.max_interval)
    }
}

/// A task that reached `succeeded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalStatus {
    pub snapshot: TaskSnapshot,
    /// Number of status queries issued.
    pub polls: u32,
    pub elapsed: Duration,
}

/// Blocks the pipeline until an indexing task is terminal.
pub struct CompletionWaiter {
    provider: Arc<dyn SearchIndexProvider>,
    clock: Arc<dyn Clock>,
    policy: WaitPolicy,
}

impl CompletionWaiter {
    pub fn new(
        provider: Arc<dyn SearchIndexProvider>,
        clock: Arc<dyn Clock>,
        policy: WaitPolicy,
    ) -> Self {
        Self {
            provider,
            clock,
            policy,
        }
    }

    /// Wait until `task` is terminal.
    ///
    /// # Returns
    ///
    /// * `Ok(TerminalStatus)` - The task succeeded
    /// * `Err(WaitError::Failed)` - The task failed or was canceled, with the engine's detail
    /// * `Err(WaitError::Timeout)` - `max_wait` or `max_polls` was reached first, including
    ///   while a status query was still outstanding
    /// * `Err(WaitError::Query)` - A status query failed; it is not retried
    #[instrument(skip(self), fields(task_uid = task.uid))]
    pub async fn wait_for(&self, task: TaskHandle) -> Result<TerminalStatus, WaitError> {
        let started = self.clock.now();
        let mut interval = self.policy.initial_interval;
        let mut polls: u32 = 0;
        let mut last_status: Option<TaskStatus> = None;

        loop {
            let answer = self.query_within_deadline(task, started).await?;
            polls += 1;
            let elapsed = self.clock.now().saturating_duration_since(started);

            let Some(snapshot) = answer else {
                warn!(polls, elapsed = ?elapsed, "Task wait deadline reached during status query");
                return Err(WaitError::Timeout {
                    task_uid: task.uid,
                    polls,
                    elapsed,
                });
            };

            if last_status != Some(snapshot.status) {
                match last_status {
                    Some(previous) => info!(
                        from = %previous,
                        to = %snapshot.status,
                        polls,
                        "Task status changed"
                    ),
                    None => debug!(status = %snapshot.status, "First task status observed"),
                }
                last_status = Some(snapshot.status);
            }

            if snapshot.status.is_terminal() {
                return match snapshot.status {
                    TaskStatus::Succeeded => {
                        info!(polls, elapsed = ?elapsed, "Task succeeded");
                        Ok(TerminalStatus {
                            snapshot,
                            polls,
                            elapsed,
                        })
                    }
                    TaskStatus::Canceled => Err(WaitError::Failed {
                        task_uid: task.uid,
                        detail: "task was canceled".to_string(),
                    }),
                    _ => Err(WaitError::Failed {
                        task_uid: task.uid,
                        detail: snapshot
                            .error
                            .unwrap_or_else(|| "no error detail reported".to_string()),
                    }),
                };
            }

            if self.policy.max_polls.is_some_and(|max| polls >= max) {
                warn!(polls, "Task poll limit reached");
                return Err(WaitError::Timeout {
                    task_uid: task.uid,
                    polls,
                    elapsed,
                });
            }

            let delay = match self.policy.max_wait {
                Some(max_wait) => {
                    let remaining = max_wait.saturating_sub(elapsed);
                    if remaining.is_zero() {
                        warn!(polls, elapsed = ?elapsed, "Task wait deadline reached");
                        return Err(WaitError::Timeout {
                            task_uid: task.uid,
                            polls,
                            elapsed,
                        });
                    }
                    interval.min(remaining)
                }
                None => interval,
            };

            self.clock.sleep(delay).await;
            interval = self.policy.next_interval(interval);
        }
    }
    /// Query the task status, giving up once `max_wait` has passed since `started`.
    ///
    /// Returns `Ok(None)` when the deadline expires before the engine answers.
    async fn query_within_deadline(
        &self,
        task: TaskHandle,
        started: Instant,
    ) -> Result<Option<TaskSnapshot>, WaitError> {
        let Some(max_wait) = self.policy.max_wait else {
            return Ok(Some(self.provider.get_task(task).await?));
        };
        let remaining =
            max_wait.saturating_sub(self.clock.now().saturating_duration_since(started));

        tokio::select! {
            biased;
            result = self.provider.get_task(task) => Ok(Some(result?)),
            _ = self.clock.sleep(remaining) => Ok(None),
        }
    }
}
