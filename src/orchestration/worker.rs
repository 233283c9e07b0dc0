//! # Discovery Worker Contract
//!
//! User-supplied probe logic implements [`DiscoveryWorker`]; the dispatcher
//! wraps every invocation with [`execute_guarded`] so a processing failure
//! can never escape the worker boundary: the orchestrator always receives
//! exactly one result per task.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{DiscoveryError, Result};
use crate::logging::log_worker_operation;
use crate::task::{Task, TaskResult};

/// An independent concurrent executor that consumes one [`Task`] and
/// produces one [`TaskResult`].
///
/// Implementations hold the probe logic that turns the task's cluster
/// objects into discovery output. They are shared across concurrent
/// executions, so any internal state must be `Sync`.
///
/// Returning `Err` is equivalent to returning a failed result; the pool
/// converts it. Implementations should set the result's worker id to the
/// task uid (`TaskResult::succeeded(task.uid())`) so the orchestrator can
/// correlate results with tasks.
#[async_trait]
pub trait DiscoveryWorker: Send + Sync {
    /// Execute discovery against the task's assigned objects.
    async fn discover(&self, task: &Task) -> Result<TaskResult>;
}

/// Run one task through a worker, converting every failure mode into a
/// failed [`TaskResult`] so exactly one result comes back per task.
///
/// A `deadline` of `None` disables the timeout.
pub(crate) async fn execute_guarded(
    worker: Arc<dyn DiscoveryWorker>,
    task: Task,
    deadline: Option<Duration>,
) -> TaskResult {
    let task_uid = task.uid().to_string();
    let started = Instant::now();
    debug!(task = %task, "dispatching task to worker");

    let outcome = match deadline {
        Some(deadline) => match tokio::time::timeout(deadline, worker.discover(&task)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(DiscoveryError::TaskTimeout {
                task: task_uid.clone(),
                elapsed: deadline,
            }),
        },
        None => worker.discover(&task).await,
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(result) => {
            if result.worker_id() != task_uid {
                warn!(
                    task_uid = %task_uid,
                    worker_id = %result.worker_id(),
                    "result worker id does not match task uid"
                );
            }
            log_worker_operation(
                "discover",
                result.worker_id(),
                &result.state().to_string(),
                Some(elapsed_ms),
                None,
            );
            result
        }
        Err(err) => {
            log_worker_operation(
                "discover",
                &task_uid,
                "Failed",
                Some(elapsed_ms),
                Some(&err.to_string()),
            );
            TaskResult::failed(task_uid, err)
        }
    }
}
