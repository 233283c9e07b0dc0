//! # Error Types
//!
//! Structured error handling for the discovery core. Worker probe failures
//! are opaque to this crate and travel inside [`DiscoveryError::WorkerFailure`]
//! as an [`anyhow::Error`]; they are captured in a failed `TaskResult` rather
//! than raised across the gather boundary.

use std::time::Duration;

/// Errors produced while dispatching discovery tasks or validating
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A worker's probe logic returned an error for its assigned task.
    #[error("worker {worker_id} failed: {source}")]
    WorkerFailure {
        worker_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// A worker did not complete its task within the configured deadline.
    #[error("task {task} timed out after {elapsed:?}")]
    TaskTimeout { task: String, elapsed: Duration },

    /// A worker execution panicked or its join handle was aborted.
    #[error("task {task} aborted: {reason}")]
    TaskAborted { task: String, reason: String },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The dispatcher was constructed with an empty worker set.
    #[error("dispatch error: {0}")]
    Dispatch(String),
}

impl DiscoveryError {
    /// Wrap an opaque probe failure for the given worker.
    pub fn worker_failure(worker_id: impl Into<String>, source: anyhow::Error) -> Self {
        DiscoveryError::WorkerFailure {
            worker_id: worker_id.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_failure_renders_cause() {
        let err = DiscoveryError::worker_failure("abc12", anyhow::anyhow!("kubelet unreachable"));
        assert_eq!(err.to_string(), "worker abc12 failed: kubelet unreachable");
    }

    #[test]
    fn timeout_mentions_task_and_elapsed() {
        let err = DiscoveryError::TaskTimeout {
            task: "abc12".to_string(),
            elapsed: Duration::from_secs(60),
        };
        assert!(err.to_string().contains("abc12"));
        assert!(err.to_string().contains("60s"));
    }
}
