//! # Discovery Configuration System
//!
//! Environment-aware configuration loading for the discovery core.
//!
//! Configuration is resolved in layers: built-in defaults, then an optional
//! TOML file, then `DISCOVERY_`-prefixed environment variables. The
//! environment name comes from `DISCOVERY_ENV` (falling back to
//! `development`) and only affects default log verbosity and diagnostics.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DiscoveryError, Result};

/// Tuning knobs for a discovery cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Number of concurrent worker executions permitted.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Maximum number of nodes assigned to a single task.
    #[serde(default = "default_task_group_size")]
    pub task_group_size: usize,

    /// Per-task deadline in seconds; an elapsed deadline yields a failed
    /// result for that task only.
    #[serde(default = "default_task_timeout_seconds")]
    pub task_timeout_seconds: u64,

    /// Environment name, used for diagnostics and default log level.
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_worker_count() -> usize {
    4
}

fn default_task_group_size() -> usize {
    8
}

fn default_task_timeout_seconds() -> u64 {
    60
}

fn default_environment() -> String {
    detect_environment()
}

/// Detect the running environment from environment variables.
pub fn detect_environment() -> String {
    std::env::var("DISCOVERY_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            task_group_size: default_task_group_size(),
            task_timeout_seconds: default_task_timeout_seconds(),
            environment: default_environment(),
        }
    }
}

impl DiscoveryConfig {
    /// Load configuration from environment variables over built-in defaults.
    pub fn load() -> Result<Self> {
        Self::load_from_file(None::<&Path>)
    }

    /// Load configuration with an optional TOML file layered under
    /// `DISCOVERY_`-prefixed environment variables.
    ///
    /// Precedence, lowest to highest: defaults, file, environment.
    pub fn load_from_file(path: Option<impl AsRef<Path>>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            let path = path.as_ref();
            debug!("Loading discovery configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("DISCOVERY").try_parsing(true))
            .build()
            .map_err(|e| DiscoveryError::Configuration(e.to_string()))?;

        let config: DiscoveryConfig = settings
            .try_deserialize()
            .map_err(|e| DiscoveryError::Configuration(e.to_string()))?;

        config.validate()?;

        debug!(
            worker_count = config.worker_count,
            task_group_size = config.task_group_size,
            task_timeout_seconds = config.task_timeout_seconds,
            environment = %config.environment,
            "Discovery configuration loaded"
        );

        Ok(config)
    }

    /// Validate configuration values, rejecting anything the dispatcher
    /// cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(DiscoveryError::Configuration(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.task_group_size == 0 {
            return Err(DiscoveryError::Configuration(
                "task_group_size must be at least 1".to_string(),
            ));
        }
        if self.task_timeout_seconds == 0 {
            return Err(DiscoveryError::Configuration(
                "task_timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-task deadline as a [`Duration`].
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_seconds)
    }
}
