#![allow(clippy::doc_markdown)] // Allow technical terms like Kubernetes, EntityDTO in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Discovery Core Rust
//!
//! High-performance Rust core for parallel cluster-resource discovery.
//!
//! ## Overview
//!
//! Discovery Core implements a scatter/gather work-unit protocol: a set of
//! cluster nodes (with their associated pods, persistent volumes, and claims)
//! is partitioned into independently dispatchable units of work ([`Task`]s),
//! executed concurrently across a worker pool, and the heterogeneous
//! per-category results are gathered into a single coherent
//! [`DiscoveryAggregate`] that downstream processing consumes without knowing
//! how many workers ran or in what order they finished.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   scatter    ┌──────────────┐   gather    ┌──────────────┐
//! │ Partitioner  │─────────────▶│ Worker Pool  │────────────▶│ Result       │
//! │ (nodes→tasks)│  Task × N    │ (bounded)    │ TaskResult  │ Collector    │
//! └──────────────┘              └──────────────┘    × N      └──────────────┘
//! ```
//!
//! Each [`Task`] is fully configured by the dispatcher before hand-off and is
//! read-only afterwards; each worker execution produces exactly one
//! [`TaskResult`], success or failure. The collector merges results in any
//! arrival order.
//!
//! ## Module Organization
//!
//! - [`task`] - Task and TaskResult envelope (the scatter/gather contract)
//! - [`models`] - Cluster object descriptors and discovery output types
//! - [`orchestration`] - Worker trait, dispatcher, and result collector
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging initialization and helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use discovery_core::config::DiscoveryConfig;
//! use discovery_core::models::{ClusterSummary, KubeNode};
//! use discovery_core::orchestration::{DiscoveryWorker, TaskDispatcher};
//! use discovery_core::task::{Task, TaskResult};
//! use discovery_core::error::Result;
//!
//! struct NodeProbe;
//!
//! #[async_trait::async_trait]
//! impl DiscoveryWorker for NodeProbe {
//!     async fn discover(&self, task: &Task) -> Result<TaskResult> {
//!         // probe logic lives here; attach whatever categories it produced
//!         Ok(TaskResult::succeeded(task.uid()))
//!     }
//! }
//!
//! # async fn example(nodes: Vec<KubeNode>, summary: Arc<ClusterSummary>) -> Result<()> {
//! let config = DiscoveryConfig::default();
//! let workers: Vec<Arc<dyn DiscoveryWorker>> = vec![Arc::new(NodeProbe)];
//! let dispatcher = TaskDispatcher::new(config, workers);
//! let aggregate = dispatcher
//!     .dispatch(nodes, Vec::new(), Vec::new(), Vec::new(), summary)
//!     .await?;
//! println!("discovered {} entities", aggregate.content.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod task;

pub use config::DiscoveryConfig;
pub use error::{DiscoveryError, Result};
pub use models::{
    ClusterSummary, ContainerSpecMetrics, EntityDto, EntityGroup, EntityType, KubeController,
    KubeNode, KubePersistentVolume, KubePersistentVolumeClaim, KubePod, NamespaceMetrics,
    PodVolumeMetrics, ResourceType,
};
pub use orchestration::{
    DiscoveryAggregate, DiscoveryWorker, PoolStats, ResultCollector, TaskDispatcher,
};
pub use task::{Task, TaskResult, TaskResultState};
