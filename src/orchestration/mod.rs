//! # Discovery Orchestration
//!
//! The scatter/gather half of the discovery core: partitioning a cycle's
//! cluster objects into tasks, executing them across a bounded worker pool,
//! and merging the per-task results into a cluster-wide aggregate.
//!
//! ## Components
//!
//! - [`DiscoveryWorker`] - trait implemented by user-supplied probe logic
//! - [`TaskDispatcher`] - partitions work, runs the pool, gathers results
//! - [`ResultCollector`] / [`DiscoveryAggregate`] - order-insensitive merge

pub mod collector;
pub mod dispatcher;
pub mod worker;

pub use collector::{DiscoveryAggregate, ResultCollector, TaskFailure};
pub use dispatcher::{partition_tasks, ExecutionState, PoolStats, TaskDispatcher};
pub use worker::DiscoveryWorker;
