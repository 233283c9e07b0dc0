//! # Task Dispatcher
//!
//! The scatter half of the pipeline: partitions a cycle's cluster objects
//! into tasks and runs them across the worker set with bounded concurrency,
//! gathering results in arrival order.
//!
//! Each task is fully configured before hand-off and moved into its worker
//! execution, so workers never observe a task under mutation. Exactly one
//! [`TaskResult`] per task reaches the collector: worker errors, timeouts,
//! and panics are all converted into failed results.

use std::sync::Arc;

use dashmap::DashMap;
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::RwLock;
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::logging::log_task_operation;
use crate::models::{
    ClusterSummary, KubeNode, KubePersistentVolume, KubePersistentVolumeClaim, KubePod,
};
use crate::orchestration::collector::{DiscoveryAggregate, ResultCollector};
use crate::orchestration::worker::{execute_guarded, DiscoveryWorker};
use crate::task::{Task, TaskResult, TaskResultState};

/// Counters for one dispatcher's lifetime, updated concurrently by worker
/// executions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub tasks_dispatched: usize,
    pub tasks_succeeded: usize,
    pub tasks_failed: usize,
}

/// Where a dispatched task currently is, keyed by task uid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Running,
    Completed(TaskResultState),
}

/// Partition a cycle's cluster objects into tasks of at most `group_size`
/// nodes, preserving node order.
///
/// Pods are routed to the task owning their node; pods with an unknown or
/// empty node name ride with the first task. Persistent volumes and claims
/// are cluster-scoped and attached to the first task only, so the aggregate
/// sees each exactly once. Every task receives the shared summary.
pub fn partition_tasks(
    group_size: usize,
    nodes: Vec<KubeNode>,
    pods: Vec<KubePod>,
    pvs: Vec<KubePersistentVolume>,
    pvcs: Vec<KubePersistentVolumeClaim>,
    cluster: Arc<ClusterSummary>,
) -> Vec<Task> {
    let group_size = group_size.max(1);
    let node_groups: Vec<Vec<KubeNode>> = nodes
        .chunks(group_size)
        .map(<[KubeNode]>::to_vec)
        .collect();
    if node_groups.is_empty() {
        return Vec::new();
    }

    let mut pod_groups: Vec<Vec<KubePod>> = vec![Vec::new(); node_groups.len()];
    for pod in pods {
        let owner = node_groups
            .iter()
            .position(|group| group.iter().any(|node| node.name == pod.node_name))
            .unwrap_or(0);
        pod_groups[owner].push(pod);
    }

    let mut tasks = Vec::with_capacity(node_groups.len());
    for (index, (node_group, pod_group)) in
        node_groups.into_iter().zip(pod_groups).enumerate()
    {
        let mut task = Task::new()
            .with_nodes(node_group)
            .with_pods(pod_group)
            .with_cluster(cluster.clone());
        if index == 0 {
            task = task.with_pvs(pvs.clone()).with_pvcs(pvcs.clone());
        }
        log_task_operation("partition", task.uid(), task.node_list().len(), "created", None);
        tasks.push(task);
    }
    tasks
}

/// Scatters tasks across a worker set and gathers their results.
///
/// Worker selection is round-robin; concurrency is bounded by
/// `config.worker_count` semaphore permits, so a worker set smaller than the
/// task count is reused as permits free up.
pub struct TaskDispatcher {
    config: DiscoveryConfig,
    workers: Vec<Arc<dyn DiscoveryWorker>>,
    stats: Arc<RwLock<PoolStats>>,
    executions: Arc<DashMap<String, ExecutionState>>,
}

impl TaskDispatcher {
    pub fn new(config: DiscoveryConfig, workers: Vec<Arc<dyn DiscoveryWorker>>) -> Self {
        Self {
            config,
            workers,
            stats: Arc::new(RwLock::new(PoolStats::default())),
            executions: Arc::new(DashMap::new()),
        }
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        *self.stats.read()
    }

    /// Current execution state of a dispatched task, if known.
    pub fn execution_state(&self, task_uid: &str) -> Option<ExecutionState> {
        self.executions.get(task_uid).map(|entry| *entry.value())
    }

    /// Run one full discovery cycle: partition, scatter, gather.
    ///
    /// Results are merged in completion order; a failed task contributes its
    /// recorded failure (and any partial output) without disturbing sibling
    /// tasks.
    #[instrument(skip_all, fields(node_count = nodes.len(), pod_count = pods.len()))]
    pub async fn dispatch(
        &self,
        nodes: Vec<KubeNode>,
        pods: Vec<KubePod>,
        pvs: Vec<KubePersistentVolume>,
        pvcs: Vec<KubePersistentVolumeClaim>,
        cluster: Arc<ClusterSummary>,
    ) -> Result<DiscoveryAggregate> {
        self.config.validate()?;
        if self.workers.is_empty() {
            return Err(DiscoveryError::Dispatch(
                "cannot dispatch with an empty worker set".to_string(),
            ));
        }

        let tasks = partition_tasks(
            self.config.task_group_size,
            nodes,
            pods,
            pvs,
            pvcs,
            cluster,
        );
        info!(
            task_count = tasks.len(),
            worker_count = self.config.worker_count,
            "🚀 DISPATCH: Scattering discovery tasks"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.worker_count));
        let deadline = self.config.task_timeout();
        let mut in_flight = FuturesUnordered::new();

        for (index, task) in tasks.into_iter().enumerate() {
            let task_uid = task.uid().to_string();
            let worker = self.workers[index % self.workers.len()].clone();
            let semaphore = semaphore.clone();
            let stats = self.stats.clone();
            let registry = self.executions.clone();

            self.stats.write().tasks_dispatched += 1;
            registry.insert(task_uid.clone(), ExecutionState::Running);

            let spawn_uid = task_uid.clone();
            let handle = tokio::spawn(async move {
                // Holding the permit for the whole execution is what bounds
                // pool concurrency.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("dispatcher semaphore closed");
                let result = execute_guarded(worker, task, Some(deadline)).await;

                let mut stats = stats.write();
                match result.state() {
                    TaskResultState::Succeeded => stats.tasks_succeeded += 1,
                    TaskResultState::Failed => stats.tasks_failed += 1,
                }
                drop(stats);
                registry.insert(spawn_uid, ExecutionState::Completed(result.state()));
                result
            });

            in_flight.push(async move {
                match handle.await {
                    Ok(result) => result,
                    // A panicking worker still yields exactly one failed
                    // result for its task.
                    Err(join_err) => TaskResult::failed(
                        task_uid.clone(),
                        DiscoveryError::TaskAborted {
                            task: task_uid,
                            reason: join_err.to_string(),
                        },
                    ),
                }
            });
        }

        let mut collector = ResultCollector::new();
        while let Some(result) = in_flight.next().await {
            if result.is_failed() {
                warn!(worker_id = %result.worker_id(), "gathered a failed task result");
            }
            collector.collect(result);
        }

        Ok(collector.finish())
    }
}
