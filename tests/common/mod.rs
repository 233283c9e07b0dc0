//! Shared builders and stub workers for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use discovery_core::error::{DiscoveryError, Result};
use discovery_core::models::{ClusterSummary, EntityDto, EntityType, KubeNode, KubePod};
use discovery_core::task::{Task, TaskResult};
use discovery_core::DiscoveryWorker;

pub fn test_node(name: &str) -> KubeNode {
    KubeNode::new(name, format!("uid-{name}"))
}

pub fn test_nodes(count: usize) -> Vec<KubeNode> {
    (1..=count).map(|i| test_node(&format!("n{i}"))).collect()
}

pub fn test_pod(name: &str, node_name: &str) -> KubePod {
    let mut pod = KubePod::new(name, "default", format!("uid-{name}"));
    pod.node_name = node_name.to_string();
    pod
}

pub fn test_summary(nodes: &[KubeNode], pods: &[KubePod]) -> Arc<ClusterSummary> {
    ClusterSummary::build("cluster-1", "test-cluster", nodes, pods)
}

pub fn node_dto(node: &KubeNode) -> EntityDto {
    EntityDto::new(
        EntityType::Node,
        &node.uid,
        &node.name,
        serde_json::json!({ "name": node.name }),
    )
}

/// Emits one entity descriptor per assigned node.
pub struct PerNodeWorker;

#[async_trait]
impl DiscoveryWorker for PerNodeWorker {
    async fn discover(&self, task: &Task) -> Result<TaskResult> {
        let content: Vec<EntityDto> = task.node_list().iter().map(node_dto).collect();
        Ok(TaskResult::succeeded(task.uid()).with_content(content))
    }
}

/// Fails its Nth invocation (1-based), succeeding otherwise like
/// [`PerNodeWorker`].
pub struct FlakyWorker {
    calls: AtomicUsize,
    fail_on: usize,
}

impl FlakyWorker {
    pub fn failing_on(fail_on: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on,
        }
    }
}

#[async_trait]
impl DiscoveryWorker for FlakyWorker {
    async fn discover(&self, task: &Task) -> Result<TaskResult> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(DiscoveryError::worker_failure(
                task.uid(),
                anyhow::anyhow!("node probe lost connection"),
            ));
        }
        let content: Vec<EntityDto> = task.node_list().iter().map(node_dto).collect();
        Ok(TaskResult::succeeded(task.uid()).with_content(content))
    }
}
