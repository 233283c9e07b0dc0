//! # Cluster Object Descriptors
//!
//! Narrow views of the cluster objects a discovery cycle partitions into
//! tasks. These are supplied by the cluster-object provider; the discovery
//! core never fetches or mutates them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compute capacity of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeCapacity {
    pub cpu_millicores: u64,
    pub memory_kb: u64,
}

/// A cluster node assigned to a discovery task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeNode {
    pub name: String,
    pub uid: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub capacity: NodeCapacity,
}

impl KubeNode {
    pub fn new(name: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: uid.into(),
            labels: HashMap::new(),
            capacity: NodeCapacity::default(),
        }
    }
}

/// A pod associated with a discovery task, routed by its node assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubePod {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    /// Name of the node the pod is scheduled on; empty when unscheduled.
    #[serde(default)]
    pub node_name: String,
    #[serde(default)]
    pub container_names: Vec<String>,
}

impl KubePod {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            uid: uid.into(),
            node_name: String::new(),
            container_names: Vec::new(),
        }
    }

    /// Qualified `namespace/name` key used in summaries and metric records.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// A cluster-scoped persistent volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubePersistentVolume {
    pub name: String,
    pub uid: String,
    pub capacity_bytes: u64,
    #[serde(default)]
    pub storage_class: String,
}

/// A namespaced claim bound (or binding) to a persistent volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubePersistentVolumeClaim {
    pub name: String,
    pub namespace: String,
    pub uid: String,
    /// Name of the bound volume; empty while pending.
    #[serde(default)]
    pub volume_name: String,
}

/// Cluster-wide summary data computed once per discovery cycle and shared
/// read-only by every task.
///
/// Published as an [`Arc`] snapshot: the builder finishes it before the first
/// task is constructed, and nothing in this crate mutates it afterwards, so
/// concurrent reads need no synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster_id: String,
    pub cluster_name: String,
    pub node_count: usize,
    pub pod_count: usize,
    pub namespace_count: usize,
    /// Pod qualified names indexed by the node they run on.
    #[serde(default)]
    pub pods_by_node: HashMap<String, Vec<String>>,
    pub built_at: DateTime<Utc>,
}

impl ClusterSummary {
    /// Build a summary snapshot from the cycle's node and pod sets.
    pub fn build(
        cluster_id: impl Into<String>,
        cluster_name: impl Into<String>,
        nodes: &[KubeNode],
        pods: &[KubePod],
    ) -> Arc<Self> {
        let mut pods_by_node: HashMap<String, Vec<String>> = HashMap::new();
        let mut namespaces: Vec<&str> = Vec::new();
        for pod in pods {
            if !pod.node_name.is_empty() {
                pods_by_node
                    .entry(pod.node_name.clone())
                    .or_default()
                    .push(pod.qualified_name());
            }
            if !namespaces.contains(&pod.namespace.as_str()) {
                namespaces.push(&pod.namespace);
            }
        }

        Arc::new(Self {
            cluster_id: cluster_id.into(),
            cluster_name: cluster_name.into(),
            node_count: nodes.len(),
            pod_count: pods.len(),
            namespace_count: namespaces.len(),
            pods_by_node,
            built_at: Utc::now(),
        })
    }
}
