//! # Discovery Metric Records
//!
//! Per-category metric records workers attach to a task result. Amounts are
//! plain numbers in the unit natural to the resource (millicores for CPU,
//! kilobytes for memory, bytes for volumes); the aggregator concatenates
//! records without arithmetic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Resource dimension a metric amount applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Cpu,
    Memory,
}

/// Aggregated resource usage observed for one namespace on the nodes of one
/// task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceMetrics {
    pub namespace: String,
    #[serde(default)]
    pub used: HashMap<ResourceType, f64>,
}

impl NamespaceMetrics {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            used: HashMap::new(),
        }
    }
}

/// Resource usage for one container spec across the replicas a task observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpecMetrics {
    pub namespace: String,
    pub controller_uid: String,
    /// Stable id of the container spec within its controller.
    pub container_spec_id: String,
    #[serde(default)]
    pub used: HashMap<ResourceType, f64>,
}

/// Capacity and usage of one volume as mounted by one pod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodVolumeMetrics {
    pub volume_name: String,
    pub claim_name: String,
    /// Qualified `namespace/name` of the mounting pod.
    pub pod_key: String,
    pub capacity_bytes: u64,
    pub used_bytes: u64,
}
