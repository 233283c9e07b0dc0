//! # Discovery Task
//!
//! A unit of discovery work assigned to exactly one worker: the slice of
//! cluster objects the worker must process plus a shared, read-only
//! cluster summary.
//!
//! Tasks are configured fluently and then handed off; ownership transfer at
//! dispatch is what makes concurrent execution safe without locks.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::models::{
    ClusterSummary, KubeNode, KubePersistentVolume, KubePersistentVolumeClaim, KubePod,
};

/// A unit of discovery work.
///
/// The uid is assigned once at construction and never changes; it is used
/// for logging and result correlation, never for equality-based
/// deduplication. All list fields start empty and are assigned through the
/// `with_*` builders; accessors hand back the current values without
/// defensive copies.
#[derive(Debug, Clone)]
pub struct Task {
    uid: String,
    name: String,
    node_list: Vec<KubeNode>,
    pod_list: Vec<KubePod>,
    pv_list: Vec<KubePersistentVolume>,
    pvc_list: Vec<KubePersistentVolumeClaim>,
    cluster: Option<Arc<ClusterSummary>>,
}

impl Task {
    /// Create an empty task with a fresh process-unique identifier and a
    /// display name derived from its leading segment.
    pub fn new() -> Self {
        let uid = Uuid::new_v4().to_string();
        let name = uid
            .split('-')
            .next()
            .unwrap_or(uid.as_str())
            .to_string();
        Self {
            uid,
            name,
            node_list: Vec::new(),
            pod_list: Vec::new(),
            pv_list: Vec::new(),
            pvc_list: Vec::new(),
            cluster: None,
        }
    }

    /// Assign nodes to the task, replacing any previous assignment.
    pub fn with_nodes(mut self, node_list: Vec<KubeNode>) -> Self {
        self.node_list = node_list;
        self
    }

    /// Append a single node, preserving assignment order.
    pub fn with_node(mut self, node: KubeNode) -> Self {
        self.node_list.push(node);
        self
    }

    /// Assign pods to the task, replacing any previous assignment.
    pub fn with_pods(mut self, pod_list: Vec<KubePod>) -> Self {
        self.pod_list = pod_list;
        self
    }

    /// Assign persistent volumes to the task, replacing any previous
    /// assignment.
    pub fn with_pvs(mut self, pv_list: Vec<KubePersistentVolume>) -> Self {
        self.pv_list = pv_list;
        self
    }

    /// Assign persistent volume claims to the task, replacing any previous
    /// assignment.
    pub fn with_pvcs(mut self, pvc_list: Vec<KubePersistentVolumeClaim>) -> Self {
        self.pvc_list = pvc_list;
        self
    }

    /// Attach the shared cluster summary.
    pub fn with_cluster(mut self, cluster: Arc<ClusterSummary>) -> Self {
        self.cluster = Some(cluster);
        self
    }

    /// Process-unique task identifier.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Short display name (leading segment of the uid), for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_list(&self) -> &[KubeNode] {
        &self.node_list
    }

    pub fn pod_list(&self) -> &[KubePod] {
        &self.pod_list
    }

    pub fn pv_list(&self) -> &[KubePersistentVolume] {
        &self.pv_list
    }

    pub fn pvc_list(&self) -> &[KubePersistentVolumeClaim] {
        &self.pvc_list
    }

    pub fn cluster(&self) -> Option<&Arc<ClusterSummary>> {
        self.cluster.as_ref()
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Task {
    /// Single-line diagnostic rendering: `[id: <name>, node: <n1,n2>]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<&str> = self.node_list.iter().map(|n| n.name.as_str()).collect();
        write!(f, "[id: {}, node: {}]", self.name, nodes.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn node(name: &str) -> KubeNode {
        KubeNode::new(name, format!("uid-{name}"))
    }

    #[test]
    fn uid_is_nonempty_and_unique() {
        let uids: HashSet<String> = (0..100).map(|_| Task::new().uid().to_string()).collect();
        assert_eq!(uids.len(), 100);
        assert!(uids.iter().all(|uid| !uid.is_empty()));
    }

    #[test]
    fn name_is_leading_uid_segment() {
        let task = Task::new();
        assert_eq!(task.name(), task.uid().split('-').next().unwrap());
        assert!(!task.name().is_empty());
    }

    #[test]
    fn new_task_starts_empty() {
        let task = Task::new();
        assert!(task.node_list().is_empty());
        assert!(task.pod_list().is_empty());
        assert!(task.pv_list().is_empty());
        assert!(task.pvc_list().is_empty());
        assert!(task.cluster().is_none());
    }

    #[test]
    fn assignment_is_last_write_wins() {
        let task = Task::new()
            .with_pods(vec![KubePod::new("first", "default", "uid-1")])
            .with_pods(vec![
                KubePod::new("second", "default", "uid-2"),
                KubePod::new("third", "default", "uid-3"),
            ]);
        let names: Vec<&str> = task.pod_list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["second", "third"]);
    }

    #[test]
    fn with_node_appends_in_order() {
        let appended = Task::new()
            .with_nodes(vec![node("n1"), node("n2")])
            .with_node(node("n3"));
        let assigned = Task::new().with_nodes(vec![node("n1"), node("n2"), node("n3")]);
        assert_eq!(appended.node_list(), assigned.node_list());
    }

    #[test]
    fn display_matches_diagnostic_format() {
        let task = Task::new().with_nodes(vec![node("n1"), node("n2")]);
        let rendered = task.to_string();
        assert_eq!(rendered, format!("[id: {}, node: n1,n2]", task.name()));
    }

    #[test]
    fn display_with_no_nodes_renders_empty_list() {
        let task = Task::new();
        assert_eq!(
            task.to_string(),
            format!("[id: {}, node: ]", task.name())
        );
    }

    #[test]
    fn cluster_reference_is_shared_not_copied() {
        let summary = ClusterSummary::build("c1", "test", &[], &[]);
        let t1 = Task::new().with_cluster(summary.clone());
        let t2 = Task::new().with_cluster(summary.clone());
        assert!(Arc::ptr_eq(t1.cluster().unwrap(), t2.cluster().unwrap()));
    }
}
