//! # Task Result
//!
//! The single outcome a worker produces for a task: a terminal outcome plus
//! up to seven independently optional output collections.
//!
//! The outcome is a tagged enum, so a succeeded result cannot carry an error
//! and a failed result cannot lack one. Each collection is `Option`-wrapped:
//! `None` means "this worker did not produce this category", which the
//! aggregator treats differently from an explicit empty list.

use crate::error::DiscoveryError;
use crate::models::{
    ContainerSpecMetrics, EntityDto, EntityGroup, KubeController, KubePod, NamespaceMetrics,
    PodVolumeMetrics,
};

/// Terminal state of a task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResultState {
    Succeeded,
    Failed,
}

impl std::fmt::Display for TaskResultState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskResultState::Succeeded => write!(f, "Succeeded"),
            TaskResultState::Failed => write!(f, "Failed"),
        }
    }
}

/// Terminal outcome, fixed at construction.
#[derive(Debug)]
enum TaskOutcome {
    Succeeded,
    Failed(DiscoveryError),
}

/// The outcome of executing one [`crate::task::Task`].
///
/// `worker_id` correlates the result back to the task it answers (by
/// convention the task uid). A failed result may legitimately carry partial
/// output collections alongside its error; whether the aggregator uses them
/// is collector policy.
#[derive(Debug)]
pub struct TaskResult {
    worker_id: String,
    outcome: TaskOutcome,
    content: Option<Vec<EntityDto>>,
    namespace_metrics: Option<Vec<NamespaceMetrics>>,
    entity_groups: Option<Vec<EntityGroup>>,
    pod_entities: Option<Vec<KubePod>>,
    kube_controllers: Option<Vec<KubeController>>,
    container_spec_metrics: Option<Vec<ContainerSpecMetrics>>,
    pod_volume_metrics: Option<Vec<PodVolumeMetrics>>,
}

impl TaskResult {
    fn new(worker_id: impl Into<String>, outcome: TaskOutcome) -> Self {
        Self {
            worker_id: worker_id.into(),
            outcome,
            content: None,
            namespace_metrics: None,
            entity_groups: None,
            pod_entities: None,
            kube_controllers: None,
            container_spec_metrics: None,
            pod_volume_metrics: None,
        }
    }

    /// A successful result with nothing reported yet.
    pub fn succeeded(worker_id: impl Into<String>) -> Self {
        Self::new(worker_id, TaskOutcome::Succeeded)
    }

    /// A failed result carrying the cause of the failure.
    pub fn failed(worker_id: impl Into<String>, error: DiscoveryError) -> Self {
        Self::new(worker_id, TaskOutcome::Failed(error))
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    pub fn state(&self) -> TaskResultState {
        match self.outcome {
            TaskOutcome::Succeeded => TaskResultState::Succeeded,
            TaskOutcome::Failed(_) => TaskResultState::Failed,
        }
    }

    pub fn is_succeeded(&self) -> bool {
        self.state() == TaskResultState::Succeeded
    }

    pub fn is_failed(&self) -> bool {
        self.state() == TaskResultState::Failed
    }

    /// The failure cause; `Some` exactly when the state is `Failed`.
    pub fn error(&self) -> Option<&DiscoveryError> {
        match &self.outcome {
            TaskOutcome::Succeeded => None,
            TaskOutcome::Failed(err) => Some(err),
        }
    }

    /// Assign the entity descriptor collection, replacing any prior value.
    pub fn with_content(mut self, content: Vec<EntityDto>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_namespace_metrics(mut self, namespace_metrics: Vec<NamespaceMetrics>) -> Self {
        self.namespace_metrics = Some(namespace_metrics);
        self
    }

    pub fn with_entity_groups(mut self, entity_groups: Vec<EntityGroup>) -> Self {
        self.entity_groups = Some(entity_groups);
        self
    }

    pub fn with_pod_entities(mut self, pod_entities: Vec<KubePod>) -> Self {
        self.pod_entities = Some(pod_entities);
        self
    }

    pub fn with_kube_controllers(mut self, kube_controllers: Vec<KubeController>) -> Self {
        self.kube_controllers = Some(kube_controllers);
        self
    }

    pub fn with_container_spec_metrics(
        mut self,
        container_spec_metrics: Vec<ContainerSpecMetrics>,
    ) -> Self {
        self.container_spec_metrics = Some(container_spec_metrics);
        self
    }

    pub fn with_pod_volume_metrics(mut self, pod_volume_metrics: Vec<PodVolumeMetrics>) -> Self {
        self.pod_volume_metrics = Some(pod_volume_metrics);
        self
    }

    /// Entity descriptors, or `None` if this worker never produced the
    /// category.
    pub fn content(&self) -> Option<&[EntityDto]> {
        self.content.as_deref()
    }

    pub fn namespace_metrics(&self) -> Option<&[NamespaceMetrics]> {
        self.namespace_metrics.as_deref()
    }

    pub fn entity_groups(&self) -> Option<&[EntityGroup]> {
        self.entity_groups.as_deref()
    }

    pub fn pod_entities(&self) -> Option<&[KubePod]> {
        self.pod_entities.as_deref()
    }

    pub fn kube_controllers(&self) -> Option<&[KubeController]> {
        self.kube_controllers.as_deref()
    }

    pub fn container_spec_metrics(&self) -> Option<&[ContainerSpecMetrics]> {
        self.container_spec_metrics.as_deref()
    }

    pub fn pod_volume_metrics(&self) -> Option<&[PodVolumeMetrics]> {
        self.pod_volume_metrics.as_deref()
    }

    /// Tear the result into its collections for aggregation.
    #[allow(clippy::type_complexity)]
    pub(crate) fn into_collections(
        self,
    ) -> (
        Option<Vec<EntityDto>>,
        Option<Vec<NamespaceMetrics>>,
        Option<Vec<EntityGroup>>,
        Option<Vec<KubePod>>,
        Option<Vec<KubeController>>,
        Option<Vec<ContainerSpecMetrics>>,
        Option<Vec<PodVolumeMetrics>>,
    ) {
        (
            self.content,
            self.namespace_metrics,
            self.entity_groups,
            self.pod_entities,
            self.kube_controllers,
            self.container_spec_metrics,
            self.pod_volume_metrics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityType;

    fn dto(id: &str) -> EntityDto {
        EntityDto::new(EntityType::Node, id, id, serde_json::json!({}))
    }

    #[test]
    fn succeeded_with_nothing_reported_is_valid() {
        let result = TaskResult::succeeded("abc12");
        assert_eq!(result.state(), TaskResultState::Succeeded);
        assert_eq!(result.worker_id(), "abc12");
        assert!(result.error().is_none());
        assert!(result.content().is_none());
        assert!(result.namespace_metrics().is_none());
        assert!(result.entity_groups().is_none());
        assert!(result.pod_entities().is_none());
        assert!(result.kube_controllers().is_none());
        assert!(result.container_spec_metrics().is_none());
        assert!(result.pod_volume_metrics().is_none());
    }

    #[test]
    fn failed_result_exposes_its_error_unchanged() {
        let cause = DiscoveryError::worker_failure("abc12", anyhow::anyhow!("node list expired"));
        let rendered = cause.to_string();
        let result = TaskResult::failed("abc12", cause);
        assert_eq!(result.state(), TaskResultState::Failed);
        assert_eq!(result.error().unwrap().to_string(), rendered);
    }

    #[test]
    fn empty_collection_is_distinct_from_unset() {
        let result = TaskResult::succeeded("w1").with_content(Vec::new());
        assert_eq!(result.content(), Some(&[][..]));

        let unset = TaskResult::succeeded("w2");
        assert!(unset.content().is_none());
    }

    #[test]
    fn collection_setters_are_last_write_wins() {
        let result = TaskResult::succeeded("w1")
            .with_content(vec![dto("a")])
            .with_content(vec![dto("b"), dto("c")]);
        let ids: Vec<&str> = result
            .content()
            .unwrap()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn failed_result_may_carry_partial_output() {
        let result = TaskResult::failed(
            "w1",
            DiscoveryError::worker_failure("w1", anyhow::anyhow!("probe interrupted")),
        )
        .with_content(vec![dto("partial")]);
        assert!(result.is_failed());
        assert_eq!(result.content().unwrap().len(), 1);
    }

    #[test]
    fn state_display_matches_wire_names() {
        assert_eq!(TaskResultState::Succeeded.to_string(), "Succeeded");
        assert_eq!(TaskResultState::Failed.to_string(), "Failed");
    }
}
