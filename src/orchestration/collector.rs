//! # Result Collection
//!
//! Gathers the [`TaskResult`]s of one discovery cycle into a
//! [`DiscoveryAggregate`]. Merging is per-category concatenation in arrival
//! order, so the aggregate is insensitive to which worker finished first.
//!
//! Partial collections attached to a failed result are merged too; the
//! failure is still recorded and logged. Callers wanting all-or-nothing
//! semantics can filter on `result.state()` before collecting.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::models::{
    ContainerSpecMetrics, EntityDto, EntityGroup, KubeController, KubePod, NamespaceMetrics,
    PodVolumeMetrics,
};
use crate::task::TaskResult;

/// A recorded task failure: which worker, and the rendered cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub worker_id: String,
    pub error: String,
}

/// Cluster-wide accumulation of one discovery cycle's output.
#[derive(Debug, Default)]
pub struct DiscoveryAggregate {
    pub content: Vec<EntityDto>,
    pub namespace_metrics: Vec<NamespaceMetrics>,
    pub entity_groups: Vec<EntityGroup>,
    pub pod_entities: Vec<KubePod>,
    pub kube_controllers: Vec<KubeController>,
    pub container_spec_metrics: Vec<ContainerSpecMetrics>,
    pub pod_volume_metrics: Vec<PodVolumeMetrics>,
    /// One entry per failed task, in arrival order.
    pub failures: Vec<TaskFailure>,
    /// Total results merged, succeeded and failed.
    pub results_collected: usize,
}

impl DiscoveryAggregate {
    /// True when every collected result succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Merges task results into a [`DiscoveryAggregate`] as they arrive.
#[derive(Debug)]
pub struct ResultCollector {
    aggregate: DiscoveryAggregate,
    started_at: DateTime<Utc>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self {
            aggregate: DiscoveryAggregate::default(),
            started_at: Utc::now(),
        }
    }

    /// Merge one result into the aggregate.
    ///
    /// Absent categories contribute nothing; present-but-empty categories
    /// contribute nothing but still count as reported. A failed result is
    /// logged and recorded, and never aborts collection of other results.
    pub fn collect(&mut self, result: TaskResult) {
        self.aggregate.results_collected += 1;

        if let Some(err) = result.error() {
            error!(
                worker_id = %result.worker_id(),
                error = %err,
                "task failed, contribution may be partial or absent"
            );
            self.aggregate.failures.push(TaskFailure {
                worker_id: result.worker_id().to_string(),
                error: err.to_string(),
            });
        } else {
            debug!(
                worker_id = %result.worker_id(),
                entity_count = result.content().map_or(0, <[EntityDto]>::len),
                "task result collected"
            );
        }

        let (content, namespace_metrics, entity_groups, pod_entities, kube_controllers, container_spec_metrics, pod_volume_metrics) =
            result.into_collections();

        if let Some(mut items) = content {
            self.aggregate.content.append(&mut items);
        }
        if let Some(mut items) = namespace_metrics {
            self.aggregate.namespace_metrics.append(&mut items);
        }
        if let Some(mut items) = entity_groups {
            self.aggregate.entity_groups.append(&mut items);
        }
        if let Some(mut items) = pod_entities {
            self.aggregate.pod_entities.append(&mut items);
        }
        if let Some(mut items) = kube_controllers {
            self.aggregate.kube_controllers.append(&mut items);
        }
        if let Some(mut items) = container_spec_metrics {
            self.aggregate.container_spec_metrics.append(&mut items);
        }
        if let Some(mut items) = pod_volume_metrics {
            self.aggregate.pod_volume_metrics.append(&mut items);
        }
    }

    /// Finish the cycle and hand back the aggregate.
    pub fn finish(self) -> DiscoveryAggregate {
        let elapsed_ms = (Utc::now() - self.started_at).num_milliseconds();
        info!(
            results_collected = self.aggregate.results_collected,
            entity_count = self.aggregate.content.len(),
            failure_count = self.aggregate.failures.len(),
            elapsed_ms = elapsed_ms,
            "📦 COLLECTION: Discovery cycle gathered"
        );
        self.aggregate
    }
}

impl Default for ResultCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiscoveryError;
    use crate::models::EntityType;

    fn dto(id: &str) -> EntityDto {
        EntityDto::new(EntityType::Node, id, id, serde_json::json!({}))
    }

    fn succeeded_with(ids: &[&str]) -> TaskResult {
        TaskResult::succeeded("w").with_content(ids.iter().map(|id| dto(id)).collect())
    }

    #[test]
    fn merge_is_order_insensitive() {
        let mut forward = ResultCollector::new();
        forward.collect(succeeded_with(&["a", "b"]));
        forward.collect(succeeded_with(&["c"]));
        let forward = forward.finish();

        let mut reverse = ResultCollector::new();
        reverse.collect(succeeded_with(&["c"]));
        reverse.collect(succeeded_with(&["a", "b"]));
        let reverse = reverse.finish();

        let mut forward_ids: Vec<String> =
            forward.content.iter().map(|d| d.id.clone()).collect();
        let mut reverse_ids: Vec<String> =
            reverse.content.iter().map(|d| d.id.clone()).collect();
        forward_ids.sort();
        reverse_ids.sort();
        assert_eq!(forward_ids, vec!["a", "b", "c"]);
        assert_eq!(forward_ids, reverse_ids);
    }

    #[test]
    fn unset_categories_contribute_nothing() {
        let mut collector = ResultCollector::new();
        collector.collect(TaskResult::succeeded("w1"));
        collector.collect(TaskResult::succeeded("w2").with_namespace_metrics(Vec::new()));
        let aggregate = collector.finish();

        assert_eq!(aggregate.results_collected, 2);
        assert!(aggregate.content.is_empty());
        assert!(aggregate.namespace_metrics.is_empty());
        assert!(aggregate.is_complete());
    }

    #[test]
    fn failures_are_recorded_and_partial_output_is_kept() {
        let mut collector = ResultCollector::new();
        collector.collect(succeeded_with(&["a"]));
        collector.collect(
            TaskResult::failed(
                "w-bad",
                DiscoveryError::worker_failure("w-bad", anyhow::anyhow!("probe interrupted")),
            )
            .with_content(vec![dto("salvaged")]),
        );
        let aggregate = collector.finish();

        assert_eq!(aggregate.failures.len(), 1);
        assert_eq!(aggregate.failures[0].worker_id, "w-bad");
        assert!(aggregate.failures[0].error.contains("probe interrupted"));
        assert!(!aggregate.is_complete());
        // salvaged partial output is merged alongside the recorded failure
        assert_eq!(aggregate.content.len(), 2);
    }

    #[test]
    fn all_seven_categories_are_merged() {
        use crate::models::{
            ContainerSpecMetrics, EntityGroup, KubeController, KubePod, NamespaceMetrics,
            PodVolumeMetrics,
        };

        let result = TaskResult::succeeded("w")
            .with_content(vec![dto("e")])
            .with_namespace_metrics(vec![NamespaceMetrics::new("default")])
            .with_entity_groups(vec![EntityGroup::new("g", "Deployment", "web")])
            .with_pod_entities(vec![KubePod::new("p", "default", "uid-p")])
            .with_kube_controllers(vec![KubeController {
                uid: "c".to_string(),
                kind: "Deployment".to_string(),
                name: "web".to_string(),
                namespace: "default".to_string(),
                pod_names: Vec::new(),
            }])
            .with_container_spec_metrics(vec![ContainerSpecMetrics {
                namespace: "default".to_string(),
                controller_uid: "c".to_string(),
                container_spec_id: "web/app".to_string(),
                used: Default::default(),
            }])
            .with_pod_volume_metrics(vec![PodVolumeMetrics {
                volume_name: "pv-1".to_string(),
                claim_name: "data".to_string(),
                pod_key: "default/p".to_string(),
                capacity_bytes: 100,
                used_bytes: 10,
            }]);

        let mut collector = ResultCollector::new();
        collector.collect(result);
        let aggregate = collector.finish();

        assert_eq!(aggregate.content.len(), 1);
        assert_eq!(aggregate.namespace_metrics.len(), 1);
        assert_eq!(aggregate.entity_groups.len(), 1);
        assert_eq!(aggregate.pod_entities.len(), 1);
        assert_eq!(aggregate.kube_controllers.len(), 1);
        assert_eq!(aggregate.container_spec_metrics.len(), 1);
        assert_eq!(aggregate.pod_volume_metrics.len(), 1);
    }
}
