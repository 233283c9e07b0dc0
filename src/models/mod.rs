//! # Discovery Models
//!
//! Descriptor types exchanged with the discovery core's collaborators: the
//! cluster-object provider supplies [`KubeNode`], [`KubePod`],
//! [`KubePersistentVolume`], and [`KubePersistentVolumeClaim`]; the
//! cluster-summary builder supplies [`ClusterSummary`]; workers produce
//! [`EntityDto`]s, groupings, controller records, and metric records.
//!
//! The task envelope treats all of these as opaque ordered sequences; no
//! module here carries discovery logic.

pub mod cluster;
pub mod entity;
pub mod metrics;

pub use cluster::{
    ClusterSummary, KubeNode, KubePersistentVolume, KubePersistentVolumeClaim, KubePod,
    NodeCapacity,
};
pub use entity::{EntityDto, EntityGroup, EntityType, KubeController};
pub use metrics::{ContainerSpecMetrics, NamespaceMetrics, PodVolumeMetrics, ResourceType};
