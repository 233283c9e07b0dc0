//! # Discovery Entity Types
//!
//! Output records workers attach to a task result: opaque entity descriptors,
//! entity groupings, and controller summaries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kind of entity a descriptor or group member refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Node,
    Pod,
    Container,
    Namespace,
    Volume,
}

/// An already-serialized discovery payload for one entity.
///
/// The discovery core never interprets `body`; it is produced by probe logic
/// and consumed by whatever sits downstream of the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDto {
    pub entity_type: EntityType,
    pub id: String,
    pub display_name: String,
    pub body: serde_json::Value,
}

impl EntityDto {
    pub fn new(
        entity_type: EntityType,
        id: impl Into<String>,
        display_name: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            entity_type,
            id: id.into(),
            display_name: display_name.into(),
            body,
        }
    }
}

/// A grouping of discovered entities under a parent object (for example the
/// pods and containers owned by one deployment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGroup {
    pub group_id: String,
    pub parent_kind: String,
    pub parent_name: String,
    /// Member entity ids keyed by entity type.
    #[serde(default)]
    pub members: HashMap<EntityType, Vec<String>>,
}

impl EntityGroup {
    pub fn new(
        group_id: impl Into<String>,
        parent_kind: impl Into<String>,
        parent_name: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            parent_kind: parent_kind.into(),
            parent_name: parent_name.into(),
            members: HashMap::new(),
        }
    }

    pub fn add_member(&mut self, entity_type: EntityType, member_id: impl Into<String>) {
        self.members
            .entry(entity_type)
            .or_default()
            .push(member_id.into());
    }
}

/// A workload controller discovered on the nodes of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeController {
    pub uid: String,
    /// Controller kind, e.g. `Deployment` or `StatefulSet`.
    pub kind: String,
    pub name: String,
    pub namespace: String,
    /// Qualified names of the pods this controller owns.
    #[serde(default)]
    pub pod_names: Vec<String>,
}
