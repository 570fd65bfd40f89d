//! Connector between two nodes.

use super::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for connectors.
pub type ConnectorId = Uuid;

/// A directed link between two nodes, drawn as an undirected line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub(crate) id: ConnectorId,
    pub start: NodeId,
    pub end: NodeId,
}

impl Connector {
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    /// Whether this connector touches `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// Whether this connector joins `a` and `b`, in either direction.
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}
