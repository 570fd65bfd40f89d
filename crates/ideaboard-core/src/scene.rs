//! Scene document: the node and connector collections.

use crate::shapes::{Connector, ConnectorId, Node, NodeId, NodeKind, NodePatch};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Offset applied to duplicated nodes, in canvas units.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// All nodes and connectors on the board.
///
/// Nodes are only mutated through [`Scene::update_node`] and friends so the
/// connector invariants hold after every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// All nodes, keyed by ID.
    nodes: HashMap<NodeId, Node>,
    /// Z-order of nodes (back to front).
    z_order: Vec<NodeId>,
    /// Connectors in creation order.
    connectors: Vec<Connector>,
    /// Offset used by [`Scene::duplicate_nodes`].
    #[serde(skip, default = "default_duplicate_offset")]
    duplicate_offset: Vec2,
}

fn default_duplicate_offset() -> Vec2 {
    Vec2::new(DUPLICATE_OFFSET, DUPLICATE_OFFSET)
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            z_order: Vec::new(),
            connectors: Vec::new(),
            duplicate_offset: default_duplicate_offset(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with a custom duplicate offset.
    pub fn with_duplicate_offset(offset: f64) -> Self {
        Self {
            duplicate_offset: Vec2::new(offset, offset),
            ..Self::default()
        }
    }

    /// Create a node of `kind` centered on `center` and add it on top.
    pub fn create_node(&mut self, kind: NodeKind, center: Point, text: &str) -> NodeId {
        let node = Node::new(kind, center, text);
        let id = node.id();
        self.add_node(node);
        id
    }

    /// Add a prepared node on top of the z-order.
    pub fn add_node(&mut self, node: Node) {
        let id = node.id();
        if self.nodes.insert(id, node).is_none() {
            self.z_order.push(id);
        }
    }

    /// Merge `patch` into the node. No-op if the node is absent.
    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Delete nodes and every connector touching them.
    ///
    /// Returns the ids that were actually removed.
    pub fn delete_nodes(&mut self, ids: &HashSet<NodeId>) -> Vec<NodeId> {
        let removed: Vec<NodeId> = self
            .z_order
            .iter()
            .copied()
            .filter(|id| ids.contains(id))
            .collect();
        if removed.is_empty() {
            return removed;
        }
        for id in &removed {
            self.nodes.remove(id);
        }
        self.z_order.retain(|id| !ids.contains(id));
        self.connectors
            .retain(|c| !removed.iter().any(|id| c.touches(*id)));
        removed
    }

    /// Clone every existing node in `ids`, offset by the duplicate offset.
    ///
    /// Connectors are not duplicated. Clones keep the originals' relative
    /// z-order and land on top.
    pub fn duplicate_nodes(&mut self, ids: &HashSet<NodeId>) -> Vec<NodeId> {
        let clones: Vec<Node> = self
            .z_order
            .iter()
            .filter(|id| ids.contains(id))
            .filter_map(|id| self.nodes.get(id))
            .map(|node| node.duplicate(self.duplicate_offset))
            .collect();
        let new_ids: Vec<NodeId> = clones.iter().map(Node::id).collect();
        for node in clones {
            self.add_node(node);
        }
        new_ids
    }

    /// Link `start` to `end`.
    ///
    /// No-op for self links, unknown ids, or if the pair is already linked in
    /// either direction.
    pub fn create_connector(&mut self, start: NodeId, end: NodeId) -> Option<ConnectorId> {
        if start == end || !self.nodes.contains_key(&start) || !self.nodes.contains_key(&end) {
            return None;
        }
        if self.connectors.iter().any(|c| c.joins(start, end)) {
            return None;
        }
        let connector = Connector::new(start, end);
        let id = connector.id();
        self.connectors.push(connector);
        Some(id)
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get nodes in z-order (back to front).
    pub fn nodes_ordered(&self) -> impl Iterator<Item = &Node> {
        self.z_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All node ids in z-order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.z_order.clone()
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Find the front-most node containing a canvas point.
    pub fn node_at_point(&self, point: Point) -> Option<NodeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.nodes.get(id).is_some_and(|n| n.hit_test(point)))
    }

    /// Find nodes whose rect overlaps `rect` with open intersection.
    ///
    /// Rects that only share an edge do not count.
    pub fn nodes_in_rect(&self, rect: Rect) -> Vec<NodeId> {
        self.nodes_ordered()
            .filter(|node| overlaps_open(node.bounds(), rect))
            .map(Node::id)
            .collect()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Open axis-aligned overlap test.
pub fn overlaps_open(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}
