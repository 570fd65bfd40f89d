//! Selection set and rubber-band selection.

use crate::scene::Scene;
use crate::shapes::NodeId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of currently selected node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: HashSet<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the node if absent, remove it if present.
    pub fn toggle(&mut self, id: NodeId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Replace the selection with just this node.
    pub fn set_single(&mut self, id: NodeId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Replace the selection with `ids`.
    pub fn set_all(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Select every id in `all`.
    pub fn select_all(&mut self, all: impl IntoIterator<Item = NodeId>) {
        self.set_all(all);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// The selected node, only when exactly one is selected.
    pub fn single(&self) -> Option<NodeId> {
        if self.ids.len() == 1 {
            self.ids.iter().next().copied()
        } else {
            None
        }
    }

    /// Drop ids that are no longer in the scene.
    pub fn retain_existing(&mut self, scene: &Scene) {
        self.ids.retain(|id| scene.contains(*id));
    }

    pub fn ids(&self) -> &HashSet<NodeId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Live rubber-band rectangle, in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RubberBand {
    /// Where the drag started.
    pub anchor: Point,
    /// The moving corner.
    pub current: Point,
}

impl RubberBand {
    pub fn new(anchor: Point) -> Self {
        Self { anchor, current: anchor }
    }

    /// Normalized rect spanned by both corners.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }
}

/// Compute the selection resulting from a rubber-band drag.
///
/// A node is included when its bounds overlap `rect` with open intersection.
/// `additive` unions the hits with `existing`; otherwise they replace it.
pub fn rubber_band_select(
    rect: Rect,
    existing: &Selection,
    additive: bool,
    scene: &Scene,
) -> Selection {
    let hits = scene.nodes_in_rect(rect);
    let mut result = if additive { existing.clone() } else { Selection::new() };
    result.ids.extend(hits);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::NodeKind;

    #[test]
    fn test_toggle_and_single() {
        let mut sel = Selection::new();
        let a = uuid::Uuid::new_v4();
        let b = uuid::Uuid::new_v4();

        sel.toggle(a);
        assert_eq!(sel.single(), Some(a));
        sel.toggle(b);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.single(), None);
        sel.toggle(a);
        assert_eq!(sel.single(), Some(b));

        sel.set_single(a);
        assert_eq!(sel.single(), Some(a));
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.single(), None);
    }

    #[test]
    fn test_select_all() {
        let mut sel = Selection::new();
        let ids: Vec<NodeId> = (0..3).map(|_| uuid::Uuid::new_v4()).collect();
        sel.select_all(ids.iter().copied());
        assert_eq!(sel.len(), 3);
        assert!(ids.iter().all(|id| sel.contains(*id)));
    }

    #[test]
    fn test_rubber_band_rect_normalizes() {
        let mut band = RubberBand::new(Point::new(100.0, 100.0));
        band.current = Point::new(20.0, 150.0);
        assert_eq!(band.to_rect(), Rect::new(20.0, 100.0, 100.0, 150.0));
    }

    #[test]
    fn test_rubber_band_replace_vs_additive() {
        let mut scene = Scene::new();
        let left = scene.create_node(NodeKind::Shape, Point::new(100.0, 100.0), "");
        let right = scene.create_node(NodeKind::Shape, Point::new(600.0, 100.0), "");

        let mut existing = Selection::new();
        existing.set_single(right);

        let rect = Rect::new(0.0, 0.0, 250.0, 250.0);
        let replaced = rubber_band_select(rect, &existing, false, &scene);
        assert_eq!(replaced.len(), 1);
        assert!(replaced.contains(left));

        let unioned = rubber_band_select(rect, &existing, true, &scene);
        assert_eq!(unioned.len(), 2);
        assert!(unioned.contains(left) && unioned.contains(right));
    }

    #[test]
    fn test_retain_existing() {
        let mut scene = Scene::new();
        let a = scene.create_node(NodeKind::Note, Point::ZERO, "");
        let mut sel = Selection::new();
        sel.set_all([a, uuid::Uuid::new_v4()]);
        sel.retain_existing(&scene);
        assert_eq!(sel.single(), Some(a));
    }
}
