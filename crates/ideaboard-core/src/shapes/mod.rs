//! Node and connector definitions for the board.

mod color;
mod connector;
mod kind;

pub use color::ColorTag;
pub use connector::{Connector, ConnectorId};
pub use kind::{Boundary, FALLBACK_MIN_RENDER_HEIGHT, KindDefaults, NodeKind, ShapeVariant};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for nodes.
pub type NodeId = Uuid;

/// A placed element: sticky note, outlined shape or text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub kind: NodeKind,
    /// Outline, only meaningful for [`NodeKind::Shape`].
    #[serde(default)]
    pub variant: ShapeVariant,
    /// Top-left corner in canvas space.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub text: String,
    pub color: ColorTag,
}

impl Node {
    /// Create a node of the given kind, sized by the kind table and centered
    /// on `center`.
    pub fn new(kind: NodeKind, center: Point, text: impl Into<String>) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: Uuid::new_v4(),
            kind,
            variant: ShapeVariant::default(),
            position: Point::new(center.x - width / 2.0, center.y - height / 2.0),
            width,
            height,
            text: text.into(),
            color: kind.default_color(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node rect in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Top-center point, where the property panel attaches.
    pub fn top_center(&self) -> Point {
        Point::new(self.position.x + self.width / 2.0, self.position.y)
    }

    /// Midpoint of the right edge.
    pub fn right_center(&self) -> Point {
        Point::new(self.position.x + self.width, self.position.y + self.height / 2.0)
    }

    /// Boundary family used when anchoring connectors to this node.
    ///
    /// Only shapes carry a distinct outline; notes and text use their box.
    pub fn boundary(&self) -> Boundary {
        match self.kind {
            NodeKind::Shape => self.variant.boundary(),
            NodeKind::Note | NodeKind::Text => Boundary::Box,
        }
    }

    /// Height the renderer should draw, honoring the per-kind floor.
    pub fn render_height(&self) -> f64 {
        self.height.max(self.kind.min_render_height())
    }

    /// Check if a canvas point lies inside the node rect.
    pub fn hit_test(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }

    /// Merge a partial update into this node.
    pub fn apply(&mut self, patch: &NodePatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(variant) = patch.variant {
            self.variant = variant;
        }
    }

    /// Clone with a fresh id, shifted by `offset`.
    pub fn duplicate(&self, offset: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: self.position + offset,
            ..self.clone()
        }
    }
}

/// Partial node update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub text: Option<String>,
    pub color: Option<ColorTag>,
    pub variant: Option<ShapeVariant>,
}

impl NodePatch {
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    pub fn rect(rect: Rect) -> Self {
        Self {
            position: Some(rect.origin()),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    pub fn color(color: ColorTag) -> Self {
        Self { color: Some(color), ..Self::default() }
    }

    pub fn variant(variant: ShapeVariant) -> Self {
        Self { variant: Some(variant), ..Self::default() }
    }
}
