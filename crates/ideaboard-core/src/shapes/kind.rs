//! Node kinds, shape variants and their lookup tables.

use super::ColorTag;
use serde::{Deserialize, Serialize};

/// What a node represents on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// Sticky note.
    #[default]
    Note,
    /// Outlined shape, drawn according to its [`ShapeVariant`].
    Shape,
    /// Free-standing text label.
    Text,
}

/// Outline drawn for a [`NodeKind::Shape`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeVariant {
    #[default]
    Rectangle,
    Circle,
    Pill,
    Diamond,
}

/// Boundary family used for connector anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Axis-aligned box filling the node rect.
    Box,
    /// Circle of radius `min(half_width, half_height)`.
    Circle,
    /// Rhombus touching the midpoints of the node rect's edges.
    Diamond,
}

/// Per-kind defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    pub kind: NodeKind,
    /// Size given to freshly placed nodes.
    pub default_width: f64,
    pub default_height: f64,
    pub default_color: ColorTag,
    /// Floor applied to the rendered height.
    pub min_render_height: f64,
}

static KIND_TABLE: [KindDefaults; 3] = [
    KindDefaults {
        kind: NodeKind::Note,
        default_width: 200.0,
        default_height: 120.0,
        default_color: ColorTag::Yellow,
        min_render_height: 120.0,
    },
    KindDefaults {
        kind: NodeKind::Shape,
        default_width: 160.0,
        default_height: 90.0,
        default_color: ColorTag::White,
        min_render_height: 60.0,
    },
    KindDefaults {
        kind: NodeKind::Text,
        default_width: 300.0,
        default_height: 40.0,
        default_color: ColorTag::Transparent,
        min_render_height: 30.0,
    },
];

/// Rendered height floor for a kind missing from the table.
pub const FALLBACK_MIN_RENDER_HEIGHT: f64 = 80.0;

static BOUNDARY_TABLE: [(ShapeVariant, Boundary); 4] = [
    (ShapeVariant::Rectangle, Boundary::Box),
    (ShapeVariant::Circle, Boundary::Circle),
    (ShapeVariant::Pill, Boundary::Box),
    (ShapeVariant::Diamond, Boundary::Diamond),
];

impl NodeKind {
    /// Look up the defaults for this kind.
    pub fn defaults(self) -> Option<&'static KindDefaults> {
        KIND_TABLE.iter().find(|d| d.kind == self)
    }

    /// Default `(width, height)` for new nodes of this kind.
    pub fn default_size(self) -> (f64, f64) {
        self.defaults()
            .map(|d| (d.default_width, d.default_height))
            .unwrap_or((200.0, 120.0))
    }

    pub fn default_color(self) -> ColorTag {
        self.defaults().map(|d| d.default_color).unwrap_or_default()
    }

    pub fn min_render_height(self) -> f64 {
        self.defaults()
            .map(|d| d.min_render_height)
            .unwrap_or(FALLBACK_MIN_RENDER_HEIGHT)
    }
}

impl ShapeVariant {
    /// Boundary family used to anchor connectors on this outline.
    pub fn boundary(self) -> Boundary {
        BOUNDARY_TABLE
            .iter()
            .find(|(variant, _)| *variant == self)
            .map(|(_, boundary)| *boundary)
            .unwrap_or(Boundary::Box)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        assert_eq!(NodeKind::Note.default_size(), (200.0, 120.0));
        assert_eq!(NodeKind::Shape.default_size(), (160.0, 90.0));
        assert_eq!(NodeKind::Text.default_size(), (300.0, 40.0));
    }

    #[test]
    fn test_default_colors() {
        assert_eq!(NodeKind::Note.default_color(), ColorTag::Yellow);
        assert_eq!(NodeKind::Shape.default_color(), ColorTag::White);
        assert_eq!(NodeKind::Text.default_color(), ColorTag::Transparent);
    }

    #[test]
    fn test_min_render_heights() {
        assert!((NodeKind::Note.min_render_height() - 120.0).abs() < f64::EPSILON);
        assert!((NodeKind::Shape.min_render_height() - 60.0).abs() < f64::EPSILON);
        assert!((NodeKind::Text.min_render_height() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variant_boundaries() {
        assert_eq!(ShapeVariant::Rectangle.boundary(), Boundary::Box);
        assert_eq!(ShapeVariant::Pill.boundary(), Boundary::Box);
        assert_eq!(ShapeVariant::Circle.boundary(), Boundary::Circle);
        assert_eq!(ShapeVariant::Diamond.boundary(), Boundary::Diamond);
    }
}
