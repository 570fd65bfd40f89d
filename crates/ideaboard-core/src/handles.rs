//! Resize handles on a selected node.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum width and height produced by a resize, in canvas units.
pub const MIN_RESIZE_DIMENSION: f64 = 50.0;

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Which edge or corner of the node rect is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    /// All handles, in hit-test priority order (corners first).
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::NorthWest,
        ResizeEdge::NorthEast,
        ResizeEdge::SouthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
    ];

    /// Horizontal and vertical side grabbed: -1 start, 0 none, 1 end.
    fn sides(self) -> (i8, i8) {
        match self {
            ResizeEdge::North => (0, -1),
            ResizeEdge::South => (0, 1),
            ResizeEdge::East => (1, 0),
            ResizeEdge::West => (-1, 0),
            ResizeEdge::NorthEast => (1, -1),
            ResizeEdge::NorthWest => (-1, -1),
            ResizeEdge::SouthEast => (1, 1),
            ResizeEdge::SouthWest => (-1, 1),
        }
    }

    /// Handle position on `rect`.
    pub fn position(self, rect: Rect) -> Point {
        let (sx, sy) = self.sides();
        let pick = |side: i8, lo: f64, hi: f64| match side {
            -1 => lo,
            1 => hi,
            _ => (lo + hi) / 2.0,
        };
        Point::new(pick(sx, rect.x0, rect.x1), pick(sy, rect.y0, rect.y1))
    }
}

/// All eight handles of `rect` with their positions.
pub fn handles(rect: Rect) -> Vec<(ResizeEdge, Point)> {
    ResizeEdge::ALL
        .iter()
        .map(|edge| (*edge, edge.position(rect)))
        .collect()
}

/// Find the handle of `rect` within `tolerance` of `point`.
///
/// `tolerance` is in canvas units; callers divide the screen tolerance by zoom.
pub fn hit_test_handles(rect: Rect, point: Point, tolerance: f64) -> Option<ResizeEdge> {
    ResizeEdge::ALL
        .iter()
        .copied()
        .find(|edge| (edge.position(rect) - point).hypot2() <= tolerance * tolerance)
}

/// Resize `origin` by dragging `edge` by the canvas-space `delta`.
///
/// Each dimension is clamped to `min`. Start-side edges (north, west) move
/// the origin so the opposite edge stays fixed.
pub fn apply_resize(origin: Rect, edge: ResizeEdge, delta: Vec2, min: f64) -> Rect {
    let (sx, sy) = edge.sides();
    let (x0, x1) = resize_axis(origin.x0, origin.x1, sx, delta.x, min);
    let (y0, y1) = resize_axis(origin.y0, origin.y1, sy, delta.y, min);
    Rect::new(x0, y0, x1, y1)
}

fn resize_axis(lo: f64, hi: f64, side: i8, delta: f64, min: f64) -> (f64, f64) {
    let size = hi - lo;
    match side {
        1 => (lo, lo + (size + delta).max(min)),
        -1 => {
            let new_size = (size - delta).max(min);
            (hi - new_size, hi)
        }
        _ => (lo, hi),
    }
}
