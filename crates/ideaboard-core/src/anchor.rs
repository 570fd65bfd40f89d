//! Shape-aware connector anchoring.
//!
//! A connector is drawn as a straight segment between two nodes. Each end is
//! clipped to its own node's outline: the point where the ray from the node's
//! center toward the other node's center crosses the visible boundary.

use crate::scene::Scene;
use crate::shapes::{Boundary, Connector, Node};
use kurbo::{Point, Vec2};

/// Node geometry needed for anchoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorGeometry {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
    pub boundary: Boundary,
}

impl From<&Node> for AnchorGeometry {
    fn from(node: &Node) -> Self {
        Self {
            center: node.center(),
            half_width: node.width / 2.0,
            half_height: node.height / 2.0,
            boundary: node.boundary(),
        }
    }
}

impl Boundary {
    /// Scale `t` such that `center + direction * t` lies on this boundary.
    ///
    /// `direction` must be non-zero.
    fn ray_scale(self, direction: Vec2, half_width: f64, half_height: f64) -> Option<f64> {
        let (ax, ay) = (direction.x.abs(), direction.y.abs());
        let t = match self {
            Boundary::Box => {
                let sx = if ax == 0.0 { f64::INFINITY } else { half_width / ax };
                let sy = if ay == 0.0 { f64::INFINITY } else { half_height / ay };
                sx.min(sy)
            }
            Boundary::Circle => half_width.min(half_height) / direction.hypot(),
            Boundary::Diamond => {
                if ax + ay == 0.0 {
                    return None;
                }
                1.0 / (ax / half_width + ay / half_height)
            }
        };
        t.is_finite().then_some(t)
    }
}

/// Point where the ray from the node's center toward `target` leaves the
/// node's outline.
///
/// A target at the center, or a node collapsed to nothing, resolves to the
/// center.
pub fn anchor_point(geometry: &AnchorGeometry, target: Point) -> Point {
    let direction = target - geometry.center;
    if direction.x == 0.0 && direction.y == 0.0 {
        return geometry.center;
    }
    match geometry
        .boundary
        .ray_scale(direction, geometry.half_width, geometry.half_height)
    {
        Some(t) => geometry.center + direction * t,
        None => geometry.center,
    }
}

/// Rendered endpoints of a connector, each hugging its own node.
///
/// Returns `None` if either endpoint node is missing.
pub fn connector_endpoints(scene: &Scene, connector: &Connector) -> Option<(Point, Point)> {
    let start = AnchorGeometry::from(scene.node(connector.start)?);
    let end = AnchorGeometry::from(scene.node(connector.end)?);
    Some((
        anchor_point(&start, end.center),
        anchor_point(&end, start.center),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{NodeKind, NodePatch, ShapeVariant};

    const EPS: f64 = 1e-9;

    fn geometry(boundary: Boundary) -> AnchorGeometry {
        AnchorGeometry {
            center: Point::new(100.0, 50.0),
            half_width: 80.0,
            half_height: 45.0,
            boundary,
        }
    }

    fn targets() -> Vec<Point> {
        let mut out = Vec::new();
        for i in 0..36 {
            let angle = i as f64 * std::f64::consts::PI / 18.0 + 0.013;
            out.push(Point::new(100.0 + angle.cos() * 400.0, 50.0 + angle.sin() * 300.0));
        }
        out.push(Point::new(100.0, 500.0));
        out.push(Point::new(-300.0, 50.0));
        out
    }

    #[test]
    fn test_degenerate_returns_center() {
        for boundary in [Boundary::Box, Boundary::Circle, Boundary::Diamond] {
            let g = geometry(boundary);
            assert_eq!(anchor_point(&g, g.center), g.center);
        }
    }

    #[test]
    fn test_box_anchor_on_boundary() {
        let g = geometry(Boundary::Box);
        for target in targets() {
            let p = anchor_point(&g, target);
            let local = p - g.center;
            let edge = (local.x.abs() / g.half_width).max(local.y.abs() / g.half_height);
            assert!((edge - 1.0).abs() < EPS, "{p:?} not on box edge");
        }
    }

    #[test]
    fn test_box_axis_aligned_targets() {
        let g = geometry(Boundary::Box);
        let right = anchor_point(&g, Point::new(1000.0, 50.0));
        assert!((right.x - 180.0).abs() < EPS);
        assert!((right.y - 50.0).abs() < EPS);
        let below = anchor_point(&g, Point::new(100.0, 1000.0));
        assert!((below.x - 100.0).abs() < EPS);
        assert!((below.y - 95.0).abs() < EPS);
    }

    #[test]
    fn test_circle_anchor_on_boundary() {
        let g = geometry(Boundary::Circle);
        for target in targets() {
            let p = anchor_point(&g, target);
            assert!(((p - g.center).hypot() - 45.0).abs() < EPS);
            // Same direction as the target.
            let a = (p - g.center).atan2();
            let b = (target - g.center).atan2();
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_diamond_anchor_on_boundary() {
        let g = geometry(Boundary::Diamond);
        for target in targets() {
            let p = anchor_point(&g, target);
            let local = p - g.center;
            let sum = local.x.abs() / g.half_width + local.y.abs() / g.half_height;
            assert!((sum - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_connector_endpoints_hug_each_node() {
        let mut scene = Scene::new();
        let a = scene.create_node(NodeKind::Shape, Point::new(0.0, 0.0), "");
        let b = scene.create_node(NodeKind::Shape, Point::new(400.0, 0.0), "");
        scene.update_node(b, &NodePatch::variant(ShapeVariant::Circle));
        let id = scene.create_connector(a, b).unwrap();
        let connector = scene.connectors().iter().find(|c| c.id() == id).unwrap();

        let (start, end) = connector_endpoints(&scene, connector).unwrap();
        // Box of half-width 80 around (0,0); circle of radius 45 around (400,0).
        assert!((start.x - 80.0).abs() < EPS);
        assert!(start.y.abs() < EPS);
        assert!((end.x - 355.0).abs() < EPS);
        assert!(end.y.abs() < EPS);
    }
}
