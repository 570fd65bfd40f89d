//! Render snapshot handed to external renderers after every event.

use crate::anchor::{AnchorGeometry, anchor_point, connector_endpoints};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::shapes::{ColorTag, Connector, ConnectorId, Node, NodeId, NodeKind, ShapeVariant};
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// A node as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub kind: NodeKind,
    pub variant: ShapeVariant,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Height after applying the per-kind floor.
    pub render_height: f64,
    pub text: String,
    pub color: ColorTag,
    /// Resolved fill and border colors as RGBA bytes.
    pub fill: [u8; 4],
    pub border: [u8; 4],
    pub selected: bool,
}

impl NodeView {
    pub fn new(node: &Node, selected: bool) -> Self {
        Self {
            id: node.id(),
            kind: node.kind,
            variant: node.variant,
            x: node.position.x,
            y: node.position.y,
            width: node.width,
            height: node.height,
            render_height: node.render_height(),
            text: node.text.clone(),
            color: node.color,
            fill: rgba(node.color.fill()),
            border: rgba(node.color.border()),
            selected,
        }
    }
}

fn rgba(color: Color) -> [u8; 4] {
    let c = color.to_rgba8();
    [c.r, c.g, c.b, c.a]
}

/// A connector with both anchors resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorView {
    pub id: ConnectorId,
    pub start: NodeId,
    pub end: NodeId,
    pub from: Point,
    pub to: Point,
}

impl ConnectorView {
    pub fn new(scene: &Scene, connector: &Connector) -> Option<Self> {
        let (from, to) = connector_endpoints(scene, connector)?;
        Some(Self {
            id: connector.id(),
            start: connector.start,
            end: connector.end,
            from,
            to,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportView {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    /// Canvas-to-screen affine coefficients, `[a, b, c, d, e, f]`.
    pub transform: [f64; 6],
}

impl From<&Viewport> for ViewportView {
    fn from(viewport: &Viewport) -> Self {
        Self {
            pan_x: viewport.offset.x,
            pan_y: viewport.offset.y,
            zoom: viewport.zoom,
            transform: viewport.transform().as_coeffs(),
        }
    }
}

/// Segment from a pending connection source to the live cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewLine {
    pub from: Point,
    pub to: Point,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nodes back to front.
    pub nodes: Vec<NodeView>,
    pub connectors: Vec<ConnectorView>,
    pub viewport: ViewportView,
    /// Selected ids, sorted.
    pub selection: Vec<NodeId>,
    pub pending_connection_source: Option<NodeId>,
    /// Live cursor position in canvas space.
    pub cursor: Point,
    /// Rubber-band rect while one is being dragged.
    pub rubber_band: Option<Rect>,
    /// Screen-space anchor for the property panel.
    pub property_anchor: Option<Point>,
    pub connection_preview: Option<PreviewLine>,
    pub tool: ToolKind,
    /// An expansion request is in flight.
    pub expanding: bool,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Screen-space top-center of the single selected node.
pub fn property_anchor(scene: &Scene, selection: &Selection, viewport: &Viewport) -> Option<Point> {
    let node = scene.node(selection.single()?)?;
    Some(viewport.canvas_to_screen(node.top_center()))
}

/// Preview from the pending source's anchor toward `cursor`.
pub fn connection_preview(scene: &Scene, source: Option<NodeId>, cursor: Point) -> Option<PreviewLine> {
    let node = scene.node(source?)?;
    let from = anchor_point(&AnchorGeometry::from(node), cursor);
    Some(PreviewLine { from, to: cursor })
}

pub(crate) fn node_views(scene: &Scene, selection: &Selection) -> Vec<NodeView> {
    scene
        .nodes_ordered()
        .map(|node| NodeView::new(node, selection.contains(node.id())))
        .collect()
}

pub(crate) fn connector_views(scene: &Scene) -> Vec<ConnectorView> {
    scene
        .connectors()
        .iter()
        .filter_map(|c| ConnectorView::new(scene, c))
        .collect()
}
