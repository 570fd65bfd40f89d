//! Interaction controller: the pointer and keyboard state machine.
//!
//! The controller owns the scene, viewport and selection. Every input event is
//! processed to completion before the next one; the only transient gesture
//! state lives in a single [`DragState`] value.

use crate::config::EngineConfig;
use crate::expansion::{
    ExpansionRequest, ExpansionResponse, ExpansionResult, ExpansionService, ExpansionTicket,
    cluster_positions, request_expansion,
};
use crate::handles::{ResizeEdge, apply_resize, hit_test_handles};
use crate::input::{InputEvent, Key, Modifiers, PointerButton};
use crate::scene::Scene;
use crate::selection::{RubberBand, Selection, rubber_band_select};
use crate::shapes::{ColorTag, NodeId, NodeKind, NodePatch, ShapeVariant};
use crate::snapshot::{self, Snapshot, ViewportView};
use crate::subscription::{InputSender, InputSubscription};
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::{Point, Rect};
use std::collections::{HashMap, HashSet};

/// Transient gesture state between a pointer-down and its pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    None,
    /// Dragging the view. `last` is the previous screen position.
    Panning { last: Point },
    /// Moving nodes. Positions are recomputed from `origins` and the absolute
    /// screen delta since `press`.
    MovingNodes {
        press: Point,
        origins: HashMap<NodeId, Point>,
    },
    /// Dragging a resize handle.
    Resizing {
        node: NodeId,
        edge: ResizeEdge,
        origin: Rect,
        press: Point,
    },
    /// Drawing a selection rectangle. `additive` records shift at press time.
    RubberBand { band: RubberBand, additive: bool },
    /// Pressed a node with the connector tool.
    Connecting { source: NodeId },
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PressTarget {
    Handle(NodeId, ResizeEdge),
    Node(NodeId),
    Canvas,
}

/// The canvas interaction engine.
#[derive(Debug)]
pub struct Controller {
    config: EngineConfig,
    scene: Scene,
    viewport: Viewport,
    selection: Selection,
    tool: ToolKind,
    drag: DragState,
    pending_source: Option<NodeId>,
    /// Last known cursor position in canvas space.
    cursor: Point,
    /// An editable text field has focus; keyboard shortcuts are ignored.
    text_focus: bool,
    next_ticket: u64,
    /// In-flight expansion tickets and their source nodes.
    in_flight: HashMap<u64, NodeId>,
    subscription: Option<InputSubscription>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            scene: Scene::with_duplicate_offset(config.duplicate_offset),
            viewport: Viewport::with_zoom_bounds(config.min_zoom, config.max_zoom),
            config,
            selection: Selection::new(),
            tool: ToolKind::default(),
            drag: DragState::None,
            pending_source: None,
            cursor: Point::ZERO,
            text_focus: false,
            next_ticket: 1,
            in_flight: HashMap::new(),
            subscription: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn pending_source(&self) -> Option<NodeId> {
        self.pending_source
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn is_text_focused(&self) -> bool {
        self.text_focus
    }

    /// Process one input event to completion.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers),
            InputEvent::PointerMove { position, .. } => self.pointer_move(position),
            InputEvent::PointerUp { position, .. } => self.pointer_up(position),
            InputEvent::Wheel { delta, modifiers } => {
                self.viewport
                    .apply_wheel(delta, modifiers.platform(), self.config.wheel_zoom_factor);
            }
            InputEvent::Key { key, modifiers } => self.key_down(&key, modifiers),
            InputEvent::TextFocus { focused } => self.text_focus = focused,
        }
    }

    // --- Pointer handling ---

    fn pointer_down(&mut self, position: Point, button: PointerButton, modifiers: Modifiers) {
        let canvas = self.viewport.screen_to_canvas(position);
        self.cursor = canvas;

        if self.tool == ToolKind::Pan || button == PointerButton::Middle {
            log::debug!("Begin panning at {:?}", position);
            self.drag = DragState::Panning { last: position };
            return;
        }
        if button != PointerButton::Primary {
            return;
        }

        match self.press_target(canvas) {
            PressTarget::Handle(node, edge) => {
                if let Some(origin) = self.scene.node(node).map(|n| n.bounds()) {
                    log::debug!("Begin resizing {} from {:?}", node, edge);
                    self.drag = DragState::Resizing {
                        node,
                        edge,
                        origin,
                        press: position,
                    };
                }
            }
            PressTarget::Node(id) if self.tool == ToolKind::Connector => {
                self.connector_press(id, modifiers);
            }
            PressTarget::Node(id) => self.node_press(id, position, modifiers),
            PressTarget::Canvas => self.canvas_press(canvas, modifiers),
        }
    }

    /// Resolve the press target: handles of selected nodes, then the
    /// front-most node body, then empty canvas.
    fn press_target(&self, canvas: Point) -> PressTarget {
        if self.tool.uses_handles() {
            let tolerance = self.config.handle_tolerance / self.viewport.zoom;
            for id in self.scene.node_ids().into_iter().rev() {
                if !self.selection.contains(id) {
                    continue;
                }
                if let Some(node) = self.scene.node(id) {
                    if let Some(edge) = hit_test_handles(node.bounds(), canvas, tolerance) {
                        return PressTarget::Handle(id, edge);
                    }
                }
            }
        }
        match self.scene.node_at_point(canvas) {
            Some(id) => PressTarget::Node(id),
            None => PressTarget::Canvas,
        }
    }

    fn canvas_press(&mut self, canvas: Point, modifiers: Modifiers) {
        if let Some(kind) = self.tool.placement_kind() {
            let id = self.scene.create_node(kind, canvas, "");
            self.selection.set_single(id);
            log::debug!("Placed {:?} node {} at {:?}", kind, id, canvas);
            if !modifiers.shift {
                self.tool = ToolKind::Select;
            }
            return;
        }
        match self.tool {
            ToolKind::Select => {
                if !modifiers.shift {
                    self.selection.clear();
                }
                log::debug!("Begin rubber band at {:?}", canvas);
                self.drag = DragState::RubberBand {
                    band: RubberBand::new(canvas),
                    additive: modifiers.shift,
                };
            }
            ToolKind::Connector => {
                self.selection.clear();
                self.pending_source = None;
            }
            ToolKind::Pan | ToolKind::Note | ToolKind::Shape | ToolKind::Text => {}
        }
    }

    fn node_press(&mut self, id: NodeId, position: Point, modifiers: Modifiers) {
        if modifiers.duplicate() {
            let sources: HashSet<NodeId> = if self.selection.contains(id) {
                self.selection.ids().clone()
            } else {
                HashSet::from([id])
            };
            let clones = self.scene.duplicate_nodes(&sources);
            log::debug!("Drag-duplicating {} node(s)", clones.len());
            self.selection.set_all(clones);
        } else if modifiers.shift {
            self.selection.toggle(id);
        } else {
            self.selection.set_single(id);
        }

        let origins = self
            .selection
            .ids()
            .iter()
            .filter_map(|id| self.scene.node(*id).map(|n| (*id, n.position)))
            .collect();
        self.drag = DragState::MovingNodes {
            press: position,
            origins,
        };
    }

    fn connector_press(&mut self, id: NodeId, modifiers: Modifiers) {
        match self.pending_source {
            None => {
                log::debug!("Connection source set to {}", id);
                self.pending_source = Some(id);
                self.selection.set_single(id);
                self.drag = DragState::Connecting { source: id };
            }
            Some(source) if source == id => {}
            Some(source) => {
                if let Some(connector) = self.scene.create_connector(source, id) {
                    log::debug!("Connected {} -> {} ({})", source, id, connector);
                }
                self.pending_source = None;
                if !modifiers.shift {
                    self.tool = ToolKind::Select;
                }
            }
        }
    }

    fn pointer_move(&mut self, position: Point) {
        self.cursor = self.viewport.screen_to_canvas(position);

        match &mut self.drag {
            DragState::None | DragState::Connecting { .. } => {}
            DragState::Panning { last } => {
                let delta = position - *last;
                *last = position;
                self.viewport.pan(delta);
            }
            DragState::MovingNodes { press, origins } => {
                let delta = self.viewport.screen_delta_to_canvas(position - *press);
                for (id, origin) in origins.iter() {
                    self.scene
                        .update_node(*id, &NodePatch::position(*origin + delta));
                }
            }
            DragState::Resizing {
                node,
                edge,
                origin,
                press,
            } => {
                let delta = self.viewport.screen_delta_to_canvas(position - *press);
                let rect = apply_resize(*origin, *edge, delta, self.config.min_resize_dimension);
                self.scene.update_node(*node, &NodePatch::rect(rect));
            }
            DragState::RubberBand { band, .. } => {
                band.current = self.cursor;
            }
        }
    }

    fn pointer_up(&mut self, position: Point) {
        self.cursor = self.viewport.screen_to_canvas(position);
        if let DragState::RubberBand { mut band, additive } = std::mem::take(&mut self.drag) {
            band.current = self.cursor;
            self.selection = rubber_band_select(band.to_rect(), &self.selection, additive, &self.scene);
            log::debug!("Rubber band selected {} node(s)", self.selection.len());
        }
    }

    // --- Keyboard handling ---

    fn key_down(&mut self, key: &Key, modifiers: Modifiers) {
        if self.text_focus {
            return;
        }
        match key {
            Key::Escape => {
                self.selection.clear();
                self.pending_source = None;
                self.tool = ToolKind::Select;
            }
            Key::Delete | Key::Backspace => {
                self.delete_selected();
            }
            Key::Char(c) if modifiers.platform() => match c.to_ascii_lowercase() {
                'a' => self.selection.select_all(self.scene.node_ids()),
                'd' => {
                    let clones = self.scene.duplicate_nodes(self.selection.ids());
                    if !clones.is_empty() {
                        self.selection.set_all(clones);
                    }
                }
                _ => {}
            },
            Key::Char(_) => {}
        }
    }

    // --- Editing surface ---

    /// Select a tool. Leaving the connector tool drops the pending source.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool == ToolKind::Connector && tool != ToolKind::Connector {
            self.pending_source = None;
        }
        self.tool = tool;
    }

    /// Delete every selected node and the connectors touching them.
    pub fn delete_selected(&mut self) -> Vec<NodeId> {
        let ids = self.selection.ids().clone();
        let removed = self.scene.delete_nodes(&ids);
        self.selection.retain_existing(&self.scene);
        if self.pending_source.is_some_and(|s| !self.scene.contains(s)) {
            self.pending_source = None;
        }
        let before = self.in_flight.len();
        self.in_flight.retain(|_, source| self.scene.contains(*source));
        if before != self.in_flight.len() {
            log::debug!("Cancelled {} expansion(s)", before - self.in_flight.len());
        }
        if !removed.is_empty() {
            log::info!("Deleted {} node(s)", removed.len());
        }
        removed
    }

    /// Recolor the single selected node.
    pub fn recolor_selected(&mut self, color: ColorTag) -> bool {
        match self.selection.single() {
            Some(id) => self.scene.update_node(id, &NodePatch::color(color)),
            None => false,
        }
    }

    pub fn set_node_text(&mut self, id: NodeId, text: &str) -> bool {
        self.scene.update_node(id, &NodePatch::text(text))
    }

    /// Change the outline of a shape node. No-op for other kinds.
    pub fn set_shape_variant(&mut self, id: NodeId, variant: ShapeVariant) -> bool {
        match self.scene.node(id) {
            Some(node) if node.kind == NodeKind::Shape => {
                self.scene.update_node(id, &NodePatch::variant(variant))
            }
            _ => false,
        }
    }

    // --- Expansion ---

    /// Start expanding the single selected node.
    ///
    /// Returns `None` unless exactly one node with non-empty text is selected.
    pub fn begin_expansion(&mut self) -> Option<ExpansionTicket> {
        let source = self.selection.single()?;
        let topic = self.scene.node(source)?.text.trim().to_string();
        if topic.is_empty() {
            return None;
        }
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight.insert(id, source);
        log::debug!("Expansion {} requested for '{}'", id, topic);
        Some(ExpansionTicket {
            id,
            source,
            request: ExpansionRequest { topic },
        })
    }

    /// Apply the outcome of an expansion request.
    ///
    /// Cancelled or unknown tickets, failures and results whose source node is
    /// gone leave the scene untouched. Returns the created node ids.
    pub fn complete_expansion(
        &mut self,
        ticket: &ExpansionTicket,
        result: ExpansionResult<ExpansionResponse>,
    ) -> Vec<NodeId> {
        if self.in_flight.remove(&ticket.id).is_none() {
            log::debug!("Ignoring stale expansion {}", ticket.id);
            return Vec::new();
        }
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Expansion of '{}' failed: {}", ticket.request.topic, e);
                return Vec::new();
            }
        };
        let Some(origin) = self.scene.node(ticket.source).map(|n| n.right_center()) else {
            log::warn!("Expansion source {} no longer exists", ticket.source);
            return Vec::new();
        };

        let positions = cluster_positions(
            origin,
            response.sub_topics.len(),
            self.config.expansion_radius,
        );
        let mut created = Vec::with_capacity(positions.len());
        for (center, text) in positions.into_iter().zip(response.texts()) {
            let id = self.scene.create_node(NodeKind::Shape, center, text);
            self.scene.create_connector(ticket.source, id);
            created.push(id);
        }
        log::info!(
            "Expanded '{}' into {} node(s)",
            ticket.request.topic,
            created.len()
        );
        created
    }

    /// Drop an in-flight ticket so its result is ignored.
    pub fn cancel_expansion(&mut self, ticket_id: u64) -> bool {
        self.in_flight.remove(&ticket_id).is_some()
    }

    /// Whether any expansion request is in flight.
    pub fn is_expanding(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Expand the selected node and wait for the result.
    pub async fn expand_selected(&mut self, service: Option<&dyn ExpansionService>) -> Vec<NodeId> {
        let Some(ticket) = self.begin_expansion() else {
            return Vec::new();
        };
        let result = request_expansion(service, &ticket.request).await;
        self.complete_expansion(&ticket, result)
    }

    // --- Subscription ---

    /// Open a fresh input channel, detaching any previous senders.
    pub fn subscribe(&mut self) -> InputSender {
        let (subscription, sender) = InputSubscription::open();
        self.subscription = Some(subscription);
        sender
    }

    /// Process every queued event in order. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    pub fn unsubscribe(&mut self) {
        self.subscription = None;
    }

    // --- Rendering ---

    /// Screen-space anchor for the property panel of the single selected node.
    pub fn property_anchor(&self) -> Option<Point> {
        snapshot::property_anchor(&self.scene, &self.selection, &self.viewport)
    }

    pub fn rubber_band_rect(&self) -> Option<Rect> {
        match &self.drag {
            DragState::RubberBand { band, .. } => Some(band.to_rect()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut selection: Vec<NodeId> = self.selection.ids().iter().copied().collect();
        selection.sort();
        Snapshot {
            nodes: snapshot::node_views(&self.scene, &self.selection),
            connectors: snapshot::connector_views(&self.scene),
            viewport: ViewportView::from(&self.viewport),
            selection,
            pending_connection_source: self.pending_source,
            cursor: self.cursor,
            rubber_band: self.rubber_band_rect(),
            property_anchor: self.property_anchor(),
            connection_preview: snapshot::connection_preview(
                &self.scene,
                self.pending_source,
                self.cursor,
            ),
            tool: self.tool,
            expanding: self.is_expanding(),
        }
    }
}
