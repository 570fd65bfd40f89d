//! Headless session: replays a recorded script through the engine.
//!
//! Input events travel through the engine's input subscription. Expansion
//! requests are queued as tickets and resolved on `settle`, so input can keep
//! flowing while a request is outstanding.

use crate::config::AppConfig;
use crate::error::AppResult;
use ideaboard_core::expansion::request_expansion;
use ideaboard_core::shapes::{ColorTag, ShapeVariant};
use ideaboard_core::{
    Controller, ExpansionService, ExpansionTicket, InputEvent, InputSender, Modifiers,
    PointerButton, Snapshot, StaticExpansionService, ToolKind,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One step of a recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// A raw input event.
    Input { event: InputEvent },
    /// Press and release the primary button at a screen position.
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SetTool { tool: ToolKind },
    /// Commit text into the single selected node.
    SetText { text: String },
    Recolor { color: ColorTag },
    SetVariant { variant: ShapeVariant },
    Delete,
    /// Request an expansion of the single selected node.
    Expand,
    /// Resolve every outstanding expansion request.
    Settle,
}

/// A running engine plus its collaborators.
pub struct Session {
    controller: Controller,
    input: InputSender,
    service: Option<StaticExpansionService>,
    pending: Vec<ExpansionTicket>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let mut controller = Controller::with_config(config.engine.clone());
        let input = controller.subscribe();
        Self {
            controller,
            input,
            service: config.expansion_service(),
            pending: Vec::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Parse a JSON script.
    pub fn parse_script(text: &str) -> AppResult<Vec<Step>> {
        Ok(serde_json::from_str(text)?)
    }

    /// Run every step, settle outstanding requests and return the final frame.
    pub fn run(&mut self, steps: &[Step]) -> AppResult<Snapshot> {
        for step in steps {
            self.apply(step)?;
        }
        self.settle();
        Ok(self.controller.snapshot())
    }

    pub fn apply(&mut self, step: &Step) -> AppResult<()> {
        match step {
            Step::Input { event } => self.send(event.clone())?,
            Step::Click { x, y, modifiers } => {
                let position = Point::new(*x, *y);
                self.send(InputEvent::PointerDown {
                    position,
                    button: PointerButton::Primary,
                    modifiers: *modifiers,
                })?;
                self.send(InputEvent::PointerUp {
                    position,
                    button: PointerButton::Primary,
                    modifiers: *modifiers,
                })?;
            }
            Step::SetTool { tool } => self.controller.set_tool(*tool),
            Step::SetText { text } => {
                if let Some(id) = self.controller.selection().single() {
                    self.controller.set_node_text(id, text);
                }
            }
            Step::Recolor { color } => {
                self.controller.recolor_selected(*color);
            }
            Step::SetVariant { variant } => {
                if let Some(id) = self.controller.selection().single() {
                    self.controller.set_shape_variant(id, *variant);
                }
            }
            Step::Delete => {
                self.controller.delete_selected();
            }
            Step::Expand => match self.controller.begin_expansion() {
                Some(ticket) => self.pending.push(ticket),
                None => log::debug!("Nothing to expand"),
            },
            Step::Settle => self.settle(),
        }
        Ok(())
    }

    fn send(&mut self, event: InputEvent) -> AppResult<()> {
        self.input.send(event)?;
        self.controller.pump();
        Ok(())
    }

    /// Resolve queued expansion tickets in request order.
    pub fn settle(&mut self) {
        let service = self.service.as_ref().map(|s| s as &dyn ExpansionService);
        for ticket in std::mem::take(&mut self.pending) {
            let result = pollster::block_on(request_expansion(service, &ticket.request));
            self.controller.complete_expansion(&ticket, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideaboard_core::shapes::NodeKind;

    fn config_with_physics() -> AppConfig {
        AppConfig::from_json(
            r#"{"expansion":{"Physics":["Mechanics","Optics","Thermodynamics","Relativity"]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_script() {
        let steps = Session::parse_script(
            r#"[
                {"step":"set_tool","tool":"Shape"},
                {"step":"click","x":100.0,"y":100.0},
                {"step":"set_text","text":"Physics"},
                {"step":"input","event":{"type":"key","key":"Escape"}},
                {"step":"expand"}
            ]"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], Step::SetTool { tool: ToolKind::Shape });
    }

    #[test]
    fn test_run_places_and_expands() {
        let mut session = Session::new(&config_with_physics());
        let snapshot = session
            .run(&[
                Step::SetTool { tool: ToolKind::Shape },
                Step::Click { x: 100.0, y: 100.0, modifiers: Modifiers::NONE },
                Step::SetText { text: "Physics".to_string() },
                Step::Expand,
            ])
            .unwrap();
        assert_eq!(snapshot.nodes.len(), 5);
        assert_eq!(snapshot.connectors.len(), 4);
        assert!(!snapshot.expanding);
        assert!(snapshot.nodes.iter().all(|n| n.kind == NodeKind::Shape));
    }

    #[test]
    fn test_input_flows_while_expansion_pending() {
        let mut session = Session::new(&config_with_physics());
        for step in [
            Step::SetTool { tool: ToolKind::Note },
            Step::Click { x: 100.0, y: 100.0, modifiers: Modifiers::NONE },
            Step::SetText { text: "Physics".to_string() },
            Step::Expand,
            Step::Recolor { color: ColorTag::Green },
        ] {
            session.apply(&step).unwrap();
        }
        assert!(session.controller().is_expanding());
        assert_eq!(session.controller().scene().len(), 1);

        session.apply(&Step::Settle).unwrap();
        assert!(!session.controller().is_expanding());
        assert_eq!(session.controller().scene().len(), 5);
    }

    #[test]
    fn test_deleted_source_drops_result() {
        let mut session = Session::new(&config_with_physics());
        let snapshot = session
            .run(&[
                Step::SetTool { tool: ToolKind::Note },
                Step::Click { x: 100.0, y: 100.0, modifiers: Modifiers::NONE },
                Step::SetText { text: "Physics".to_string() },
                Step::Expand,
                Step::Delete,
            ])
            .unwrap();
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.connectors.is_empty());
        assert!(!snapshot.expanding);
    }

    #[test]
    fn test_expansion_unavailable_without_config() {
        let mut session = Session::new(&AppConfig::default());
        let snapshot = session
            .run(&[
                Step::SetTool { tool: ToolKind::Shape },
                Step::Click { x: 0.0, y: 0.0, modifiers: Modifiers::NONE },
                Step::SetText { text: "Physics".to_string() },
                Step::SetVariant { variant: ShapeVariant::Circle },
                Step::Expand,
            ])
            .unwrap();
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.nodes[0].variant, ShapeVariant::Circle);
        assert!(!snapshot.expanding);
    }
}
