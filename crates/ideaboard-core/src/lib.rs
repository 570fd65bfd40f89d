//! Ideaboard Core Library
//!
//! Platform-agnostic geometry and interaction engine for the Ideaboard canvas.

pub mod anchor;
pub mod config;
pub mod controller;
pub mod expansion;
pub mod handles;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod snapshot;
pub mod subscription;
pub mod tools;
pub mod viewport;

pub use anchor::{AnchorGeometry, anchor_point, connector_endpoints};
pub use config::EngineConfig;
pub use controller::{Controller, DragState};
pub use expansion::{
    ExpansionError, ExpansionRequest, ExpansionResponse, ExpansionResult, ExpansionService,
    ExpansionTicket, StaticExpansionService,
};
pub use input::{InputEvent, Key, Modifiers, PointerButton};
pub use scene::Scene;
pub use selection::Selection;
pub use snapshot::Snapshot;
pub use subscription::{InputSender, SubscriptionError};
pub use tools::ToolKind;
pub use viewport::Viewport;
