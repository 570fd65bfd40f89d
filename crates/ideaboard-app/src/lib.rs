//! Ideaboard Application
//!
//! Headless shell around the engine: configuration, logging and session
//! replay.

mod config;
mod error;
mod session;
mod shortcuts;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use session::{Session, Step};
pub use shortcuts::{Shortcut, ShortcutRegistry};
