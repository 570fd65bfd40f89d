//! Application configuration.

use crate::error::{AppError, AppResult};
use ideaboard_core::{EngineConfig, StaticExpansionService};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Canned subtopics per topic for the offline expansion service.
    /// Absent means expansion is unavailable.
    pub expansion: Option<HashMap<String, Vec<String>>>,
}

impl AppConfig {
    /// Load from a JSON file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        let engine = &self.engine;
        if !(engine.min_zoom > 0.0 && engine.min_zoom <= engine.max_zoom) {
            return Err(AppError::Config(format!(
                "invalid zoom bounds {}..{}",
                engine.min_zoom, engine.max_zoom
            )));
        }
        if engine.min_resize_dimension <= 0.0 {
            return Err(AppError::Config(
                "min_resize_dimension must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the offline expansion service, if one is configured.
    pub fn expansion_service(&self) -> Option<StaticExpansionService> {
        self.expansion
            .as_ref()
            .map(|topics| topics.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.expansion_service().is_none());
    }

    #[test]
    fn test_parse_with_expansion() {
        let config = AppConfig::from_json(
            r#"{"engine":{"expansion_radius":300.0},"expansion":{"Physics":["Mechanics","Optics"]}}"#,
        )
        .unwrap();
        assert!((config.engine.expansion_radius - 300.0).abs() < f64::EPSILON);
        assert!((config.engine.max_zoom - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.expansion_service().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_bad_zoom_bounds() {
        let result = AppConfig::from_json(r#"{"engine":{"min_zoom":2.0,"max_zoom":1.0}}"#);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/ideaboard.json")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
