//! Engine tunables.

use crate::expansion::EXPANSION_RADIUS;
use crate::handles::{HANDLE_HIT_TOLERANCE, MIN_RESIZE_DIMENSION};
use crate::scene::DUPLICATE_OFFSET;
use crate::viewport::{MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_FACTOR};
use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change per unit of vertical wheel delta.
    pub wheel_zoom_factor: f64,
    /// Smallest width or height a resize can produce.
    pub min_resize_dimension: f64,
    /// Offset applied to duplicated nodes on both axes.
    pub duplicate_offset: f64,
    /// Radius of the expansion cluster.
    pub expansion_radius: f64,
    /// Resize handle hit tolerance in screen pixels.
    pub handle_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_factor: WHEEL_ZOOM_FACTOR,
            min_resize_dimension: MIN_RESIZE_DIMENSION,
            duplicate_offset: DUPLICATE_OFFSET,
            expansion_radius: EXPANSION_RADIUS,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!((config.min_zoom - 0.1).abs() < f64::EPSILON);
        assert!((config.max_zoom - 5.0).abs() < f64::EPSILON);
        assert!((config.min_resize_dimension - 50.0).abs() < f64::EPSILON);
        assert!((config.expansion_radius - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_zoom": 3.0}"#).unwrap();
        assert!((config.max_zoom - 3.0).abs() < f64::EPSILON);
        assert!((config.min_zoom - 0.1).abs() < f64::EPSILON);
        assert!((config.duplicate_offset - 20.0).abs() < f64::EPSILON);
    }
}
