//! Viewport module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;
/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom change per unit of vertical wheel delta.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;

/// Viewport manages the view transform for the canvas.
///
/// It converts between screen coordinates (pixels of the viewing surface) and
/// canvas coordinates (the unbounded logical plane nodes live on).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom zoom bounds.
    ///
    /// Bounds that are not finite with `0 < min <= max` fall back to
    /// [`MIN_ZOOM`] and [`MAX_ZOOM`].
    pub fn with_zoom_bounds(min_zoom: f64, max_zoom: f64) -> Self {
        let valid = min_zoom.is_finite()
            && max_zoom.is_finite()
            && 0.0 < min_zoom
            && min_zoom <= max_zoom;
        if !valid {
            log::warn!("Invalid zoom bounds [{}, {}], using defaults", min_zoom, max_zoom);
            return Self::default();
        }
        Self {
            min_zoom,
            max_zoom,
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            ..Self::default()
        }
    }

    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts canvas coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to canvas coordinates.
    ///
    /// Computed directly rather than through the inverted affine so the
    /// round trip with [`Viewport::canvas_to_screen`] stays exact.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        Point::new(
            canvas_point.x * self.zoom + self.offset.x,
            canvas_point.y * self.zoom + self.offset.y,
        )
    }

    /// Convert a screen-space distance to canvas units.
    pub fn screen_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Pan the viewport by a delta in screen coordinates. Unbounded.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Change the zoom by an additive delta, clamped to the zoom bounds.
    ///
    /// The zoom is anchored at the viewport origin, not at the cursor: the
    /// canvas point under the cursor moves as the zoom changes.
    pub fn zoom_by(&mut self, delta: f64) {
        // Deserialized bounds are unchecked, so no `clamp`.
        self.zoom = (self.zoom + delta).max(self.min_zoom).min(self.max_zoom);
    }

    /// Apply a wheel gesture.
    ///
    /// With the zoom modifier held the vertical delta drives the zoom,
    /// otherwise both deltas scroll the view.
    pub fn apply_wheel(&mut self, delta: Vec2, zoom_modifier: bool, zoom_factor: f64) {
        if zoom_modifier {
            self.zoom_by(-delta.y * zoom_factor);
        } else {
            self.pan(-delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_identity() {
        let viewport = Viewport::new();
        let screen = Point::new(100.0, 200.0);
        let canvas = viewport.screen_to_canvas(screen);
        assert!((canvas.x - screen.x).abs() < f64::EPSILON);
        assert!((canvas.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_offset_and_zoom() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(50.0, 100.0);
        viewport.zoom = 2.0;
        let canvas = viewport.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let states = [
            (Vec2::new(30.0, -20.0), 1.5),
            (Vec2::new(-1234.5, 987.25), 0.1),
            (Vec2::new(0.3, 0.7), 4.99),
            (Vec2::ZERO, 1.0),
        ];
        for (offset, zoom) in states {
            let viewport = Viewport { offset, zoom, ..Viewport::default() };
            for original in [Point::new(123.0, 456.0), Point::new(-7.5, 0.001), Point::ZERO] {
                let back = viewport.canvas_to_screen(viewport.screen_to_canvas(original));
                assert!((back.x - original.x).abs() < 1e-9);
                assert!((back.y - original.y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_transform_matches_canvas_to_screen() {
        let viewport = Viewport { offset: Vec2::new(12.0, 34.0), zoom: 2.5, ..Viewport::default() };
        let p = Point::new(3.0, -4.0);
        let a = viewport.transform() * p;
        let b = viewport.canvas_to_screen(p);
        assert!((a.x - b.x).abs() < 1e-10);
        assert!((a.y - b.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        for _ in 0..100 {
            viewport.zoom_by(1.0);
        }
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);

        for _ in 0..100 {
            viewport.zoom_by(-1.0);
        }
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_keeps_origin_fixed() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(40.0, 40.0);
        viewport.zoom_by(0.5);
        // Only the zoom changes, the pan offset is untouched.
        assert_eq!(viewport.offset, Vec2::new(40.0, 40.0));
        assert!((viewport.zoom - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_zoom_bounds_fall_back() {
        for (min, max) in [(2.0, 1.0), (f64::NAN, 5.0), (0.1, f64::INFINITY), (0.0, 1.0), (-1.0, 2.0)] {
            let mut viewport = Viewport::with_zoom_bounds(min, max);
            assert_eq!(viewport.zoom_bounds(), (MIN_ZOOM, MAX_ZOOM));
            viewport.zoom_by(100.0);
            assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
        }

        let mut viewport = Viewport::with_zoom_bounds(2.0, 3.0);
        assert!((viewport.zoom - 2.0).abs() < f64::EPSILON);
        viewport.zoom_by(-1.0);
        assert!((viewport.zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_delta_to_canvas() {
        let viewport = Viewport { zoom: 4.0, ..Viewport::default() };
        assert_eq!(viewport.screen_delta_to_canvas(Vec2::new(8.0, -2.0)), Vec2::new(2.0, -0.5));
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(10.0, 20.0));
        assert!((viewport.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_pans_without_modifier() {
        let mut viewport = Viewport::new();
        viewport.apply_wheel(Vec2::new(5.0, -15.0), false, WHEEL_ZOOM_FACTOR);
        assert_eq!(viewport.offset, Vec2::new(-5.0, 15.0));
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zooms_with_modifier() {
        let mut viewport = Viewport::new();
        viewport.apply_wheel(Vec2::new(0.0, -100.0), true, WHEEL_ZOOM_FACTOR);
        assert!((viewport.zoom - 1.1).abs() < 1e-12);
        assert_eq!(viewport.offset, Vec2::ZERO);
    }
}
