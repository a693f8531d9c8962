//! Viewport pan/zoom transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 4.0;

/// The view transform: `screen = world * zoom + pan`.
///
/// Persisted as `{zoom, panX, panY}` in the board export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan_x,
            world.y * self.zoom + self.pan_y,
        )
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Zoom by a factor, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let world = self.screen_to_world(screen);
        self.zoom = new_zoom;
        let shifted = self.world_to_screen(world);
        self.pan_x += screen.x - shifted.x;
        self.pan_y += screen.y - shifted.y;
    }

    /// The zoom level clamped for hit-testing math. Identical to `zoom`
    /// unless the stored value was tampered with out of range.
    pub fn clamped_zoom(&self) -> f64 {
        self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let vp = Viewport::new();
        let p = Point::new(100.0, 200.0);
        assert_eq!(vp.screen_to_world(p), p);
    }

    #[test]
    fn test_roundtrip() {
        let mut vp = Viewport::new();
        vp.pan(Vec2::new(30.0, -20.0));
        vp.set_zoom(1.5);
        let original = Point::new(123.0, 456.0);
        let back = vp.world_to_screen(vp.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut vp = Viewport::new();
        vp.zoom_at(Point::ZERO, 0.001);
        assert!((vp.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        vp.zoom = 1.0;
        vp.zoom_at(Point::ZERO, 1000.0);
        assert!((vp.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut vp = Viewport::new();
        let pivot = Point::new(400.0, 300.0);
        let world_before = vp.screen_to_world(pivot);
        vp.zoom_at(pivot, 2.0);
        let world_after = vp.screen_to_world(pivot);
        assert!((world_before.x - world_after.x).abs() < 1e-10);
        assert!((world_before.y - world_after.y).abs() < 1e-10);
    }
}
