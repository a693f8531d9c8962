//! Shape definitions for the board.

mod image;
mod rect;
mod sticky;
mod text;

pub use image::ImageShape;
pub use rect::RectShape;
pub use sticky::Sticky;
pub use text::TextShape;

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Milliseconds since the Unix epoch, for creation/update timestamps.
pub(crate) fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Classic sticky-note yellow.
    pub fn sticky_yellow() -> Self {
        Self::new(255, 235, 130, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Discriminant of the shape union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Sticky,
    Text,
    Rect,
    Image,
}

impl ShapeKind {
    /// Minimum width/height for this shape type. Enforced at every
    /// mutation site, not only at creation.
    pub fn min_size(self) -> Size {
        match self {
            ShapeKind::Sticky => Size::new(100.0, 50.0),
            ShapeKind::Text => Size::new(40.0, 20.0),
            ShapeKind::Rect => Size::new(20.0, 20.0),
            ShapeKind::Image => Size::new(20.0, 10.0),
        }
    }

    /// Default size when the shape is created by a tool click.
    pub fn default_size(self) -> Size {
        match self {
            ShapeKind::Sticky => Size::new(100.0, 100.0),
            ShapeKind::Text => Size::new(160.0, 40.0),
            ShapeKind::Rect => Size::new(120.0, 80.0),
            ShapeKind::Image => Size::new(160.0, 120.0),
        }
    }
}

/// Tagged shape union (`"type": "sticky" | "text" | "rect" | "image"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Sticky(Sticky),
    Text(TextShape),
    Rect(RectShape),
    Image(ImageShape),
}

impl Shape {
    /// Create a default-sized shape of the given kind at `position`.
    pub fn new(kind: ShapeKind, position: Point) -> Self {
        match kind {
            ShapeKind::Sticky => Shape::Sticky(Sticky::new(position)),
            ShapeKind::Text => Shape::Text(TextShape::new(position, String::new())),
            ShapeKind::Rect => Shape::Rect(RectShape::new(
                position,
                kind.default_size().width,
                kind.default_size().height,
            )),
            ShapeKind::Image => Shape::Image(ImageShape::new(
                position,
                String::new(),
                kind.default_size().width,
                kind.default_size().height,
            )),
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Sticky(s) => s.id,
            Shape::Text(s) => s.id,
            Shape::Rect(s) => s.id,
            Shape::Image(s) => s.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sticky(_) => ShapeKind::Sticky,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Image(_) => ShapeKind::Image,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Sticky(s) => s.position,
            Shape::Text(s) => s.position,
            Shape::Rect(s) => s.position,
            Shape::Image(s) => s.position,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            Shape::Sticky(s) => Size::new(s.width, s.height),
            Shape::Text(s) => Size::new(s.width, s.height),
            Shape::Rect(s) => Size::new(s.width, s.height),
            Shape::Image(s) => Size::new(s.width, s.height),
        }
    }

    /// Bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        let p = self.position();
        let s = self.size();
        Rect::new(p.x, p.y, p.x + s.width, p.y + s.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Z-order integer (higher draws on top).
    pub fn z(&self) -> i64 {
        match self {
            Shape::Sticky(s) => s.z,
            Shape::Text(s) => s.z,
            Shape::Rect(s) => s.z,
            Shape::Image(s) => s.z,
        }
    }

    pub fn set_z(&mut self, z: i64) {
        match self {
            Shape::Sticky(s) => s.z = z,
            Shape::Text(s) => s.z = z,
            Shape::Rect(s) => s.z = z,
            Shape::Image(s) => s.z = z,
        }
    }

    pub fn created_at(&self) -> u64 {
        match self {
            Shape::Sticky(s) => s.created_at,
            Shape::Text(s) => s.created_at,
            Shape::Rect(s) => s.created_at,
            Shape::Image(s) => s.created_at,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Sticky(s) => s.position = position,
            Shape::Text(s) => s.position = position,
            Shape::Rect(s) => s.position = position,
            Shape::Image(s) => s.position = position,
        }
        self.touch();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position() + delta);
    }

    /// Set the bounding box, clamping width/height to the type minimum.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let min = self.kind().min_size();
        let width = bounds.width().max(min.width);
        let height = bounds.height().max(min.height);
        let origin = Point::new(bounds.x0, bounds.y0);
        match self {
            Shape::Sticky(s) => {
                s.position = origin;
                s.width = width;
                s.height = height;
            }
            Shape::Text(s) => {
                s.position = origin;
                s.width = width;
                s.height = height;
            }
            Shape::Rect(s) => {
                s.position = origin;
                s.width = width;
                s.height = height;
            }
            Shape::Image(s) => {
                s.position = origin;
                s.width = width;
                s.height = height;
            }
        }
        self.touch();
    }

    /// Re-apply the type minimum after arbitrary field edits.
    pub fn clamp_min_size(&mut self) {
        let min = self.kind().min_size();
        let s = self.size();
        if s.width < min.width || s.height < min.height {
            let p = self.position();
            self.set_bounds(Rect::new(
                p.x,
                p.y,
                p.x + s.width.max(min.width),
                p.y + s.height.max(min.height),
            ));
        }
    }

    /// Point-in-box test (no tolerance).
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Give the shape a fresh identity (used when duplicating).
    pub fn regenerate_id(&mut self) {
        let id = Uuid::new_v4();
        match self {
            Shape::Sticky(s) => s.id = id,
            Shape::Text(s) => s.id = id,
            Shape::Rect(s) => s.id = id,
            Shape::Image(s) => s.id = id,
        }
    }

    fn touch(&mut self) {
        let now = now_millis();
        match self {
            Shape::Sticky(s) => s.updated_at = now,
            Shape::Text(s) => s.updated_at = now,
            Shape::Rect(s) => s.updated_at = now,
            Shape::Image(s) => s.updated_at = now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_bounds() {
        let shape = Shape::Sticky(Sticky::new(Point::new(10.0, 20.0)));
        let bounds = shape.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 100.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_bounds_clamps_to_minimum() {
        let mut shape = Shape::Sticky(Sticky::new(Point::new(0.0, 0.0)));
        shape.set_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        let size = shape.size();
        assert!((size.width - 100.0).abs() < f64::EPSILON);
        assert!((size.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_min_size_after_field_edit() {
        let mut shape = Shape::Image(ImageShape::new(
            Point::new(0.0, 0.0),
            "img.png".to_string(),
            100.0,
            100.0,
        ));
        if let Shape::Image(img) = &mut shape {
            img.width = 1.0;
            img.height = 1.0;
        }
        shape.clamp_min_size();
        let size = shape.size();
        assert!((size.width - 20.0).abs() < f64::EPSILON);
        assert!((size.height - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_regenerate_id() {
        let mut shape = Shape::Rect(RectShape::new(Point::new(0.0, 0.0), 120.0, 80.0));
        let old = shape.id();
        shape.regenerate_id();
        assert_ne!(shape.id(), old);
    }

    #[test]
    fn test_tagged_serialization() {
        let shape = Shape::Sticky(Sticky::new(Point::new(0.0, 0.0)));
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"sticky\""));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), shape.id());
    }
}
