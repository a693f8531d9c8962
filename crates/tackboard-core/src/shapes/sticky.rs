//! Sticky note shape.

use super::{now_millis, Color, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sticky note: a filled square of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticky {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Z-order integer (higher draws on top).
    pub z: i64,
    /// Note content.
    pub text: String,
    pub font_size: f64,
    /// Fill color.
    pub fill: Color,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Sticky {
    /// Create a default-sized sticky note at `position`.
    pub fn new(position: Point) -> Self {
        Self::with_text(position, String::new())
    }

    /// Create a sticky note with initial text.
    pub fn with_text(position: Point, text: String) -> Self {
        let size = ShapeKind::Sticky.default_size();
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            position,
            width: size.width,
            height: size.height,
            z: 0,
            text,
            font_size: 16.0,
            fill: Color::sticky_yellow(),
            created_at: now,
            updated_at: now,
        }
    }
}
