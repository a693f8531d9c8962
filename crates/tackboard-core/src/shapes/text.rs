//! Free-standing text box shape.

use super::{now_millis, Color, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text box without a filled background.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShape {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub z: i64,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub color: Color,
    pub created_at: u64,
    pub updated_at: u64,
}

impl TextShape {
    /// Create a default-sized text box at `position`.
    pub fn new(position: Point, text: String) -> Self {
        let size = ShapeKind::Text.default_size();
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            position,
            width: size.width,
            height: size.height,
            z: 0,
            text,
            font_size: 16.0,
            font_family: "sans-serif".to_string(),
            color: Color::black(),
            created_at: now,
            updated_at: now,
        }
    }
}
