//! Plain rectangle shape.

use super::{now_millis, Color, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle with stroke and optional fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectShape {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub z: i64,
    /// Fill color (None = outline only).
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f64,
    pub created_at: u64,
    pub updated_at: u64,
}

impl RectShape {
    /// Create a rectangle at `position` with the given size.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            z: 0,
            fill: None,
            stroke: Color::black(),
            stroke_width: 2.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        Self::new(
            Point::new(min_x, min_y),
            (p2.x - p1.x).abs(),
            (p2.y - p1.y).abs(),
        )
    }
}
