//! Image shape.

use super::{now_millis, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image placed on the board. Pixel data stays outside the core; the
/// shape carries the source reference and the natural (source) size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageShape {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub z: i64,
    /// Source reference (URL, path, or data URI).
    pub src: String,
    /// Natural pixel size of the source image.
    pub natural_width: f64,
    pub natural_height: f64,
    pub created_at: u64,
    pub updated_at: u64,
}

impl ImageShape {
    /// Create an image at `position` displayed at the given size.
    pub fn new(position: Point, src: String, width: f64, height: f64) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            z: 0,
            src,
            natural_width: width,
            natural_height: height,
            created_at: now,
            updated_at: now,
        }
    }

    /// Aspect ratio of the source image.
    pub fn natural_aspect(&self) -> f64 {
        if self.natural_height > 0.0 {
            self.natural_width / self.natural_height
        } else {
            1.0
        }
    }
}
