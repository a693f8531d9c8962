//! Tool palette for the board.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Sticky,
    Text,
    Rect,
    Image,
    /// Two-click connector drawing.
    Line,
}

impl ToolKind {
    /// The shape kind this tool places on click, if any.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Sticky => Some(ShapeKind::Sticky),
            ToolKind::Text => Some(ShapeKind::Text),
            ToolKind::Rect => Some(ShapeKind::Rect),
            ToolKind::Image => Some(ShapeKind::Image),
            ToolKind::Select | ToolKind::Line => None,
        }
    }
}
