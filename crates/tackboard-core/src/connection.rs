//! Two-click connection protocol.
//!
//! With the line tool active, the first click on a shape starts a pending
//! connection from that shape's nearest anchor; the pointer is released
//! between clicks, and a preview line follows the cursor until the second
//! click completes or cancels. A first click on empty canvas creates a
//! free connector instead.

use crate::board::Board;
use crate::connector::ConnectorId;
use crate::geometry::{self, AnchorSide};
use crate::shapes::ShapeId;
use crate::tools::ToolKind;
use kurbo::Point;

/// In-flight state between the two clicks. Exists only while connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionMode {
    pub from_id: ShapeId,
    pub from_anchor: AnchorSide,
}

/// Outcome of a line-tool click, mostly for callers that need to update
/// cursor/tool chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    Started,
    Completed(ConnectorId),
    Cancelled,
    FreeCreated(ConnectorId),
}

impl Board {
    /// The pending connection, if the protocol is mid-flight.
    pub fn connection(&self) -> Option<ConnectionMode> {
        self.connection
    }

    /// Start a connection from a shape. The source anchor is the one
    /// nearest the click.
    pub fn start_connection(&mut self, from_id: ShapeId, at: Point) -> bool {
        let Some(shape) = self.document.shape(from_id) else {
            return false;
        };
        let from_anchor = geometry::nearest_anchor(shape.bounds(), at);
        self.connection = Some(ConnectionMode {
            from_id,
            from_anchor,
        });
        true
    }

    /// Complete the pending connection onto a target shape. A click back
    /// on the source shape cancels instead; the line tool stays active in
    /// both of those non-creating outcomes.
    pub fn complete_connection(&mut self, to_id: ShapeId) -> Option<ConnectorId> {
        let pending = self.connection.take()?;
        if pending.from_id == to_id {
            return None;
        }
        self.history.record(&self.document);
        let id = self.document.add_connector(pending.from_id, to_id);
        if id.is_none() {
            self.history.revert(&mut self.document);
            return None;
        }
        self.tool = ToolKind::Select;
        self.mark_dirty();
        id
    }

    /// Abandon the pending connection. Creates nothing.
    pub fn cancel_connection(&mut self) {
        self.connection = None;
    }

    /// The preview segment from the pending source anchor to the cursor,
    /// rendered between the two clicks.
    pub fn connection_preview(&self, cursor: Point) -> Option<[Point; 2]> {
        let pending = self.connection?;
        let shape = self.document.shape(pending.from_id)?;
        let from = geometry::anchor_point(shape.bounds(), pending.from_anchor);
        Some([from, cursor])
    }

    /// One click of the line tool, in world coordinates. Dispatches on
    /// protocol state and what is under the cursor.
    pub fn line_tool_click(&mut self, world: Point) -> ConnectionEvent {
        let hit = self.hover_shape_at(world);
        match (self.connection, hit) {
            // First click on a shape: begin connecting
            (None, Some(shape_id)) => {
                self.start_connection(shape_id, world);
                ConnectionEvent::Started
            }
            // First click on empty canvas: free connector, back to select
            (None, None) => {
                self.history.record(&self.document);
                let id = self.document.add_free_connector(world);
                self.tool = ToolKind::Select;
                self.mark_dirty();
                ConnectionEvent::FreeCreated(id)
            }
            // Second click on a shape: complete, or cancel on the source
            (Some(_), Some(shape_id)) => match self.complete_connection(shape_id) {
                Some(id) => ConnectionEvent::Completed(id),
                None => ConnectionEvent::Cancelled,
            },
            // Second click on empty background: cancel, back to select
            (Some(_), None) => {
                self.cancel_connection();
                self.tool = ToolKind::Select;
                ConnectionEvent::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeKind;

    fn board_with_two_stickies() -> (Board, ShapeId, ShapeId) {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, Point::new(100.0, 100.0));
        let b = board.place_shape(ShapeKind::Sticky, Point::new(300.0, 100.0));
        board.set_tool(ToolKind::Line);
        (board, a, b)
    }

    #[test]
    fn test_complete_creates_one_connector_and_reverts_tool() {
        let (mut board, a, b) = board_with_two_stickies();

        let first = board.line_tool_click(Point::new(195.0, 150.0));
        assert_eq!(first, ConnectionEvent::Started);
        let pending = board.connection().unwrap();
        assert_eq!(pending.from_id, a);
        assert_eq!(pending.from_anchor, AnchorSide::Right);
        // Still connecting: tool stays on line
        assert_eq!(board.tool(), ToolKind::Line);

        let second = board.line_tool_click(Point::new(310.0, 150.0));
        let ConnectionEvent::Completed(id) = second else {
            panic!("expected completion, got {second:?}");
        };
        let connector = board.document().connector(id).unwrap();
        assert_eq!(connector.from_id, Some(a));
        assert_eq!(connector.to_id, Some(b));
        assert_eq!(board.tool(), ToolKind::Select);
        assert!(board.connection().is_none());
    }

    #[test]
    fn test_second_click_on_source_cancels() {
        let (mut board, _a, _b) = board_with_two_stickies();

        board.line_tool_click(Point::new(150.0, 150.0));
        let outcome = board.line_tool_click(Point::new(160.0, 160.0));
        assert_eq!(outcome, ConnectionEvent::Cancelled);
        assert!(board.document().connectors().is_empty());
        assert!(board.connection().is_none());
        // Same-shape cancel keeps the line tool active
        assert_eq!(board.tool(), ToolKind::Line);
    }

    #[test]
    fn test_background_click_cancels_and_reverts_tool() {
        let (mut board, _a, _b) = board_with_two_stickies();

        board.line_tool_click(Point::new(150.0, 150.0));
        let outcome = board.line_tool_click(Point::new(900.0, 900.0));
        assert_eq!(outcome, ConnectionEvent::Cancelled);
        assert!(board.document().connectors().is_empty());
        assert_eq!(board.tool(), ToolKind::Select);
    }

    #[test]
    fn test_first_click_on_canvas_creates_free_connector() {
        let (mut board, _a, _b) = board_with_two_stickies();

        let outcome = board.line_tool_click(Point::new(900.0, 900.0));
        let ConnectionEvent::FreeCreated(id) = outcome else {
            panic!("expected free connector, got {outcome:?}");
        };
        assert!(board.document().connector(id).unwrap().is_free());
        assert_eq!(board.tool(), ToolKind::Select);
    }

    #[test]
    fn test_preview_follows_cursor() {
        let (mut board, _a, _b) = board_with_two_stickies();

        assert!(board.connection_preview(Point::new(0.0, 0.0)).is_none());
        board.line_tool_click(Point::new(195.0, 150.0));
        let [from, to] = board.connection_preview(Point::new(250.0, 120.0)).unwrap();
        // Source anchor is the first sticky's right edge midpoint
        assert_eq!(from, Point::new(200.0, 150.0));
        assert_eq!(to, Point::new(250.0, 120.0));
    }

    #[test]
    fn test_switching_tools_cancels_connection() {
        let (mut board, _a, _b) = board_with_two_stickies();
        board.line_tool_click(Point::new(150.0, 150.0));
        assert!(board.connection().is_some());
        board.set_tool(ToolKind::Select);
        assert!(board.connection().is_none());
    }
}
