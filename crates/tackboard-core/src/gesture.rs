//! Gesture coordinator: raw pointer events in, semantic operations out.
//!
//! Every pointer-down is provisionally a click. It escalates to a drag,
//! resize or marquee once cumulative movement crosses a small screen-pixel
//! threshold; at that moment exactly one history snapshot is taken for the
//! whole gesture, and every intermediate update skips history. Escape
//! mid-gesture reverts to the pre-gesture document.

use crate::board::Board;
use crate::connector::{ConnectorEnd, ConnectorId};
use crate::geometry;
use crate::shapes::ShapeId;
use crate::tools::ToolKind;
use kurbo::{Point, Rect, Size, Vec2};

/// Movement (screen px) past which a press on an entity becomes a drag.
pub const DRAG_THRESHOLD: f64 = 4.0;
/// Movement (screen px) past which a background press becomes a marquee.
pub const MARQUEE_THRESHOLD: f64 = 5.0;
/// Screen-pixel radius for grabbing resize and endpoint handles.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Screen-pixel radius for hitting a connector line.
pub const CONNECTOR_HIT_TOLERANCE: f64 = 6.0;

/// A corner resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// The corner of `rect` this handle sits on.
    pub fn corner(self, rect: Rect) -> Point {
        match self {
            Handle::Nw => Point::new(rect.x0, rect.y0),
            Handle::Ne => Point::new(rect.x1, rect.y0),
            Handle::Sw => Point::new(rect.x0, rect.y1),
            Handle::Se => Point::new(rect.x1, rect.y1),
        }
    }

    /// Per-axis sign of the box growth for a positive pointer delta.
    fn growth(self) -> (f64, f64) {
        match self {
            Handle::Nw => (-1.0, -1.0),
            Handle::Ne => (1.0, -1.0),
            Handle::Sw => (-1.0, 1.0),
            Handle::Se => (1.0, 1.0),
        }
    }
}

/// What a pointer-down landed on, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    Handle(ShapeId, Handle),
    ConnectorEnd(ConnectorId, ConnectorEnd),
    Shape(ShapeId),
    Connector(ConnectorId),
    Background,
}

/// The gesture state machine. `Pressed` is the provisional-click state;
/// the drag states each hold what they need to replay the gesture from
/// its start position, so intermediate moves never compound error.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Pressed {
        start: Point,
        target: PressTarget,
        shift: bool,
    },
    MovingShapes {
        start: Point,
        origins: Vec<(ShapeId, Point)>,
    },
    Resizing {
        shape_id: ShapeId,
        handle: Handle,
        start: Point,
        original: Rect,
        shift: bool,
    },
    Marquee {
        start: Point,
        current: Point,
        shift: bool,
    },
    DraggingConnectorEnd {
        connector_id: ConnectorId,
        end: ConnectorEnd,
    },
}

/// Resize `original` by a pointer delta from the given handle.
///
/// The opposite corner stays fixed. Minimum size is clamped first; with
/// aspect lock the larger relative growth wins and both dimensions are
/// rescaled from the original box, so the ratio survives the clamp.
pub fn resize_rect(
    original: Rect,
    handle: Handle,
    delta: Vec2,
    min: Size,
    aspect_locked: bool,
) -> Rect {
    let (w0, h0) = (original.width(), original.height());
    let (gx, gy) = handle.growth();
    let mut new_w = (w0 + gx * delta.x).max(min.width);
    let mut new_h = (h0 + gy * delta.y).max(min.height);
    if aspect_locked && w0 > f64::EPSILON && h0 > f64::EPSILON {
        let scale = (new_w / w0)
            .max(new_h / h0)
            .max(min.width / w0)
            .max(min.height / h0);
        new_w = w0 * scale;
        new_h = h0 * scale;
    }
    let x0 = if gx < 0.0 { original.x1 - new_w } else { original.x0 };
    let y0 = if gy < 0.0 { original.y1 - new_h } else { original.y0 };
    Rect::new(x0, y0, x0 + new_w, y0 + new_h)
}

impl Board {
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Raw pointer-down in screen coordinates.
    pub fn pointer_down(&mut self, screen: Point, shift: bool) {
        let world = self.viewport.screen_to_world(screen);
        match self.tool {
            ToolKind::Line => {
                self.line_tool_click(world);
                return;
            }
            tool => {
                if let Some(kind) = tool.shape_kind() {
                    self.place_shape(kind, world);
                    return;
                }
            }
        }
        let target = self.press_target(world);
        if self.editing.is_some() {
            if matches!(target, PressTarget::Shape(id) if Some(id) == self.editing) {
                // The click lands inside the active text editor
                return;
            }
            self.end_text_edit();
        }
        self.gesture = GestureState::Pressed {
            start: world,
            target,
            shift,
        };
    }

    /// Raw pointer-move in screen coordinates. Escalates provisional
    /// clicks and applies drag deltas.
    pub fn pointer_move(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        let zoom = self.viewport.clamped_zoom();
        let state = std::mem::take(&mut self.gesture);
        self.gesture = match state {
            GestureState::Idle => GestureState::Idle,
            GestureState::Pressed {
                start,
                target,
                shift,
            } => {
                let moved = (world - start).hypot() * zoom;
                let threshold = match target {
                    PressTarget::Background => MARQUEE_THRESHOLD,
                    _ => DRAG_THRESHOLD,
                };
                if moved < threshold {
                    GestureState::Pressed {
                        start,
                        target,
                        shift,
                    }
                } else {
                    self.escalate(start, target, shift, world)
                }
            }
            GestureState::MovingShapes { start, origins } => {
                let delta = world - start;
                for &(id, origin) in &origins {
                    if let Some(shape) = self.document.shape_mut(id) {
                        shape.set_position(origin + delta);
                    }
                }
                self.document.recompute_connectors();
                self.mark_dirty();
                GestureState::MovingShapes { start, origins }
            }
            GestureState::Resizing {
                shape_id,
                handle,
                start,
                original,
                shift,
            } => {
                if let Some(shape) = self.document.shape_mut(shape_id) {
                    let min = shape.kind().min_size();
                    shape.set_bounds(resize_rect(original, handle, world - start, min, shift));
                }
                self.document.recompute_connectors();
                self.mark_dirty();
                GestureState::Resizing {
                    shape_id,
                    handle,
                    start,
                    original,
                    shift,
                }
            }
            GestureState::Marquee { start, shift, .. } => GestureState::Marquee {
                start,
                current: world,
                shift,
            },
            GestureState::DraggingConnectorEnd { connector_id, end } => {
                if let Some(connector) = self.document.connector_mut(connector_id) {
                    connector.set_endpoint(end, world);
                }
                self.mark_dirty();
                GestureState::DraggingConnectorEnd { connector_id, end }
            }
        };
    }

    /// Raw pointer-up in screen coordinates. `shift` is the key state at
    /// release, which is what marquee union honors.
    pub fn pointer_up(&mut self, screen: Point, shift: bool) {
        let world = self.viewport.screen_to_world(screen);
        let state = std::mem::take(&mut self.gesture);
        match state {
            GestureState::Idle => {}
            GestureState::Pressed {
                target,
                shift: press_shift,
                ..
            } => self.click(target, press_shift),
            GestureState::MovingShapes { .. } | GestureState::Resizing { .. } => {
                self.document.recompute_connectors();
                self.mark_dirty();
            }
            GestureState::Marquee { start, .. } => {
                let rect = Rect::from_points(start, world);
                let (shapes, connectors) = self.marquee_hits(rect);
                if !shift {
                    self.selection.clear();
                }
                for id in shapes {
                    self.selection.add_shape(id);
                }
                for id in connectors {
                    self.selection.add_connector(id);
                }
            }
            GestureState::DraggingConnectorEnd { connector_id, end } => {
                // Drop on a shape re-attaches to its nearest anchor
                if let Some(shape_id) = self.hover_shape_at(world) {
                    if let Some(bounds) = self.document.shape(shape_id).map(|s| s.bounds()) {
                        let anchor = geometry::nearest_anchor(bounds, world);
                        self.document
                            .attach_connector_end(connector_id, end, shape_id, anchor);
                        self.document.recompute_connectors();
                    }
                }
                self.mark_dirty();
            }
        }
    }

    /// Double-click starts text editing on sticky and text shapes.
    pub fn double_click(&mut self, screen: Point) {
        let world = self.viewport.screen_to_world(screen);
        self.gesture = GestureState::Idle;
        match self.press_target(world) {
            PressTarget::Shape(id) | PressTarget::Handle(id, _) => {
                self.begin_text_edit(id);
            }
            _ => {}
        }
    }

    /// Escape: unwinds the innermost in-flight state first (edit mode,
    /// pending connection, active gesture), then falls back to clearing
    /// the selection.
    pub fn escape(&mut self) {
        if self.editing.is_some() {
            self.end_text_edit();
            return;
        }
        if self.connection.is_some() {
            // Keeps the line tool active for another attempt
            self.cancel_connection();
            return;
        }
        match std::mem::take(&mut self.gesture) {
            GestureState::MovingShapes { .. }
            | GestureState::Resizing { .. }
            | GestureState::DraggingConnectorEnd { .. } => {
                self.history.revert(&mut self.document);
                self.document.recompute_connectors();
                self.mark_dirty();
            }
            GestureState::Marquee { .. } | GestureState::Pressed { .. } => {}
            GestureState::Idle => self.selection.clear(),
        }
    }

    /// Resolve what a world-space point lands on, in priority order:
    /// handles of selected entities, then shapes, then connector lines.
    fn press_target(&self, world: Point) -> PressTarget {
        let zoom = self.viewport.clamped_zoom();
        let handle_tol = HANDLE_HIT_TOLERANCE / zoom;

        for &id in self.selection.shape_ids() {
            if let Some(shape) = self.document.shape(id) {
                let bounds = shape.bounds();
                for handle in Handle::ALL {
                    if handle.corner(bounds).distance(world) <= handle_tol {
                        return PressTarget::Handle(id, handle);
                    }
                }
            }
        }

        for &id in self.selection.connector_ids() {
            if let Some(connector) = self.document.connector(id) {
                let [from, to] = connector.endpoints();
                if from.distance(world) <= handle_tol {
                    return PressTarget::ConnectorEnd(id, ConnectorEnd::From);
                }
                if to.distance(world) <= handle_tol {
                    return PressTarget::ConnectorEnd(id, ConnectorEnd::To);
                }
            }
        }

        let shape_hit = self
            .document
            .shapes()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(world))
            .max_by_key(|(idx, s)| (s.z(), *idx))
            .map(|(_, s)| s.id());
        if let Some(id) = shape_hit {
            return PressTarget::Shape(id);
        }

        if let Some(id) = self
            .document
            .connector_at_point(world, CONNECTOR_HIT_TOLERANCE / zoom)
        {
            return PressTarget::Connector(id);
        }

        PressTarget::Background
    }

    /// Turn a provisional click into a drag gesture. Records the single
    /// history snapshot for the gesture.
    fn escalate(
        &mut self,
        start: Point,
        target: PressTarget,
        shift: bool,
        world: Point,
    ) -> GestureState {
        match target {
            PressTarget::Shape(id) => {
                if !self.selection.contains_shape(id) {
                    if shift {
                        self.selection.add_shape(id);
                    } else {
                        self.selection.select_shape(id);
                    }
                }
                self.history.record(&self.document);
                // Per-shape drag-start positions: each move replays from
                // these, so deltas never compound
                let origins: Vec<(ShapeId, Point)> = self
                    .document
                    .shapes()
                    .iter()
                    .filter(|s| self.selection.contains_shape(s.id()))
                    .map(|s| (s.id(), s.position()))
                    .collect();
                let delta = world - start;
                for &(id, origin) in &origins {
                    if let Some(shape) = self.document.shape_mut(id) {
                        shape.set_position(origin + delta);
                    }
                }
                self.document.recompute_connectors();
                self.mark_dirty();
                GestureState::MovingShapes { start, origins }
            }
            PressTarget::Handle(shape_id, handle) => {
                let Some(original) = self.document.shape(shape_id).map(|s| s.bounds()) else {
                    return GestureState::Idle;
                };
                self.history.record(&self.document);
                if let Some(shape) = self.document.shape_mut(shape_id) {
                    let min = shape.kind().min_size();
                    shape.set_bounds(resize_rect(original, handle, world - start, min, shift));
                }
                self.document.recompute_connectors();
                self.mark_dirty();
                GestureState::Resizing {
                    shape_id,
                    handle,
                    start,
                    original,
                    shift,
                }
            }
            PressTarget::ConnectorEnd(connector_id, end) => {
                self.history.record(&self.document);
                self.document.detach_connector_end(connector_id, end);
                if let Some(connector) = self.document.connector_mut(connector_id) {
                    connector.set_endpoint(end, world);
                }
                self.mark_dirty();
                GestureState::DraggingConnectorEnd { connector_id, end }
            }
            // Connector bodies are click-to-select only
            PressTarget::Connector(_) => GestureState::Pressed {
                start,
                target,
                shift,
            },
            PressTarget::Background => GestureState::Marquee {
                start,
                current: world,
                shift,
            },
        }
    }

    /// Click semantics for a press that never escalated.
    fn click(&mut self, target: PressTarget, shift: bool) {
        match target {
            PressTarget::Shape(id) => {
                if shift {
                    self.selection.toggle_shape(id);
                } else {
                    self.selection.select_shape(id);
                }
            }
            PressTarget::Connector(id) => {
                if shift {
                    self.selection.toggle_connector(id);
                } else {
                    self.selection.select_connector(id);
                }
            }
            PressTarget::Handle(..) | PressTarget::ConnectorEnd(..) => {}
            PressTarget::Background => {
                if !shift {
                    self.selection.clear();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Shape, ShapeKind, Sticky};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn board_with_sticky() -> (Board, ShapeId) {
        let mut board = Board::new();
        let id = board
            .document
            .add_shape(Shape::Sticky(Sticky::new(pt(100.0, 100.0))));
        (board, id)
    }

    #[test]
    fn test_click_selects_shape() {
        let (mut board, id) = board_with_sticky();
        board.pointer_down(pt(150.0, 150.0), false);
        board.pointer_up(pt(150.0, 150.0), false);
        assert!(board.selection().contains_shape(id));
    }

    #[test]
    fn test_shift_click_toggles() {
        let (mut board, id) = board_with_sticky();
        board.pointer_down(pt(150.0, 150.0), true);
        board.pointer_up(pt(150.0, 150.0), true);
        assert!(board.selection().contains_shape(id));
        board.pointer_down(pt(150.0, 150.0), true);
        board.pointer_up(pt(150.0, 150.0), true);
        assert!(!board.selection().contains_shape(id));
    }

    #[test]
    fn test_sub_threshold_move_is_still_a_click() {
        let (mut board, id) = board_with_sticky();
        board.pointer_down(pt(150.0, 150.0), false);
        board.pointer_move(pt(152.0, 151.0));
        board.pointer_up(pt(152.0, 151.0), false);
        assert!(board.selection().contains_shape(id));
        assert_eq!(board.document().shape(id).unwrap().position(), pt(100.0, 100.0));
        // A click is not a mutation
        assert!(!board.can_undo());
    }

    #[test]
    fn test_drag_moves_shape_in_one_undo_step() {
        let (mut board, id) = board_with_sticky();
        board.pointer_down(pt(150.0, 150.0), false);
        board.pointer_move(pt(170.0, 160.0));
        board.pointer_move(pt(200.0, 180.0));
        board.pointer_up(pt(200.0, 180.0), false);

        assert_eq!(board.document().shape(id).unwrap().position(), pt(150.0, 130.0));
        assert!(board.undo());
        assert_eq!(board.document().shape(id).unwrap().position(), pt(100.0, 100.0));
        // Exactly one snapshot for the whole gesture
        assert!(!board.can_undo());
    }

    #[test]
    fn test_multi_shape_drag_uses_common_delta() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(0.0, 0.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(300.0, 0.0));
        board.selection.add_shape(a);
        board.selection.add_shape(b);

        board.pointer_down(pt(50.0, 50.0), false);
        board.pointer_move(pt(80.0, 70.0));
        board.pointer_up(pt(80.0, 70.0), false);

        assert_eq!(board.document().shape(a).unwrap().position(), pt(30.0, 20.0));
        assert_eq!(board.document().shape(b).unwrap().position(), pt(330.0, 20.0));
    }

    #[test]
    fn test_drag_recomputes_connectors() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(100.0, 100.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(300.0, 100.0));
        let cid = board.document.add_connector(a, b).unwrap();
        board.selection.clear();

        board.pointer_down(pt(150.0, 150.0), false);
        board.pointer_move(pt(160.0, 160.0));
        board.pointer_up(pt(160.0, 160.0), false);

        let connector = board.document().connector(cid).unwrap();
        // A moved by (+10,+10): its right anchor follows
        assert_eq!(connector.points[0], 210.0);
        assert_eq!(connector.points[1], 160.0);
    }

    #[test]
    fn test_resize_se_grows() {
        let (mut board, id) = board_with_sticky();
        board.select_shape(id);
        board.pointer_down(pt(200.0, 200.0), false);
        board.pointer_move(pt(240.0, 230.0));
        board.pointer_up(pt(240.0, 230.0), false);

        let bounds = board.document().shape(id).unwrap().bounds();
        assert_eq!(bounds, Rect::new(100.0, 100.0, 240.0, 230.0));
    }

    #[test]
    fn test_resize_nw_moves_origin() {
        let (mut board, id) = board_with_sticky();
        board.select_shape(id);
        board.pointer_down(pt(100.0, 100.0), false);
        board.pointer_move(pt(80.0, 90.0));
        board.pointer_up(pt(80.0, 90.0), false);

        let bounds = board.document().shape(id).unwrap().bounds();
        // Opposite (se) corner stays fixed
        assert_eq!(bounds, Rect::new(80.0, 90.0, 200.0, 200.0));
    }

    #[test]
    fn test_resize_respects_min_size() {
        let (mut board, id) = board_with_sticky();
        board.select_shape(id);
        board.pointer_down(pt(200.0, 200.0), false);
        board.pointer_move(pt(50.0, 50.0));
        board.pointer_up(pt(50.0, 50.0), false);

        let size = board.document().shape(id).unwrap().size();
        let min = ShapeKind::Sticky.min_size();
        assert_eq!(size.width, min.width);
        assert_eq!(size.height, min.height);
    }

    #[test]
    fn test_shift_resize_preserves_aspect() {
        let mut board = Board::new();
        let id = board.place_shape(ShapeKind::Rect, pt(0.0, 0.0));
        // 120x80: aspect 1.5
        board.pointer_down(pt(120.0, 80.0), true);
        board.pointer_move(pt(180.0, 90.0));
        board.pointer_up(pt(180.0, 90.0), true);

        let size = board.document().shape(id).unwrap().size();
        assert!((size.width / size.height - 1.5).abs() < 1e-9);
        // Width grew by 60, the dominant axis
        assert!((size.width - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_rect_all_corners_aspect() {
        let original = Rect::new(100.0, 100.0, 220.0, 180.0);
        let min = Size::new(20.0, 20.0);
        for handle in Handle::ALL {
            let out = resize_rect(original, handle, Vec2::new(30.0, 10.0), min, true);
            let ratio = out.width() / out.height();
            assert!(
                (ratio - 1.5).abs() < 1e-9,
                "{handle:?} broke aspect: {ratio}"
            );
        }
    }

    #[test]
    fn test_marquee_selects_intersecting() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(100.0, 100.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(400.0, 100.0));
        board.selection.clear();

        board.pointer_down(pt(50.0, 50.0), false);
        board.pointer_move(pt(250.0, 250.0));
        board.pointer_up(pt(250.0, 250.0), false);

        assert!(board.selection().contains_shape(a));
        assert!(!board.selection().contains_shape(b));
    }

    #[test]
    fn test_marquee_edge_touch_counts() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(100.0, 100.0));
        board.selection.clear();

        // Marquee right edge exactly on the shape's left edge
        board.pointer_down(pt(0.0, 0.0), false);
        board.pointer_move(pt(100.0, 300.0));
        board.pointer_up(pt(100.0, 300.0), false);
        assert!(board.selection().contains_shape(a));
    }

    #[test]
    fn test_marquee_shift_unions() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(100.0, 100.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(500.0, 500.0));
        board.select_shape(a);

        board.pointer_down(pt(450.0, 450.0), true);
        board.pointer_move(pt(650.0, 650.0));
        board.pointer_up(pt(650.0, 650.0), true);

        assert!(board.selection().contains_shape(a));
        assert!(board.selection().contains_shape(b));
    }

    #[test]
    fn test_background_click_clears_selection() {
        let (mut board, id) = board_with_sticky();
        board.select_shape(id);
        board.pointer_down(pt(900.0, 900.0), false);
        board.pointer_up(pt(900.0, 900.0), false);
        assert!(board.selection().is_empty());
    }

    #[test]
    fn test_escape_reverts_drag_without_redo() {
        let (mut board, id) = board_with_sticky();
        board.pointer_down(pt(150.0, 150.0), false);
        board.pointer_move(pt(250.0, 250.0));
        board.escape();

        assert_eq!(board.document().shape(id).unwrap().position(), pt(100.0, 100.0));
        assert_eq!(*board.gesture(), GestureState::Idle);
        assert!(!board.can_undo());
        assert!(!board.can_redo());
    }

    #[test]
    fn test_connector_end_drag_reattaches() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(100.0, 100.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(300.0, 100.0));
        let c = board.place_shape(ShapeKind::Sticky, pt(100.0, 400.0));
        let cid = board.document.add_connector(a, b).unwrap();
        board.selection.select_connector(cid);

        // Grab the to-end (near B's left edge) and drop it on C
        let to = board.document().connector(cid).unwrap().endpoint(ConnectorEnd::To);
        board.pointer_down(to, false);
        board.pointer_move(pt(150.0, 300.0));
        board.pointer_move(pt(150.0, 420.0));
        board.pointer_up(pt(150.0, 420.0), false);

        let connector = board.document().connector(cid).unwrap();
        assert_eq!(connector.to_id, Some(c));
        assert!(connector.is_fully_attached());
    }

    #[test]
    fn test_connector_end_drop_on_canvas_stays_free() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(100.0, 100.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(300.0, 100.0));
        let cid = board.document.add_connector(a, b).unwrap();
        board.selection.select_connector(cid);

        let to = board.document().connector(cid).unwrap().endpoint(ConnectorEnd::To);
        board.pointer_down(to, false);
        board.pointer_move(pt(600.0, 600.0));
        board.pointer_up(pt(600.0, 600.0), false);

        let connector = board.document().connector(cid).unwrap();
        assert_eq!(connector.to_id, None);
        assert_eq!(connector.endpoint(ConnectorEnd::To), pt(600.0, 600.0));
    }

    #[test]
    fn test_double_click_enters_edit_mode() {
        let (mut board, id) = board_with_sticky();
        board.double_click(pt(150.0, 150.0));
        assert_eq!(board.editing(), Some(id));
        // Edit mode and selection are mutually exclusive
        assert!(board.selection().is_empty());
        board.escape();
        assert!(board.editing().is_none());
    }

    #[test]
    fn test_escalation_selects_unselected_drag_target() {
        let mut board = Board::new();
        let a = board.place_shape(ShapeKind::Sticky, pt(0.0, 0.0));
        let b = board.place_shape(ShapeKind::Sticky, pt(300.0, 0.0));
        board.select_shape(a);

        // Dragging B replaces the selection with B, and A stays put
        board.pointer_down(pt(350.0, 50.0), false);
        board.pointer_move(pt(380.0, 50.0));
        board.pointer_up(pt(380.0, 50.0), false);

        assert!(board.selection().contains_shape(b));
        assert!(!board.selection().contains_shape(a));
        assert_eq!(board.document().shape(a).unwrap().position(), pt(0.0, 0.0));
        assert_eq!(board.document().shape(b).unwrap().position(), pt(330.0, 0.0));
    }

    #[test]
    fn test_zoomed_threshold_is_screen_space() {
        let (mut board, id) = board_with_sticky();
        board.viewport.set_zoom(0.25);
        // 8 world units is only 2 screen px at zoom 0.25: still a click
        board.pointer_down(board.viewport.world_to_screen(pt(150.0, 150.0)), false);
        board.pointer_move(board.viewport.world_to_screen(pt(158.0, 150.0)));
        board.pointer_up(board.viewport.world_to_screen(pt(158.0, 150.0)), false);
        assert_eq!(board.document().shape(id).unwrap().position(), pt(100.0, 100.0));
        assert!(board.selection().contains_shape(id));
    }
}
