//! The board: document, selection, viewport, history, tool and gesture
//! state behind one façade.
//!
//! The rendering layer is a pure consumer: it feeds raw pointer/keyboard
//! events in and reads state back. All mutation goes through here so that
//! history snapshots, connector recomputation and the dirty counter stay
//! consistent.

use crate::connection::ConnectionMode;
use crate::connector::{Connector, ConnectorId};
use crate::document::Document;
use crate::gesture::GestureState;
use crate::history::History;
use crate::hover;
use crate::selection::Selection;
use crate::shapes::{Shape, ShapeId, ShapeKind, Sticky};
use crate::tools::ToolKind;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};

/// Offset applied to duplicated entities so the copies are visible.
const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// The complete interactive state of one board.
#[derive(Debug, Default)]
pub struct Board {
    pub(crate) document: Document,
    pub(crate) selection: Selection,
    pub(crate) viewport: Viewport,
    pub(crate) history: History,
    pub(crate) tool: ToolKind,
    pub(crate) connection: Option<ConnectionMode>,
    pub(crate) gesture: GestureState,
    pub(crate) editing: Option<ShapeId>,
    revision: u64,
}

/// The persisted form of a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub elements: Vec<Shape>,
    pub connectors: Vec<Connector>,
    pub viewport: Viewport,
}

impl BoardState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a persisted board. Malformed input is treated as no saved
    /// state, not an error.
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(state) => Some(state),
            Err(err) => {
                warn!("discarding malformed board state: {err}");
                None
            }
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from persisted state.
    pub fn from_state(state: BoardState) -> Self {
        let mut board = Self::new();
        board.restore(state);
        board
    }

    // --- read access ---------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// The shape currently in text-edit mode, if any.
    pub fn editing(&self) -> Option<ShapeId> {
        self.editing
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Monotonic counter bumped by every persistable mutation. The
    /// autosave layer compares it against the last saved value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.revision += 1;
    }

    /// The shape whose hover area contains the world-space cursor, at the
    /// current zoom.
    pub fn hover_shape_at(&self, world: Point) -> Option<ShapeId> {
        hover::hover_shape_at(self.document.shapes(), world, self.viewport.clamped_zoom())
    }

    // --- tool and viewport ---------------------------------------------

    /// Switch tools. Leaving the line tool cancels any in-flight
    /// connection; switching tools always exits text-edit mode.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != ToolKind::Line {
            self.connection = None;
        }
        self.editing = None;
        self.tool = tool;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
        self.mark_dirty();
    }

    /// Zoom by a factor around a screen point.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        self.viewport.zoom_at(screen, factor);
        self.mark_dirty();
    }

    // --- shape creation and editing ------------------------------------

    /// Place a default-sized shape of the given kind with its top-left at
    /// `position`, select it, and revert to the select tool.
    pub fn place_shape(&mut self, kind: ShapeKind, position: Point) -> ShapeId {
        self.history.record(&self.document);
        let id = self.document.add_shape(Shape::new(kind, position));
        self.selection.select_shape(id);
        self.tool = ToolKind::Select;
        self.mark_dirty();
        id
    }

    /// Create a sticky note holding externally produced text. The content's
    /// provenance does not matter here.
    pub fn add_shape_from_text(&mut self, text: String, position: Point) -> ShapeId {
        self.history.record(&self.document);
        let id = self
            .document
            .add_shape(Shape::Sticky(Sticky::with_text(position, text)));
        self.mark_dirty();
        id
    }

    /// Replace the text of a sticky or text shape. Returns false for
    /// shapes without text or unknown ids.
    pub fn set_shape_text(&mut self, id: ShapeId, text: String) -> bool {
        let has_text = matches!(
            self.document.shape(id),
            Some(Shape::Sticky(_) | Shape::Text(_))
        );
        if !has_text {
            return false;
        }
        self.history.record(&self.document);
        if let Some(shape) = self.document.shape_mut(id) {
            match shape {
                Shape::Sticky(s) => s.text = text,
                Shape::Text(s) => s.text = text,
                _ => unreachable!(),
            }
        }
        self.mark_dirty();
        true
    }

    /// Enter text-edit mode on a shape. Selection and edit mode are
    /// mutually exclusive.
    pub fn begin_text_edit(&mut self, id: ShapeId) -> bool {
        let editable = matches!(
            self.document.shape(id),
            Some(Shape::Sticky(_) | Shape::Text(_))
        );
        if editable {
            self.selection.clear();
            self.editing = Some(id);
        }
        editable
    }

    pub fn end_text_edit(&mut self) {
        self.editing = None;
    }

    /// Apply an arbitrary mutation to one shape as a single undoable step,
    /// then refresh attached connectors.
    pub fn update_shape(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape)) -> bool {
        if self.document.shape(id).is_none() {
            return false;
        }
        self.history.record(&self.document);
        self.update_shape_skip_history(id, f)
    }

    /// Same as [`update_shape`](Self::update_shape) but without a history
    /// snapshot. Used for the intermediate updates of an in-flight gesture,
    /// which records one snapshot up front.
    pub fn update_shape_skip_history(&mut self, id: ShapeId, f: impl FnOnce(&mut Shape)) -> bool {
        let Some(shape) = self.document.shape_mut(id) else {
            return false;
        };
        f(shape);
        shape.clamp_min_size();
        self.document.recompute_connectors();
        self.mark_dirty();
        true
    }

    // --- selection-wide operations -------------------------------------

    pub fn select_shape(&mut self, id: ShapeId) {
        self.editing = None;
        self.selection.select_shape(id);
    }

    pub fn select_all(&mut self) {
        self.editing = None;
        self.selection.clear();
        for shape in self.document.shapes() {
            self.selection.add_shape(shape.id());
        }
        for connector in self.document.connectors() {
            self.selection.add_connector(connector.id);
        }
    }

    /// Delete everything selected as one undoable step. Connectors
    /// attached to deleted shapes go with them.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.history.record(&self.document);
        let shape_ids: Vec<ShapeId> = self.selection.shape_ids().iter().copied().collect();
        let connector_ids: Vec<ConnectorId> =
            self.selection.connector_ids().iter().copied().collect();
        self.document.delete_shapes(&shape_ids);
        self.document.delete_connectors(&connector_ids);
        self.selection.clear();
        self.mark_dirty();
    }

    /// Duplicate the selected shapes (and connectors whose both attached
    /// ends are selected), offset slightly, and select the copies.
    pub fn duplicate_selected(&mut self) {
        if self.selection.shape_ids().is_empty() {
            return;
        }
        self.history.record(&self.document);

        let mut id_map: std::collections::HashMap<ShapeId, ShapeId> =
            std::collections::HashMap::new();
        let mut copies: Vec<Shape> = Vec::new();
        for shape in self.document.shapes() {
            if self.selection.contains_shape(shape.id()) {
                let mut copy = shape.clone();
                copy.regenerate_id();
                copy.translate(DUPLICATE_OFFSET);
                id_map.insert(shape.id(), copy.id());
                copies.push(copy);
            }
        }

        let connector_copies: Vec<Connector> = self
            .document
            .connectors()
            .iter()
            .filter(|c| {
                let from_ok = c.from_id.is_none_or(|id| id_map.contains_key(&id));
                let to_ok = c.to_id.is_none_or(|id| id_map.contains_key(&id));
                let selected = self.selection.contains_connector(c.id) || c.is_fully_attached();
                selected && from_ok && to_ok && !c.is_free()
            })
            .cloned()
            .collect();

        self.selection.clear();
        for copy in copies {
            let id = self.document.add_shape(copy);
            self.selection.add_shape(id);
        }
        for mut connector in connector_copies {
            connector.id = uuid::Uuid::new_v4();
            connector.from_id = connector.from_id.and_then(|id| id_map.get(&id).copied());
            connector.to_id = connector.to_id.and_then(|id| id_map.get(&id).copied());
            let from = connector.from_id;
            let to = connector.to_id;
            if let (Some(from), Some(to)) = (from, to) {
                if let Some(id) = self.document.add_connector(from, to) {
                    self.selection.add_connector(id);
                }
            }
        }
        self.document.recompute_connectors();
        self.mark_dirty();
    }

    /// Raise the selected shapes above everything else.
    pub fn bring_selected_to_front(&mut self) {
        let ids: Vec<ShapeId> = self.selection.shape_ids().iter().copied().collect();
        if ids.is_empty() {
            return;
        }
        self.history.record(&self.document);
        for id in ids {
            self.document.bring_to_front(id);
        }
        self.mark_dirty();
    }

    /// Drop the selected shapes below everything else.
    pub fn send_selected_to_back(&mut self) {
        let ids: Vec<ShapeId> = self.selection.shape_ids().iter().copied().collect();
        if ids.is_empty() {
            return;
        }
        self.history.record(&self.document);
        for id in ids {
            self.document.send_to_back(id);
        }
        self.mark_dirty();
    }

    // --- history -------------------------------------------------------

    /// Undo the last operation. Clears selection, edit mode and any
    /// in-flight connection so no transient state points at restored data.
    pub fn undo(&mut self) -> bool {
        let done = self.history.undo(&mut self.document);
        if done {
            self.after_history_jump();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        let done = self.history.redo(&mut self.document);
        if done {
            self.after_history_jump();
        }
        done
    }

    fn after_history_jump(&mut self) {
        self.selection.clear();
        self.editing = None;
        self.connection = None;
        self.gesture = GestureState::Idle;
        self.document.recompute_connectors();
        self.mark_dirty();
    }

    // --- persistence ---------------------------------------------------

    /// Snapshot the persistable state.
    pub fn state(&self) -> BoardState {
        BoardState {
            elements: self.document.shapes().to_vec(),
            connectors: self.document.connectors().to_vec(),
            viewport: self.viewport,
        }
    }

    /// Serialize the persistable state to JSON.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        self.state().to_json()
    }

    /// Replace the board contents with persisted state. History and all
    /// transient state are reset.
    pub fn restore(&mut self, state: BoardState) {
        self.document = Document::from_parts(state.elements, state.connectors);
        self.viewport = state.viewport;
        self.selection.clear();
        self.history.clear();
        self.editing = None;
        self.connection = None;
        self.gesture = GestureState::Idle;
        self.mark_dirty();
    }

    /// The shapes whose boxes intersect a marquee rect.
    pub(crate) fn marquee_hits(&self, rect: Rect) -> (Vec<ShapeId>, Vec<ConnectorId>) {
        (
            self.document.shapes_in_rect(rect),
            self.document.connectors_in_rect(rect),
        )
    }
}
