//! Selection state: disjoint shape and connector id sets.

use crate::connector::ConnectorId;
use crate::shapes::ShapeId;
use std::collections::HashSet;

/// The current selection. Not undoable; cleared on every undo/redo and
/// mutually exclusive with text-edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    shapes: HashSet<ShapeId>,
    connectors: HashSet<ConnectorId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.connectors.is_empty()
    }

    pub fn shape_ids(&self) -> &HashSet<ShapeId> {
        &self.shapes
    }

    pub fn connector_ids(&self) -> &HashSet<ConnectorId> {
        &self.connectors
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.shapes.contains(&id)
    }

    pub fn contains_connector(&self, id: ConnectorId) -> bool {
        self.connectors.contains(&id)
    }

    /// Select a single shape, replacing the current selection.
    pub fn select_shape(&mut self, id: ShapeId) {
        self.clear();
        self.shapes.insert(id);
    }

    pub fn add_shape(&mut self, id: ShapeId) {
        self.shapes.insert(id);
    }

    /// Shift-click semantics: add if absent, remove if present.
    pub fn toggle_shape(&mut self, id: ShapeId) {
        if !self.shapes.remove(&id) {
            self.shapes.insert(id);
        }
    }

    /// Select a single connector, replacing the current selection.
    pub fn select_connector(&mut self, id: ConnectorId) {
        self.clear();
        self.connectors.insert(id);
    }

    pub fn add_connector(&mut self, id: ConnectorId) {
        self.connectors.insert(id);
    }

    pub fn toggle_connector(&mut self, id: ConnectorId) {
        if !self.connectors.remove(&id) {
            self.connectors.insert(id);
        }
    }

    /// Drop a deleted entity from the selection.
    pub fn remove_shape(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }

    pub fn remove_connector(&mut self, id: ConnectorId) {
        self.connectors.remove(&id);
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.connectors.clear();
    }
}
