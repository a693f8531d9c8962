//! Tackboard Core Library
//!
//! Platform-agnostic interaction and constraint-maintenance core for the
//! Tackboard diagramming surface: the document model of shapes and anchored
//! connectors, the gesture and connection state machines, hover resolution,
//! bounded undo/redo, and debounced persistence. Rendering is a pure
//! consumer of this state.

pub mod board;
pub mod connection;
pub mod connector;
pub mod document;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod hover;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use board::{Board, BoardState};
pub use connection::{ConnectionEvent, ConnectionMode};
pub use connector::{Connector, ConnectorEnd, ConnectorId, FREE_CONNECTOR_LENGTH};
pub use document::Document;
pub use geometry::{anchor_point, connection_points, edge_snap, AnchorSide, ANCHOR_CLEARANCE};
pub use gesture::{GestureState, Handle, PressTarget, DRAG_THRESHOLD, MARQUEE_THRESHOLD};
pub use history::{History, MAX_HISTORY_SIZE};
pub use hover::{
    hover_candidates, BASE_HOVER_BUFFER, DENSE_HOVER_BUFFER, DENSITY_RADIUS, DENSITY_THRESHOLD,
};
pub use selection::Selection;
pub use shapes::{Color, ImageShape, RectShape, Shape, ShapeId, ShapeKind, Sticky, TextShape};
pub use storage::{
    AutosaveManager, FileStorage, MemoryStorage, Storage, StorageError, DEFAULT_DEBOUNCE_MS,
};
pub use tools::ToolKind;
pub use viewport::{Viewport, MAX_ZOOM, MIN_ZOOM};
