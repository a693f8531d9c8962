//! Connector entity: a line optionally attached at each end to a shape anchor.

use crate::geometry::AnchorSide;
use crate::shapes::{now_millis, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for connectors.
pub type ConnectorId = Uuid;

/// Length of a freshly created free connector.
pub const FREE_CONNECTOR_LENGTH: f64 = 100.0;

/// Which end of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorEnd {
    From,
    To,
}

/// A connector line. Each end is either attached to a shape anchor
/// (`from_id`/`from_anchor` both set) or free (both `None`).
///
/// `points` caches the endpoints `[x1, y1, x2, y2]` for rendering; whenever
/// both ends are attached the document re-derives it from anchor geometry
/// rather than trusting the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub id: ConnectorId,
    pub from_id: Option<ShapeId>,
    pub to_id: Option<ShapeId>,
    pub from_anchor: Option<AnchorSide>,
    pub to_anchor: Option<AnchorSide>,
    pub points: [f64; 4],
    pub z: i64,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Connector {
    /// Create a connector attached at both ends.
    pub fn attached(
        from_id: ShapeId,
        from_anchor: AnchorSide,
        to_id: ShapeId,
        to_anchor: AnchorSide,
    ) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            from_id: Some(from_id),
            to_id: Some(to_id),
            from_anchor: Some(from_anchor),
            to_anchor: Some(to_anchor),
            points: [0.0; 4],
            z: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a free connector: both ends unattached, default length,
    /// horizontal, centered on `at`.
    pub fn free(at: Point) -> Self {
        let now = now_millis();
        let half = FREE_CONNECTOR_LENGTH / 2.0;
        Self {
            id: Uuid::new_v4(),
            from_id: None,
            to_id: None,
            from_anchor: None,
            to_anchor: None,
            points: [at.x - half, at.y, at.x + half, at.y],
            z: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Both ends attached to shapes.
    pub fn is_fully_attached(&self) -> bool {
        self.from_id.is_some() && self.to_id.is_some()
    }

    /// Neither end attached.
    pub fn is_free(&self) -> bool {
        self.from_id.is_none() && self.to_id.is_none()
    }

    /// Whether either end references the given shape.
    pub fn references(&self, id: ShapeId) -> bool {
        self.from_id == Some(id) || self.to_id == Some(id)
    }

    /// Cached endpoints as points.
    pub fn endpoints(&self) -> [Point; 2] {
        [
            Point::new(self.points[0], self.points[1]),
            Point::new(self.points[2], self.points[3]),
        ]
    }

    /// Endpoint for one end.
    pub fn endpoint(&self, end: ConnectorEnd) -> Point {
        let [from, to] = self.endpoints();
        match end {
            ConnectorEnd::From => from,
            ConnectorEnd::To => to,
        }
    }

    pub fn set_points(&mut self, from: Point, to: Point) {
        self.points = [from.x, from.y, to.x, to.y];
        self.updated_at = now_millis();
    }

    /// Move one endpoint, leaving the other in place.
    pub fn set_endpoint(&mut self, end: ConnectorEnd, point: Point) {
        match end {
            ConnectorEnd::From => {
                self.points[0] = point.x;
                self.points[1] = point.y;
            }
            ConnectorEnd::To => {
                self.points[2] = point.x;
                self.points[3] = point.y;
            }
        }
        self.updated_at = now_millis();
    }

    /// Attach one end to a shape anchor.
    pub fn attach(&mut self, end: ConnectorEnd, shape_id: ShapeId, anchor: AnchorSide) {
        match end {
            ConnectorEnd::From => {
                self.from_id = Some(shape_id);
                self.from_anchor = Some(anchor);
            }
            ConnectorEnd::To => {
                self.to_id = Some(shape_id);
                self.to_anchor = Some(anchor);
            }
        }
        self.updated_at = now_millis();
    }

    /// Detach one end, leaving its cached point where it was.
    pub fn detach(&mut self, end: ConnectorEnd) {
        match end {
            ConnectorEnd::From => {
                self.from_id = None;
                self.from_anchor = None;
            }
            ConnectorEnd::To => {
                self.to_id = None;
                self.to_anchor = None;
            }
        }
        self.updated_at = now_millis();
    }

    /// Shape id attached at one end, if any.
    pub fn end_shape(&self, end: ConnectorEnd) -> Option<ShapeId> {
        match end {
            ConnectorEnd::From => self.from_id,
            ConnectorEnd::To => self.to_id,
        }
    }
}
