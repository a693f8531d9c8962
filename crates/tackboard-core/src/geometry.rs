//! Pure geometry: anchor points, edge snapping, hit areas, distances.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Gap between a connector terminus and the target shape's edge, so the
/// line does not overlap the target's own resize handles.
pub const ANCHOR_CLEARANCE: f64 = 12.0;

/// One of the four fixed attachment points on a shape's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl AnchorSide {
    /// All four sides, in top/right/bottom/left order.
    pub const ALL: [AnchorSide; 4] = [
        AnchorSide::Top,
        AnchorSide::Right,
        AnchorSide::Bottom,
        AnchorSide::Left,
    ];

    /// The side facing the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            AnchorSide::Top => AnchorSide::Bottom,
            AnchorSide::Right => AnchorSide::Left,
            AnchorSide::Bottom => AnchorSide::Top,
            AnchorSide::Left => AnchorSide::Right,
        }
    }

    /// Unit outward normal of this side.
    pub fn outward(self) -> kurbo::Vec2 {
        match self {
            AnchorSide::Top => kurbo::Vec2::new(0.0, -1.0),
            AnchorSide::Right => kurbo::Vec2::new(1.0, 0.0),
            AnchorSide::Bottom => kurbo::Vec2::new(0.0, 1.0),
            AnchorSide::Left => kurbo::Vec2::new(-1.0, 0.0),
        }
    }
}

/// Anchor point of `bounds` on the given side.
///
/// top = (x+w/2, y), right = (x+w, y+h/2), bottom = (x+w/2, y+h),
/// left = (x, y+h/2).
pub fn anchor_point(bounds: Rect, side: AnchorSide) -> Point {
    let center = bounds.center();
    match side {
        AnchorSide::Top => Point::new(center.x, bounds.y0),
        AnchorSide::Right => Point::new(bounds.x1, center.y),
        AnchorSide::Bottom => Point::new(center.x, bounds.y1),
        AnchorSide::Left => Point::new(bounds.x0, center.y),
    }
}

/// Pick the pair of facing anchors for a connector between two boxes.
///
/// The axis is whichever center separation is larger; each box contributes
/// the anchor on the side facing the other box.
pub fn edge_snap(from: Rect, to: Rect) -> (AnchorSide, AnchorSide) {
    let dx = to.center().x - from.center().x;
    let dy = to.center().y - from.center().y;
    if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            (AnchorSide::Right, AnchorSide::Left)
        } else {
            (AnchorSide::Left, AnchorSide::Right)
        }
    } else if dy >= 0.0 {
        (AnchorSide::Bottom, AnchorSide::Top)
    } else {
        (AnchorSide::Top, AnchorSide::Bottom)
    }
}

/// Endpoints for a connector between two boxes.
///
/// The from point sits exactly on the source boundary; the to point is the
/// target anchor pulled back toward the source by [`ANCHOR_CLEARANCE`].
pub fn connection_points(from: Rect, to: Rect) -> [Point; 2] {
    let (from_side, to_side) = edge_snap(from, to);
    let from_pt = anchor_point(from, from_side);
    let to_anchor = anchor_point(to, to_side);
    let offset = to_side.outward() * ANCHOR_CLEARANCE;
    [from_pt, to_anchor + offset]
}

/// Distance from a point to a rect: zero inside, otherwise the Euclidean
/// distance to the nearest edge or corner.
pub fn point_to_rect_dist(point: Point, rect: Rect) -> f64 {
    let dx = (rect.x0 - point.x).max(point.x - rect.x1).max(0.0);
    let dy = (rect.y0 - point.y).max(point.y - rect.y1).max(0.0);
    (dx * dx + dy * dy).sqrt()
}

/// Extended hit-area test: the rect inflated symmetrically by `buffer`.
pub fn in_extended_area(point: Point, rect: Rect, buffer: f64) -> bool {
    rect.inflate(buffer, buffer).contains(point)
}

/// The anchor side of `bounds` closest to `point`.
pub fn nearest_anchor(bounds: Rect, point: Point) -> AnchorSide {
    let mut best = AnchorSide::Top;
    let mut best_dist = f64::INFINITY;
    for side in AnchorSide::ALL {
        let anchor = anchor_point(bounds, side);
        let dist = anchor.distance(point);
        if dist < best_dist {
            best_dist = dist;
            best = side;
        }
    }
    best
}

/// Rect intersection where edge-touching counts as intersecting.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Distance from a point to the segment a-b.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Test whether the segment a-b intersects or lies inside a rectangle.
pub fn segment_intersects_rect(a: Point, b: Point, rect: Rect) -> bool {
    if rect.contains(a) || rect.contains(b) {
        return true;
    }
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let edges = [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ];
    edges.iter().any(|&(c, d)| segments_intersect(a, b, c, d))
}

/// Test if two line segments (a-b) and (c-d) intersect.
fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross =
        |o: Point, p: Point, q: Point| (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x);
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    // Collinear cases: an endpoint lies on the other segment
    let on_segment = |p: Point, q: Point, r: Point| {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}
