//! Density- and zoom-adaptive hover resolution.
//!
//! A shape is hoverable inside its bounds plus a buffer zone. The buffer
//! shrinks in dense clusters so neighbours stay reachable, and scales
//! inversely with zoom so it stays visually constant on screen.

use crate::geometry;
use crate::shapes::{Shape, ShapeId};
use crate::viewport::{MAX_ZOOM, MIN_ZOOM};
use kurbo::Point;

/// Hover buffer in world units at zoom 1, sparse layout.
pub const BASE_HOVER_BUFFER: f64 = 20.0;
/// Hover buffer in world units at zoom 1, dense layout.
pub const DENSE_HOVER_BUFFER: f64 = 10.0;
/// Radius around the cursor scanned for the density check.
pub const DENSITY_RADIUS: f64 = 150.0;
/// More than this many shape centers within the radius counts as dense.
pub const DENSITY_THRESHOLD: usize = 3;

/// Whether the area around `cursor` is a dense cluster of shapes.
pub fn is_dense_layout(shapes: &[Shape], cursor: Point) -> bool {
    let count = shapes
        .iter()
        .filter(|s| s.center().distance(cursor) <= DENSITY_RADIUS)
        .count();
    count > DENSITY_THRESHOLD
}

/// The hover buffer in world units for the given zoom and density.
pub fn effective_buffer(zoom: f64, dense: bool) -> f64 {
    let base = if dense {
        DENSE_HOVER_BUFFER
    } else {
        BASE_HOVER_BUFFER
    };
    base / zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// The shape whose extended hover area contains `cursor`, if any.
///
/// Ties go to the higher z; among equal z, the later-added shape wins.
pub fn hover_shape_at(shapes: &[Shape], cursor: Point, zoom: f64) -> Option<ShapeId> {
    hover_candidates(shapes, cursor, zoom).into_iter().next()
}

/// Every shape whose extended hover area contains `cursor`, best first:
/// higher z wins, ties go to the later-added shape. Feeds both passive
/// hover and candidate-target highlighting while a connection or endpoint
/// drag is in flight; [`geometry::point_to_rect_dist`] gives the secondary
/// distance ranking where a consumer needs one.
pub fn hover_candidates(shapes: &[Shape], cursor: Point, zoom: f64) -> Vec<ShapeId> {
    let dense = is_dense_layout(shapes, cursor);
    let buffer = effective_buffer(zoom, dense);
    let mut candidates: Vec<(usize, &Shape)> = shapes
        .iter()
        .enumerate()
        .filter(|(_, s)| geometry::in_extended_area(cursor, s.bounds(), buffer))
        .collect();
    candidates.sort_by(|(ai, a), (bi, b)| (b.z(), *bi).cmp(&(a.z(), *ai)));
    candidates.into_iter().map(|(_, s)| s.id()).collect()
}
