//! Hit testing: resolves a display-space point to an annotation index.
//!
//! Desktop hits the index badge (distance to its center within the badge
//! radius); mobile hits the bounding rectangle, edges included. With
//! overlapping targets the first annotation in list order wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::annotation::Annotation;
use crate::geometry::{Geometry, Point};
use crate::input::HitTestMode;

/// Convert a client-space pointer position to display space, given the
/// top-left corner of the canvas' bounding rect.
#[must_use]
pub fn pointer_to_display(client: Point, canvas_origin: Point) -> Point {
    Point::new(client.x - canvas_origin.x, client.y - canvas_origin.y)
}

/// Index of the annotation under `point` (display space), if any.
///
/// Annotations are checked in list order and the first match wins, so with
/// overlapping targets the earlier entry is selected.
#[must_use]
pub fn hit_test(
    point: Point,
    annotations: &[Annotation],
    geometry: &Geometry,
    zoom: f64,
    mode: HitTestMode,
) -> Option<usize> {
    annotations.iter().position(|a| match mode {
        HitTestMode::Badge => geometry.badge_circle(&a.bbox, zoom).contains(point),
        HitTestMode::BoundingBox => geometry.bbox_to_display(&a.bbox).contains(point),
    })
}
