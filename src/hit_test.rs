use super::*;
use crate::annotation::{BBox, Classification};
use crate::geometry::{Size, fit_geometry};

// =============================================================
// Helpers
// =============================================================

fn make(id: u64, x1: f64, y1: f64, x2: f64, y2: f64) -> Annotation {
    Annotation {
        id,
        bbox: BBox { x1, y1, x2, y2 },
        classification: Classification::GOOD,
        confidence: 0.9,
    }
}

/// 1000×1000 image in a 1000×1000 container: display == image space.
fn identity_geometry() -> Geometry {
    fit_geometry(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0), 1.0, Point::default()).unwrap()
}

fn scenario_a() -> Geometry {
    fit_geometry(Size::new(800.0, 600.0), Size::new(1920.0, 1080.0), 1.0, Point::default()).unwrap()
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn two_boxes() -> Vec<Annotation> {
    vec![make(1, 100.0, 100.0, 200.0, 200.0), make(2, 400.0, 400.0, 500.0, 500.0)]
}

// =============================================================
// pointer_to_display
// =============================================================

#[test]
fn pointer_is_offset_by_canvas_origin() {
    assert_eq!(pointer_to_display(pt(250.0, 180.0), pt(50.0, 30.0)), pt(200.0, 150.0));
}

// =============================================================
// Bounding-box mode (mobile)
// =============================================================

#[test]
fn point_inside_one_box_resolves_to_it() {
    let g = identity_geometry();
    let list = two_boxes();
    assert_eq!(hit_test(pt(150.0, 150.0), &list, &g, 1.0, HitTestMode::BoundingBox), Some(0));
    assert_eq!(hit_test(pt(450.0, 420.0), &list, &g, 1.0, HitTestMode::BoundingBox), Some(1));
}

#[test]
fn box_edges_are_inclusive() {
    let g = identity_geometry();
    let list = two_boxes();
    assert_eq!(hit_test(pt(200.0, 200.0), &list, &g, 1.0, HitTestMode::BoundingBox), Some(0));
}

#[test]
fn point_outside_every_box_misses() {
    let g = identity_geometry();
    let list = two_boxes();
    assert_eq!(hit_test(pt(300.0, 300.0), &list, &g, 1.0, HitTestMode::BoundingBox), None);
}

#[test]
fn box_mode_ignores_badges() {
    let g = identity_geometry();
    let list = two_boxes();
    // Badge center for box 0 sits at (150, 90).
    assert_eq!(hit_test(pt(150.0, 90.0), &list, &g, 1.0, HitTestMode::BoundingBox), None);
}

#[test]
fn box_mode_follows_scaled_geometry() {
    let g = scenario_a();
    let list = vec![make(1, 100.0, 100.0, 200.0, 200.0)];
    let inside = g.image_to_display(pt(150.0, 150.0));
    let outside = g.image_to_display(pt(250.0, 150.0));
    assert_eq!(hit_test(inside, &list, &g, 1.0, HitTestMode::BoundingBox), Some(0));
    assert_eq!(hit_test(outside, &list, &g, 1.0, HitTestMode::BoundingBox), None);
}

#[test]
fn box_mode_tracks_pan() {
    let g = fit_geometry(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0), 1.0, pt(40.0, -20.0)).unwrap();
    let list = two_boxes();
    assert_eq!(hit_test(pt(105.0, 150.0), &list, &g, 1.0, HitTestMode::BoundingBox), None);
    assert_eq!(hit_test(pt(145.0, 85.0), &list, &g, 1.0, HitTestMode::BoundingBox), Some(0));
}

// =============================================================
// Badge mode (desktop)
// =============================================================

#[test]
fn point_inside_badge_resolves_to_it() {
    let g = identity_geometry();
    let list = two_boxes();
    assert_eq!(hit_test(pt(150.0, 90.0), &list, &g, 1.0, HitTestMode::Badge), Some(0));
    assert_eq!(hit_test(pt(455.0, 385.0), &list, &g, 1.0, HitTestMode::Badge), Some(1));
}

#[test]
fn badge_boundary_is_inclusive() {
    let g = identity_geometry();
    let list = two_boxes();
    assert_eq!(hit_test(pt(160.0, 90.0), &list, &g, 1.0, HitTestMode::Badge), Some(0));
    assert_eq!(hit_test(pt(160.5, 90.0), &list, &g, 1.0, HitTestMode::Badge), None);
}

#[test]
fn badge_mode_ignores_box_interior() {
    let g = identity_geometry();
    let list = two_boxes();
    assert_eq!(hit_test(pt(150.0, 150.0), &list, &g, 1.0, HitTestMode::Badge), None);
}

#[test]
fn badge_grows_with_zoom() {
    let g = fit_geometry(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0), 3.0, Point::default()).unwrap();
    let list = vec![make(1, 100.0, 100.0, 200.0, 200.0)];
    let circle = g.badge_circle(&list[0].bbox, 3.0);
    assert!((circle.radius - 18.0).abs() < 1e-12);
    let near_edge = pt(circle.center.x + 17.0, circle.center.y);
    assert_eq!(hit_test(near_edge, &list, &g, 3.0, HitTestMode::Badge), Some(0));
    assert_eq!(hit_test(near_edge, &list, &g, 1.0, HitTestMode::Badge), None);
}

#[test]
fn badge_in_scenario_a_geometry() {
    let g = scenario_a();
    let list = vec![make(1, 100.0, 100.0, 200.0, 200.0)];
    let rect = g.bbox_to_display(&list[0].bbox);
    let center = pt(rect.center_x(), rect.y - 10.0);
    assert_eq!(hit_test(center, &list, &g, 1.0, HitTestMode::Badge), Some(0));
    assert_eq!(hit_test(pt(center.x, center.y + 25.0), &list, &g, 1.0, HitTestMode::Badge), None);
}

// =============================================================
// Tie-break
// =============================================================

#[test]
fn overlapping_boxes_resolve_to_first_in_list() {
    let g = identity_geometry();
    let list = vec![make(1, 100.0, 100.0, 300.0, 300.0), make(2, 150.0, 150.0, 250.0, 250.0)];
    assert_eq!(hit_test(pt(200.0, 200.0), &list, &g, 1.0, HitTestMode::BoundingBox), Some(0));
}

#[test]
fn overlapping_badges_resolve_to_first_in_list() {
    let g = identity_geometry();
    let list = vec![make(1, 100.0, 100.0, 200.0, 200.0), make(2, 105.0, 100.0, 205.0, 300.0)];
    assert_eq!(hit_test(pt(153.0, 90.0), &list, &g, 1.0, HitTestMode::Badge), Some(0));
}

#[test]
fn empty_list_misses() {
    let g = identity_geometry();
    assert_eq!(hit_test(pt(1.0, 1.0), &[], &g, 1.0, HitTestMode::Badge), None);
}
