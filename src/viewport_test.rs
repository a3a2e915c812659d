#![allow(clippy::float_cmp)]

use super::*;

fn manager() -> ViewportManager {
    ViewportManager::new(ZoomLimits::default())
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Viewport value
// =============================================================

#[test]
fn default_is_unit_zoom_no_pan() {
    let v = Viewport::default();
    assert_eq!(v.zoom, 1.0);
    assert_eq!(v.pan, Point::default());
}

#[test]
fn transitions_do_not_touch_the_original() {
    let limits = ZoomLimits::default();
    let v = Viewport::default();
    let z = v.zoomed_in(&limits);
    assert_eq!(v.zoom, 1.0);
    assert!((z.zoom - 1.2).abs() < 1e-12);
}

#[test]
fn with_zoom_ignores_non_finite() {
    let limits = ZoomLimits::default();
    let v = Viewport::default().with_zoom(f64::NAN, &limits);
    assert_eq!(v.zoom, 1.0);
    let v = Viewport::default().with_zoom(f64::INFINITY, &limits);
    assert_eq!(v.zoom, 1.0);
}

#[test]
fn zoom_percent_rounds() {
    let v = Viewport { zoom: 1.44, pan: Point::default() };
    assert_eq!(v.zoom_percent(), 144);
    let v = Viewport { zoom: 0.5, pan: Point::default() };
    assert_eq!(v.zoom_percent(), 50);
}

// =============================================================
// Zoom clamping
// =============================================================

#[test]
fn thirty_zoom_ins_land_exactly_on_max() {
    let mut m = manager();
    for _ in 0..30 {
        m.zoom_in();
    }
    assert_eq!(m.snapshot().zoom, 3.0);
}

#[test]
fn thirty_zoom_outs_land_exactly_on_min() {
    let mut m = manager();
    for _ in 0..30 {
        m.zoom_out();
    }
    assert_eq!(m.snapshot().zoom, 0.5);
}

#[test]
fn zoom_out_divides_by_step() {
    let mut m = manager();
    m.zoom_out();
    assert!((m.snapshot().zoom - 1.0 / 1.2).abs() < 1e-12);
}

#[test]
fn set_zoom_absolute_clamps() {
    let mut m = manager();
    m.set_zoom_absolute(12.0);
    assert_eq!(m.snapshot().zoom, 3.0);
    m.set_zoom_absolute(-4.0);
    assert_eq!(m.snapshot().zoom, 0.5);
    m.set_zoom_absolute(2.25);
    assert_eq!(m.snapshot().zoom, 2.25);
}

#[test]
fn mixed_sequences_stay_in_range() {
    let mut m = manager();
    let requests = [7.0, 0.1, 1.0, 2.9, 0.51, 100.0, -1.0];
    for (i, r) in requests.iter().cycle().take(200).enumerate() {
        match i % 4 {
            0 => m.zoom_in(),
            1 => m.zoom_out(),
            2 => m.set_zoom_absolute(*r),
            _ => m.wheel(if i % 3 == 0 { 1.0 } else { -1.0 }),
        }
        let z = m.snapshot().zoom;
        assert!((0.5..=3.0).contains(&z), "step {i}: zoom {z}");
    }
}

#[test]
fn wheel_down_zooms_out_and_up_zooms_in() {
    let mut m = manager();
    m.wheel(120.0);
    assert!((m.snapshot().zoom - 0.9).abs() < 1e-12);
    m.reset_view();
    m.wheel(-120.0);
    assert!((m.snapshot().zoom - 1.1).abs() < 1e-12);
}

#[test]
fn custom_limits_are_respected() {
    let limits = ZoomLimits { min: 0.25, max: 8.0, ..ZoomLimits::default() };
    let mut m = ViewportManager::new(limits);
    m.set_zoom_absolute(6.0);
    assert_eq!(m.snapshot().zoom, 6.0);
    m.set_zoom_absolute(20.0);
    assert_eq!(m.snapshot().zoom, 8.0);
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_restores_defaults_from_any_state() {
    let mut m = manager();
    m.zoom_in();
    m.zoom_in();
    m.begin_drag(pt(0.0, 0.0));
    m.update_drag(pt(40.0, -10.0));
    m.reset_view();
    assert_eq!(m.snapshot(), Viewport::default());
    assert!(!m.is_dragging());
    assert!(!m.take_click_suppression());
}

// =============================================================
// Drag
// =============================================================

#[test]
fn scenario_c_drag_pans_by_pointer_delta() {
    let mut m = manager();
    m.begin_drag(pt(100.0, 100.0));
    assert!(m.update_drag(pt(130.0, 115.0)));
    assert_eq!(m.snapshot().pan, pt(30.0, 15.0));
    assert_eq!(m.end_drag(), DragOutcome::Panned);
    assert_eq!(m.snapshot().pan, pt(30.0, 15.0));
    assert!(m.take_click_suppression());
    assert!(!m.take_click_suppression());
}

#[test]
fn drag_is_relative_to_pan_at_start() {
    let mut m = manager();
    m.begin_drag(pt(0.0, 0.0));
    m.update_drag(pt(10.0, 10.0));
    m.end_drag();
    m.begin_drag(pt(200.0, 200.0));
    m.update_drag(pt(205.0, 190.0));
    assert_eq!(m.snapshot().pan, pt(15.0, 0.0));
}

#[test]
fn intermediate_moves_do_not_accumulate() {
    let mut m = manager();
    m.begin_drag(pt(0.0, 0.0));
    m.update_drag(pt(50.0, 50.0));
    m.update_drag(pt(20.0, 5.0));
    assert_eq!(m.snapshot().pan, pt(20.0, 5.0));
}

#[test]
fn drag_back_to_start_still_counts_as_pan() {
    let mut m = manager();
    m.begin_drag(pt(10.0, 10.0));
    m.update_drag(pt(20.0, 10.0));
    m.update_drag(pt(10.0, 10.0));
    assert_eq!(m.end_drag(), DragOutcome::Panned);
    assert!(m.take_click_suppression());
}

#[test]
fn zero_displacement_is_a_tap() {
    let mut m = manager();
    m.begin_drag(pt(10.0, 10.0));
    assert!(!m.update_drag(pt(10.0, 10.0)));
    assert_eq!(m.end_drag(), DragOutcome::Tap);
    assert!(!m.take_click_suppression());
}

#[test]
fn update_without_session_is_ignored() {
    let mut m = manager();
    assert!(!m.update_drag(pt(50.0, 50.0)));
    assert_eq!(m.snapshot().pan, Point::default());
    assert_eq!(m.end_drag(), DragOutcome::NoDrag);
}

#[test]
fn cancel_keeps_pan_without_suppression() {
    let mut m = manager();
    m.begin_drag(pt(0.0, 0.0));
    m.update_drag(pt(8.0, 9.0));
    m.cancel_drag();
    assert_eq!(m.snapshot().pan, pt(8.0, 9.0));
    assert!(!m.is_dragging());
    assert!(!m.take_click_suppression());
}

#[test]
fn new_drag_clears_stale_suppression() {
    let mut m = manager();
    m.begin_drag(pt(0.0, 0.0));
    m.update_drag(pt(1.0, 0.0));
    m.end_drag();
    m.begin_drag(pt(5.0, 5.0));
    assert_eq!(m.end_drag(), DragOutcome::Tap);
    assert!(!m.take_click_suppression());
}

#[test]
fn zoom_during_drag_keeps_session() {
    let mut m = manager();
    m.begin_drag(pt(0.0, 0.0));
    m.zoom_in();
    m.update_drag(pt(3.0, 4.0));
    assert!(m.is_dragging());
    assert_eq!(m.snapshot().pan, pt(3.0, 4.0));
}

#[test]
fn unvalidated_inverted_limits_do_not_panic() {
    let mut m = ViewportManager::new(ZoomLimits { min: 2.0, max: 1.0, ..ZoomLimits::default() });
    m.zoom_in();
    m.zoom_out();
    m.wheel(-100.0);
    m.set_zoom_absolute(1.5);
    let zoom = m.snapshot().zoom;
    assert!(zoom.is_finite());
    assert_eq!(zoom, 1.0);
}

#[test]
fn set_limits_reclamps_zoom_and_keeps_pan() {
    let mut m = manager();
    m.set_zoom_absolute(2.5);
    m.begin_drag(pt(0.0, 0.0));
    m.update_drag(pt(12.0, -4.0));
    m.end_drag();
    m.set_limits(ZoomLimits { max: 2.0, ..ZoomLimits::default() });
    assert_eq!(m.snapshot().zoom, 2.0);
    assert_eq!(m.snapshot().pan, pt(12.0, -4.0));
}
