#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_constants() {
    let c = ViewerConfig::default();
    assert_eq!(c.zoom.min, 0.5);
    assert_eq!(c.zoom.max, 3.0);
    assert_eq!(c.zoom.step, 1.2);
    assert_eq!(c.zoom.wheel_in, 1.1);
    assert_eq!(c.zoom.wheel_out, 0.9);
    assert_eq!(c.label_min_zoom, 0.8);
    assert!(c.validate().is_ok());
}

#[test]
fn empty_json_yields_defaults() {
    assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let c = ViewerConfig::from_json(r#"{"zoom": {"max": 5.0}, "label_min_zoom": 1.5}"#).unwrap();
    assert_eq!(c.zoom.max, 5.0);
    assert_eq!(c.zoom.min, 0.5);
    assert_eq!(c.zoom.step, 1.2);
    assert_eq!(c.label_min_zoom, 1.5);
}

#[test]
fn malformed_json_is_json_error() {
    assert!(matches!(ViewerConfig::from_json("{"), Err(ViewerError::Json(_))));
}

#[test]
fn range_excluding_unit_zoom_is_rejected() {
    let err = ViewerConfig::from_json(r#"{"zoom": {"min": 1.5}}"#).unwrap_err();
    assert!(matches!(err, ViewerError::InvalidConfig(_)));
    let err = ViewerConfig::from_json(r#"{"zoom": {"max": 0.9}}"#).unwrap_err();
    assert!(matches!(err, ViewerError::InvalidConfig(_)));
}

#[test]
fn non_positive_min_is_rejected() {
    assert!(ViewerConfig::from_json(r#"{"zoom": {"min": 0.0}}"#).is_err());
}

#[test]
fn step_must_grow() {
    assert!(ViewerConfig::from_json(r#"{"zoom": {"step": 1.0}}"#).is_err());
}

#[test]
fn wheel_factors_must_point_the_right_way() {
    assert!(ViewerConfig::from_json(r#"{"zoom": {"wheel_in": 0.9}}"#).is_err());
    assert!(ViewerConfig::from_json(r#"{"zoom": {"wheel_out": 1.1}}"#).is_err());
}

#[test]
fn non_finite_values_are_rejected() {
    let mut c = ViewerConfig::default();
    c.label_min_zoom = f64::NAN;
    assert!(matches!(c.validate(), Err(ViewerError::InvalidConfig(_))));
}

#[test]
fn clamp_uses_limits() {
    let z = ZoomLimits::default();
    assert_eq!(z.clamp(10.0), 3.0);
    assert_eq!(z.clamp(0.01), 0.5);
    assert_eq!(z.clamp(1.3), 1.3);
}

#[test]
fn inverted_limits_fail_validation() {
    let z: ZoomLimits = serde_json::from_str(r#"{"min": 2.0, "max": 1.0}"#).unwrap();
    assert!(matches!(z.validate(), Err(ViewerError::InvalidConfig(_))));
    assert!(ZoomLimits::default().validate().is_ok());
}

#[test]
fn clamp_with_inverted_limits_returns_max() {
    let z = ZoomLimits { min: 2.0, max: 1.0, ..ZoomLimits::default() };
    assert_eq!(z.clamp(1.5), 1.0);
    assert_eq!(z.clamp(0.1), 1.0);
    assert_eq!(z.clamp(5.0), 1.0);
}
