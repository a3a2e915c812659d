//! Shared numeric constants for the viewport crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom factor the viewport accepts.
pub const ZOOM_MIN: f64 = 0.5;

/// Largest zoom factor the viewport accepts.
pub const ZOOM_MAX: f64 = 3.0;

/// Multiplier applied by a single zoom-in (divisor for zoom-out).
pub const ZOOM_STEP: f64 = 1.2;

/// Wheel zoom factor when scrolling up.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Wheel zoom factor when scrolling down.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

// ── Badges ──────────────────────────────────────────────────────

/// Minimum badge radius in display pixels.
pub const BADGE_MIN_RADIUS_PX: f64 = 10.0;

/// Badge radius growth per unit of zoom.
pub const BADGE_RADIUS_PER_ZOOM: f64 = 6.0;

/// Confidence labels are drawn only above this zoom.
pub const LABEL_MIN_ZOOM: f64 = 0.8;
