//! Viewport state: zoom, pan, and the drag gesture that moves it.
//!
//! [`Viewport`] is a plain value with pure transitions. [`ViewportManager`]
//! owns the current value plus the in-flight drag session and is the only
//! thing that mutates either. The renderer and hit tester receive
//! [`Viewport`] snapshots, never the manager.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::config::ZoomLimits;
use crate::geometry::Point;

/// Zoom factor and pan offset (display pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0, pan: Point::default() }
    }
}

impl Viewport {
    /// Zoom set to `zoom`, clamped. Non-finite requests leave zoom unchanged.
    #[must_use]
    pub fn with_zoom(self, zoom: f64, limits: &ZoomLimits) -> Self {
        if !zoom.is_finite() {
            return self;
        }
        Self { zoom: limits.clamp(zoom), ..self }
    }

    #[must_use]
    pub fn zoomed_in(self, limits: &ZoomLimits) -> Self {
        self.with_zoom(self.zoom * limits.step, limits)
    }

    #[must_use]
    pub fn zoomed_out(self, limits: &ZoomLimits) -> Self {
        self.with_zoom(self.zoom / limits.step, limits)
    }

    /// Apply one wheel notch: scrolling down (`delta_y > 0`) zooms out.
    #[must_use]
    pub fn wheeled(self, delta_y: f64, limits: &ZoomLimits) -> Self {
        let factor = if delta_y > 0.0 { limits.wheel_out } else { limits.wheel_in };
        self.with_zoom(self.zoom * factor, limits)
    }

    #[must_use]
    pub fn panned_to(self, pan: Point) -> Self {
        Self { pan, ..self }
    }

    /// Zoom as a whole percentage for the host's zoom indicator.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        let pct = (self.zoom * 100.0).round().max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = pct as u32;
        pct
    }
}

/// An active pan gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position at drag start, display space.
    pub start_pointer: Point,
    /// Pan at drag start.
    pub start_pan: Point,
    /// Set once any update moved the pointer away from `start_pointer`.
    pub moved: bool,
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No session was active.
    NoDrag,
    /// The pointer never moved; the following click is a selection attempt.
    Tap,
    /// The view was panned; the following click is swallowed.
    Panned,
}

/// Owns the viewport value and the drag session.
#[derive(Debug, Clone, Default)]
pub struct ViewportManager {
    limits: ZoomLimits,
    view: Viewport,
    drag: Option<DragSession>,
    suppress_click: bool,
}

impl ViewportManager {
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self { limits, ..Self::default() }
    }

    /// Current viewport value.
    #[must_use]
    pub fn snapshot(&self) -> Viewport {
        self.view
    }

    #[must_use]
    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    /// Swap in new limits, re-clamping the current zoom. Pan is kept.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits;
        self.view = self.view.with_zoom(self.view.zoom, &self.limits);
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn zoom_in(&mut self) {
        self.view = self.view.zoomed_in(&self.limits);
    }

    pub fn zoom_out(&mut self) {
        self.view = self.view.zoomed_out(&self.limits);
    }

    pub fn set_zoom_absolute(&mut self, zoom: f64) {
        self.view = self.view.with_zoom(zoom, &self.limits);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.view = self.view.wheeled(delta_y, &self.limits);
    }

    /// Back to zoom 1 and no pan; any drag in progress is dropped.
    pub fn reset_view(&mut self) {
        self.view = Viewport::default();
        self.drag = None;
        self.suppress_click = false;
    }

    /// Start a pan gesture at `pointer` (display space).
    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = Some(DragSession { start_pointer: pointer, start_pan: self.view.pan, moved: false });
        self.suppress_click = false;
    }

    /// Move the active pan gesture. Returns whether pan changed.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        let dx = pointer.x - session.start_pointer.x;
        let dy = pointer.y - session.start_pointer.y;
        if dx != 0.0 || dy != 0.0 {
            session.moved = true;
        }
        let pan = Point::new(session.start_pan.x + dx, session.start_pan.y + dy);
        let changed = pan != self.view.pan;
        self.view = self.view.panned_to(pan);
        changed
    }

    /// Finish the gesture, keeping the resulting pan.
    ///
    /// A gesture that moved arms click suppression for the click event the
    /// browser delivers right after pointer-up.
    pub fn end_drag(&mut self) -> DragOutcome {
        match self.drag.take() {
            None => DragOutcome::NoDrag,
            Some(session) if session.moved => {
                self.suppress_click = true;
                DragOutcome::Panned
            }
            Some(_) => DragOutcome::Tap,
        }
    }

    /// Finish the gesture without arming click suppression (pointer left the
    /// surface, so no click follows).
    pub fn cancel_drag(&mut self) {
        self.drag = None;
        self.suppress_click = false;
    }

    /// Consume the pending click suppression, if any.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }
}
