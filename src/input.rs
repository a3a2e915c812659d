//! Input model: pointer buttons, wheel deltas, cursors, and the interaction
//! profile derived from the device mode.
//!
//! The host decides whether it is on a desktop or a touch layout (typically a
//! responsive breakpoint query) and reports it as a [`DeviceMode`]. Every
//! device-dependent rule the renderer and hit tester follow is resolved once
//! into an [`InteractionProfile`] rather than branching on the mode inline.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Layout class reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceMode {
    /// Pointer-driven: drag to pan, wheel to zoom, click badges to select.
    #[default]
    Desktop,
    /// Touch-driven: no free panning, tap anywhere inside a box to select.
    Mobile,
}

/// Which annotations get an index badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVisibility {
    All,
    SelectedOnly,
}

impl BadgeVisibility {
    /// Whether the badge for `index` is drawn given the current selection.
    #[must_use]
    pub fn shows(self, index: usize, selected: Option<usize>) -> bool {
        match self {
            Self::All => true,
            Self::SelectedOnly => selected == Some(index),
        }
    }
}

/// What a pointer must land on to select an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestMode {
    /// Inside the index badge circle.
    Badge,
    /// Inside the bounding rectangle.
    BoundingBox,
}

/// Device-dependent rendering and interaction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionProfile {
    /// Pointer drags pan the view.
    pub allow_drag: bool,
    /// Wheel input zooms the view.
    pub allow_wheel_zoom: bool,
    pub badge_visibility: BadgeVisibility,
    pub hit_test_mode: HitTestMode,
}

impl InteractionProfile {
    #[must_use]
    pub fn for_mode(mode: DeviceMode) -> Self {
        match mode {
            DeviceMode::Desktop => Self {
                allow_drag: true,
                allow_wheel_zoom: true,
                badge_visibility: BadgeVisibility::All,
                hit_test_mode: HitTestMode::Badge,
            },
            DeviceMode::Mobile => Self {
                allow_drag: false,
                allow_wheel_zoom: false,
                badge_visibility: BadgeVisibility::SelectedOnly,
                hit_test_mode: HitTestMode::BoundingBox,
            },
        }
    }
}

impl Default for InteractionProfile {
    fn default() -> Self {
        Self::for_mode(DeviceMode::default())
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}
