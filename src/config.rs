//! Viewer configuration.
//!
//! The host may pass a JSON object to tune zoom behavior; every field is
//! optional and falls back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::ViewerError;
use crate::consts::{LABEL_MIN_ZOOM, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Zoom clamp range and step factors used by the viewport manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    /// Factor for one zoom-in button press (divisor for zoom-out).
    pub step: f64,
    /// Factor for one wheel notch scrolling up.
    pub wheel_in: f64,
    /// Factor for one wheel notch scrolling down.
    pub wheel_out: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: ZOOM_MIN,
            max: ZOOM_MAX,
            step: ZOOM_STEP,
            wheel_in: WHEEL_ZOOM_IN,
            wheel_out: WHEEL_ZOOM_OUT,
        }
    }
}

impl ZoomLimits {
    /// Clamp `zoom` into `[min, max]`.
    ///
    /// Never panics: with an inverted or NaN range `max` wins, so callers
    /// holding unvalidated limits still get a number back.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.max(self.min).min(self.max)
    }

    /// Check that the range contains 1.0 and every factor moves zoom in the
    /// direction its name says.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let all_finite = [self.min, self.max, self.step, self.wheel_in, self.wheel_out]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ViewerError::InvalidConfig("zoom values must be finite".into()));
        }
        if self.min <= 0.0 || self.min > 1.0 {
            return Err(ViewerError::InvalidConfig(format!("zoom.min must be in (0, 1], got {}", self.min)));
        }
        if self.max < 1.0 {
            return Err(ViewerError::InvalidConfig(format!("zoom.max must be >= 1, got {}", self.max)));
        }
        if self.step <= 1.0 {
            return Err(ViewerError::InvalidConfig(format!("zoom.step must be > 1, got {}", self.step)));
        }
        if self.wheel_in <= 1.0 {
            return Err(ViewerError::InvalidConfig(format!("zoom.wheel_in must be > 1, got {}", self.wheel_in)));
        }
        if self.wheel_out <= 0.0 || self.wheel_out >= 1.0 {
            return Err(ViewerError::InvalidConfig(format!(
                "zoom.wheel_out must be in (0, 1), got {}",
                self.wheel_out
            )));
        }
        Ok(())
    }
}

/// Tunables for one viewer instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub zoom: ZoomLimits,
    /// Confidence labels are drawn only when zoom is strictly above this.
    pub label_min_zoom: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self { zoom: ZoomLimits::default(), label_min_zoom: LABEL_MIN_ZOOM }
    }
}

impl ViewerConfig {
    /// Parse and validate a JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Json`] for malformed JSON and
    /// [`ViewerError::InvalidConfig`] when the values break [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ViewerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the zoom limits and the label threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        self.zoom.validate()?;
        if !self.label_min_zoom.is_finite() {
            return Err(ViewerError::InvalidConfig("label_min_zoom must be finite".into()));
        }
        Ok(())
    }
}
