//! Annotation model: detector bounding boxes, their classes, and confidence.
//!
//! Annotations arrive from the host (usually straight from the detector's JSON
//! response) and are read-only to this crate. [`normalize`] is applied once
//! when a list is accepted so the renderer and hit tester can rely on ordered,
//! in-bounds coordinates.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Bounding box in image-native pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    /// Reorder corners so `x1 <= x2` and `y1 <= y2`, then clamp into `bounds`.
    #[must_use]
    pub fn normalized_within(self, bounds: Size) -> Self {
        let (x1, x2) = if self.x1 <= self.x2 { (self.x1, self.x2) } else { (self.x2, self.x1) };
        let (y1, y2) = if self.y1 <= self.y2 { (self.y1, self.y2) } else { (self.y2, self.y1) };
        Self {
            x1: x1.clamp(0.0, bounds.width),
            y1: y1.clamp(0.0, bounds.height),
            x2: x2.clamp(0.0, bounds.width),
            y2: y2.clamp(0.0, bounds.height),
        }
    }
}

/// Detector class of an annotation.
///
/// The detector currently emits 0 (good), 1 (loose) and 2 (tight); other ids
/// are carried through and drawn in the fallback color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification(pub u32);

impl Classification {
    pub const GOOD: Self = Self(0);
    pub const LOOSE: Self = Self(1);
    pub const TIGHT: Self = Self(2);

    /// Detector label for this class, if known.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("suture_good"),
            1 => Some("suture_loose"),
            2 => Some("suture_tight"),
            _ => None,
        }
    }

    /// Stroke/fill color for this class as a `#RRGGBB` string.
    ///
    /// Shared by desktop and mobile renders.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self.0 {
            0 => "#0C234B",
            1 => "#1E5288",
            2 => "#AB0520",
            _ => "#6B7280",
        }
    }
}

/// One classified region over the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u64,
    pub bbox: BBox,
    #[serde(rename = "class_id")]
    pub classification: Classification,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Annotation {
    /// Confidence as a whole percentage for labels (`0.954` -> `95`).
    #[must_use]
    pub fn confidence_percent(&self) -> u32 {
        let pct = (self.confidence.clamp(0.0, 1.0) * 100.0).round();
        // Clamped to [0, 100] above, so the cast is exact.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = pct as u32;
        pct
    }
}

/// Normalize every annotation against the native image size.
///
/// Boxes with swapped corners are reordered and coordinates outside the image
/// are clamped to its edges. With an undrawable `bounds` the far edges are
/// left alone; only negative coordinates are pulled to zero.
#[must_use]
pub fn normalize(annotations: Vec<Annotation>, bounds: Size) -> Vec<Annotation> {
    annotations
        .into_iter()
        .map(|mut a| {
            let clamp_to = if bounds.is_drawable() { bounds } else { Size::new(f64::INFINITY, f64::INFINITY) };
            let fixed = a.bbox.normalized_within(clamp_to);
            if fixed != a.bbox {
                log::debug!("annotation {} bbox adjusted to image bounds", a.id);
            }
            a.bbox = fixed;
            a
        })
        .collect()
}

/// Parse a detector response array into annotations.
///
/// # Errors
///
/// Returns [`crate::ViewerError::Json`] if the payload does not match the
/// annotation shape.
pub fn from_json(json: &str) -> Result<Vec<Annotation>, crate::ViewerError> {
    Ok(serde_json::from_str(json)?)
}
