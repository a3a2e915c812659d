//! Rendering: draws the image, annotation overlays, badges, and labels.
//!
//! The draw pass is written against [`Surface`], a small subset of the
//! `Canvas2D` API. In the browser that is [`crate::canvas2d::Canvas2dSurface`];
//! tests use a recording implementation. [`draw`] receives a read-only
//! [`Frame`] snapshot and never mutates application state, so running it twice
//! with the same frame produces the same output.
//!
//! All fallible surface calls propagate errors via `Result<(), ViewerError>`.
//! The top-level caller ([`crate::engine::Engine::render`]) logs the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use crate::ViewerError;
use crate::annotation::Annotation;
use crate::config::ViewerConfig;
use crate::geometry::{Geometry, Rect, Size, fit_geometry};
use crate::image::DecodeState;
use crate::input::InteractionProfile;
use crate::viewport::Viewport;

/// Outline drawn around the image bounds.
const IMAGE_BORDER_COLOR: &str = "rgba(12, 35, 75, 0.18)";

/// Dash pattern for unselected boxes.
const BOX_DASH: [f64; 2] = [5.0, 5.0];

/// Alpha applied to the class color for box strokes.
const BOX_ALPHA: f64 = 0.6;

/// Glow blur around the selected box and badge.
const SELECTED_GLOW_BLUR: f64 = 12.0;

const BADGE_RING_COLOR: &str = "rgba(255, 255, 255, 0.8)";
const LABEL_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";
const TEXT_COLOR: &str = "#FFFFFF";

/// Gap between the bottom of a box and its confidence label.
const LABEL_GAP_PX: f64 = 10.0;
const LABEL_PADDING_PX: f64 = 4.0;
const LABEL_CORNER_PX: f64 = 3.0;

const BADGE_FONT: &str = "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto";
const LABEL_FONT: &str = "\"SF Pro Display\", -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif";

const PLACEHOLDER_FILL: &str = "rgba(107, 114, 128, 0.05)";
const PLACEHOLDER_STROKE: &str = "rgba(30, 82, 136, 0.3)";
const PLACEHOLDER_TEXT: &str = "#1E5288";
const PLACEHOLDER_INSET_PX: f64 = 8.0;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
}

/// The drawing operations the renderer needs.
///
/// Mirrors the `Canvas2D` state machine: style setters affect subsequent path
/// and text calls until changed or restored.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn clear(&mut self, size: Size);

    /// Draw the decoded image stretched into `dest`.
    ///
    /// # Errors
    ///
    /// Fails if the backend rejects the image.
    fn draw_image(&mut self, dest: Rect) -> Result<(), ViewerError>;

    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);

    /// Set the dash pattern; an empty slice draws solid lines.
    ///
    /// # Errors
    ///
    /// Fails if the backend rejects the pattern.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), ViewerError>;

    /// Shadow used as a glow; a blur of 0 disables it.
    fn set_shadow(&mut self, color: &str, blur: f64);

    /// Fill subsequent shapes with a radial gradient centred on the circle.
    ///
    /// # Errors
    ///
    /// Fails if the backend rejects the gradient parameters.
    fn set_fill_radial(&mut self, cx: f64, cy: f64, radius: f64, inner: &str, outer: &str) -> Result<(), ViewerError>;

    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);

    /// Add a circular arc to the current path.
    ///
    /// # Errors
    ///
    /// Fails on a negative radius.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), ViewerError>;
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// # Errors
    ///
    /// Fails if the backend cannot draw text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), ViewerError>;

    /// Width of `text` in the current font.
    ///
    /// # Errors
    ///
    /// Fails if the backend cannot measure text.
    fn measure_text(&mut self, text: &str) -> Result<f64, ViewerError>;
}

/// Everything one draw pass reads.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Canvas size in CSS pixels.
    pub container: Size,
    /// Native image size used for fitting and bbox scaling.
    pub image_size: Size,
    /// Decode state of the current image; `None` when no source is set.
    pub image_state: Option<&'a DecodeState>,
    pub viewport: Viewport,
    pub annotations: &'a [Annotation],
    pub selected: Option<usize>,
    pub profile: InteractionProfile,
    pub config: &'a ViewerConfig,
}

impl Frame<'_> {
    /// Geometry for this frame, if both sizes are drawable.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        fit_geometry(self.container, self.image_size, self.viewport.zoom, self.viewport.pan)
    }
}

/// What the last draw pass ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawResult {
    /// Container not measured yet; nothing drawn.
    Skipped,
    /// Cleared only (no source or decode pending).
    Cleared,
    /// Decode failed; placeholder drawn.
    Placeholder,
    /// Image and overlays drawn.
    Drawn,
}

/// Draw the full scene for `frame`.
///
/// # Errors
///
/// Returns `Err` if any surface call fails (e.g. invalid context state).
pub fn draw(surface: &mut impl Surface, frame: &Frame<'_>) -> Result<DrawResult, ViewerError> {
    if !frame.container.is_drawable() {
        return Ok(DrawResult::Skipped);
    }

    // Layer 1: clear.
    surface.clear(frame.container);

    match frame.image_state {
        Some(DecodeState::Loaded) => {}
        Some(DecodeState::Error(_)) => {
            draw_placeholder(surface, frame.container, frame.annotations.len())?;
            return Ok(DrawResult::Placeholder);
        }
        Some(DecodeState::Pending) | None => return Ok(DrawResult::Cleared),
    }
    let Some(geometry) = frame.geometry() else {
        return Ok(DrawResult::Cleared);
    };

    // Layer 2: image and its outline.
    let bounds = geometry.image_rect();
    surface.draw_image(bounds)?;
    surface.set_stroke_color(IMAGE_BORDER_COLOR);
    surface.set_line_width(1.0);
    surface.stroke_rect(bounds);

    // Layer 3: overlays in list order.
    let zoom = frame.viewport.zoom;
    for (index, annotation) in frame.annotations.iter().enumerate() {
        let selected = frame.selected == Some(index);
        draw_box(surface, &geometry, annotation, selected)?;

        let show_badge = frame.profile.badge_visibility.shows(index, frame.selected);
        if !show_badge {
            continue;
        }
        draw_badge(surface, &geometry, annotation, index, zoom, selected)?;
        if zoom > frame.config.label_min_zoom {
            draw_confidence_label(surface, &geometry, annotation, zoom)?;
        }
    }

    surface.set_text_align(TextAlign::Start);
    surface.set_text_baseline(TextBaseline::Alphabetic);
    Ok(DrawResult::Drawn)
}

// =============================================================
// Overlays
// =============================================================

fn draw_box(
    surface: &mut impl Surface,
    geometry: &Geometry,
    annotation: &Annotation,
    selected: bool,
) -> Result<(), ViewerError> {
    let color = annotation.classification.color();
    let rect = geometry.bbox_to_display(&annotation.bbox);
    surface.save();
    if selected {
        surface.set_shadow(color, SELECTED_GLOW_BLUR);
    }
    surface.set_stroke_color(&hex_to_rgba(color, BOX_ALPHA));
    surface.set_line_width(if selected { 3.0 } else { 2.0 });
    let dash: &[f64] = if selected { &[] } else { &BOX_DASH };
    surface.set_line_dash(dash)?;
    surface.stroke_rect(rect);
    surface.set_line_dash(&[])?;
    surface.restore();
    Ok(())
}

fn draw_badge(
    surface: &mut impl Surface,
    geometry: &Geometry,
    annotation: &Annotation,
    index: usize,
    zoom: f64,
    selected: bool,
) -> Result<(), ViewerError> {
    let color = annotation.classification.color();
    let circle = geometry.badge_circle(&annotation.bbox, zoom);
    let (cx, cy) = (circle.center.x, circle.center.y);

    surface.save();
    if selected {
        surface.set_shadow(color, SELECTED_GLOW_BLUR);
    }
    surface.set_fill_radial(cx, cy, circle.radius, color, &hex_to_rgba(color, 0.8))?;
    surface.begin_path();
    surface.arc(cx, cy, circle.radius, 0.0, 2.0 * PI)?;
    surface.fill();
    surface.set_shadow(color, 0.0);

    surface.set_stroke_color(BADGE_RING_COLOR);
    surface.set_line_width(2.0);
    surface.stroke();

    surface.set_fill_color(TEXT_COLOR);
    surface.set_font(&format!("bold {}px {BADGE_FONT}", badge_font_px(zoom)));
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(&(index + 1).to_string(), cx, cy)?;
    surface.restore();
    Ok(())
}

fn draw_confidence_label(
    surface: &mut impl Surface,
    geometry: &Geometry,
    annotation: &Annotation,
    zoom: f64,
) -> Result<(), ViewerError> {
    let rect = geometry.bbox_to_display(&annotation.bbox);
    let text = format!("{}%", annotation.confidence_percent());
    let font_px = label_font_px(zoom);

    surface.save();
    surface.set_font(&format!("bold {font_px}px {LABEL_FONT}"));
    let text_w = surface.measure_text(&text)?;
    let top = rect.bottom() + LABEL_GAP_PX;
    let background = Rect::new(
        rect.center_x() - text_w / 2.0 - LABEL_PADDING_PX,
        top - LABEL_PADDING_PX,
        text_w + LABEL_PADDING_PX * 2.0,
        font_px + LABEL_PADDING_PX * 2.0,
    );

    surface.set_fill_color(LABEL_BACKGROUND);
    rounded_rect_path(surface, background, LABEL_CORNER_PX);
    surface.fill();

    surface.set_fill_color(TEXT_COLOR);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.fill_text(&text, rect.center_x(), top + font_px / 2.0)?;
    surface.restore();
    Ok(())
}

// =============================================================
// Placeholder
// =============================================================

fn draw_placeholder(surface: &mut impl Surface, container: Size, annotation_count: usize) -> Result<(), ViewerError> {
    let inset = Rect::new(
        PLACEHOLDER_INSET_PX,
        PLACEHOLDER_INSET_PX,
        (container.width - PLACEHOLDER_INSET_PX * 2.0).max(0.0),
        (container.height - PLACEHOLDER_INSET_PX * 2.0).max(0.0),
    );

    surface.save();
    surface.set_fill_color(PLACEHOLDER_FILL);
    surface.fill_rect(inset);
    surface.set_stroke_color(PLACEHOLDER_STROKE);
    surface.set_line_width(2.0);
    surface.set_line_dash(&[6.0, 4.0])?;
    surface.stroke_rect(inset);
    surface.set_line_dash(&[])?;

    let cx = container.width / 2.0;
    let cy = container.height / 2.0;
    surface.set_fill_color(PLACEHOLDER_TEXT);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.set_font(&format!("600 14px {LABEL_FONT}"));
    surface.fill_text("Image preview not available", cx, cy - 10.0)?;
    if annotation_count > 0 {
        let noun = if annotation_count == 1 { "annotation" } else { "annotations" };
        surface.set_font(&format!("12px {LABEL_FONT}"));
        surface.fill_text(&format!("{annotation_count} {noun} detected"), cx, cy + 12.0)?;
    }
    surface.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Badge number font size in pixels.
#[must_use]
pub fn badge_font_px(zoom: f64) -> f64 {
    10.0_f64.max(8.0 * zoom)
}

/// Confidence label font size in pixels.
#[must_use]
pub fn label_font_px(zoom: f64) -> f64 {
    11.0_f64.max(9.0 * zoom)
}

/// Convert `#RRGGBB` to a CSS `rgba()` string. Malformed input is returned
/// unchanged.
#[must_use]
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return hex.to_owned();
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        _ => hex.to_owned(),
    }
}

fn rounded_rect_path(surface: &mut impl Surface, r: Rect, corner: f64) {
    let (x, y, w, h) = (r.x, r.y, r.width, r.height);
    surface.begin_path();
    surface.move_to(x + corner, y);
    surface.line_to(x + w - corner, y);
    surface.quadratic_curve_to(x + w, y, x + w, y + corner);
    surface.line_to(x + w, y + h - corner);
    surface.quadratic_curve_to(x + w, y + h, x + w - corner, y + h);
    surface.line_to(x + corner, y + h);
    surface.quadratic_curve_to(x, y + h, x, y + h - corner);
    surface.line_to(x, y + corner);
    surface.quadratic_curve_to(x, y, x + corner, y);
    surface.close_path();
}
