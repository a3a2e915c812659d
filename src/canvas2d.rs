//! [`Surface`] backed by a browser `CanvasRenderingContext2d`.
//!
//! Every draw call on a [`web_sys::CanvasRenderingContext2d`] goes through here.
//! Coordinates passed in are CSS pixels; [`Canvas2dSurface::apply_pixel_ratio`]
//! scales them onto the backing store.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::ViewerError;
use crate::geometry::{Rect, Size};
use crate::render::{Surface, TextAlign, TextBaseline};

/// Acquire the 2D context of `canvas`.
///
/// # Errors
///
/// Returns [`ViewerError::MissingContext`] if the canvas has no 2D context
/// (already bound to another context type) and [`ViewerError::Js`] if the
/// lookup itself throws.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, ViewerError> {
    let ctx = canvas.get_context("2d")?.ok_or(ViewerError::MissingContext)?;
    ctx.dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ViewerError::MissingContext)
}

/// Draws onto a 2D context; `image` is the decoded element for the current
/// source, if any.
pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    image: Option<&'a HtmlImageElement>,
}

impl<'a> Canvas2dSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d, image: Option<&'a HtmlImageElement>) -> Self {
        Self { ctx, image }
    }

    /// Reset the transform so one unit is one CSS pixel at `dpr`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the context rejects the transform.
    pub fn apply_pixel_ratio(&self, dpr: f64) -> Result<(), ViewerError> {
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        Ok(())
    }
}

impl Surface for Canvas2dSurface<'_> {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear(&mut self, size: Size) {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn draw_image(&mut self, dest: Rect) -> Result<(), ViewerError> {
        let Some(image) = self.image else {
            log::trace!("no decoded element for current source; image layer skipped");
            return Ok(());
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, dest.x, dest.y, dest.width, dest.height)?;
        Ok(())
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), ViewerError> {
        let dash_array = js_sys::Array::new();
        for segment in segments {
            dash_array.push(&(*segment).into());
        }
        self.ctx.set_line_dash(&dash_array)?;
        Ok(())
    }

    fn set_shadow(&mut self, color: &str, blur: f64) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur);
    }

    fn set_fill_radial(&mut self, cx: f64, cy: f64, radius: f64, inner: &str, outer: &str) -> Result<(), ViewerError> {
        let gradient = self.ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius)?;
        gradient.add_color_stop(0.0, inner)?;
        gradient.add_color_stop(1.0, outer)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), ViewerError> {
        self.ctx.arc(x, y, radius, start, end)?;
        Ok(())
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(match align {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
        });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(match baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), ViewerError> {
        self.ctx.fill_text(text, x, y)?;
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, ViewerError> {
        Ok(self.ctx.measure_text(text)?.width())
    }
}
