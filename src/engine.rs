//! Interaction orchestrator.
//!
//! [`EngineCore`] holds every piece of viewer state and turns host events
//! (pointer, click, wheel, zoom buttons, data changes) into [`Action`]s. It has
//! no browser dependency and is what the tests drive. [`Engine`] wraps it with
//! the canvas element, the decoding `HtmlImageElement`, and the host's
//! selection callbacks.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use crate::ViewerError;
use crate::annotation::{self, Annotation};
use crate::canvas2d::{self, Canvas2dSurface};
use crate::config::ViewerConfig;
use crate::geometry::{Geometry, Point, Size};
use crate::hit;
use crate::image::{DecodeOutcome, DecodeState, Generation, ImageResource, ImageSlot};
use crate::input::{Button, Cursor, DeviceMode, InteractionProfile, WheelDelta};
use crate::render::{self, DrawResult, Frame};
use crate::viewport::{DragOutcome, Viewport, ViewportManager};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A pointer resolved to annotation `index`. `mobile` is set when the hit
    /// came from the touch profile, so the host can open its detail sheet.
    AnnotationSelected { index: usize, mobile: bool },
    SetCursor(Cursor),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: ViewerConfig,
    viewport: ViewportManager,
    image: ImageSlot,
    /// Native size supplied by the host; undrawable means "use the decoder's".
    image_size: Size,
    /// Annotations as supplied.
    source_annotations: Vec<Annotation>,
    /// Annotations normalized into the current image bounds.
    annotations: Vec<Annotation>,
    selected: Option<usize>,
    mode: DeviceMode,
    profile: InteractionProfile,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        let config = ViewerConfig::default();
        Self {
            config,
            viewport: ViewportManager::new(config.zoom),
            image: ImageSlot::new(),
            image_size: Size::default(),
            source_annotations: Vec::new(),
            annotations: Vec::new(),
            selected: None,
            mode: DeviceMode::default(),
            profile: InteractionProfile::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(config: ViewerConfig) -> Result<Self, ViewerError> {
        let mut core = Self::new();
        core.set_config(config)?;
        Ok(core)
    }

    // --- Data inputs ---

    /// Replace the viewer configuration. Current zoom is re-clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] and keeps the old configuration
    /// if `config` fails validation.
    pub fn set_config(&mut self, config: ViewerConfig) -> Result<Vec<Action>, ViewerError> {
        config.validate()?;
        self.config = config;
        self.viewport.set_limits(config.zoom);
        Ok(vec![Action::RenderNeeded])
    }

    /// Point the viewer at a new image source.
    ///
    /// Returns the generation the caller must decode, or `None` if nothing
    /// needs decoding (same source, or empty source which clears the image).
    pub fn set_image_source(&mut self, source: &str) -> Option<Generation> {
        let generation = self.image.replace(source);
        match generation {
            Some(g) => log::debug!("image source replaced (generation {}): {}", g.0, preview(source)),
            None if source.is_empty() => log::debug!("image source cleared"),
            None => log::trace!("image source unchanged; reusing decode"),
        }
        self.renormalize();
        generation
    }

    /// Restart decoding of the current source.
    pub fn reload_image(&mut self) -> Option<Generation> {
        let generation = self.image.reload();
        if let Some(g) = generation {
            log::debug!("image reload requested (generation {})", g.0);
        }
        generation
    }

    /// Apply a decoder result. Stale generations are dropped.
    pub fn resolve_image(&mut self, generation: Generation, outcome: DecodeOutcome) -> Vec<Action> {
        let description = match &outcome {
            DecodeOutcome::Loaded(size) => format!("{}x{}", size.width, size.height),
            DecodeOutcome::Failed(message) => message.clone(),
        };
        let failed = matches!(outcome, DecodeOutcome::Failed(_));
        if !self.image.resolve(generation, outcome) {
            log::trace!("dropping stale decode result for generation {}", generation.0);
            return Vec::new();
        }
        if failed {
            log::warn!("image decode failed (generation {}): {description}", generation.0);
        } else {
            log::debug!("image decoded (generation {}): {description}", generation.0);
        }
        self.renormalize();
        vec![Action::RenderNeeded]
    }

    /// Set the native image size reported by the host.
    pub fn set_image_size(&mut self, size: Size) -> Vec<Action> {
        if size == self.image_size {
            return Vec::new();
        }
        self.image_size = size;
        self.renormalize();
        vec![Action::RenderNeeded]
    }

    /// Replace the annotation list.
    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) -> Vec<Action> {
        self.source_annotations = annotations;
        self.renormalize();
        vec![Action::RenderNeeded]
    }

    /// Replace the annotation list from detector JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Json`] if `json` is not an annotation array; the
    /// current list is kept.
    pub fn set_annotations_json(&mut self, json: &str) -> Result<Vec<Action>, ViewerError> {
        let parsed = annotation::from_json(json)?;
        Ok(self.set_annotations(parsed))
    }

    /// Mirror the host-owned selection.
    pub fn set_selected(&mut self, selected: Option<usize>) -> Vec<Action> {
        if selected == self.selected {
            return Vec::new();
        }
        self.selected = selected;
        vec![Action::RenderNeeded]
    }

    /// Switch between desktop and touch interaction rules.
    pub fn set_device_mode(&mut self, mode: DeviceMode) -> Vec<Action> {
        if mode == self.mode {
            return Vec::new();
        }
        self.mode = mode;
        self.profile = InteractionProfile::for_mode(mode);
        if !self.profile.allow_drag && self.viewport.is_dragging() {
            self.viewport.cancel_drag();
        }
        vec![Action::SetCursor(self.cursor()), Action::RenderNeeded]
    }

    /// Update container dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        vec![Action::RenderNeeded]
    }

    // --- Input events (display-space points) ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if !self.profile.allow_drag || button != Button::Primary {
            return Vec::new();
        }
        self.viewport.begin_drag(pt);
        vec![Action::SetCursor(Cursor::Grabbing)]
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        if self.viewport.update_drag(pt) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.viewport.is_dragging() {
            return Vec::new();
        }
        let moved = self.viewport.update_drag(pt);
        if self.viewport.end_drag() == DragOutcome::Panned {
            log::trace!("pan finished; next click suppressed");
        }
        let mut actions = vec![Action::SetCursor(self.cursor())];
        if moved {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// The pointer left the canvas: end any drag without swallowing a click.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if !self.viewport.is_dragging() {
            return Vec::new();
        }
        self.viewport.cancel_drag();
        vec![Action::SetCursor(self.cursor())]
    }

    /// Resolve a click or tap to an annotation.
    ///
    /// The click that the browser fires right after a pan is swallowed. A miss
    /// produces no action; the host's selection stays as it was.
    pub fn on_click(&mut self, pt: Point) -> Vec<Action> {
        if self.viewport.take_click_suppression() {
            return Vec::new();
        }
        let Some(geometry) = self.geometry() else {
            return Vec::new();
        };
        let zoom = self.viewport.snapshot().zoom;
        match hit::hit_test(pt, &self.annotations, &geometry, zoom, self.profile.hit_test_mode) {
            Some(index) => vec![Action::AnnotationSelected { index, mobile: self.mode == DeviceMode::Mobile }],
            None => Vec::new(),
        }
    }

    /// Wheel zoom. Ignored unless the profile routes wheel input to zoom.
    pub fn on_wheel(&mut self, _pt: Point, delta: WheelDelta) -> Vec<Action> {
        if !self.profile.allow_wheel_zoom {
            return Vec::new();
        }
        let before = self.viewport.snapshot();
        self.viewport.wheel(delta.dy);
        self.changed_since(before)
    }

    // --- Zoom controls ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let before = self.viewport.snapshot();
        self.viewport.zoom_in();
        self.changed_since(before)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let before = self.viewport.snapshot();
        self.viewport.zoom_out();
        self.changed_since(before)
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        let before = self.viewport.snapshot();
        self.viewport.set_zoom_absolute(zoom);
        self.changed_since(before)
    }

    /// Zoom 1, no pan.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.viewport.reset_view();
        vec![Action::SetCursor(self.cursor()), Action::RenderNeeded]
    }

    // --- Queries ---

    /// Image size used for fitting: the host's if drawable, else the decoded one.
    #[must_use]
    pub fn effective_image_size(&self) -> Option<Size> {
        if self.image_size.is_drawable() {
            return Some(self.image_size);
        }
        self.image.current().and_then(|c| c.natural_size).filter(|s| s.is_drawable())
    }

    #[must_use]
    pub fn container(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Display geometry for the current state, if it can be computed.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        let view = self.viewport.snapshot();
        crate::geometry::fit_geometry(self.container(), self.effective_image_size()?, view.zoom, view.pan)
    }

    /// Read-only snapshot for one draw pass.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            container: self.container(),
            image_size: self.effective_image_size().unwrap_or_default(),
            image_state: self.image.current().map(|c| &c.state),
            viewport: self.viewport.snapshot(),
            annotations: &self.annotations,
            selected: self.selected,
            profile: self.profile,
            config: &self.config,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        match (self.profile.allow_drag, self.viewport.is_dragging()) {
            (false, _) => Cursor::Default,
            (true, true) => Cursor::Grabbing,
            (true, false) => Cursor::Grab,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.snapshot()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.viewport.snapshot().zoom_percent()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.viewport.is_dragging()
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn device_mode(&self) -> DeviceMode {
        self.mode
    }

    #[must_use]
    pub fn profile(&self) -> InteractionProfile {
        self.profile
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageResource> {
        self.image.current()
    }

    // --- Internal ---

    fn renormalize(&mut self) {
        let bounds = self.effective_image_size().unwrap_or_default();
        self.annotations = annotation::normalize(self.source_annotations.clone(), bounds);
    }

    fn changed_since(&self, before: Viewport) -> Vec<Action> {
        if self.viewport.snapshot() == before {
            Vec::new()
        } else {
            vec![Action::RenderNeeded]
        }
    }
}

/// Shorten data URIs for log lines.
fn preview(source: &str) -> &str {
    const MAX: usize = 64;
    if source.len() <= MAX {
        return source;
    }
    let mut end = MAX;
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[..end]
}

// =============================================================
// Browser engine
// =============================================================

type DecodeQueue = Rc<RefCell<Vec<(Generation, DecodeOutcome)>>>;
type RenderHook = Rc<RefCell<Option<Box<dyn Fn()>>>>;

/// An `HtmlImageElement` decoding (or holding) one generation.
///
/// Dropping it detaches the element's handlers so a late `load` event for a
/// replaced source never reaches the queue.
struct ImageElement {
    element: HtmlImageElement,
    generation: Generation,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl Drop for ImageElement {
    fn drop(&mut self) {
        self.element.set_onload(None);
        self.element.set_onerror(None);
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    pub core: EngineCore,
    image: Option<ImageElement>,
    decoded: DecodeQueue,
    render_hook: RenderHook,
    on_select: Option<Box<dyn FnMut(Option<usize>)>>,
    on_mobile_select: Option<Box<dyn FnMut(usize, &HtmlElement)>>,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let ctx = match canvas2d::context_2d(&canvas) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("canvas has no usable 2d context: {e}");
                None
            }
        };
        Self {
            canvas,
            ctx,
            core: EngineCore::new(),
            image: None,
            decoded: Rc::new(RefCell::new(Vec::new())),
            render_hook: Rc::new(RefCell::new(None)),
            on_select: None,
            on_mobile_select: None,
        }
    }

    /// Create an engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] if `config` fails validation.
    pub fn with_config(canvas: HtmlCanvasElement, config: ViewerConfig) -> Result<Self, ViewerError> {
        let mut engine = Self::new(canvas);
        engine.core = EngineCore::with_config(config)?;
        Ok(engine)
    }

    // --- Host wiring ---

    /// Called whenever the engine needs a redraw. The hook runs while the
    /// engine is borrowed, so it must defer (typically via
    /// `requestAnimationFrame`) before calling [`Engine::render`].
    pub fn set_render_hook(&mut self, hook: impl Fn() + 'static) {
        *self.render_hook.borrow_mut() = Some(Box::new(hook));
    }

    /// Selection callback. Receives the hit index; the host decides whether a
    /// repeated hit deselects.
    pub fn on_annotation_select(&mut self, callback: impl FnMut(Option<usize>) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Touch-profile selection callback, anchored to the canvas element for
    /// positioning a popover. Falls back to [`Engine::on_annotation_select`]
    /// when unset.
    pub fn on_mobile_annotation_select(&mut self, callback: impl FnMut(usize, &HtmlElement) + 'static) {
        self.on_mobile_select = Some(Box::new(callback));
    }

    // --- Delegated data inputs ---

    pub fn set_image_source(&mut self, source: &str) {
        match self.core.set_image_source(source) {
            Some(generation) => self.start_decode(generation, source),
            None if source.is_empty() => self.image = None,
            None => return,
        }
        self.request_render();
    }

    pub fn reload_image(&mut self) {
        let Some(generation) = self.core.reload_image() else {
            return;
        };
        let source = self.core.image().map(|c| c.source.clone()).unwrap_or_default();
        self.start_decode(generation, &source);
        self.request_render();
    }

    pub fn set_image_size(&mut self, width: f64, height: f64) {
        let actions = self.core.set_image_size(Size::new(width, height));
        self.dispatch(actions);
    }

    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        let actions = self.core.set_annotations(annotations);
        self.dispatch(actions);
    }

    /// # Errors
    ///
    /// Returns [`ViewerError::Json`] if `json` cannot be parsed.
    pub fn set_annotations_json(&mut self, json: &str) -> Result<(), ViewerError> {
        let actions = self.core.set_annotations_json(json)?;
        self.dispatch(actions);
        Ok(())
    }

    pub fn set_selected(&mut self, selected: Option<usize>) {
        let actions = self.core.set_selected(selected);
        self.dispatch(actions);
    }

    pub fn set_device_mode(&mut self, mode: DeviceMode) {
        let actions = self.core.set_device_mode(mode);
        self.dispatch(actions);
    }

    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] if `config` fails validation.
    pub fn set_config(&mut self, config: ViewerConfig) -> Result<(), ViewerError> {
        let actions = self.core.set_config(config)?;
        self.dispatch(actions);
        Ok(())
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.dispatch(actions);
    }

    /// Read the canvas' CSS size and the window's pixel ratio.
    pub fn sync_viewport(&mut self) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.set_viewport(width, height, dpr);
    }

    // --- Input events (client coordinates) ---

    pub fn on_pointer_down(&mut self, client: Point, button: Button) -> Vec<Action> {
        let pt = self.client_to_canvas(client);
        let actions = self.core.on_pointer_down(pt, button);
        self.dispatch(actions)
    }

    pub fn on_pointer_move(&mut self, client: Point) -> Vec<Action> {
        let pt = self.client_to_canvas(client);
        let actions = self.core.on_pointer_move(pt);
        self.dispatch(actions)
    }

    pub fn on_pointer_up(&mut self, client: Point, button: Button) -> Vec<Action> {
        let pt = self.client_to_canvas(client);
        let actions = self.core.on_pointer_up(pt, button);
        self.dispatch(actions)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_leave();
        self.dispatch(actions)
    }

    pub fn on_click(&mut self, client: Point) -> Vec<Action> {
        let pt = self.client_to_canvas(client);
        let actions = self.core.on_click(pt);
        self.dispatch(actions)
    }

    /// The host should call `preventDefault` on the wheel event whenever
    /// [`Engine::profile`] allows wheel zoom, even if zoom is pinned at a limit.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta) -> Vec<Action> {
        let pt = self.client_to_canvas(client);
        let actions = self.core.on_wheel(pt, delta);
        self.dispatch(actions)
    }

    pub fn zoom_in(&mut self) {
        let actions = self.core.zoom_in();
        self.dispatch(actions);
    }

    pub fn zoom_out(&mut self) {
        let actions = self.core.zoom_out();
        self.dispatch(actions);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        let actions = self.core.set_zoom(zoom);
        self.dispatch(actions);
    }

    pub fn reset_view(&mut self) {
        let actions = self.core.reset_view();
        self.dispatch(actions);
    }

    // --- Render ---

    /// Apply finished decodes and draw the current state to the canvas.
    pub fn render(&mut self) {
        let outcomes: Vec<_> = self.decoded.borrow_mut().drain(..).collect();
        for (generation, outcome) in outcomes {
            self.core.resolve_image(generation, outcome);
        }

        self.size_backing_store();
        let Some(ctx) = self.ctx.as_ref() else {
            log::warn!("render skipped: no 2d context");
            return;
        };
        let image = self.image_for_frame();
        let mut surface = Canvas2dSurface::new(ctx, image);
        let result = surface
            .apply_pixel_ratio(self.core.dpr)
            .and_then(|()| render::draw(&mut surface, &self.core.frame()));
        match result {
            Ok(DrawResult::Skipped) => log::trace!("render skipped: container has zero size"),
            Ok(_) => {}
            Err(e) => log::warn!("render failed: {e}"),
        }
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.core.zoom_percent()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.core.cursor()
    }

    #[must_use]
    pub fn profile(&self) -> InteractionProfile {
        self.core.profile()
    }

    // --- Internal ---

    fn client_to_canvas(&self, client: Point) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        hit::pointer_to_display(client, Point::new(rect.left(), rect.top()))
    }

    /// Apply actions that the engine handles itself, then hand them back.
    fn dispatch(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            match *action {
                Action::AnnotationSelected { index, mobile } => self.notify_selection(index, mobile),
                Action::SetCursor(cursor) => {
                    if let Err(e) = self.canvas.style().set_property("cursor", cursor.as_css()) {
                        log::warn!("failed to set cursor: {}", ViewerError::from(e));
                    }
                }
                Action::RenderNeeded => self.request_render(),
            }
        }
        actions
    }

    fn notify_selection(&mut self, index: usize, mobile: bool) {
        if mobile && let Some(callback) = self.on_mobile_select.as_mut() {
            let anchor: &HtmlElement = &self.canvas;
            callback(index, anchor);
            return;
        }
        if let Some(callback) = self.on_select.as_mut() {
            callback(Some(index));
        }
    }

    fn request_render(&self) {
        if let Some(hook) = self.render_hook.borrow().as_ref() {
            hook();
        }
    }

    fn start_decode(&mut self, generation: Generation, source: &str) {
        self.image = None;
        match self.spawn_decode(generation, source) {
            Ok(image) => self.image = Some(image),
            Err(e) => {
                self.core.resolve_image(generation, DecodeOutcome::Failed(e.to_string()));
            }
        }
    }

    fn spawn_decode(&self, generation: Generation, source: &str) -> Result<ImageElement, ViewerError> {
        let element = HtmlImageElement::new()?;

        let onload = {
            let queue = Rc::clone(&self.decoded);
            let hook = Rc::clone(&self.render_hook);
            let loaded = element.clone();
            Closure::<dyn FnMut()>::new(move || {
                let size = Size::new(f64::from(loaded.natural_width()), f64::from(loaded.natural_height()));
                queue.borrow_mut().push((generation, DecodeOutcome::Loaded(size)));
                if let Some(hook) = hook.borrow().as_ref() {
                    hook();
                }
            })
        };
        let onerror = {
            let queue = Rc::clone(&self.decoded);
            let hook = Rc::clone(&self.render_hook);
            let message = format!("could not decode {}", preview(source));
            Closure::<dyn FnMut()>::new(move || {
                queue.borrow_mut().push((generation, DecodeOutcome::Failed(message.clone())));
                if let Some(hook) = hook.borrow().as_ref() {
                    hook();
                }
            })
        };

        element.set_onload(Some(onload.as_ref().unchecked_ref()));
        element.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        element.set_src(source);
        Ok(ImageElement { element, generation, _onload: onload, _onerror: onerror })
    }

    /// The decoded element, only when it belongs to the current generation and
    /// finished loading.
    fn image_for_frame(&self) -> Option<&HtmlImageElement> {
        let current = self.core.image()?;
        if current.state != DecodeState::Loaded {
            return None;
        }
        self.image
            .as_ref()
            .filter(|img| img.generation == current.generation)
            .map(|img| &img.element)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn size_backing_store(&self) {
        let width = (self.core.viewport_width * self.core.dpr).round().max(0.0) as u32;
        let height = (self.core.viewport_height * self.core.dpr).round().max(0.0) as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}
