//! Annotated-image viewport engine for the suture review canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It renders a
//! decoded image with its classified bounding-box annotations, keeps the
//! zoom/pan viewport, and resolves pointer input back to the annotation that
//! was touched. The host (a UI component) wires DOM events into the engine,
//! owns the selected index, and re-renders after the selection callback fires.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`geometry`] | Fit-to-container geometry and image/display conversions |
//! | [`viewport`] | Zoom/pan value object, drag sessions, click suppression |
//! | [`hit`] | Pointer-to-annotation resolution |
//! | [`render`] | Draw pass against the [`render::Surface`] trait |
//! | [`canvas2d`] | `CanvasRenderingContext2d` implementation of [`render::Surface`] |
//! | [`annotation`] | Annotation records and classification table |
//! | [`image`] | Decode state and stale-decode invalidation |
//! | [`input`] | Pointer event types and the per-device interaction profile |
//! | [`config`] | Viewer configuration (zoom limits, wheel factors) |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants |

pub mod annotation;
pub mod canvas2d;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod image;
pub mod input;
pub mod render;
pub mod viewport;

pub use error::ViewerError;

/// Route `log` records to the browser console and install the panic hook.
///
/// Call once from the host before creating an [`engine::Engine`].
///
/// # Errors
///
/// Returns [`ViewerError::Logging`] if a logger is already installed.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) -> Result<(), ViewerError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level).map_err(|e| ViewerError::Logging(e.to_string()))
}
