//! Crate error type.

/// Errors surfaced by the viewport engine.
///
/// None of these are fatal to the host: the engine logs and skips the affected
/// draw pass rather than propagating a failure into the UI event loop.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A `Canvas2D` or DOM call rejected its arguments.
    #[error("canvas call failed: {0}")]
    Js(String),
    /// The canvas element did not yield a 2D rendering context.
    #[error("2d rendering context unavailable")]
    MissingContext,
    /// Viewer configuration violates its constraints.
    #[error("invalid viewer config: {0}")]
    InvalidConfig(String),
    /// Configuration or annotation JSON could not be parsed.
    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),
    /// The console logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<wasm_bindgen::JsValue> for ViewerError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
