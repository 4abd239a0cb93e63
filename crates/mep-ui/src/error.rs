//! Error types for the browser shell
//!
//! Browser failures are reported here; domain failures arrive wrapped from
//! `mep_core::Error`. Nothing is surfaced to the visitor: callers log and move
//! on to the next initializer.

use wasm_bindgen::JsValue;

/// Errors raised while touching the DOM or the animation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UiError {
    #[error("failed to get window: window is not available")]
    WindowNotAvailable,

    #[error("failed to get document: document is not available")]
    DocumentNotAvailable,

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("element '{0}' is not an HTML element")]
    NotHtml(String),

    #[error("JavaScript exception: {0}")]
    Js(String),

    #[error(transparent)]
    Core(#[from] mep_core::Error),
}

impl UiError {
    /// Wrap a thrown JS value.
    #[must_use]
    pub fn js(value: &JsValue) -> Self {
        Self::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        Self::js(&value)
    }
}

pub type UiResult<T> = Result<T, UiError>;

/// Logging combinators, the browser-side twin of `mep_core::ResultExt`.
pub trait UiResultExt<T> {
    /// Convert to an Option, logging the error under `context`.
    fn into_option_logged(self, context: &str) -> Option<T>;

    /// Log a failure as a warning and drop it.
    fn warn_on_error(self, context: &str);
}

impl<T> UiResultExt<T> for UiResult<T> {
    fn into_option_logged(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("{context}: {e}");
                None
            }
        }
    }

    fn warn_on_error(self, context: &str) {
        if let Err(e) = self {
            tracing::warn!("{context}: {e}");
        }
    }
}
