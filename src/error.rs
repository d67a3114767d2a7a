//! Structured error types for folioview.
//!
//! The pointer controller itself never fails; these cover configuration,
//! content decoding, host-supplied indices and the DOM surface.

/// All errors that can occur while configuring or mounting folioview components.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    /// JSON decoding error (config, content, traces).
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration value out of its allowed range.
    #[error("Invalid config: {0}")]
    Config(String),

    /// Hover index supplied by the host does not name a list item.
    #[error("Hover index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// DOM lookup or listener registration failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// The component was used after `destroy`.
    #[error("Component already destroyed")]
    Detached,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FolioError>;

impl From<String> for FolioError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FolioError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FolioError> for wasm_bindgen::JsValue {
    fn from(e: FolioError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
