//! Crate error type
//!
//! Nothing in steady-state play is fatal: callers log these and carry on
//! with defaults. Only browser bootstrap propagates them to the entry point.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// No persistent store (private browsing, storage disabled, native build)
    #[error("persistent storage is unavailable")]
    StorageUnavailable,

    #[error("failed to write `{key}` to storage: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("settings could not be (de)serialized: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("required page element `{0}` is missing")]
    MissingElement(&'static str),

    /// A browser API call rejected
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Js(format!("{value:?}"))
    }
}
