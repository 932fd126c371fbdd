//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, pointer, touch)
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Wall-clock time

pub mod input;
pub mod storage;

pub use input::{InputEvent, InputState, Key, PointerTarget};
pub use storage::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
