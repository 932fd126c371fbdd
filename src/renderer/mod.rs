//! 2D canvas rendering module
//!
//! The scene is built as a plain draw list; only the canvas backend touches
//! browser APIs.

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use assets::{AssetCache, AssetId};
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, SceneView, build_scene};
