//! Rendering module
//!
//! `view` builds a read-only `Frame` from the game state; `canvas` draws it
//! with the Canvas2D API (wasm32 only).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use view::{Frame, Rect, Spark, TrailDot, blur_for_velocity};
