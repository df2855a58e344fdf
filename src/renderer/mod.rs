//! Canvas 2D rendering (WASM only)
//!
//! Draws the current world state after the tick's collision/score resolution.

pub mod canvas;

pub use canvas::CanvasRenderer;
