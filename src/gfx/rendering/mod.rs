// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Canvas sizing and the renderer surface the scene controllers draw through.

pub mod canvas;
pub mod renderer;

// Re-export main types
pub use canvas::Canvas;
pub use renderer::{resize_to_display_size, FrameRecord, HeadlessRenderer, RenderInfo, Renderer};
