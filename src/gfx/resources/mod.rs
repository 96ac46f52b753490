// src/gfx/resources/mod.rs
//! Render resources
//!
//! Textures, materials, and image-based lighting data consumed by the renderer.

pub mod environment;
pub mod material;
pub mod texture;

// Re-export main types
pub use environment::{EnvironmentMap, EnvironmentPrefilter, HdrImage, MipChainPrefilter};
pub use material::{Material, SharedMaterial};
pub use texture::{ColorSpace, Sampling, Texture, TextureImage, Wrap};
