//! # Graphics Module
//!
//! Scene-graph side of the showcase: the primitives both scene controllers
//! build with and the renderer surface they draw through.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Perspective camera and restricted orbit input
//! - **Rendering** ([`rendering`]) - Canvas sizing and the [`Renderer`] trait
//! - **Scene Management** ([`scene`]) - Node hierarchy, geometry and lights
//! - **Resource Management** ([`resources`]) - Materials, textures and environment maps
//!
//! The crate ships [`HeadlessRenderer`], which draws nothing but records each
//! frame, so the controllers can run without a GPU.

pub mod camera;
pub mod color;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{OrbitBounds, OrbitControls, PerspectiveCamera};
pub use color::Color;
pub use rendering::{resize_to_display_size, Canvas, HeadlessRenderer, Renderer};
pub use resources::{EnvironmentMap, EnvironmentPrefilter, Material, MipChainPrefilter, SharedMaterial, Texture};
pub use scene::{Node, NodeRef, Scene};
