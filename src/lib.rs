// src/lib.rs
//! Keyshow
//!
//! Scene orchestration for an interactive 3D keyboard showcase: a scroll- and
//! pointer-driven hero scene, a configurator that swaps cosmetic variants on
//! a live model, and the shared asset registries both of them draw from.

pub mod animation;
pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod gfx;
pub mod page;
pub mod prelude;
pub mod showcase;

// Re-export main types for convenience
pub use app::Showcase;

/// Creates a showcase configured from the environment with a 1280x720 viewport
pub fn default() -> Result<Showcase, error::ShowcaseError> {
    Showcase::from_env(page::Viewport::new(1280.0, 720.0))
}
