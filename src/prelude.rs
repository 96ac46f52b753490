//! # Keyshow Prelude
//!
//! Commonly used types in one import:
//!
//! ```no_run
//! use keyshow::prelude::*;
//!
//! fn main() -> Result<(), ShowcaseError> {
//!     let mut showcase = keyshow::default()?;
//!     showcase.frame(1.0 / 60.0);
//!     showcase.scroll_to(800.0);
//!     showcase.select_variant("kick");
//!     Ok(())
//! }
//! ```

// Runtime and configuration
pub use crate::app::{Pane, Showcase};
pub use crate::config::{ConfiguratorConfig, HeroConfig, ShowcaseConfig};
pub use crate::default;
pub use crate::error::{AssetError, ShowcaseError};

// Scene controllers
pub use crate::showcase::{Configurator, HeroScene, ShowcaseContext, SwapOutcome, SwapPhase, SwapRejection};

// Assets
pub use crate::assets::{AssetLoader, FsAssetLoader, LoaderRef, Role, VariantDescriptor, VARIANTS};

// Graphics and animation
pub use crate::animation::{Animator, Channel, Ease, Marker, ScrollBinding, Scrub, Timeline, Tween};
pub use crate::gfx::{Color, HeadlessRenderer, PerspectiveCamera, Renderer, Scene};
pub use crate::page::{ElementRect, SwatchButton, Viewport};

// Common external dependencies
pub use cgmath::Vector3;
