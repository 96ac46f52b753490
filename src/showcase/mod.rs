//! # Showcase Module
//!
//! The two scene controllers and what they share.
//!
//! - [`HeroScene`] - scroll- and pointer-driven decorative scene
//! - [`Configurator`] - live model with the variant swap state machine
//! - [`ShowcaseContext`] - loader, executor handle and the lazy registries
//!
//! Controllers start their asset loads as independent tasks on a local
//! executor. Each task runs behind its own error boundary, so a failed load
//! only leaves its own asset missing.

pub mod configurator;
pub mod environment;
pub mod hero;
pub mod swap;

use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;

use futures::executor::LocalSpawner;
use futures::task::LocalSpawnExt;

use crate::{
    assets::{join_asset_url, LoaderRef, MaterialRegistry, ModelLoader, VariantDescriptor, VariantRegistry, VARIANTS},
    config::ShowcaseConfig,
    error::ShowcaseError,
    gfx::color::Color,
};

pub use configurator::Configurator;
pub use environment::load_environment;
pub use hero::HeroScene;
pub use swap::{ActiveVariant, SwapOutcome, SwapPhase, SwapRejection};

/// Resources shared by both controllers for the lifetime of the page
pub struct ShowcaseContext {
    pub loader: LoaderRef,
    pub spawner: LocalSpawner,
    pub materials: Rc<MaterialRegistry>,
    pub variants: Rc<VariantRegistry>,
    pub models: Rc<ModelLoader>,
    /// Page background color, scrubbed by the hero scene
    pub background: Rc<RefCell<Color>>,
    pub asset_root: String,
    pub environment_url: String,
    pub environment_intensity: f32,
}

impl ShowcaseContext {
    pub fn new(config: &ShowcaseConfig, loader: LoaderRef, spawner: LocalSpawner) -> Self {
        Self::with_variants(config, loader, spawner, &VARIANTS)
    }

    pub fn with_variants(
        config: &ShowcaseConfig,
        loader: LoaderRef,
        spawner: LocalSpawner,
        variants: &'static [VariantDescriptor],
    ) -> Self {
        let materials = Rc::new(MaterialRegistry::new(
            loader.clone(),
            spawner.clone(),
            &config.asset_root,
        ));
        let variants = Rc::new(VariantRegistry::with_variants(
            variants,
            loader.clone(),
            spawner.clone(),
            &config.asset_root,
        ));
        let models = Rc::new(ModelLoader::new(
            loader.clone(),
            materials.clone(),
            config.asset_url(&config.model_url),
        ));

        Self {
            loader,
            spawner,
            materials,
            variants,
            models,
            background: Rc::new(RefCell::new(config.hero.background_from)),
            asset_root: config.asset_root.clone(),
            environment_url: config.asset_url(&config.environment_url),
            environment_intensity: config.environment_intensity,
        }
    }

    /// Joins a relative asset path onto the asset root
    pub fn asset_url(&self, path: &str) -> String {
        join_asset_url(&self.asset_root, path)
    }

    pub fn spawn<F, E>(&self, label: &'static str, task: F) -> Result<(), ShowcaseError>
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Display + 'static,
    {
        spawn_guarded(&self.spawner, label, task)
    }
}

/// Spawns `task` with its own error boundary
///
/// A failed task is logged and dropped; nothing reaches sibling tasks or
/// the caller. Only a refused spawn (executor gone) is reported.
pub fn spawn_guarded<F, E>(spawner: &LocalSpawner, label: &'static str, task: F) -> Result<(), ShowcaseError>
where
    F: Future<Output = Result<(), E>> + 'static,
    E: Display + 'static,
{
    spawner
        .spawn_local(async move {
            if let Err(err) = task.await {
                log::warn!("{} failed: {}", label, err);
            }
        })
        .map_err(|source| ShowcaseError::Spawn { label, source })
}
