use std::rc::Rc;

use futures::executor::LocalPool;
use winit::event::WindowEvent;

use crate::{
    assets::{FsAssetLoader, LoaderRef},
    config::ShowcaseConfig,
    error::ShowcaseError,
    gfx::rendering::{HeadlessRenderer, Renderer},
    page::Viewport,
    showcase::{Configurator, HeroScene, ShowcaseContext, SwapOutcome},
};

/// Which canvas an input event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Hero,
    Configurator,
}

/// The whole page: both scene controllers on one local executor
///
/// Nothing runs in the background. Spawned loads make progress when the
/// host calls [`Showcase::pump`] or [`Showcase::frame`].
pub struct Showcase {
    pool: LocalPool,
    context: ShowcaseContext,
    hero: HeroScene,
    configurator: Configurator,
    viewport: Viewport,
}

impl Showcase {
    /// Builds both controllers on headless renderers sized to `viewport`
    pub fn new(config: &ShowcaseConfig, loader: LoaderRef, viewport: Viewport) -> Result<Self, ShowcaseError> {
        let hero = Box::new(HeadlessRenderer::new(viewport.width, viewport.height, 1.0));
        let configurator = Box::new(HeadlessRenderer::new(viewport.width, viewport.height * 0.8, 1.0));
        Self::with_renderers(config, loader, viewport, hero, configurator)
    }

    pub fn with_renderers(
        config: &ShowcaseConfig,
        loader: LoaderRef,
        viewport: Viewport,
        hero_renderer: Box<dyn Renderer>,
        configurator_renderer: Box<dyn Renderer>,
    ) -> Result<Self, ShowcaseError> {
        let pool = LocalPool::new();
        let context = ShowcaseContext::new(config, loader, pool.spawner());
        let mut hero = HeroScene::build(&context, &config.hero, hero_renderer)?;
        let mut configurator = Configurator::build(&context, &config.configurator, configurator_renderer)?;

        hero.on_scroll(&viewport);
        configurator.on_scroll(&viewport);
        log::info!(
            "showcase ready: {} variants, assets under '{}'",
            context.variants.descriptors().len(),
            context.asset_root
        );

        Ok(Self {
            pool,
            context,
            hero,
            configurator,
            viewport,
        })
    }

    /// Environment-configured showcase reading assets from the working directory
    pub fn from_env(viewport: Viewport) -> Result<Self, ShowcaseError> {
        let config = ShowcaseConfig::from_env();
        Self::new(&config, Rc::new(FsAssetLoader::new(".")), viewport)
    }

    /// Runs every spawned task until none can make progress
    pub fn pump(&mut self) {
        self.pool.run_until_stalled();
    }

    /// One animation frame for both canvases
    pub fn frame(&mut self, dt: f32) {
        self.pump();
        self.hero.frame(dt);
        self.configurator.frame(dt);
    }

    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.viewport = self.viewport.scrolled_to(scroll_y);
        self.hero.on_scroll(&self.viewport);
        self.configurator.on_scroll(&self.viewport);
    }

    pub fn select_variant(&mut self, id: &str) -> SwapOutcome {
        self.configurator.select_variant(id)
    }

    /// Routes a window event to the controller under the pointer
    pub fn window_event(&mut self, pane: Pane, event: &WindowEvent) -> bool {
        match pane {
            Pane::Hero => self.hero.process_window_event(event),
            Pane::Configurator => self.configurator.process_window_event(event),
        }
    }

    pub fn context(&self) -> &ShowcaseContext {
        &self.context
    }

    pub fn hero(&self) -> &HeroScene {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut HeroScene {
        &mut self.hero
    }

    pub fn configurator(&self) -> &Configurator {
        &self.configurator
    }

    pub fn configurator_mut(&mut self) -> &mut Configurator {
        &mut self.configurator
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
