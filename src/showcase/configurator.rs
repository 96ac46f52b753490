//! Configurator scene controller
//!
//! Shows the live keyboard under restricted orbit controls and swaps its
//! cosmetic variant on request. A swap lifts the model, restyles it at the
//! top of the lift, then lets it settle back with an elastic ease. Requests
//! that arrive mid-swap are dropped rather than queued.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Vector3;
use winit::event::WindowEvent;

use crate::{
    animation::{Animator, AnimatorRef, Channel, Ease, Timeline, Tween},
    assets::VariantRegistry,
    config::ConfiguratorConfig,
    error::{AssetError, ShowcaseError},
    gfx::{
        camera::{CameraRef, OrbitBounds, OrbitControls, PerspectiveCamera},
        color::Color,
        rendering::{resize_to_display_size, Renderer},
        scene::{light::Light, node::NodeRef, Scene},
    },
    page::{SwatchButton, Viewport},
};

use super::{
    environment::load_environment,
    swap::{apply_variant, ActiveVariant, SwapOutcome, SwapPhase, SwapRejection},
    ShowcaseContext,
};

pub struct Configurator {
    scene: Rc<RefCell<Scene>>,
    camera: CameraRef,
    controls: OrbitControls,
    model: Rc<RefCell<Option<NodeRef>>>,
    state: Rc<RefCell<ActiveVariant>>,
    animator: AnimatorRef,
    variants: Rc<VariantRegistry>,
    buttons: Vec<SwatchButton>,
    renderer: Box<dyn Renderer>,
    config: ConfiguratorConfig,
}

impl Configurator {
    pub fn build(
        ctx: &ShowcaseContext,
        config: &ConfiguratorConfig,
        renderer: Box<dyn Renderer>,
    ) -> Result<Self, ShowcaseError> {
        let descriptors = ctx.variants.descriptors();
        let initial = match ctx.variants.find(&config.initial_variant) {
            Some(variant) => variant,
            None => {
                let fallback = descriptors.first().ok_or(ShowcaseError::NoVariants)?;
                log::warn!(
                    "unknown initial variant '{}', using '{}'",
                    config.initial_variant,
                    fallback.id
                );
                fallback
            }
        };

        let mut scene = Scene::new();
        scene.background = Some(Color::from_hex(0xECE9E2));
        scene.add_light(Light::directional("key", Color::WHITE, 1.6, Vector3::new(3.0, 5.0, 4.0)).into_ref());
        scene.add_light(Light::hemisphere("fill", Color::WHITE, Color::rgb(0.4, 0.38, 0.35), 0.8).into_ref());
        let scene = Rc::new(RefCell::new(scene));

        let target = Vector3::new(0.0, 0.0, 0.0);
        let bounds = OrbitBounds {
            min_pitch: config.min_pitch,
            max_pitch: config.max_pitch,
            min_yaw: Some(config.min_yaw),
            max_yaw: Some(config.max_yaw),
        };
        let mid_pitch = (config.min_pitch + config.max_pitch) * 0.5;
        let mut controls = OrbitControls::new(config.orbit_distance, mid_pitch, 0.0, target, bounds);
        let mut camera = PerspectiveCamera::new(config.camera_fov, renderer.canvas().aspect(), 0.1, 100.0);
        controls.update(&mut camera, 0.0);

        let buttons = descriptors
            .iter()
            .map(|variant| SwatchButton::from_variant(variant, &ctx.asset_root))
            .collect();

        let configurator = Self {
            scene,
            camera: camera.into_ref(),
            controls,
            model: Rc::new(RefCell::new(None)),
            state: Rc::new(RefCell::new(ActiveVariant::new(initial.id))),
            animator: Animator::new().into_ref(),
            variants: ctx.variants.clone(),
            buttons,
            renderer,
            config: config.clone(),
        };

        configurator.spawn_model(ctx, initial.id)?;
        ctx.spawn(
            "configurator environment",
            load_environment(
                configurator.scene.clone(),
                ctx.loader.clone(),
                configurator.renderer.create_prefilter(),
                ctx.environment_url.clone(),
                ctx.environment_intensity,
            ),
        )?;

        Ok(configurator)
    }

    fn spawn_model(&self, ctx: &ShowcaseContext, initial: &'static str) -> Result<(), ShowcaseError> {
        let load = ctx.models.load_model();
        let variants = self.variants.clone();
        let scene = self.scene.clone();
        let slot = self.model.clone();

        ctx.spawn("configurator model", async move {
            let model = load.await?;
            if let Some(asset) = variants.assets().get(initial) {
                apply_variant(&model, asset);
            }
            scene.borrow_mut().add(model.clone());
            *slot.borrow_mut() = Some(model);
            log::info!("configurator model ready with variant '{}'", initial);
            Ok::<(), AssetError>(())
        })
    }

    /// Starts a variant swap, or reports why the request was dropped
    pub fn select_variant(&mut self, id: &str) -> SwapOutcome {
        let outcome = match self.try_select(id) {
            Ok(()) => SwapOutcome::Started,
            Err(reason) => SwapOutcome::Ignored(reason),
        };
        match outcome {
            SwapOutcome::Started => log::debug!("swap to '{}' started", id),
            SwapOutcome::Ignored(reason) => log::debug!("swap to '{}' ignored: {:?}", id, reason),
        }
        outcome
    }

    fn try_select(&mut self, id: &str) -> Result<(), SwapRejection> {
        let model = self.model.borrow().clone().ok_or(SwapRejection::ModelNotLoaded)?;
        let variant = self.variants.find(id).ok_or(SwapRejection::UnknownVariant)?;
        let asset = self
            .variants
            .assets()
            .get(variant.id)
            .cloned()
            .ok_or(SwapRejection::UnknownVariant)?;
        self.state.borrow_mut().begin(variant.id)?;

        let rest_y = model.borrow().transform.position.y;
        let state = self.state.clone();
        let restyled = model.clone();
        let timeline = Timeline::new()
            .then(
                Tween::to(model.clone(), self.config.lift_duration)
                    .prop(Channel::PositionY, rest_y + self.config.lift_height)
                    .ease(Ease::Power2Out),
            )
            .call(move || {
                let touched = apply_variant(&restyled, &asset);
                log::debug!("variant applied to {} part(s)", touched);
            })
            .then(
                Tween::to(model, self.config.settle_duration)
                    .prop(Channel::PositionY, rest_y)
                    .ease(Ease::ElasticOut),
            )
            .on_complete(move || state.borrow_mut().finish());

        self.animator.borrow_mut().play(timeline);
        Ok(())
    }

    pub fn click(&mut self, button: &SwatchButton) -> SwapOutcome {
        self.select_variant(button.variant_id)
    }

    pub fn current_variant(&self) -> &'static str {
        self.state.borrow().current()
    }

    pub fn phase(&self) -> SwapPhase {
        self.state.borrow().phase()
    }

    pub fn buttons(&self) -> &[SwatchButton] {
        &self.buttons
    }

    /// Routes drags to the orbit controls and resizes to the canvas
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::Resized(size) = event {
            let ratio = self.renderer.canvas().pixel_ratio.max(f32::EPSILON);
            self.renderer
                .canvas_mut()
                .set_client_size(size.width as f32 / ratio, size.height as f32 / ratio);
            return true;
        }
        self.controls.process_window_event(event)
    }

    pub fn on_scroll(&mut self, viewport: &Viewport) {
        self.animator.borrow_mut().on_scroll(viewport);
    }

    pub fn frame(&mut self, dt: f32) {
        self.controls.update(&mut self.camera.borrow_mut(), dt);
        self.animator.borrow_mut().tick(dt);
        resize_to_display_size(self.renderer.as_mut(), &mut self.camera.borrow_mut());
        self.renderer.render(&self.scene.borrow(), &self.camera.borrow());
    }

    pub fn scene(&self) -> &Rc<RefCell<Scene>> {
        &self.scene
    }

    pub fn camera(&self) -> &CameraRef {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn model(&self) -> Option<NodeRef> {
        self.model.borrow().clone()
    }

    pub fn animator(&self) -> &AnimatorRef {
        &self.animator
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }
}
