//! Hero scene controller
//!
//! The decorative scene at the top of the page. Construction is synchronous
//! and the scene renders from the first frame; the keyboard, the floating
//! keycaps and the environment each arrive on their own task whenever their
//! loads finish.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use winit::event::WindowEvent;

use crate::{
    animation::{Animator, AnimatorRef, Channel, Ease, Marker, Repeat, ScrollBinding, Tween},
    config::HeroConfig,
    error::{AssetError, ShowcaseError},
    gfx::{
        camera::{CameraRef, PerspectiveCamera},
        color::Color,
        rendering::{resize_to_display_size, Renderer},
        resources::{material::Material, texture::Sampling},
        scene::{
            light::{Light, LightRef},
            node::{mesh_nodes, Node, NodeRef},
            Scene,
        },
    },
    page::Viewport,
};

use super::{environment::load_environment, ShowcaseContext};

/// Randomized placement and idle motion of one floating keycap
#[derive(Debug, Clone, Copy, PartialEq)]
struct DecorationLayout {
    variant: Option<&'static str>,
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: f32,
    drift: f32,
    spin: f32,
    duration: f32,
    delay: f32,
}

impl DecorationLayout {
    fn random(rng: &mut impl Rng, variant: Option<&'static str>) -> Self {
        Self {
            variant,
            position: Vector3::new(
                rng.random_range(-4.0..4.0),
                rng.random_range(-2.0..2.0),
                rng.random_range(-3.0..0.0),
            ),
            rotation: Vector3::new(
                rng.random_range(-0.6..0.6),
                rng.random_range(-std::f32::consts::PI..std::f32::consts::PI),
                rng.random_range(-0.6..0.6),
            ),
            scale: rng.random_range(0.25..0.45),
            drift: rng.random_range(0.15..0.45),
            spin: rng.random_range(0.2..0.6),
            duration: rng.random_range(2.0..4.5),
            delay: rng.random_range(0.0..1.5),
        }
    }

    fn place(&self, node: &NodeRef) {
        let mut node = node.borrow_mut();
        node.transform.position = self.position;
        node.transform.rotation = self.rotation;
        node.transform.scale = Vector3::new(self.scale, self.scale, self.scale);
    }

    fn idle_tween(&self, node: &NodeRef) -> Tween {
        Tween::to(node.clone(), self.duration)
            .prop(Channel::PositionY, self.position.y + self.drift)
            .prop(Channel::RotationX, self.rotation.x + self.spin)
            .prop(Channel::RotationZ, self.rotation.z - self.spin * 0.5)
            .ease(Ease::SineInOut)
            .delay(self.delay)
            .repeat(Repeat::Infinite)
            .yoyo(true)
    }
}

pub struct HeroScene {
    scene: Rc<RefCell<Scene>>,
    camera: CameraRef,
    base_camera_position: Vector3<f32>,
    key_light: LightRef,
    decorations: NodeRef,
    model: Rc<RefCell<Option<NodeRef>>>,
    animator: AnimatorRef,
    renderer: Box<dyn Renderer>,
    parallax_strength: f32,
    parallax_duration: f32,
}

impl HeroScene {
    pub fn build(
        ctx: &ShowcaseContext,
        config: &HeroConfig,
        renderer: Box<dyn Renderer>,
    ) -> Result<Self, ShowcaseError> {
        let camera = PerspectiveCamera::new(config.camera_fov, renderer.canvas().aspect(), 0.1, 100.0)
            .with_position(config.camera_position)
            .into_ref();

        let key_light = Light::directional("key", Color::WHITE, 2.0, config.key_light_from).into_ref();
        let rim_light = Light::directional(
            "rim",
            Color::rgb(0.6, 0.7, 1.0),
            1.2,
            Vector3::new(-5.0, 2.0, -4.0),
        )
        .into_ref();
        let fill = Light::hemisphere("fill", Color::WHITE, Color::rgb(0.35, 0.33, 0.3), 0.6).into_ref();

        let decorations = Node::group("decorations").into_ref();
        let mut scene = Scene::new();
        scene.add_light(key_light.clone());
        scene.add_light(rim_light);
        scene.add_light(fill);
        scene.add(decorations.clone());
        let scene = Rc::new(RefCell::new(scene));

        let animator = Animator::new().into_ref();
        {
            let mut animator = animator.borrow_mut();
            animator.bind_scroll(
                ScrollBinding::new(config.section, Marker::TOP_TOP, Marker::BOTTOM_BOTTOM).color_track(
                    ctx.background.clone(),
                    config.background_from,
                    config.background_to,
                ),
            );
            animator.bind_scroll(
                ScrollBinding::new(config.section, Marker::TOP_TOP, Marker::BOTTOM_BOTTOM)
                    .scrub(config.light_scrub)
                    .track(key_light.clone(), Channel::PositionX, config.key_light_from.x, config.key_light_to.x)
                    .track(key_light.clone(), Channel::PositionY, config.key_light_from.y, config.key_light_to.y)
                    .track(key_light.clone(), Channel::PositionZ, config.key_light_from.z, config.key_light_to.z)
                    .track(decorations.clone(), Channel::PositionY, 0.0, config.decorations_rise),
            );
        }

        let hero = Self {
            scene,
            camera,
            base_camera_position: config.camera_position,
            key_light,
            decorations,
            model: Rc::new(RefCell::new(None)),
            animator,
            renderer,
            parallax_strength: config.parallax_strength,
            parallax_duration: config.parallax_duration,
        };

        hero.spawn_model(ctx, config)?;
        hero.spawn_decorations(ctx, config)?;
        ctx.spawn(
            "hero environment",
            load_environment(
                hero.scene.clone(),
                ctx.loader.clone(),
                hero.renderer.create_prefilter(),
                ctx.environment_url.clone(),
                ctx.environment_intensity,
            ),
        )?;

        Ok(hero)
    }

    fn spawn_model(&self, ctx: &ShowcaseContext, config: &HeroConfig) -> Result<(), ShowcaseError> {
        let load = ctx.models.load_model();
        let scene = self.scene.clone();
        let slot = self.model.clone();
        let animator = self.animator.clone();
        let section = config.section;
        let (travel, turn) = (config.model_travel_z, config.model_turn_y);

        ctx.spawn("hero model", async move {
            let model = load.await?;
            scene.borrow_mut().add(model.clone());
            *slot.borrow_mut() = Some(model.clone());
            animator.borrow_mut().bind_scroll(
                ScrollBinding::new(section, Marker::TOP_TOP, Marker::BOTTOM_BOTTOM)
                    .track(model.clone(), Channel::PositionZ, 0.0, travel)
                    .track(model, Channel::RotationY, 0.0, turn),
            );
            Ok::<(), AssetError>(())
        })
    }

    fn spawn_decorations(&self, ctx: &ShowcaseContext, config: &HeroConfig) -> Result<(), ShowcaseError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let variants = ctx.variants.descriptors();
        let url = ctx.asset_url(&config.decoration_url);

        for i in 0..config.decoration_count {
            let variant = (!variants.is_empty()).then(|| variants[i % variants.len()].id);
            let layout = DecorationLayout::random(&mut rng, variant);
            let loader = ctx.loader.clone();
            let registry = ctx.variants.clone();
            let group = self.decorations.clone();
            let animator = self.animator.clone();
            let url = url.clone();

            ctx.spawn("hero decoration", async move {
                let keycap = loader.load_mesh(&url).await?;
                if let Some(asset) = layout.variant.and_then(|id| registry.assets().get(id).cloned()) {
                    let material = Material::new("keycap", Color::WHITE)
                        .with_roughness(0.45)
                        .with_map(asset.map.with_sampling(Sampling::keycap()))
                        .into_shared();
                    for mesh in mesh_nodes(&keycap) {
                        mesh.borrow_mut().set_material(material.clone());
                    }
                }
                layout.place(&keycap);
                group.borrow_mut().add(keycap.clone());
                animator.borrow_mut().animate_to(layout.idle_tween(&keycap));
                Ok::<(), AssetError>(())
            })?;
        }
        Ok(())
    }

    /// Pointer position in canvas CSS pixels
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let canvas = self.renderer.canvas();
        if canvas.client_width <= 0.0 || canvas.client_height <= 0.0 {
            return;
        }
        let nx = (x / canvas.client_width).clamp(0.0, 1.0) - 0.5;
        let ny = (y / canvas.client_height).clamp(0.0, 1.0) - 0.5;

        let base = self.base_camera_position;
        self.animator.borrow_mut().animate_to(
            Tween::to(self.camera.clone(), self.parallax_duration)
                .prop(Channel::PositionX, base.x + nx * self.parallax_strength)
                .prop(Channel::PositionY, base.y - ny * self.parallax_strength)
                .ease(Ease::Power2Out)
                .overwrite(),
        );
    }

    /// Handles pointer motion and window resizes; returns true when consumed
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        let ratio = self.renderer.canvas().pixel_ratio.max(f32::EPSILON);
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.on_pointer_move(position.x as f32 / ratio, position.y as f32 / ratio);
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer
                    .canvas_mut()
                    .set_client_size(size.width as f32 / ratio, size.height as f32 / ratio);
                true
            }
            _ => false,
        }
    }

    pub fn on_scroll(&mut self, viewport: &Viewport) {
        self.animator.borrow_mut().on_scroll(viewport);
    }

    /// Advances animations, fixes the drawing buffer size if needed, renders
    pub fn frame(&mut self, dt: f32) {
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

    pub fn key_light(&self) -> &LightRef {
        &self.key_light
    }

    pub fn decorations(&self) -> &NodeRef {
        &self.decorations
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::testing::{MockLoader, KEYBOARD_URL},
        config::ShowcaseConfig,
        gfx::rendering::HeadlessRenderer,
        page::ElementRect,
    };
    use futures::executor::LocalPool;

    fn config() -> ShowcaseConfig {
        let mut config = ShowcaseConfig::default();
        config.hero.seed = Some(7);
        config.hero.decoration_count = 3;
        config.hero.section = ElementRect::new(0.0, 1800.0);
        config
    }

    fn assert_close(a: Color, b: Color) {
        assert!((a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6);
    }

    fn build(loader: Rc<MockLoader>, pool: &LocalPool) -> (ShowcaseContext, HeroScene) {
        let config = config();
        let ctx = ShowcaseContext::new(&config, loader, pool.spawner());
        let hero = HeroScene::build(&ctx, &config.hero, Box::new(HeadlessRenderer::new(800.0, 600.0, 1.0))).unwrap();
        (ctx, hero)
    }

    #[test]
    fn test_renders_before_any_asset_arrives() {
        let pool = LocalPool::new();
        let loader = Rc::new(MockLoader::gated());
        let (_ctx, mut hero) = build(loader, &pool);

        hero.frame(1.0 / 60.0);
        let frame = hero.renderer().info().last_frame.clone().unwrap();
        assert_eq!(frame.statistics.mesh_count, 0);
        assert_eq!(frame.statistics.light_count, 3);
        assert!(!frame.has_environment);
        assert!(hero.model().is_none());
    }

    #[test]
    fn test_assets_arrive_independently() {
        let mut pool = LocalPool::new();
        let loader = Rc::new(MockLoader::new());
        loader.fail(KEYBOARD_URL);
        let (_ctx, mut hero) = build(loader.clone(), &pool);

        pool.run_until_stalled();
        hero.frame(1.0 / 60.0);

        assert!(hero.model().is_none());
        assert_eq!(hero.decorations().borrow().children().len(), 3);
        assert!(hero.scene().borrow().environment.is_some());
        assert_eq!(loader.mesh_calls(), 4);
        assert_eq!(loader.hdr_calls(), 1);
        assert_eq!(hero.animator().borrow().tween_count(), 3);
    }

    #[test]
    fn test_decorations_use_keycap_sampling() {
        let mut pool = LocalPool::new();
        let (_ctx, hero) = build(Rc::new(MockLoader::new()), &pool);
        pool.run_until_stalled();

        let group = hero.decorations().borrow();
        for keycap in group.children() {
            for mesh in mesh_nodes(keycap) {
                let mesh = mesh.borrow();
                let material = mesh.material().unwrap().borrow();
                let map = material.map.as_ref().unwrap();
                assert_eq!(map.sampling, Sampling::keycap());
                assert!(map.is_ready());
            }
        }
    }

    #[test]
    fn test_scroll_drives_model_background_and_light() {
        let mut pool = LocalPool::new();
        let (ctx, mut hero) = build(Rc::new(MockLoader::new()), &pool);
        let config = config();
        pool.run_until_stalled();
        let model = hero.model().unwrap();

        let viewport = Viewport::new(800.0, 600.0);
        hero.on_scroll(&viewport.scrolled_to(1200.0));
        assert_eq!(model.borrow().transform.position.z, config.hero.model_travel_z);
        assert_close(*ctx.background.borrow(), config.hero.background_to);
        assert_eq!(hero.key_light().borrow().position, config.hero.key_light_to);

        hero.on_scroll(&viewport.scrolled_to(0.0));
        assert_eq!(model.borrow().transform.position.z, 0.0);
        assert_close(*ctx.background.borrow(), config.hero.background_from);
        assert_eq!(hero.decorations().borrow().transform.position.y, 0.0);
    }

    #[test]
    fn test_pointer_parallax_eases_camera() {
        let pool = LocalPool::new();
        let (_ctx, mut hero) = build(Rc::new(MockLoader::gated()), &pool);
        let base = hero.camera().borrow().position;

        hero.on_pointer_move(800.0, 0.0);
        hero.frame(0.1);
        let partway = hero.camera().borrow().position.x;
        assert!(partway > base.x && partway < base.x + 0.2);

        hero.on_pointer_move(0.0, 600.0);
        hero.frame(2.0);
        let settled = hero.camera().borrow().position;
        assert!((settled.x - (base.x - 0.2)).abs() < 1e-5);
        assert!((settled.y - (base.y - 0.2)).abs() < 1e-5);
        assert_eq!(hero.animator().borrow().tween_count(), 0);
    }

    #[test]
    fn test_resize_follows_canvas_layout() {
        let pool = LocalPool::new();
        let (_ctx, mut hero) = build(Rc::new(MockLoader::gated()), &pool);

        hero.frame(0.016);
        hero.frame(0.016);
        assert_eq!(hero.renderer().info().resizes, 0);

        hero.process_window_event(&WindowEvent::Resized(winit::dpi::PhysicalSize::new(1200, 400)));
        hero.frame(0.016);
        hero.frame(0.016);
        assert_eq!(hero.renderer().info().resizes, 1);
        assert_eq!(hero.camera().borrow().aspect, 3.0);
    }

    #[test]
    fn test_default_light_binding_follows_scroll_exactly() {
        let pool = LocalPool::new();
        let config = ShowcaseConfig::default();
        let ctx = ShowcaseContext::new(&config, Rc::new(MockLoader::gated()), pool.spawner());
        let mut hero =
            HeroScene::build(&ctx, &config.hero, Box::new(HeadlessRenderer::new(800.0, 600.0, 1.0))).unwrap();
        let hero_config = &config.hero;
        let viewport = Viewport::new(800.0, 600.0);
        let end = hero_config.section.height - viewport.height;

        hero.on_scroll(&viewport.scrolled_to(0.0));
        hero.on_scroll(&viewport.scrolled_to(end));
        assert_eq!(hero.key_light().borrow().position, hero_config.key_light_to);
        assert_eq!(hero.decorations().borrow().transform.position.y, hero_config.decorations_rise);

        // Halfway is the same place no matter how long frames ran before
        hero.frame(1.0 / 60.0);
        hero.on_scroll(&viewport.scrolled_to(end * 0.5));
        hero.frame(1.0 / 60.0);
        let light = hero.key_light().borrow().position;
        let midpoint = (hero_config.key_light_from + hero_config.key_light_to) * 0.5;
        assert!((light.x - midpoint.x).abs() < 1e-4);
        assert!((light.y - midpoint.y).abs() < 1e-4);
    }
}
