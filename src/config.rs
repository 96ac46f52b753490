//! Showcase configuration
//!
//! Defaults describe the production page. [`ShowcaseConfig::from_env`]
//! layers a few environment overrides on top, which the demo uses to point
//! at a local asset directory and pin the decoration layout.

use cgmath::Vector3;

use crate::{animation::Scrub, gfx::color::Color, page::ElementRect};

/// Settings shared by both scenes
#[derive(Debug, Clone, PartialEq)]
pub struct ShowcaseConfig {
    /// Base for every relative asset URL
    pub asset_root: String,
    pub model_url: String,
    pub environment_url: String,
    pub environment_intensity: f32,
    pub hero: HeroConfig,
    pub configurator: ConfiguratorConfig,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            asset_root: "assets".to_string(),
            model_url: "models/keyboard.obj.gz".to_string(),
            environment_url: "hdr/studio_small.hdr".to_string(),
            environment_intensity: 1.2,
            hero: HeroConfig::default(),
            configurator: ConfiguratorConfig::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Defaults plus `KEYSHOW_ASSET_ROOT`, `KEYSHOW_DECORATIONS` and
    /// `KEYSHOW_SEED`; unparsable values are logged and ignored
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(root) = std::env::var("KEYSHOW_ASSET_ROOT") {
            config.asset_root = root;
        }
        if let Ok(count) = std::env::var("KEYSHOW_DECORATIONS") {
            match count.parse() {
                Ok(count) => config.hero.decoration_count = count,
                Err(err) => log::warn!("ignoring KEYSHOW_DECORATIONS={:?}: {}", count, err),
            }
        }
        if let Ok(seed) = std::env::var("KEYSHOW_SEED") {
            match seed.parse() {
                Ok(seed) => config.hero.seed = Some(seed),
                Err(err) => log::warn!("ignoring KEYSHOW_SEED={:?}: {}", seed, err),
            }
        }
        config
    }

    /// Joins a relative asset path onto the asset root
    pub fn asset_url(&self, path: &str) -> String {
        crate::assets::join_asset_url(&self.asset_root, path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroConfig {
    /// Layout box of the hero section; drives both scroll bindings
    pub section: ElementRect,
    pub background_from: Color,
    pub background_to: Color,
    pub camera_position: Vector3<f32>,
    pub camera_fov: f32,
    pub parallax_strength: f32,
    pub parallax_duration: f32,
    pub decoration_count: usize,
    pub decoration_url: String,
    /// Fixed seed for the decoration layout; random when unset
    pub seed: Option<u64>,
    /// Model z travel and y rotation over the section
    pub model_travel_z: f32,
    pub model_turn_y: f32,
    pub key_light_from: Vector3<f32>,
    pub key_light_to: Vector3<f32>,
    pub decorations_rise: f32,
    /// Scrub mode of the light and decoration binding; `Smoothed` trades
    /// scroll-exact positions for a lagging glide
    pub light_scrub: Scrub,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            section: ElementRect::new(0.0, 2400.0),
            background_from: Color::from_hex(0xF4F1EA),
            background_to: Color::from_hex(0x1C1B22),
            camera_position: Vector3::new(0.0, 0.0, 6.0),
            camera_fov: 35.0,
            parallax_strength: 0.4,
            parallax_duration: 1.0,
            decoration_count: 8,
            decoration_url: "models/keycap.obj".to_string(),
            seed: None,
            model_travel_z: -3.0,
            model_turn_y: std::f32::consts::PI * 0.5,
            key_light_from: Vector3::new(4.0, 6.0, 5.0),
            key_light_to: Vector3::new(-4.0, 3.0, 5.0),
            decorations_rise: 2.5,
            light_scrub: Scrub::Direct,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguratorConfig {
    pub initial_variant: String,
    pub camera_fov: f32,
    pub orbit_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: f32,
    pub max_yaw: f32,
    pub lift_height: f32,
    pub lift_duration: f32,
    pub settle_duration: f32,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            initial_variant: crate::assets::variants::DEFAULT_VARIANT.to_string(),
            camera_fov: 30.0,
            orbit_distance: 5.0,
            min_pitch: 0.15,
            max_pitch: 1.1,
            min_yaw: -0.9,
            max_yaw: 0.9,
            lift_height: 0.35,
            lift_duration: 0.35,
            settle_duration: 0.9,
        }
    }
}
