//! Material definitions
//!
//! Materials are plain property bags shared by reference: every mesh that
//! points at the same [`SharedMaterial`] changes appearance together when the
//! material is mutated in place.

use std::cell::RefCell;
use std::rc::Rc;

use crate::gfx::color::Color;

use super::texture::Texture;

/// Material handle shared between meshes
pub type SharedMaterial = Rc<RefCell<Material>>;

/// Standard PBR material with optional color and bump maps
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub color: Color,
    pub map: Option<Texture>,
    pub bump_map: Option<Texture>,
    pub bump_scale: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Color,

    // Bumped on every setter so renderers can detect stale uploads
    version: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            color: Color::WHITE,
            map: None,
            bump_map: None,
            bump_scale: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Color::BLACK,
            version: 0,
        }
    }
}

impl Material {
    /// Creates a new material with a base color and default PBR factors
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
            ..Default::default()
        }
    }

    /// Builder pattern: Set metalness factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set color map
    pub fn with_map(mut self, map: Texture) -> Self {
        self.map = Some(map);
        self
    }

    /// Builder pattern: Set bump map and its strength
    pub fn with_bump(mut self, bump_map: Texture, scale: f32) -> Self {
        self.bump_map = Some(bump_map);
        self.bump_scale = scale;
        self
    }

    /// Builder pattern: Set emissive color
    pub fn with_emission(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn into_shared(self) -> SharedMaterial {
        Rc::new(RefCell::new(self))
    }

    pub fn set_map(&mut self, map: Option<Texture>) {
        self.map = map;
        self.version += 1;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.version += 1;
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}
