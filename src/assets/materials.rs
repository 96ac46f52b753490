//! Shared role materials for the keyboard model
//!
//! Every loaded keyboard binds its named parts to the same seven material
//! instances. Mutating one of them (a variant swap) restyles every instance
//! of the model at once.

use std::cell::OnceCell;
use std::rc::Rc;

use futures::task::LocalSpawnExt;

use crate::gfx::{
    color::Color,
    resources::{
        material::{Material, SharedMaterial},
        texture::{ColorSpace, Sampling, Texture, Wrap},
    },
};

/// Semantic part of the keyboard that owns a shared material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Body,
    Knob,
    Screen,
    Plate,
    CaseTop,
    CaseBottom,
    Feet,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Body,
        Role::Knob,
        Role::Screen,
        Role::Plate,
        Role::CaseTop,
        Role::CaseBottom,
        Role::Feet,
    ];

    /// Mesh node name carrying this role in the keyboard model
    pub const fn node_name(self) -> &'static str {
        match self {
            Role::Body => "body",
            Role::Knob => "knob",
            Role::Screen => "screen",
            Role::Plate => "plate",
            Role::CaseTop => "case_top",
            Role::CaseBottom => "case_bottom",
            Role::Feet => "feet",
        }
    }

    /// Exact-match lookup; anything else keeps the mesh's own material
    pub fn from_node_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.node_name() == name)
    }

    fn baseline(self) -> Material {
        let name = self.node_name();
        match self {
            Role::Body => Material::new(name, Color::WHITE).with_roughness(0.7),
            Role::Knob => Material::new(name, Color::rgb(0.89, 0.89, 0.89))
                .with_metalness(1.0)
                .with_roughness(0.35),
            Role::Screen => Material::new(name, Color::WHITE)
                .with_roughness(0.4)
                .with_emission(Color::rgb(0.05, 0.05, 0.05)),
            Role::Plate => Material::new(name, Color::rgb(0.18, 0.18, 0.2))
                .with_metalness(0.9)
                .with_roughness(0.4),
            Role::CaseTop => Material::new(name, Color::rgb(0.92, 0.92, 0.9)).with_roughness(0.6),
            Role::CaseBottom => Material::new(name, Color::rgb(0.3, 0.3, 0.32)).with_roughness(0.6),
            Role::Feet => Material::new(name, Color::rgb(0.05, 0.05, 0.05)).with_roughness(0.9),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Map,
    Bump,
}

struct BaselineTexture {
    role: Role,
    slot: Slot,
    url: &'static str,
    sampling: Sampling,
}

const KNOB_BUMP_SCALE: f32 = 0.8;

// Sampling per slot follows how each image was authored; changing these
// shows up as mirrored or misaligned artwork.
const BASELINE_TEXTURES: [BaselineTexture; 3] = [
    BaselineTexture {
        role: Role::Body,
        slot: Slot::Map,
        url: "textures/keyboard/body_color.jpg",
        sampling: Sampling::color_map(),
    },
    BaselineTexture {
        role: Role::Knob,
        slot: Slot::Bump,
        url: "textures/keyboard/knob_bump.jpg",
        sampling: Sampling {
            flip_y: false,
            wrap_s: Wrap::Repeat,
            wrap_t: Wrap::Repeat,
            repeat: [3.0, 3.0],
            offset: [0.0, 0.0],
            color_space: ColorSpace::Linear,
        },
    },
    BaselineTexture {
        role: Role::Screen,
        slot: Slot::Map,
        url: "textures/keyboard/screen_uv.png",
        sampling: Sampling {
            flip_y: true,
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
            repeat: [1.0, 1.0],
            offset: [0.0, 0.0],
            color_space: ColorSpace::Srgb,
        },
    },
];

/// One shared material per [`Role`]
#[derive(Debug)]
pub struct RoleMaterials {
    materials: [SharedMaterial; 7],
}

impl RoleMaterials {
    pub fn get(&self, role: Role) -> &SharedMaterial {
        &self.materials[role as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &SharedMaterial)> {
        Role::ALL.into_iter().zip(self.materials.iter())
    }
}

/// Lazy singleton owner of the [`RoleMaterials`]
pub struct MaterialRegistry {
    loader: super::LoaderRef,
    spawner: futures::executor::LocalSpawner,
    asset_root: String,
    materials: OnceCell<Rc<RoleMaterials>>,
}

impl MaterialRegistry {
    pub fn new(loader: super::LoaderRef, spawner: futures::executor::LocalSpawner, asset_root: &str) -> Self {
        Self {
            loader,
            spawner,
            asset_root: asset_root.to_string(),
            materials: OnceCell::new(),
        }
    }

    pub fn is_built(&self) -> bool {
        self.materials.get().is_some()
    }

    /// Returns the shared materials, building them on the first call
    ///
    /// Baseline textures are attached as pending handles and their loads are
    /// spawned; the pixels appear whenever each load finishes. A swap that
    /// replaces a slot first simply leaves the late texture unreferenced.
    pub fn materials(&self) -> Rc<RoleMaterials> {
        Rc::clone(self.materials.get_or_init(|| Rc::new(self.build())))
    }

    fn build(&self) -> RoleMaterials {
        let materials = Role::ALL.map(|role| role.baseline().into_shared());

        for baseline in &BASELINE_TEXTURES {
            let texture = Texture::pending(baseline.url).with_sampling(baseline.sampling);
            {
                let mut material = materials[baseline.role as usize].borrow_mut();
                match baseline.slot {
                    Slot::Map => material.set_map(Some(texture.clone())),
                    Slot::Bump => {
                        material.bump_map = Some(texture.clone());
                        material.bump_scale = KNOB_BUMP_SCALE;
                    }
                }
            }

            let url = super::join_asset_url(&self.asset_root, baseline.url);
            let load = self.loader.load_texture(&url);
            let spawned = self.spawner.spawn_local(async move {
                match load.await {
                    Ok(image) => {
                        texture.fill(image);
                        log::info!("baseline texture '{}' ready", url);
                    }
                    // No recovery: the slot keeps rendering without pixels
                    Err(err) => log::warn!("baseline texture failed: {}", err),
                }
            });
            if let Err(err) = spawned {
                log::warn!("baseline texture '{}' not scheduled: {}", baseline.url, err);
            }
        }

        log::debug!("role materials built");
        RoleMaterials { materials }
    }
}
