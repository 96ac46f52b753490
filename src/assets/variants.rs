//! Cosmetic variants and their lazily loaded color maps

use std::cell::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::task::LocalSpawnExt;

use crate::gfx::{
    color::Color,
    resources::texture::{Sampling, Texture},
};

/// Static description of one keycap/case color scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub texture_url: &'static str,
    pub thumbnail_url: &'static str,
    pub accent_color: Color,
}

pub const DEFAULT_VARIANT: &str = "goodwell";

pub static VARIANTS: [VariantDescriptor; 6] = [
    VariantDescriptor {
        id: "goodwell",
        display_name: "Goodwell",
        texture_url: "textures/variants/goodwell.jpg",
        thumbnail_url: "thumbnails/goodwell.png",
        accent_color: Color::rgb(0.871, 0.357, 0.184),
    },
    VariantDescriptor {
        id: "dreamboard",
        display_name: "Dreamboard",
        texture_url: "textures/variants/dreamboard.jpg",
        thumbnail_url: "thumbnails/dreamboard.png",
        accent_color: Color::rgb(0.592, 0.482, 0.894),
    },
    VariantDescriptor {
        id: "cherrynavy",
        display_name: "Cherry Navy",
        texture_url: "textures/variants/cherrynavy.jpg",
        thumbnail_url: "thumbnails/cherrynavy.png",
        accent_color: Color::rgb(0.780, 0.114, 0.239),
    },
    VariantDescriptor {
        id: "kick",
        display_name: "Lime Kick",
        texture_url: "textures/variants/kick.jpg",
        thumbnail_url: "thumbnails/kick.png",
        accent_color: Color::rgb(0.659, 0.878, 0.220),
    },
    VariantDescriptor {
        id: "oldschool",
        display_name: "Old School",
        texture_url: "textures/variants/oldschool.jpg",
        thumbnail_url: "thumbnails/oldschool.png",
        accent_color: Color::rgb(0.851, 0.816, 0.710),
    },
    VariantDescriptor {
        id: "frogfrog",
        display_name: "Frog Frog",
        texture_url: "textures/variants/frogfrog.jpg",
        thumbnail_url: "thumbnails/frogfrog.png",
        accent_color: Color::rgb(0.224, 0.600, 0.337),
    },
];

pub fn find_variant(id: &str) -> Option<&'static VariantDescriptor> {
    VARIANTS.iter().find(|variant| variant.id == id)
}

/// Loaded resources for one variant
///
/// `map` is the shared pixel source with color-map sampling; call sites take
/// their own sampled handle with [`Texture::with_sampling`].
#[derive(Debug, Clone)]
pub struct VariantAsset {
    pub map: Texture,
    pub accent_color: Color,
}

pub type VariantAssets = HashMap<&'static str, VariantAsset>;

/// Lazy, per-page registry of variant textures
pub struct VariantRegistry {
    variants: &'static [VariantDescriptor],
    loader: super::LoaderRef,
    spawner: futures::executor::LocalSpawner,
    asset_root: String,
    assets: OnceCell<Rc<VariantAssets>>,
}

impl VariantRegistry {
    pub fn new(loader: super::LoaderRef, spawner: futures::executor::LocalSpawner, asset_root: &str) -> Self {
        Self::with_variants(&VARIANTS, loader, spawner, asset_root)
    }

    pub fn with_variants(
        variants: &'static [VariantDescriptor],
        loader: super::LoaderRef,
        spawner: futures::executor::LocalSpawner,
        asset_root: &str,
    ) -> Self {
        Self {
            variants,
            loader,
            spawner,
            asset_root: asset_root.to_string(),
            assets: OnceCell::new(),
        }
    }

    pub fn descriptors(&self) -> &'static [VariantDescriptor] {
        self.variants
    }

    pub fn find(&self, id: &str) -> Option<&'static VariantDescriptor> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    /// Builds every variant's texture handle once and starts their loads
    ///
    /// Handles are usable immediately; their pixels arrive when the load
    /// resolves. A failed load leaves that variant's texture empty.
    pub fn assets(&self) -> Rc<VariantAssets> {
        Rc::clone(self.assets.get_or_init(|| Rc::new(self.build())))
    }

    fn build(&self) -> VariantAssets {
        let mut assets = VariantAssets::with_capacity(self.variants.len());
        for variant in self.variants {
            let map = Texture::pending(variant.id).with_sampling(Sampling::color_map());
            let url = super::join_asset_url(&self.asset_root, variant.texture_url);
            let load = self.loader.load_texture(&url);
            let slot = map.clone();
            let id = variant.id;
            let spawned = self.spawner.spawn_local(async move {
                match load.await {
                    Ok(image) => {
                        slot.fill(image);
                        log::info!("variant texture '{}' ready", id);
                    }
                    Err(err) => log::warn!("variant texture '{}' failed: {}", id, err),
                }
            });
            if let Err(err) = spawned {
                log::warn!("variant texture '{}' not scheduled: {}", id, err);
            }

            assets.insert(
                variant.id,
                VariantAsset {
                    map,
                    accent_color: variant.accent_color,
                },
            );
        }
        log::debug!("variant registry built with {} variants", assets.len());
        assets
    }
}
