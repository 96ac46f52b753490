//! # Assets Module
//!
//! Everything between raw asset URLs and render-ready scene resources:
//!
//! - [`AssetLoader`] - the asynchronous loading surface, with
//!   [`FsAssetLoader`] reading from disk
//! - [`MaterialRegistry`] - the seven shared role materials
//! - [`VariantRegistry`] - per-variant color maps and accent colors
//! - [`ModelLoader`] - single-flight keyboard decode, cloned per caller
//!
//! The registries are lazy: nothing is built or fetched until the first
//! call, and everything after that reuses the same instances.

pub mod fs;
pub mod loader;
pub mod materials;
pub mod model;
pub mod variants;

#[cfg(test)]
pub mod testing;

pub use fs::FsAssetLoader;
pub use loader::{AssetLoader, LoaderRef};
pub use materials::{MaterialRegistry, Role, RoleMaterials};
pub use model::ModelLoader;
pub use variants::{find_variant, VariantAsset, VariantAssets, VariantDescriptor, VariantRegistry, VARIANTS};

/// Joins a relative asset path onto an asset root
///
/// An empty root leaves the path relative; slashes at the seam collapse to
/// one.
pub fn join_asset_url(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if root.is_empty() {
        return path.to_string();
    }
    format!("{}/{}", root, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_asset_url() {
        assert_eq!(join_asset_url("assets", "textures/a.jpg"), "assets/textures/a.jpg");
        assert_eq!(join_asset_url("static/", "/models/k.obj"), "static/models/k.obj");
        assert_eq!(join_asset_url("", "textures/a.jpg"), "textures/a.jpg");
        assert_eq!(join_asset_url("", "/textures/a.jpg"), "textures/a.jpg");
    }
}
