use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::{
    error::AssetError,
    gfx::{resources::environment::HdrImage, resources::texture::TextureImage, scene::node::NodeRef},
};

/// Asynchronous asset source
///
/// Every call starts an independent load; callers that want to share work
/// (the model loader, the registries) memoize on their side. Futures are
/// `'static` so they can be spawned onto the local executor.
pub trait AssetLoader {
    /// Decodes a (possibly compressed) mesh hierarchy
    fn load_mesh(&self, url: &str) -> LocalBoxFuture<'static, Result<NodeRef, AssetError>>;

    fn load_texture(&self, url: &str) -> LocalBoxFuture<'static, Result<TextureImage, AssetError>>;

    /// Decodes an equirectangular HDR panorama
    fn load_hdr(&self, url: &str) -> LocalBoxFuture<'static, Result<HdrImage, AssetError>>;
}

pub type LoaderRef = Rc<dyn AssetLoader>;
