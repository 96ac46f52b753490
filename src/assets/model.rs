//! Single-flight keyboard model loading
//!
//! The mesh is decoded at most once per loader. Callers that arrive while the
//! decode is running join it; callers that arrive later reuse the finished
//! template. Everyone receives their own deep clone.

use std::cell::OnceCell;
use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::{
    error::AssetError,
    gfx::scene::node::{deep_clone, mesh_nodes, NodeRef},
};

use super::{
    materials::{MaterialRegistry, Role, RoleMaterials},
    LoaderRef,
};

type TemplateLoad = Shared<LocalBoxFuture<'static, Result<NodeRef, AssetError>>>;

pub struct ModelLoader {
    loader: LoaderRef,
    materials: Rc<MaterialRegistry>,
    url: String,
    template: OnceCell<TemplateLoad>,
}

impl ModelLoader {
    pub fn new(loader: LoaderRef, materials: Rc<MaterialRegistry>, url: impl Into<String>) -> Self {
        Self {
            loader,
            materials,
            url: url.into(),
            template: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn decode_started(&self) -> bool {
        self.template.get().is_some()
    }

    /// Resolves to a fresh, material-bound copy of the keyboard
    ///
    /// A failed decode is remembered; every later call reports the same
    /// error without retrying.
    pub fn load_model(&self) -> impl Future<Output = Result<NodeRef, AssetError>> + 'static {
        let template = self.template.get_or_init(|| self.start()).clone();
        async move { template.await.map(|template| deep_clone(&template)) }
    }

    fn start(&self) -> TemplateLoad {
        log::debug!("decoding model '{}'", self.url);
        let decode = self.loader.load_mesh(&self.url);
        let registry = Rc::clone(&self.materials);
        let url = self.url.clone();
        async move {
            let template = decode.await?;
            let bound = bind_role_materials(&template, &registry.materials());
            log::info!("model '{}' ready, {} part(s) bound to role materials", url, bound);
            Ok(template)
        }
        .boxed_local()
        .shared()
    }
}

/// Points every role-named mesh at its shared material; returns how many
/// meshes were rebound
pub fn bind_role_materials(root: &NodeRef, materials: &RoleMaterials) -> usize {
    let mut bound = 0;
    for node in mesh_nodes(root) {
        let mut node = node.borrow_mut();
        if let Some(role) = Role::from_node_name(&node.name) {
            node.set_material(Rc::clone(materials.get(role)));
            bound += 1;
        }
    }
    bound
}
