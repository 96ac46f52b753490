//! Loader for assets on the local filesystem
//!
//! - meshes: Wavefront OBJ, optionally gzip-compressed (`.obj.gz`)
//! - textures: PNG or JPEG, expanded to RGBA8
//! - panoramas: Radiance HDR, expanded to linear RGB
//!
//! Work happens when the returned future is first polled, not when the
//! load is requested.

use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use flate2::read::GzDecoder;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::{
    error::AssetError,
    gfx::{
        resources::{environment::HdrImage, material::Material, texture::TextureImage},
        scene::{
            geometry::Geometry,
            node::{Node, NodeRef},
        },
    },
};

use super::loader::AssetLoader;

/// Resolves asset URLs against a root directory
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> PathBuf {
        self.root.join(url.trim_start_matches('/'))
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_mesh(&self, url: &str) -> LocalBoxFuture<'static, Result<NodeRef, AssetError>> {
        let path = self.resolve(url);
        let url = url.to_string();
        async move {
            let bytes = read_asset(&path, &url)?;
            let source = if url.ends_with(".obj.gz") {
                gunzip(&bytes, &url)?
            } else if url.ends_with(".obj") {
                bytes
            } else {
                return Err(AssetError::UnsupportedFormat(url));
            };
            let root = parse_obj(&source, &url)?;
            log::info!("mesh '{}' decoded", url);
            Ok(root)
        }
        .boxed_local()
    }

    fn load_texture(&self, url: &str) -> LocalBoxFuture<'static, Result<TextureImage, AssetError>> {
        let path = self.resolve(url);
        let url = url.to_string();
        async move {
            let bytes = read_asset(&path, &url)?;
            let decoded = image::load_from_memory(&bytes).map_err(|e| AssetError::decode(&url, e))?;
            let rgba = decoded.to_rgba8();
            let (width, height) = (rgba.width(), rgba.height());
            TextureImage::from_rgba(width, height, rgba.into_raw())
                .ok_or_else(|| AssetError::decode(&url, "empty image"))
        }
        .boxed_local()
    }

    fn load_hdr(&self, url: &str) -> LocalBoxFuture<'static, Result<HdrImage, AssetError>> {
        let path = self.resolve(url);
        let url = url.to_string();
        async move {
            let bytes = read_asset(&path, &url)?;
            let decoded = image::load_from_memory(&bytes).map_err(|e| AssetError::decode(&url, e))?;
            let rgb32f = decoded.to_rgb32f();
            let (width, height) = (rgb32f.width(), rgb32f.height());
            let texels = rgb32f.pixels().map(|p| [p[0], p[1], p[2]]).collect();
            HdrImage::new(width, height, texels).ok_or_else(|| AssetError::decode(&url, "empty panorama"))
        }
        .boxed_local()
    }
}

fn read_asset(path: &Path, url: &str) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|e| AssetError::io(url, e))
}

fn gunzip(bytes: &[u8], url: &str) -> Result<Vec<u8>, AssetError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| AssetError::decode(url, e))?;
    Ok(out)
}

/// One mesh node per OBJ object, grouped under a root named after the file
///
/// Material libraries are ignored; every mesh gets its own default material
/// so role binding can replace them individually.
fn parse_obj(source: &[u8], url: &str) -> Result<NodeRef, AssetError> {
    let mut reader = BufReader::new(Cursor::new(source));
    let (models, _materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Err(tobj::LoadError::OpenFileFailed),
    )
    .map_err(|e| AssetError::decode(url, e))?;

    let mut root = Node::group(url.rsplit('/').next().unwrap_or(url));
    for (i, model) in models.iter().enumerate() {
        let mesh = &model.mesh;
        let geometry = Geometry::from_flat(&mesh.positions, &mesh.normals, &mesh.texcoords, mesh.indices.clone());

        let name = if model.name.is_empty() {
            format!("mesh_{}", i)
        } else {
            model.name.clone()
        };
        let material = Material::new(&name, Default::default()).into_shared();
        root.add(Node::mesh(&name, Rc::new(geometry), material).into_ref());
    }

    if models.is_empty() {
        log::warn!("mesh '{}' contains no objects", url);
    }
    Ok(root.into_ref())
}
