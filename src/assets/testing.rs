//! Scripted asset loader for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::{
    error::AssetError,
    gfx::{
        color::Color,
        resources::{environment::HdrImage, material::Material, texture::TextureImage},
        scene::{
            geometry::Geometry,
            node::{Node, NodeRef},
        },
    },
};

use super::loader::AssetLoader;

pub const KEYBOARD_URL: &str = "assets/models/keyboard.obj.gz";

/// Mesh names in the keyboard fixture, role parts first
pub const KEYBOARD_PARTS: [&str; 11] = [
    "body",
    "knob",
    "screen",
    "plate",
    "case_top",
    "case_bottom",
    "feet",
    "pcb",
    "weight",
    "case_inner",
    "keycaps",
];

/// In-memory loader with call counters
///
/// A gated loader holds every load until [`MockLoader::release`]; otherwise
/// loads resolve on first poll. URLs registered with [`MockLoader::fail`]
/// resolve to an I/O error.
#[derive(Default)]
pub struct MockLoader {
    gated: bool,
    gates: RefCell<Vec<oneshot::Sender<()>>>,
    failing: RefCell<HashSet<String>>,
    mesh_calls: Cell<usize>,
    texture_calls: Cell<usize>,
    hdr_calls: Cell<usize>,
    texture_urls: RefCell<Vec<String>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn fail(&self, url: &str) {
        self.failing.borrow_mut().insert(url.to_string());
    }

    /// Lets every load requested so far complete
    pub fn release(&self) {
        for gate in self.gates.borrow_mut().drain(..) {
            let _ = gate.send(());
        }
    }

    pub fn mesh_calls(&self) -> usize {
        self.mesh_calls.get()
    }

    pub fn texture_calls(&self) -> usize {
        self.texture_calls.get()
    }

    pub fn hdr_calls(&self) -> usize {
        self.hdr_calls.get()
    }

    pub fn texture_urls(&self) -> Vec<String> {
        self.texture_urls.borrow().clone()
    }

    fn respond<T: 'static>(&self, url: &str, make: impl FnOnce() -> T + 'static) -> LocalBoxFuture<'static, Result<T, AssetError>> {
        let gate = if self.gated {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push(tx);
            Some(rx)
        } else {
            None
        };
        let fails = self.failing.borrow().contains(url);
        let url = url.to_string();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            if fails {
                Err(AssetError::io(url, "scripted failure"))
            } else {
                Ok(make())
            }
        }
        .boxed_local()
    }
}

impl AssetLoader for MockLoader {
    fn load_mesh(&self, url: &str) -> LocalBoxFuture<'static, Result<NodeRef, AssetError>> {
        self.mesh_calls.set(self.mesh_calls.get() + 1);
        if url.contains("keycap") {
            self.respond(url, keycap_fixture)
        } else {
            self.respond(url, keyboard_fixture)
        }
    }

    fn load_texture(&self, url: &str) -> LocalBoxFuture<'static, Result<TextureImage, AssetError>> {
        self.texture_calls.set(self.texture_calls.get() + 1);
        self.texture_urls.borrow_mut().push(url.to_string());
        self.respond(url, || TextureImage::solid(2, 2, [200, 80, 40, 255]))
    }

    fn load_hdr(&self, url: &str) -> LocalBoxFuture<'static, Result<HdrImage, AssetError>> {
        self.hdr_calls.set(self.hdr_calls.get() + 1);
        self.respond(url, || HdrImage {
            width: 4,
            height: 2,
            texels: vec![[2.0, 1.5, 1.0]; 8],
        })
    }
}

fn triangle() -> Rc<Geometry> {
    Rc::new(Geometry::from_flat(
        &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        &[],
        &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        vec![0, 1, 2],
    ))
}

/// Freshly decoded keyboard: every part has its own default material
pub fn keyboard_fixture() -> NodeRef {
    let geometry = triangle();
    let mut root = Node::group("keyboard");
    for name in KEYBOARD_PARTS {
        let material = Material::new(name, Color::WHITE).into_shared();
        root.add(Node::mesh(name, geometry.clone(), material).into_ref());
    }
    root.into_ref()
}

pub fn keycap_fixture() -> NodeRef {
    let mut root = Node::group("keycap");
    let material = Material::new("keycap", Color::WHITE).into_shared();
    root.add(Node::mesh("keycap", triangle(), material).into_ref());
    root.into_ref()
}
