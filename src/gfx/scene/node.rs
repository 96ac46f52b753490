//! Node hierarchy
//!
//! Nodes are reference-counted so that asynchronous loaders, animations and
//! the scene can all hold onto the same part of a model. Everything runs on
//! one thread, so `Rc<RefCell<_>>` is the sharing primitive.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::resources::material::SharedMaterial;

use super::geometry::Geometry;

pub type NodeRef = Rc<RefCell<Node>>;

/// Local transform with Euler rotation (radians, XYZ order)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }
}

/// Renderable leaf: shared geometry plus a material handle
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Rc<Geometry>,
    pub material: SharedMaterial,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
}

#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
    children: Vec<NodeRef>,
}

impl Node {
    pub fn group(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            visible: true,
            kind: NodeKind::Group,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: &str, geometry: Rc<Geometry>, material: SharedMaterial) -> Self {
        Self {
            kind: NodeKind::Mesh(Mesh { geometry, material }),
            ..Self::group(name)
        }
    }

    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    pub fn add(&mut self, child: NodeRef) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh(_))
    }

    pub fn material(&self) -> Option<&SharedMaterial> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(&mesh.material),
            NodeKind::Group => None,
        }
    }

    /// Rebinds a mesh node to another material; no-op on groups
    pub fn set_material(&mut self, material: SharedMaterial) {
        if let NodeKind::Mesh(mesh) = &mut self.kind {
            mesh.material = material;
        }
    }
}

/// Deep clone of a hierarchy
///
/// Every node is new; geometry and materials are shared with the source, so
/// material edits still reach all clones while transforms stay independent.
pub fn deep_clone(node: &NodeRef) -> NodeRef {
    let source = node.borrow();
    let children = source.children.iter().map(deep_clone).collect();
    Rc::new(RefCell::new(Node {
        name: source.name.clone(),
        transform: source.transform,
        visible: source.visible,
        kind: source.kind.clone(),
        children,
    }))
}

/// Depth-first, parent before children
pub fn traverse(node: &NodeRef, visit: &mut dyn FnMut(&NodeRef)) {
    visit(node);
    let children = node.borrow().children.clone();
    for child in &children {
        traverse(child, visit);
    }
}

/// Collects every mesh node under `root`, including `root` itself
pub fn mesh_nodes(root: &NodeRef) -> Vec<NodeRef> {
    let mut meshes = Vec::new();
    traverse(root, &mut |node| {
        if node.borrow().is_mesh() {
            meshes.push(Rc::clone(node));
        }
    });
    meshes
}

/// First node with an exactly matching name
pub fn find_by_name(root: &NodeRef, name: &str) -> Option<NodeRef> {
    let mut found = None;
    traverse(root, &mut |node| {
        if found.is_none() && node.borrow().name == name {
            found = Some(Rc::clone(node));
        }
    });
    found
}
