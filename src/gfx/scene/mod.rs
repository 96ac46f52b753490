//! # Scene Management Module
//!
//! Scene graph used by both showcase scenes: a [`Scene`] holds top-level
//! [`Node`] hierarchies and lights, nodes carry a local [`Transform`] and
//! optionally a [`Mesh`] (shared geometry + shared material).
//!
//! ## Sharing model
//!
//! - Nodes are `Rc<RefCell<Node>>` handles ([`NodeRef`]) so loaders,
//!   animations and the scene can point at the same part.
//! - [`deep_clone`] copies nodes but keeps geometry and materials shared.

pub mod geometry;
pub mod light;
pub mod node;
pub mod scene;

// Re-export main types
pub use geometry::Geometry;
pub use light::{Light, LightKind, LightRef};
pub use node::{deep_clone, find_by_name, mesh_nodes, traverse, Mesh, Node, NodeKind, NodeRef, Transform};
pub use scene::{Scene, SceneStatistics};
