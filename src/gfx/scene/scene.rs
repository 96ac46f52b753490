use std::collections::HashSet;
use std::rc::Rc;

use crate::gfx::{color::Color, resources::environment::EnvironmentMap};

use super::{
    light::LightRef,
    node::{traverse, NodeRef},
};

/// Main scene containing top-level nodes, lights and the ambient environment
pub struct Scene {
    pub background: Option<Color>,
    pub environment: Option<Rc<EnvironmentMap>>,
    pub environment_intensity: f32,
    nodes: Vec<NodeRef>,
    lights: Vec<LightRef>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with a transparent background
    pub fn new() -> Self {
        Self {
            background: None,
            environment: None,
            environment_intensity: 1.0,
            nodes: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Adds a top-level node; adding the same node twice is ignored
    pub fn add(&mut self, node: NodeRef) {
        if !self.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn remove(&mut self, node: &NodeRef) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| !Rc::ptr_eq(n, node));
        self.nodes.len() != before
    }

    pub fn contains(&self, node: &NodeRef) -> bool {
        self.nodes.iter().any(|n| Rc::ptr_eq(n, node))
    }

    pub fn add_light(&mut self, light: LightRef) {
        self.lights.push(light);
    }

    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    pub fn lights(&self) -> &[LightRef] {
        &self.lights
    }

    /// Gets the top-level node names for debugging
    pub fn get_object_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.borrow().name.clone()).collect()
    }

    /// Gets statistics about the visible part of the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics {
            light_count: self.lights.len(),
            ..Default::default()
        };
        let mut materials = HashSet::new();

        for root in &self.nodes {
            traverse(root, &mut |node| {
                let node = node.borrow();
                if !node.visible {
                    return;
                }
                stats.node_count += 1;
                if let super::node::NodeKind::Mesh(mesh) = &node.kind {
                    stats.mesh_count += 1;
                    stats.total_triangles += mesh.geometry.triangle_count();
                    stats.total_vertices += mesh.geometry.vertex_count();
                    materials.insert(Rc::as_ptr(&mesh.material));
                }
            });
        }

        stats.material_count = materials.len();
        stats
    }
}

/// Scene statistics for debugging and frame records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub mesh_count: usize,
    pub material_count: usize,
    pub light_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        resources::material::Material,
        scene::{geometry::Geometry, node::Node},
    };

    #[test]
    fn test_statistics_count_shared_materials_once() {
        let geometry = Rc::new(Geometry::from_flat(&[0.0; 9], &[], &[], vec![0, 1, 2]));
        let shared = Material::default().into_shared();

        let mut group = Node::group("keyboard");
        group.add(Node::mesh("a", geometry.clone(), shared.clone()).into_ref());
        group.add(Node::mesh("b", geometry, shared).into_ref());

        let mut scene = Scene::new();
        let group = group.into_ref();
        scene.add(group.clone());
        scene.add(group.clone());

        let stats = scene.get_statistics();
        assert_eq!(scene.nodes().len(), 1);
        assert_eq!(stats.mesh_count, 2);
        assert_eq!(stats.material_count, 1);
        assert_eq!(stats.total_triangles, 2);

        assert!(scene.remove(&group));
        assert_eq!(scene.get_statistics().node_count, 0);
    }
}
