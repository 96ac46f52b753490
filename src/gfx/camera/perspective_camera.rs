use std::cell::RefCell;
use std::rc::Rc;

use cgmath::{perspective, Deg, EuclideanSpace, Matrix4, Point3, Vector3};

pub type CameraRef = Rc<RefCell<PerspectiveCamera>>;

pub trait Camera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

/// Perspective camera looking from `position` toward `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for PerspectiveCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl PerspectiveCamera {
    pub fn new(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 1.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            fovy: Deg(fovy_degrees),
            aspect,
            znear,
            zfar,
        }
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn look_at(&mut self, target: Vector3<f32>) {
        self.target = target;
    }

    /// Matches the projection to a drawing buffer size; zero-height buffers
    /// keep the previous aspect
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn into_ref(self) -> CameraRef {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_projection_ignores_zero_height() {
        let mut camera = PerspectiveCamera::new(30.0, 1.0, 0.1, 100.0);
        camera.resize_projection(1600, 800);
        assert_eq!(camera.aspect, 2.0);
        camera.resize_projection(1600, 0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0)
            .with_position(Vector3::new(0.0, 0.0, 5.0));
        let clip = camera.build_view_projection_matrix() * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}
