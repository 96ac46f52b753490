pub mod orbit_controls;
pub mod perspective_camera;

// Re-export main types
pub use orbit_controls::{OrbitBounds, OrbitControls};
pub use perspective_camera::{Camera, CameraRef, PerspectiveCamera};
