use cgmath::Vector3;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, WindowEvent},
};

use super::perspective_camera::PerspectiveCamera;

/// Angular limits for an orbit; `None` leaves that yaw side open
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitBounds {
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

impl OrbitBounds {
    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.min_pitch, self.max_pitch)
    }

    fn clamp_yaw(&self, yaw: f32) -> f32 {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        bounded_yaw
    }
}

/// Drag-to-rotate orbit input for the configurator
///
/// Distance and target are fixed: there is no zoom and no pan. Drags move
/// goal angles, and [`OrbitControls::update`] eases the actual angles toward
/// them so releases glide to a stop.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub distance: f32,
    pub target: Vector3<f32>,
    pub bounds: OrbitBounds,
    pub rotate_speed: f32,
    /// Fraction of the remaining angle closed per 1/60 s
    pub damping: f32,
    pitch: f32,
    yaw: f32,
    goal_pitch: f32,
    goal_yaw: f32,
    is_mouse_pressed: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitControls {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, bounds: OrbitBounds) -> Self {
        let pitch = bounds.clamp_pitch(pitch);
        let yaw = bounds.clamp_yaw(yaw);
        Self {
            distance,
            target,
            bounds,
            rotate_speed: 0.005,
            damping: 0.1,
            pitch,
            yaw,
            goal_pitch: pitch,
            goal_yaw: yaw,
            is_mouse_pressed: false,
            last_cursor: None,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn is_dragging(&self) -> bool {
        self.is_mouse_pressed
    }

    /// Returns true when the event was consumed as orbit input
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                if !self.is_mouse_pressed {
                    self.last_cursor = None;
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.last_cursor.replace(*position);
                match previous {
                    Some(previous) if self.is_mouse_pressed => {
                        self.drag((position.x - previous.x) as f32, (position.y - previous.y) as f32);
                        true
                    }
                    _ => false,
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.is_mouse_pressed = false;
                self.last_cursor = None;
                false
            }
            // Zoom stays disabled
            WindowEvent::MouseWheel { .. } => false,
            _ => false,
        }
    }

    /// Applies a pointer drag in pixels to the goal angles
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.goal_yaw = self.bounds.clamp_yaw(self.goal_yaw - dx * self.rotate_speed);
        self.goal_pitch = self.bounds.clamp_pitch(self.goal_pitch + dy * self.rotate_speed);
    }

    /// Eases toward the goal angles and places the camera on the orbit
    pub fn update(&mut self, camera: &mut PerspectiveCamera, dt: f32) {
        let blend = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(dt.max(0.0) * 60.0);
        self.pitch += (self.goal_pitch - self.pitch) * blend;
        self.yaw += (self.goal_yaw - self.yaw) * blend;

        camera.position = calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
        camera.target = self.target;
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
