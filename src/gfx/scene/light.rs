use std::cell::RefCell;
use std::rc::Rc;

use cgmath::Vector3;

use crate::gfx::color::Color;

pub type LightRef = Rc<RefCell<Light>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Parallel rays arriving from `position` toward the origin
    Directional,
    /// Sky color from above blended with `ground` from below
    Hemisphere { ground: Color },
    Ambient,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub position: Vector3<f32>,
}

impl Light {
    pub fn directional(name: &str, color: Color, intensity: f32, position: Vector3<f32>) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Directional,
            color,
            intensity,
            position,
        }
    }

    pub fn hemisphere(name: &str, sky: Color, ground: Color, intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            kind: LightKind::Hemisphere { ground },
            color: sky,
            intensity,
            position: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    pub fn into_ref(self) -> LightRef {
        Rc::new(RefCell::new(self))
    }
}
