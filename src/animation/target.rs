//! Animatable properties
//!
//! The animation engine only deals in scalar channels. Each scene type
//! exposes the channels it supports; a channel it does not have reads as
//! `None` and ignores writes, so a tween naming it simply does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::gfx::{
    camera::PerspectiveCamera, color::Color, resources::material::Material, scene::light::Light,
    scene::node::Node,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    /// Uniform scale, written to all three axes
    Scale,
    ColorR,
    ColorG,
    ColorB,
}

impl Channel {
    pub const COLOR: [Channel; 3] = [Channel::ColorR, Channel::ColorG, Channel::ColorB];
}

pub trait Animatable {
    fn read(&self, channel: Channel) -> Option<f32>;

    fn write(&self, channel: Channel, value: f32);
}

pub type TargetRef = Rc<dyn Animatable>;

fn read_color(color: &Color, channel: Channel) -> Option<f32> {
    match channel {
        Channel::ColorR => Some(color.r),
        Channel::ColorG => Some(color.g),
        Channel::ColorB => Some(color.b),
        _ => None,
    }
}

fn write_color(color: &mut Color, channel: Channel, value: f32) {
    match channel {
        Channel::ColorR => color.r = value,
        Channel::ColorG => color.g = value,
        Channel::ColorB => color.b = value,
        _ => {}
    }
}

impl Animatable for RefCell<Node> {
    fn read(&self, channel: Channel) -> Option<f32> {
        let node = self.borrow();
        let transform = &node.transform;
        match channel {
            Channel::PositionX => Some(transform.position.x),
            Channel::PositionY => Some(transform.position.y),
            Channel::PositionZ => Some(transform.position.z),
            Channel::RotationX => Some(transform.rotation.x),
            Channel::RotationY => Some(transform.rotation.y),
            Channel::RotationZ => Some(transform.rotation.z),
            Channel::Scale => Some(transform.scale.x),
            _ => None,
        }
    }

    fn write(&self, channel: Channel, value: f32) {
        let mut node = self.borrow_mut();
        let transform = &mut node.transform;
        match channel {
            Channel::PositionX => transform.position.x = value,
            Channel::PositionY => transform.position.y = value,
            Channel::PositionZ => transform.position.z = value,
            Channel::RotationX => transform.rotation.x = value,
            Channel::RotationY => transform.rotation.y = value,
            Channel::RotationZ => transform.rotation.z = value,
            Channel::Scale => {
                transform.scale.x = value;
                transform.scale.y = value;
                transform.scale.z = value;
            }
            _ => {}
        }
    }
}

impl Animatable for RefCell<PerspectiveCamera> {
    fn read(&self, channel: Channel) -> Option<f32> {
        let camera = self.borrow();
        match channel {
            Channel::PositionX => Some(camera.position.x),
            Channel::PositionY => Some(camera.position.y),
            Channel::PositionZ => Some(camera.position.z),
            _ => None,
        }
    }

    fn write(&self, channel: Channel, value: f32) {
        let mut camera = self.borrow_mut();
        match channel {
            Channel::PositionX => camera.position.x = value,
            Channel::PositionY => camera.position.y = value,
            Channel::PositionZ => camera.position.z = value,
            _ => {}
        }
    }
}

impl Animatable for RefCell<Light> {
    fn read(&self, channel: Channel) -> Option<f32> {
        let light = self.borrow();
        match channel {
            Channel::PositionX => Some(light.position.x),
            Channel::PositionY => Some(light.position.y),
            Channel::PositionZ => Some(light.position.z),
            _ => read_color(&light.color, channel),
        }
    }

    fn write(&self, channel: Channel, value: f32) {
        let mut light = self.borrow_mut();
        match channel {
            Channel::PositionX => light.position.x = value,
            Channel::PositionY => light.position.y = value,
            Channel::PositionZ => light.position.z = value,
            _ => write_color(&mut light.color, channel, value),
        }
    }
}

impl Animatable for RefCell<Material> {
    fn read(&self, channel: Channel) -> Option<f32> {
        read_color(&self.borrow().color, channel)
    }

    fn write(&self, channel: Channel, value: f32) {
        if !Channel::COLOR.contains(&channel) {
            return;
        }
        let mut material = self.borrow_mut();
        let mut color = material.color;
        write_color(&mut color, channel, value);
        material.set_color(color);
    }
}

/// Bare colors, e.g. the page background
impl Animatable for RefCell<Color> {
    fn read(&self, channel: Channel) -> Option<f32> {
        read_color(&self.borrow(), channel)
    }

    fn write(&self, channel: Channel, value: f32) {
        write_color(&mut self.borrow_mut(), channel, value);
    }
}
