//! Variant swap state machine
//!
//! `Idle -> Swapping -> Idle`. A request is accepted only from `Idle`; the
//! applied materials match `current` whenever the phase is `Idle`.

use std::rc::Rc;

use crate::{
    assets::variants::VariantAsset,
    gfx::{
        resources::texture::Sampling,
        scene::node::{mesh_nodes, NodeRef},
    },
};

/// Parts that keep their own materials through every swap
pub const EXCLUDED_PARTS: [&str; 5] = ["screen", "plate", "pcb", "weight", "case_inner"];

/// Part that takes the accent color instead of the color map
pub const ACCENT_PART: &str = "knob";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    Idle,
    Swapping { target: &'static str },
}

/// Why a swap request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    ModelNotLoaded,
    UnknownVariant,
    AlreadyCurrent,
    InTransition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    Started,
    Ignored(SwapRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariant {
    current: &'static str,
    phase: SwapPhase,
}

impl ActiveVariant {
    pub fn new(current: &'static str) -> Self {
        Self {
            current,
            phase: SwapPhase::Idle,
        }
    }

    pub fn current(&self) -> &'static str {
        self.current
    }

    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, SwapPhase::Swapping { .. })
    }

    /// `Idle -> Swapping`
    pub fn begin(&mut self, target: &'static str) -> Result<(), SwapRejection> {
        if self.is_transitioning() {
            return Err(SwapRejection::InTransition);
        }
        if target == self.current {
            return Err(SwapRejection::AlreadyCurrent);
        }
        self.phase = SwapPhase::Swapping { target };
        Ok(())
    }

    /// `Swapping -> Idle`, committing the target; no-op when idle
    pub fn finish(&mut self) {
        if let SwapPhase::Swapping { target } = self.phase {
            self.current = target;
            self.phase = SwapPhase::Idle;
        }
    }
}

/// Restyles a keyboard with a variant; returns the number of parts touched
///
/// Every mesh outside [`EXCLUDED_PARTS`] gets the variant's color map with
/// mirrored sampling, except the knob, which takes the accent color.
pub fn apply_variant(model: &NodeRef, variant: &VariantAsset) -> usize {
    let map = variant.map.with_sampling(Sampling::mirrored());
    let mut touched = 0;
    for node in mesh_nodes(model) {
        let node = node.borrow();
        if EXCLUDED_PARTS.contains(&node.name.as_str()) {
            continue;
        }
        let Some(material) = node.material() else {
            continue;
        };
        let material = Rc::clone(material);
        let mut material = material.borrow_mut();
        if node.name == ACCENT_PART {
            material.set_color(variant.accent_color);
        } else {
            material.set_map(Some(map.clone()));
        }
        touched += 1;
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::keyboard_fixture;
    use crate::gfx::{color::Color, resources::texture::Texture, scene::node::find_by_name};

    #[test]
    fn test_state_machine_guards() {
        let mut state = ActiveVariant::new("goodwell");
        assert_eq!(state.begin("goodwell"), Err(SwapRejection::AlreadyCurrent));
        assert_eq!(state.phase(), SwapPhase::Idle);

        assert_eq!(state.begin("kick"), Ok(()));
        assert_eq!(state.begin("dreamboard"), Err(SwapRejection::InTransition));
        assert_eq!(state.begin("goodwell"), Err(SwapRejection::InTransition));
        assert_eq!(state.current(), "goodwell");

        state.finish();
        assert_eq!(state.current(), "kick");
        assert!(!state.is_transitioning());

        state.finish();
        assert_eq!(state.current(), "kick");
    }

    #[test]
    fn test_apply_skips_excluded_and_tints_knob() {
        let model = keyboard_fixture();
        let variant = VariantAsset {
            map: Texture::pending("kick"),
            accent_color: Color::rgb(0.1, 0.9, 0.2),
        };

        let touched = apply_variant(&model, &variant);
        assert_eq!(touched, 6);

        for part in EXCLUDED_PARTS {
            let node = find_by_name(&model, part).unwrap();
            let node = node.borrow();
            let material = node.material().unwrap().borrow();
            assert!(material.map.is_none(), "{part} should keep its material");
            assert_eq!(material.version(), 0);
        }

        let knob = find_by_name(&model, ACCENT_PART).unwrap();
        let knob = knob.borrow();
        let knob = knob.material().unwrap().borrow();
        assert_eq!(knob.color, variant.accent_color);
        assert!(knob.map.is_none());

        let body = find_by_name(&model, "body").unwrap();
        let body = body.borrow();
        let body = body.material().unwrap().borrow();
        let map = body.map.as_ref().unwrap();
        assert!(map.same_source(&variant.map));
        assert_eq!(map.sampling, Sampling::mirrored());
    }
}
