//! # Animation Module
//!
//! Small tween/timeline engine with scroll-scrubbed bindings.
//!
//! - [`Tween`] - time-driven interpolation of a target's channels
//! - [`Timeline`] - ordered tweens with callbacks between steps
//! - [`ScrollBinding`] - progress driven by scroll offset instead of time
//!
//! An [`Animator`] owns everything that is currently playing. Each scene
//! controller ticks its own animator once per frame and forwards scroll
//! events to it.

pub mod ease;
pub mod scroll;
pub mod target;
pub mod timeline;
pub mod tween;

use std::cell::RefCell;
use std::rc::Rc;

use crate::page::Viewport;

pub use ease::Ease;
pub use scroll::{Marker, ScrollBinding, Scrub};
pub use target::{Animatable, Channel, TargetRef};
pub use timeline::Timeline;
pub use tween::{Repeat, Tween};

pub type AnimatorRef = Rc<RefCell<Animator>>;

/// Runs tweens, timelines and scroll bindings
///
/// Callbacks fire while the animator is mutably borrowed, so they must not
/// reach back into the animator that runs them.
#[derive(Default)]
pub struct Animator {
    tweens: Vec<Tween>,
    timelines: Vec<Timeline>,
    bindings: Vec<ScrollBinding>,
    viewport: Option<Viewport>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_ref(self) -> AnimatorRef {
        Rc::new(RefCell::new(self))
    }

    /// Starts a tween; an overwriting tween first kills conflicting ones
    pub fn animate_to(&mut self, tween: Tween) {
        if tween.overwrites() {
            let before = self.tweens.len();
            self.tweens.retain(|running| !running.conflicts_with(&tween));
            let killed = before - self.tweens.len();
            if killed > 0 {
                log::trace!("overwrite killed {killed} tween(s)");
            }
        }
        self.tweens.push(tween);
    }

    pub fn play(&mut self, timeline: Timeline) {
        self.timelines.push(timeline);
    }

    /// Registers a binding and snaps it to the last known scroll position
    pub fn bind_scroll(&mut self, mut binding: ScrollBinding) {
        if let Some(viewport) = &self.viewport {
            binding.apply(viewport);
        }
        self.bindings.push(binding);
    }

    pub fn on_scroll(&mut self, viewport: &Viewport) {
        self.viewport = Some(*viewport);
        for binding in &mut self.bindings {
            binding.apply(viewport);
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.tweens.retain_mut(|tween| tween.advance(dt).is_none());
        self.timelines.retain_mut(|timeline| timeline.advance(dt).is_none());
        for binding in &mut self.bindings {
            binding.tick(dt);
        }
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn bindings(&self) -> &[ScrollBinding] {
        &self.bindings
    }

    /// True while any tween on `target` has not finished
    pub fn is_tweening(&self, target: &TargetRef) -> bool {
        self.tweens
            .iter()
            .any(|tween| tween::same_target(tween.target(), target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gfx::scene::node::Node, page::ElementRect};

    #[test]
    fn test_overwrite_replaces_conflicting_tween() {
        let target: TargetRef = Node::group("camera-rig").into_ref();
        let mut animator = Animator::new();

        animator.animate_to(Tween::to(target.clone(), 1.0).prop(Channel::PositionX, 5.0).overwrite());
        animator.animate_to(Tween::to(target.clone(), 1.0).prop(Channel::PositionY, 5.0).overwrite());
        animator.tick(0.5);
        animator.animate_to(Tween::to(target.clone(), 1.0).prop(Channel::PositionX, -1.0).overwrite());
        assert_eq!(animator.tween_count(), 2);

        animator.tick(2.0);
        assert_eq!(animator.tween_count(), 0);
        assert!(!animator.is_tweening(&target));
        assert_eq!(target.read(Channel::PositionX), Some(-1.0));
        assert_eq!(target.read(Channel::PositionY), Some(5.0));
    }

    #[test]
    fn test_late_binding_snaps_to_current_scroll() {
        let target: TargetRef = Node::group("model").into_ref();
        let mut animator = Animator::new();
        animator.on_scroll(&Viewport::new(100.0, 100.0).scrolled_to(50.0));

        animator.bind_scroll(
            ScrollBinding::new(ElementRect::new(0.0, 200.0), Marker::TOP_TOP, Marker::BOTTOM_BOTTOM)
                .track(target.clone(), Channel::PositionZ, 0.0, 10.0),
        );
        assert_eq!(target.read(Channel::PositionZ), Some(5.0));
        assert_eq!(animator.bindings().len(), 1);
    }

    #[test]
    fn test_finished_timelines_are_dropped() {
        let target: TargetRef = Node::group("model").into_ref();
        let mut animator = Animator::new();
        animator.play(Timeline::new().then(Tween::to(target, 0.2).prop(Channel::PositionY, 1.0)));
        assert_eq!(animator.timeline_count(), 1);
        animator.tick(0.1);
        assert_eq!(animator.timeline_count(), 1);
        animator.tick(0.15);
        assert_eq!(animator.timeline_count(), 0);
    }
}
