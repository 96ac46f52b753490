//! Scroll-scrubbed bindings
//!
//! A binding maps the scroll offset inside a marker range straight onto
//! animation progress. Progress is a pure function of the scroll offset, so
//! scrolling back replays exactly the same values in reverse.

use crate::{
    gfx::color::Color,
    page::{ElementRect, Viewport},
};

use super::target::{Channel, TargetRef};

/// Point where a fraction of the trigger element meets a fraction of the viewport
///
/// `Marker::TOP_BOTTOM` fires when the element's top edge reaches the bottom
/// of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub element: f32,
    pub viewport: f32,
}

impl Marker {
    pub const TOP_TOP: Marker = Marker::new(0.0, 0.0);
    pub const TOP_CENTER: Marker = Marker::new(0.0, 0.5);
    pub const TOP_BOTTOM: Marker = Marker::new(0.0, 1.0);
    pub const CENTER_CENTER: Marker = Marker::new(0.5, 0.5);
    pub const BOTTOM_TOP: Marker = Marker::new(1.0, 0.0);
    pub const BOTTOM_BOTTOM: Marker = Marker::new(1.0, 1.0);

    pub const fn new(element: f32, viewport: f32) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this marker is reached
    pub fn offset(&self, trigger: &ElementRect, viewport_height: f32) -> f32 {
        trigger.top + trigger.height * self.element - viewport_height * self.viewport
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scrub {
    /// Displayed progress equals scroll progress
    Direct,
    /// Displayed progress catches up with scroll progress over about this many seconds
    Smoothed(f32),
}

struct Track {
    target: TargetRef,
    channel: Channel,
    from: f32,
    to: f32,
}

pub struct ScrollBinding {
    trigger: ElementRect,
    start: Marker,
    end: Marker,
    scrub: Scrub,
    tracks: Vec<Track>,
    goal: f32,
    displayed: Option<f32>,
}

impl ScrollBinding {
    pub fn new(trigger: ElementRect, start: Marker, end: Marker) -> Self {
        Self {
            trigger,
            start,
            end,
            scrub: Scrub::Direct,
            tracks: Vec::new(),
            goal: 0.0,
            displayed: None,
        }
    }

    pub fn scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = scrub;
        self
    }

    pub fn track(mut self, target: TargetRef, channel: Channel, from: f32, to: f32) -> Self {
        self.tracks.push(Track {
            target,
            channel,
            from,
            to,
        });
        self
    }

    pub fn color_track(self, target: TargetRef, from: Color, to: Color) -> Self {
        self.track(target.clone(), Channel::ColorR, from.r, to.r)
            .track(target.clone(), Channel::ColorG, from.g, to.g)
            .track(target, Channel::ColorB, from.b, to.b)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Start and end scroll offsets for the given viewport
    pub fn range(&self, viewport: &Viewport) -> (f32, f32) {
        (
            self.start.offset(&self.trigger, viewport.height),
            self.end.offset(&self.trigger, viewport.height),
        )
    }

    /// Progress in `[0, 1]` for the viewport's scroll offset
    pub fn progress(&self, viewport: &Viewport) -> f32 {
        let (start, end) = self.range(viewport);
        progress_at(viewport.scroll_y, start, end)
    }

    /// Progress currently written to the targets
    pub fn displayed_progress(&self) -> f32 {
        self.displayed.unwrap_or(self.goal)
    }

    /// Scroll input; direct bindings write immediately
    pub fn apply(&mut self, viewport: &Viewport) {
        self.goal = self.progress(viewport);
        match (self.scrub, self.displayed) {
            (Scrub::Smoothed(_), Some(_)) => {}
            _ => self.show(self.goal),
        }
    }

    /// Time step for smoothed bindings
    pub fn tick(&mut self, dt: f32) {
        let Scrub::Smoothed(lag) = self.scrub else {
            return;
        };
        let Some(current) = self.displayed else {
            return;
        };
        if current == self.goal {
            return;
        }
        let blend = if lag > 0.0 { 1.0 - (-dt.max(0.0) / lag).exp() } else { 1.0 };
        let mut next = current + (self.goal - current) * blend;
        if (self.goal - next).abs() < 1e-4 {
            next = self.goal;
        }
        self.show(next);
    }

    fn show(&mut self, progress: f32) {
        self.displayed = Some(progress);
        for track in &self.tracks {
            track
                .target
                .write(track.channel, track.from + (track.to - track.from) * progress);
        }
    }
}

/// Clamped linear progress of `scroll` through `[start, end]`
///
/// A collapsed range behaves as a step at `start`.
pub fn progress_at(scroll: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if scroll >= start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / (end - start)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::gfx::scene::node::Node;

    fn viewport(scroll_y: f32) -> Viewport {
        Viewport::new(1000.0, 800.0).scrolled_to(scroll_y)
    }

    #[test]
    fn test_markers_resolve_against_trigger() {
        let trigger = ElementRect::new(1000.0, 2000.0);
        assert_eq!(Marker::TOP_TOP.offset(&trigger, 800.0), 1000.0);
        assert_eq!(Marker::TOP_BOTTOM.offset(&trigger, 800.0), 200.0);
        assert_eq!(Marker::BOTTOM_BOTTOM.offset(&trigger, 800.0), 2200.0);
    }

    #[test]
    fn test_progress_endpoints_and_clamp() {
        let binding = ScrollBinding::new(ElementRect::new(0.0, 1800.0), Marker::TOP_TOP, Marker::BOTTOM_BOTTOM);
        assert_eq!(binding.range(&viewport(0.0)), (0.0, 1000.0));
        assert_eq!(binding.progress(&viewport(0.0)), 0.0);
        assert_eq!(binding.progress(&viewport(1000.0)), 1.0);
        assert_eq!(binding.progress(&viewport(250.0)), 0.25);
        assert_eq!(binding.progress(&viewport(5000.0)), 1.0);
    }

    #[test]
    fn test_scrub_reverses_without_hysteresis() {
        let node: TargetRef = Node::group("model").into_ref();
        let mut binding = ScrollBinding::new(ElementRect::new(0.0, 1800.0), Marker::TOP_TOP, Marker::BOTTOM_BOTTOM)
            .track(node.clone(), Channel::PositionZ, 0.0, -4.0)
            .track(node.clone(), Channel::RotationY, 0.0, 1.0);

        let path: Vec<f32> = (0..=20).map(|i| i as f32 * 50.0).collect();
        let mut forward = Vec::new();
        for &y in &path {
            binding.apply(&viewport(y));
            forward.push((node.read(Channel::PositionZ), node.read(Channel::RotationY)));
        }
        let mut backward = Vec::new();
        for &y in path.iter().rev() {
            binding.apply(&viewport(y));
            backward.push((node.read(Channel::PositionZ), node.read(Channel::RotationY)));
        }
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward[0], (Some(0.0), Some(0.0)));
        assert_eq!(forward[20], (Some(-4.0), Some(1.0)));
    }

    #[test]
    fn test_color_track_interpolates_all_channels() {
        let color = Rc::new(RefCell::new(Color::BLACK));
        let mut binding = ScrollBinding::new(ElementRect::new(0.0, 1800.0), Marker::TOP_TOP, Marker::BOTTOM_BOTTOM)
            .color_track(color.clone(), Color::BLACK, Color::WHITE);
        assert_eq!(binding.track_count(), 3);

        binding.apply(&viewport(500.0));
        assert_eq!(*color.borrow(), Color::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_smoothed_scrub_lags_then_settles() {
        let node: TargetRef = Node::group("light").into_ref();
        let mut binding = ScrollBinding::new(ElementRect::new(0.0, 1800.0), Marker::TOP_TOP, Marker::BOTTOM_BOTTOM)
            .scrub(Scrub::Smoothed(0.5))
            .track(node.clone(), Channel::PositionY, 0.0, 10.0);

        binding.apply(&viewport(0.0));
        binding.apply(&viewport(1000.0));
        assert_eq!(binding.progress(&viewport(1000.0)), 1.0);
        assert_eq!(binding.displayed_progress(), 0.0);

        binding.tick(0.1);
        let partway = binding.displayed_progress();
        assert!(partway > 0.0 && partway < 1.0);

        for _ in 0..200 {
            binding.tick(0.05);
        }
        assert_eq!(binding.displayed_progress(), 1.0);
        assert_eq!(node.read(Channel::PositionY), Some(10.0));
    }

    #[test]
    fn test_collapsed_range_is_a_step() {
        assert_eq!(progress_at(9.0, 10.0, 10.0), 0.0);
        assert_eq!(progress_at(10.0, 10.0, 10.0), 1.0);
    }
}
