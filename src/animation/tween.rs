use std::rc::Rc;

use crate::gfx::color::Color;

use super::{
    ease::Ease,
    target::{Channel, TargetRef},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Extra cycles after the first
    Count(u32),
    Infinite,
}

#[derive(Debug, Clone, Copy)]
struct PropTrack {
    channel: Channel,
    from: Option<f32>,
    to: f32,
}

/// Time-driven interpolation of one target's channels
///
/// Start values are read from the target on the first active frame (after
/// the delay), so a tween queued behind others starts from wherever they
/// left the target.
pub struct Tween {
    target: TargetRef,
    tracks: Vec<PropTrack>,
    duration: f32,
    delay: f32,
    ease: Ease,
    repeat: Repeat,
    yoyo: bool,
    overwrite: bool,
    elapsed: f32,
    started: bool,
}

impl Tween {
    pub fn to(target: TargetRef, duration: f32) -> Self {
        Self {
            target,
            tracks: Vec::new(),
            duration: duration.max(0.0),
            delay: 0.0,
            ease: Ease::default(),
            repeat: Repeat::Count(0),
            yoyo: false,
            overwrite: false,
            elapsed: 0.0,
            started: false,
        }
    }

    pub fn prop(mut self, channel: Channel, to: f32) -> Self {
        self.tracks.push(PropTrack {
            channel,
            from: None,
            to,
        });
        self
    }

    pub fn from_to(mut self, channel: Channel, from: f32, to: f32) -> Self {
        self.tracks.push(PropTrack {
            channel,
            from: Some(from),
            to,
        });
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.prop(Channel::ColorR, color.r)
            .prop(Channel::ColorG, color.g)
            .prop(Channel::ColorB, color.b)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Kill running tweens on the same target and channels when started
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn overwrites(&self) -> bool {
        self.overwrite
    }

    pub fn is_infinite(&self) -> bool {
        self.repeat == Repeat::Infinite
    }

    pub fn animates(&self, channel: Channel) -> bool {
        self.tracks.iter().any(|track| track.channel == channel)
    }

    /// True when both tweens drive at least one common channel of one target
    pub fn conflicts_with(&self, other: &Tween) -> bool {
        same_target(&self.target, &other.target)
            && self.tracks.iter().any(|track| other.animates(track.channel))
    }

    /// Moves the tween forward by `dt` seconds
    ///
    /// Returns `None` while running, or the unused part of `dt` once the
    /// tween has written its final values.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt.max(0.0);
        let local = self.elapsed - self.delay;
        if local < 0.0 {
            return None;
        }
        if !self.started {
            self.start();
        }

        if self.duration <= 0.0 {
            self.write(1.0);
            return Some(local);
        }

        if let Repeat::Count(extra) = self.repeat {
            let total = self.duration * (extra as f32 + 1.0);
            if local >= total {
                let ends_reversed = self.yoyo && extra % 2 == 1;
                self.write(if ends_reversed { 0.0 } else { 1.0 });
                return Some(local - total);
            }
        }

        let cycle = (local / self.duration).floor();
        let mut t = (local - cycle * self.duration) / self.duration;
        if self.yoyo && cycle as u64 % 2 == 1 {
            t = 1.0 - t;
        }
        self.write(self.ease.apply(t));
        None
    }

    fn start(&mut self) {
        self.started = true;
        for track in &mut self.tracks {
            if track.from.is_none() {
                track.from = Some(self.target.read(track.channel).unwrap_or(track.to));
            }
        }
    }

    fn write(&self, eased: f32) {
        for track in &self.tracks {
            let from = track.from.unwrap_or(track.to);
            self.target
                .write(track.channel, from + (track.to - from) * eased);
        }
    }
}

/// Identity of the animated object, ignoring which trait vtable points at it
pub fn same_target(a: &TargetRef, b: &TargetRef) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::node::Node;

    fn node() -> TargetRef {
        Node::group("n").into_ref()
    }

    #[test]
    fn test_reads_start_value_after_delay() {
        let target = node();
        let mut tween = Tween::to(target.clone(), 1.0)
            .prop(Channel::PositionY, 2.0)
            .delay(0.5);

        assert!(tween.advance(0.25).is_none());
        target.write(Channel::PositionY, 1.0);
        assert!(tween.advance(0.25).is_none());
        assert_eq!(target.read(Channel::PositionY), Some(1.0));

        assert!(tween.advance(0.5).is_none());
        assert_eq!(target.read(Channel::PositionY), Some(1.5));
        assert_eq!(tween.advance(0.75), Some(0.25));
        assert_eq!(target.read(Channel::PositionY), Some(2.0));
    }

    #[test]
    fn test_infinite_yoyo_never_finishes_and_reverses() {
        let target = node();
        let mut tween = Tween::to(target.clone(), 1.0)
            .from_to(Channel::RotationZ, 0.0, 1.0)
            .repeat(Repeat::Infinite)
            .yoyo(true);

        assert!(tween.advance(0.5).is_none());
        assert_eq!(target.read(Channel::RotationZ), Some(0.5));
        assert!(tween.advance(1.25).is_none());
        assert_eq!(target.read(Channel::RotationZ), Some(0.25));
        for _ in 0..100 {
            assert!(tween.advance(0.37).is_none());
        }
    }

    #[test]
    fn test_finite_yoyo_ends_at_start() {
        let target = node();
        let mut tween = Tween::to(target.clone(), 1.0)
            .from_to(Channel::PositionX, 0.0, 4.0)
            .repeat(Repeat::Count(1))
            .yoyo(true);
        assert_eq!(tween.advance(2.5), Some(0.5));
        assert_eq!(target.read(Channel::PositionX), Some(0.0));
    }

    #[test]
    fn test_conflicts_need_same_target_and_channel() {
        let a = node();
        let b = node();
        let x = Tween::to(a.clone(), 1.0).prop(Channel::PositionX, 1.0);
        let x_again = Tween::to(a.clone(), 1.0).prop(Channel::PositionX, 2.0);
        let y = Tween::to(a, 1.0).prop(Channel::PositionY, 1.0);
        let other = Tween::to(b, 1.0).prop(Channel::PositionX, 1.0);
        assert!(x.conflicts_with(&x_again));
        assert!(!x.conflicts_with(&y));
        assert!(!x.conflicts_with(&other));
    }
}
