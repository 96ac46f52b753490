use std::collections::VecDeque;

use super::tween::Tween;

enum Step {
    Tween(Tween),
    Call(Box<dyn FnOnce()>),
}

/// Sequence of tweens with callbacks between them
///
/// Steps run strictly in order. A callback fires on the frame its
/// predecessor finishes, before the next tween reads its start values.
#[derive(Default)]
pub struct Timeline {
    steps: VecDeque<Step>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, tween: Tween) -> Self {
        self.steps.push_back(Step::Tween(tween));
        self
    }

    pub fn call(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.steps.push_back(Step::Call(Box::new(callback)));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn remaining_steps(&self) -> usize {
        self.steps.len()
    }

    /// Same contract as [`Tween::advance`]; leftover time flows into the next step
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        let mut budget = dt;
        while let Some(step) = self.steps.front_mut() {
            match step {
                Step::Tween(tween) => match tween.advance(budget) {
                    Some(leftover) => {
                        budget = leftover;
                        self.steps.pop_front();
                    }
                    None => return None,
                },
                Step::Call(_) => {
                    if let Some(Step::Call(callback)) = self.steps.pop_front() {
                        callback();
                    }
                }
            }
        }

        if let Some(done) = self.on_complete.take() {
            done();
        }
        Some(budget)
    }
}
