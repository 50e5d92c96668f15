use crate::atom::model::SpinRates;
use crate::ui::ViewSettings;

/// Elapsed animation time that only advances while motion is live.
///
/// Freezing stops the accumulator itself, so unfreezing resumes from the
/// same angle instead of jumping ahead by the paused duration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionClock {
    elapsed: f32,
}

impl MotionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, delta: f32, frozen: bool) -> f32 {
        if !frozen && is_forward_step(delta) {
            self.elapsed += delta;
        }
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

fn is_forward_step(delta: f32) -> bool {
    delta.is_finite() && delta > 0.0
}

/// Clock plus the accumulated rotation of the atom group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AtomMotion {
    pub clock: MotionClock,
    pub rotation_x: f32,
    pub rotation_y: f32,
}

impl AtomMotion {
    pub fn advance(&mut self, delta: f32, view: &ViewSettings, spin: SpinRates) {
        self.clock.advance(delta, view.freeze_motion);
        if view.rotate_atom && !view.freeze_motion && is_forward_step(delta) {
            self.rotation_x += delta * spin.x;
            self.rotation_y += delta * spin.y;
        }
    }

    pub fn time(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
