/// Color cycle - phase accumulator animating the quad color

use glam::Vec4;

/// Phase increment per frame, in degrees
pub const DEFAULT_PHASE_STEP: f32 = 0.01;

/// Phase accumulator wrapped to `[0, 360)` degrees
///
/// Each frame advances the phase by `step`; the red channel follows
/// `sin(phase)` while green, blue and alpha stay fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCycle {
    phase: f32,
    step: f32,
}

impl ColorCycle {
    /// Green, blue and alpha channels of every color
    pub const FIXED_GBA: [f32; 3] = [0.2, 0.5, 1.0];

    /// Start at phase 0 with the given step (non-finite steps become 0)
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() { step } else { 0.0 };
        Self { phase: 0.0, step }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Advance one frame and return the new phase
    pub fn advance(&mut self) -> f32 {
        self.phase = wrap_degrees(self.phase + self.step);
        self.phase
    }

    /// Color for the current phase
    pub fn color(&self) -> Vec4 {
        let [g, b, a] = Self::FIXED_GBA;
        Vec4::new(self.phase.to_radians().sin(), g, b, a)
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_STEP)
    }
}

/// Wrap an angle to `[0, 360)`
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
#[path = "color_cycle_tests.rs"]
mod tests;
