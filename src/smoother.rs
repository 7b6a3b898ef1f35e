// Exponential smoothing of the raw fingertip target into a steady cursor.

use crate::types::Point;

pub const DEFAULT_SMOOTHING: f32 = 0.35;

/// Largest usable factor. At 1.0 the cursor would land on the target itself.
const MAX_SMOOTHING: f32 = 1.0 - f32::EPSILON;

#[derive(Clone, Debug)]
pub struct Smoother {
    factor: f32,
    cursor: Option<Point>, // None until the first target arrives
}

impl Smoother {
    /// `factor` is the share of the remaining distance covered per update,
    /// clamped into the open interval (0, 1).
    pub fn new(factor: f32) -> Self {
        Self { factor: factor.clamp(f32::EPSILON, MAX_SMOOTHING), cursor: None }
    }

    /// Blend toward `target` and return the new cursor.
    /// The first target is adopted as-is so the cursor never sweeps in from the origin.
    pub fn update(&mut self, target: Point) -> Point {
        let next = match self.cursor {
            None => target,
            Some(c) => c + (target - c) * self.factor,
        };
        self.cursor = Some(next);
        next
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = None;
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING)
    }
}
