//! Intervals over the ray parameter t.
//!
//! Every intersection query carries an [`Interval`] restricting which t
//! values count as a hit; the aggregate shrinks it as closer hits are found.

/// Closed interval [min, max] of ray parameters.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Interval {
    /// Interval containing nothing (min > max).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Interval containing every real number.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Create an interval with the given bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// True if x lies within the interval, bounds included.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// True if x lies strictly between the bounds.
    ///
    /// Hit acceptance uses this form so a hit exactly at the shrunken far
    /// bound (the previous closest hit) is not re-reported.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp x to the interval bounds.
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
