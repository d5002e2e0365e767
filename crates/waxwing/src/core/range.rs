use bevy::prelude::*;

/// Two-dimensional value range of a [`Slider2D`](crate::ui::slider2d::Slider2D).
///
/// Bounds are stored as passed. Callers may construct a range with
/// reversed bounds on either axis; [`Range2D::clamp`] sorts per axis
/// before clamping, so clamped values are always inside the effective
/// low/high interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range2D {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Range2D {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::ONE,
        }
    }
}

impl Range2D {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Effective per-axis (low, high) bounds, sorted.
    pub fn sorted(&self) -> (Vec2, Vec2) {
        (self.min.min(self.max), self.min.max(self.max))
    }

    pub fn clamp(&self, value: Vec2) -> Vec2 {
        let (low, high) = self.sorted();
        value.clamp(low, high)
    }

    /// Maps a value into [0, 1]² of the range. A zero-span axis maps to 0.
    pub fn normalize(&self, value: Vec2) -> Vec2 {
        let span = self.max - self.min;
        Vec2::new(
            if span.x == 0.0 {
                0.0
            } else {
                (value.x - self.min.x) / span.x
            },
            if span.y == 0.0 {
                0.0
            } else {
                (value.y - self.min.y) / span.y
            },
        )
    }

    /// Unclamped linear interpolation between the raw bounds.
    pub fn lerp_unclamped(&self, t: Vec2) -> Vec2 {
        self.min + (self.max - self.min) * t
    }
}

/// Single-axis clamp tolerating reversed bounds, used by the 1D slider.
pub fn axis_clamp(value: f32, min: f32, max: f32) -> f32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    value.clamp(low, high)
}
