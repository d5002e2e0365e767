use bevy::prelude::*;

use super::range::Range2D;

/// Screen-pixel distance below which a dragger move is dropped as
/// floating-point noise.
pub const REPOSITION_TOLERANCE: f32 = 1.0;

/// Resolved geometry of a slider track and its drag handle, in logical
/// pixels. The handle's top-left corner travels inside
/// `track_size - handle_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMetrics {
    pub track_size: Vec2,
    pub handle_size: Vec2,
}

impl TrackMetrics {
    pub fn new(track_size: Vec2, handle_size: Vec2) -> Self {
        Self {
            track_size,
            handle_size,
        }
    }

    fn usable(&self) -> Vec2 {
        self.track_size - self.handle_size
    }

    /// Maps a handle top-left position to a value in `range`.
    ///
    /// The position is clamped to the usable track extent before mapping,
    /// so the result is in range by construction even for pointer
    /// positions far outside the track. Returns `None` while either axis
    /// is degenerate (layout not resolved yet, or the handle fills the
    /// track).
    pub fn value_at(&self, position: Vec2, range: &Range2D) -> Option<Vec2> {
        let usable = self.usable();
        if usable.x.abs() < f32::EPSILON || usable.y.abs() < f32::EPSILON {
            return None;
        }

        let nx = position.x.min(usable.x).max(0.0) / usable.x;
        // Top of the track is the axis maximum.
        let ny = 1.0 - position.y.min(usable.y).max(0.0) / usable.y;

        Some(range.lerp_unclamped(Vec2::new(nx, ny)))
    }

    /// Handle top-left for `value`: the value's normalized position over
    /// the full track, y inverted, centered on the handle.
    pub fn handle_position(&self, value: Vec2, range: &Range2D) -> Vec2 {
        let normalized = range.normalize(value);
        Vec2::new(
            normalized.x * self.track_size.x - self.handle_size.x * 0.5,
            (1.0 - normalized.y) * self.track_size.y - self.handle_size.y * 0.5,
        )
    }
}

/// Whether the dragger moved far enough from `current` to be worth a
/// layout write.
pub fn needs_reposition(current: Vec2, target: Vec2) -> bool {
    (target.x - current.x).abs() >= REPOSITION_TOLERANCE
        || (target.y - current.y).abs() >= REPOSITION_TOLERANCE
}

/// Single-axis position→value mapping used by the 1D slider rows. Same
/// clamp-before-map contract as [`TrackMetrics::value_at`]; `inverted`
/// axes map position 0 to the maximum.
pub fn axis_value_at(
    position: f32,
    track: f32,
    handle: f32,
    min: f32,
    max: f32,
    inverted: bool,
) -> Option<f32> {
    let usable = track - handle;
    if usable.abs() < f32::EPSILON {
        return None;
    }

    let mut n = position.min(usable).max(0.0) / usable;
    if inverted {
        n = 1.0 - n;
    }
    Some(min + (max - min) * n)
}

/// Single-axis handle position for `value`.
pub fn axis_handle_position(
    value: f32,
    track: f32,
    handle: f32,
    min: f32,
    max: f32,
    inverted: bool,
) -> f32 {
    let span = max - min;
    let mut n = if span == 0.0 { 0.0 } else { (value - min) / span };
    if inverted {
        n = 1.0 - n;
    }
    n * track - handle * 0.5
}
