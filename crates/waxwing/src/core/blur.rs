//! Planning half of the backdrop blur: validated settings, the per-blit
//! offset schedule and the backdrop UV remap. The render feature in
//! [`crate::render::blur`] executes the plan.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSES: u32 = 2;
pub const MAX_PASSES: u32 = 15;
pub const MIN_DOWNSAMPLE: u32 = 1;
pub const MAX_DOWNSAMPLE: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlurConfigError {
    #[error("blur pass count {0} outside {MIN_PASSES}..={MAX_PASSES}")]
    PassCount(u32),
    #[error("blur downsample factor {0} outside {MIN_DOWNSAMPLE}..={MAX_DOWNSAMPLE}")]
    Downsample(u32),
}

/// Backdrop blur configuration.
///
/// Below two passes the ping-pong schedule is meaningless, so the
/// configuration boundary clamps rather than letting an unusable pass
/// count through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurSettings {
    pub passes: u32,
    pub downsample: u32,
    /// Resolve the final pass back into the camera target instead of the
    /// named output slot.
    pub copy_to_framebuffer: bool,
    /// Debug label of the output texture consumers sample.
    pub target_name: String,
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self {
            passes: 6,
            downsample: 2,
            copy_to_framebuffer: false,
            target_name: "waxwing_blur".into(),
        }
    }
}

impl BlurSettings {
    pub fn check(&self) -> Result<(), BlurConfigError> {
        if !(MIN_PASSES..=MAX_PASSES).contains(&self.passes) {
            return Err(BlurConfigError::PassCount(self.passes));
        }
        if !(MIN_DOWNSAMPLE..=MAX_DOWNSAMPLE).contains(&self.downsample) {
            return Err(BlurConfigError::Downsample(self.downsample));
        }
        Ok(())
    }

    /// Clamps out-of-range fields back into the supported ranges, with a
    /// warning; never fatal.
    pub fn validated(self) -> Self {
        match self.check() {
            Ok(()) => self,
            Err(err) => {
                warn!("invalid blur settings ({err}), clamping");
                Self {
                    passes: self.passes.clamp(MIN_PASSES, MAX_PASSES),
                    downsample: self.downsample.clamp(MIN_DOWNSAMPLE, MAX_DOWNSAMPLE),
                    ..self
                }
            }
        }
    }
}

/// Per-blit kernel offsets: a widened seed pass, then a linearly growing
/// kernel. One entry per blit, alternating ping↔pong.
pub fn pass_offsets(passes: u32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(passes as usize);
    offsets.push(1.5);
    for i in 1..passes.saturating_sub(1) {
        offsets.push(0.5 + i as f32);
    }
    if passes > 1 {
        offsets.push(0.5 + (passes - 1) as f32);
    }
    offsets
}

/// Normalized sub-rectangle of the full blurred frame covered by `panel`,
/// both rectangles in the same (world/screen) space. A panel covering the
/// whole root maps to {0,0}..{1,1}.
pub fn backdrop_uv(panel: Rect, root: Rect) -> Rect {
    if root.width() <= 0.0 || root.height() <= 0.0 {
        return Rect::new(0.0, 0.0, 1.0, 1.0);
    }
    Rect::new(
        (panel.min.x - root.min.x) / root.width(),
        (panel.min.y - root.min.y) / root.height(),
        (panel.max.x - root.min.x) / root.width(),
        (panel.max.y - root.min.y) / root.height(),
    )
}

/// Texel-space source rectangle for sampling a texture of `texture_size`.
pub fn source_rect(uv: Rect, texture_size: Vec2) -> Rect {
    Rect::from_corners(uv.min * texture_size, uv.max * texture_size)
}
