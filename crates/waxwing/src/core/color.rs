//! Canonical picker color state.
//!
//! The single source of truth is HSV plus alpha. RGB is always derived:
//! reconstructing hue from a near-gray RGB value is ambiguous, so editing
//! one RGB channel decodes the current color, patches the channel and
//! re-encodes.

/// A color channel addressed by the RGB slider rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

/// Which dependent visuals must refresh after a bridge operation.
///
/// The control that originated a change already displays the right value
/// and is never rewritten; handing this decision back as a value (rather
/// than ambient flags) is what breaks the mutual-update cycle between the
/// hue bar, the gradient square and the RGB rows, and keeps the expensive
/// gradient rebake off the paths that do not move the hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPlan {
    pub update_hue: bool,
    pub update_gradient: bool,
}

/// HSV + alpha, all components in [0, 1]. Hue is stored in turns; the hue
/// slider's degree domain converts at the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsva {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub a: f32,
}

impl Default for Hsva {
    fn default() -> Self {
        // opaque white
        Self {
            h: 0.0,
            s: 0.0,
            v: 1.0,
            a: 1.0,
        }
    }
}

impl Hsva {
    pub fn from_rgba(rgba: [f32; 4]) -> Self {
        let (h, s, v) = rgb_to_hsv(rgba[0], rgba[1], rgba[2]);
        Self {
            h,
            s,
            v,
            a: rgba[3],
        }
    }

    pub fn to_rgba(self) -> [f32; 4] {
        let (r, g, b) = hsv_to_rgb(self.h, self.s, self.v);
        [r, g, b, self.a]
    }

    pub fn hue_degrees(&self) -> f32 {
        self.h * 360.0
    }

    /// Overwrites one RGB channel, re-deriving the canonical state.
    pub fn set_rgb_channel(&mut self, channel: RgbChannel, value: f32) -> SyncPlan {
        let (mut r, mut g, mut b) = hsv_to_rgb(self.h, self.s, self.v);
        match channel {
            RgbChannel::Red => r = value,
            RgbChannel::Green => g = value,
            RgbChannel::Blue => b = value,
        }
        let (h, s, v) = rgb_to_hsv(r, g, b);
        self.h = h;
        self.s = s;
        self.v = v;
        SyncPlan {
            update_hue: true,
            update_gradient: true,
        }
    }

    /// Hue slider edit; the slider's domain is degrees [0, 360).
    pub fn set_hue_degrees(&mut self, degrees: f32) -> SyncPlan {
        self.h = degrees / 360.0;
        SyncPlan {
            update_hue: false,
            update_gradient: true,
        }
    }

    /// Gradient-square edit: x is saturation, y is value.
    pub fn set_saturation_value(&mut self, s: f32, v: f32) -> SyncPlan {
        self.s = s;
        self.v = v;
        SyncPlan {
            update_hue: false,
            update_gradient: false,
        }
    }

    pub fn set_alpha(&mut self, a: f32) {
        self.a = a;
    }
}

/// HSV → RGB, hue in turns.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(1.0) * 360.0;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// RGB → HSV, hue in turns.
///
/// Hue is undefined at zero saturation or zero value and comes back as 0
/// there, so the conversion is not invertible in that region.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max == 0.0 { 0.0 } else { delta / max };

    (h / 360.0, s, max)
}

/// Slider display rounding (3 decimals). Canonical state keeps full
/// precision.
pub fn display_value(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
