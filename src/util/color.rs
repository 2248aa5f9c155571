//! Per-part display colours.
//!
//! Parts are tinted so neighbouring pieces of an assembly are easy to tell
//! apart. Two sources:
//! - **Palette**: evenly spaced hues around the wheel, repeating every
//!   `size` parts.
//! - **Random**: an independent uniform RGB triple per part.

use rand::Rng;

/// Convert HSL (each component in [0, 1]) to linear RGB.
///
/// Hue wraps; saturation and lightness are clamped.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Evenly spaced hue wheel with fixed saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Number of distinct hues before the wheel repeats.
    pub size: u32,
    /// HSL saturation.
    pub saturation: f32,
    /// HSL lightness.
    pub lightness: f32,
}

impl Palette {
    /// Colour of the `index`-th part.
    #[must_use]
    pub fn color(&self, index: usize) -> [f32; 3] {
        let size = self.size.max(1) as f32;
        let hue = (index as f32 / size) % 1.0;
        hsl_to_rgb(hue, self.saturation, self.lightness)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            size: 20,
            saturation: 0.6,
            lightness: 0.5,
        }
    }
}

/// Uniform random RGB colour.
pub fn random_color(rng: &mut impl Rng) -> [f32; 3] {
    [rng.random(), rng.random(), rng.random()]
}
