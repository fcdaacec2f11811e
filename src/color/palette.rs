use serde::Deserialize;

use crate::foundation::core::{Lerp, Rgb};
use crate::foundation::math::noise01;

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj { r: f64, g: f64, b: f64 },
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

pub(crate) fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }
    let r = hex_byte(&s[0..2])?;
    let g = hex_byte(&s[2..4])?;
    let b = hex_byte(&s[4..6])?;

    Ok(Rgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    ))
}

/// Two named colors a formation pulses between while held.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Base color; morphs blend between the primaries of their endpoints.
    pub primary: Rgb,
    /// Pulse partner of `primary`.
    pub secondary: Rgb,
}

impl PaletteEntry {
    /// Build a palette entry.
    pub fn new(primary: Rgb, secondary: Rgb) -> Self {
        Self { primary, secondary }
    }

    /// Slow pulse between `primary` and `secondary` at `hz` cycles per second.
    ///
    /// Starts on `primary` at `t = 0`.
    pub fn pulse(&self, t: f64, hz: f64) -> Rgb {
        let w = 0.5 - 0.5 * (std::f64::consts::TAU * hz * t).cos();
        Rgb::lerp(&self.primary, &self.secondary, w)
    }
}

/// Hue in degrees `[0, 360)` and HSL saturation in `[0, 1]`.
pub(crate) fn hue_saturation(c: Rgb) -> (f64, f64) {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let d = max - min;
    if d <= f64::EPSILON {
        return (0.0, 0.0);
    }

    let l = (max + min) * 0.5;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == c.r {
        ((c.g - c.b) / d).rem_euclid(6.0)
    } else if max == c.g {
        (c.b - c.r) / d + 2.0
    } else {
        (c.r - c.g) / d + 4.0
    };
    (h * 60.0, s.clamp(0.0, 1.0))
}

/// Brighten near-yellow colors by up to `1 + amount`.
///
/// Weight peaks at 60° hue and fades to nothing 30° either side, scaled by saturation, so greys
/// and whites are untouched.
pub fn boost_yellow(c: Rgb, amount: f64) -> Rgb {
    if amount <= 0.0 {
        return c;
    }
    let (h, s) = hue_saturation(c);
    let w = (1.0 - (h - 60.0).abs() / 30.0).max(0.0) * s;
    if w <= 0.0 {
        return c;
    }
    c.scale(1.0 + amount * w).clamped()
}

/// Per-point brightness factor `1 + amount * (1 + n)` with `n` in `[0, 1)`.
///
/// `n` is a hash of `(index, tick)`, so a frame is reproducible and neighbours flicker
/// independently.
pub fn sparkle(index: usize, tick: u64, amount: f64) -> f64 {
    if amount == 0.0 {
        return 1.0;
    }
    let n = noise01(tick.wrapping_mul(0x2545_F491_4F6C_DD1D), index as u64);
    1.0 + amount * (1.0 + n)
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
