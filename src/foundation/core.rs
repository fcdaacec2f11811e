/// Normalized texture coordinate into a reference raster (`u` left→right, `v` top→bottom).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Uv {
    /// Horizontal coordinate in `[0, 1]`.
    pub u: f64,
    /// Vertical coordinate in `[0, 1]`.
    pub v: f64,
}

impl Uv {
    /// Construct a texture coordinate.
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

/// One drone: a 3D position plus an optional texture coordinate.
///
/// A point's identity is its index inside a formation; index `i` of every formation in a show
/// refers to the same drone.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointRecord {
    /// X (right).
    pub x: f64,
    /// Y (up).
    pub y: f64,
    /// Z (towards the viewer).
    pub z: f64,
    /// Texture coordinate assigned at generation time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<Uv>,
}

impl PointRecord {
    /// Point without a texture coordinate.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, uv: None }
    }

    /// Point carrying a texture coordinate.
    pub fn with_uv(x: f64, y: f64, z: f64, uv: Uv) -> Self {
        Self {
            x,
            y,
            z,
            uv: Some(uv),
        }
    }

    /// `v` coordinate, or 0 when the point has none.
    pub fn v_or_zero(&self) -> f64 {
        self.uv.map_or(0.0, |uv| uv.v)
    }

    /// `true` when every spatial coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Linear RGB color with `f64` channels, nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Opaque white, the sampler's "no image" answer.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Cyan accent used before a flag image is shown.
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0);

    /// Construct a color from channel values.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Clamp every channel into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Convert to straight RGBA8 (opaque), clamping each channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), 255]
    }
}

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Interpolate from `a` (t = 0) to `b` (t = 1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            r: f64::lerp(&a.r, &b.r, t),
            g: f64::lerp(&a.g, &b.g, t),
            b: f64::lerp(&a.b, &b.b, t),
        }
    }
}

impl Lerp for PointRecord {
    // Only the position blends; the texture coordinate comes from the destination.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x: f64::lerp(&a.x, &b.x, t),
            y: f64::lerp(&a.y, &b.y, t),
            z: f64::lerp(&a.z, &b.z, t),
            uv: b.uv,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
