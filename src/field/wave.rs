use crate::formation::FlagSpec;

/// Closed-form cloth flutter for a flag fixed along its left (pole) edge.
///
/// Pure and stateless; safe to evaluate for every point in parallel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveField {
    /// Left edge of the flag in world x.
    pub x_min: f64,
    /// Flag width in world units.
    pub width: f64,
}

impl WaveField {
    /// Field spanning a flag laid out by `spec`.
    pub fn for_flag(spec: &FlagSpec) -> Self {
        Self {
            x_min: -spec.width / 2.0,
            width: spec.width,
        }
    }

    /// Position across the flag in `[0, 1]`, 0 at the pole.
    pub fn normalized_x(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.x_min) / self.width).clamp(0.0, 1.0)
    }

    /// Depth displacement at `(x, y)` and time `t` seconds.
    pub fn offset(&self, x: f64, y: f64, t: f64, amplitude: f64) -> f64 {
        let nx = self.normalized_x(x);
        let primary = (nx * 6.0 - t * 3.0).sin();
        let secondary = 0.4 * (nx * 11.0 + y * 0.3 - t * 4.7).sin();
        let ripple = 0.25 * (nx * 19.0 - y * 0.5 - t * 7.3).sin();
        // The pole side barely moves; the free edge billows.
        let edge = 0.05 + 0.95 * nx * nx;
        (primary + secondary + ripple) * edge * amplitude
    }

    /// Small vertical sway layered on top of the depth flutter.
    pub fn sway(&self, x: f64, t: f64, amplitude: f64) -> f64 {
        (x * 0.2 + t * 1.5).sin() * 0.1 * amplitude
    }
}

impl Default for WaveField {
    fn default() -> Self {
        Self::for_flag(&FlagSpec::default())
    }
}

/// [`WaveField::offset`] for the default flag layout.
pub fn wave_offset(x: f64, y: f64, t: f64, amplitude: f64) -> f64 {
    WaveField::default().offset(x, y, t, amplitude)
}

#[cfg(test)]
#[path = "../../tests/unit/field/wave.rs"]
mod tests;
