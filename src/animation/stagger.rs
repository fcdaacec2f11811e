/// Per-point start delay for morphs.
///
/// A point whose destination has texture coordinate `v` starts moving once global phase progress
/// passes `v * spread`, then covers the remaining progress range at a proportionally faster rate,
/// so every point still arrives when the phase ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    spread: f64,
}

impl Stagger {
    /// `spread` is the start offset of a point with `v = 1`; clamped into `[0, 0.95]`.
    pub fn new(spread: f64) -> Self {
        Self {
            spread: if spread.is_finite() {
                spread.clamp(0.0, 0.95)
            } else {
                0.0
            },
        }
    }

    /// Start offset for a destination `v` coordinate.
    pub fn offset(self, v: f64) -> f64 {
        v.clamp(0.0, 1.0) * self.spread
    }

    /// Remap global progress into this point's own progress in `[0, 1]`.
    pub fn local_progress(self, progress: f64, v: f64) -> f64 {
        let s = self.offset(v);
        ((progress - s) / (1.0 - s)).clamp(0.0, 1.0)
    }
}

impl Default for Stagger {
    fn default() -> Self {
        Self::new(0.3)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
