use serde::Serialize;

use crate::foundation::core::{PointRecord, Rgb};

/// Result of one [`crate::SwarmEngine::update`] call.
///
/// Borrows the engine's buffers; nothing is copied per frame. Exactly one of `colors` and
/// `color` is set, depending on the show's coloring mode.
#[derive(Clone, Copy, Debug)]
pub struct FrameResult<'a> {
    /// One entry per drone, in formation index order.
    pub positions: &'a [PointRecord],
    /// Per-drone colors (image coloring). Channels may exceed 1 where sparkle brightens them.
    pub colors: Option<&'a [Rgb]>,
    /// Single color for every drone this frame (palette coloring).
    pub color: Option<Rgb>,
    /// Name of the active phase.
    pub phase: &'a str,
    /// Index of the active phase.
    pub phase_index: usize,
    /// Progress through the active phase in `[0, 1]`.
    pub progress: f64,
    /// Seconds since start or last reset.
    pub elapsed: f64,
    /// `true` when this update crossed into a new phase.
    pub phase_changed: bool,
}

impl FrameResult<'_> {
    /// Color of drone `i`, whichever mode is active.
    pub fn color_of(&self, i: usize) -> Rgb {
        match (self.colors, self.color) {
            (Some(colors), _) => colors[i],
            (None, Some(c)) => c,
            (None, None) => Rgb::WHITE,
        }
    }

    /// Owned copy for serialization or for handing to another thread.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase.to_owned(),
            phase_index: self.phase_index,
            progress: self.progress,
            elapsed: self.elapsed,
            positions: self.positions.to_vec(),
            colors: self.colors.map(<[Rgb]>::to_vec),
            color: self.color,
        }
    }
}

/// Owned, serializable copy of a [`FrameResult`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    /// Name of the active phase.
    pub phase: String,
    /// Index of the active phase.
    pub phase_index: usize,
    /// Progress through the active phase.
    pub progress: f64,
    /// Seconds since start or last reset.
    pub elapsed: f64,
    /// Drone positions.
    pub positions: Vec<PointRecord>,
    /// Per-drone colors, when image coloring is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Rgb>>,
    /// Global color, when palette coloring is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

/// Render-side size jitter for drone `i` at time `t`, in `[0.6, 1.0]`.
pub fn twinkle_scale(index: usize, t: f64) -> f64 {
    0.8 + (t * 5.0 + index as f64 * 0.1).sin() * 0.2
}
