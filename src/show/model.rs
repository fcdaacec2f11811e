use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::palette::PaletteEntry;
use crate::formation::FormationSpec;
use crate::foundation::core::Rgb;
use crate::timeline::phase::PhaseDef;
use crate::timeline::sequencer::EndPolicy;

/// JSON-facing description of a complete show: formations, phases, coloring and motion tuning.
///
/// Parse with [`Show::from_reader`] / [`Show::from_path`] and check with [`Show::validate`];
/// [`crate::SwarmEngine::new`] validates again before building anything.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Points per formation.
    pub drone_count: usize,
    /// Seed for formation jitter.
    #[serde(default)]
    pub seed: u64,
    /// Named formations referenced by phases.
    pub formations: BTreeMap<String, FormationSpec>,
    /// Ordered phase list; phase 0 is where every show starts and resets to.
    pub phases: Vec<PhaseDef>,
    /// What happens after the last phase.
    #[serde(default)]
    pub end: EndPolicy,
    /// Color strategy.
    #[serde(default)]
    pub coloring: Coloring,
    /// Motion tuning.
    #[serde(default)]
    pub motion: Motion,
}

/// How drones are colored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Coloring {
    /// Per-point color sampled from the subject image at each point's texture coordinate.
    Image(ImageColoring),
    /// One global color per frame, taken from per-formation palettes.
    Palette(PaletteColoring),
}

impl Default for Coloring {
    fn default() -> Self {
        Self::Image(ImageColoring::default())
    }
}

/// Settings for [`Coloring::Image`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageColoring {
    /// Color used during the opening hold and while no image is loaded.
    pub accent: Rgb,
    /// Extra brightness for near-yellow samples, `0` disables.
    pub yellow_boost: f64,
    /// Per-point brightness jitter on sampled colors, `0` disables.
    pub sparkle: f64,
}

impl Default for ImageColoring {
    fn default() -> Self {
        Self {
            accent: Rgb::CYAN,
            yellow_boost: 0.25,
            sparkle: 0.1,
        }
    }
}

/// Settings for [`Coloring::Palette`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteColoring {
    /// Palette per formation name.
    pub palettes: BTreeMap<String, PaletteEntry>,
    /// Pulse frequency while holding a formation.
    #[serde(default = "default_pulse_hz")]
    pub pulse_hz: f64,
}

fn default_pulse_hz() -> f64 {
    0.5
}

/// Amplitudes and stagger tuning shared by all phases.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    /// Flag flutter strength.
    pub wave_amplitude: f64,
    /// Vertical hover amplitude during hold phases.
    pub hover_amplitude: f64,
    /// Maximum morph start delay, as a fraction of the phase.
    pub stagger_spread: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            wave_amplitude: 1.5,
            hover_amplitude: 0.02,
            stagger_spread: 0.3,
        }
    }
}
