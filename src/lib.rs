//! AeroPulse is a drone-swarm formation animation engine.
//!
//! Thousands of points ("drones") hover over procedurally generated formations, morph between
//! them with a staggered eased sweep, and flutter like cloth over a flag, colored per point from
//! a subject image or from per-formation palettes. Everything is derived from elapsed time, so a
//! frame is reproducible from `(show, image, time)` alone.
//!
//! - Describe (or pick a preset) [`Show`]
//! - Build a [`SwarmEngine`]
//! - Call [`SwarmEngine::update`] once per frame and draw the returned [`FrameResult`]
//!
//! Subject images are decoded off-thread by a [`FlagLoader`]; results for a subject that has since
//! changed are discarded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod color;
pub(crate) mod engine;
pub(crate) mod field;
/// Formation generators.
pub mod formation;
pub(crate) mod show;
pub(crate) mod timeline;

pub use crate::foundation::core::{Lerp, PointRecord, Rgb, Uv};
pub use crate::foundation::error::{SwarmError, SwarmResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::ease::Ease;
pub use crate::animation::stagger::Stagger;
pub use crate::color::palette::{PaletteEntry, boost_yellow, sparkle};
pub use crate::color::raster::{RasterImage, decode_image, load_image};
pub use crate::color::sampler::sample_color;
pub use crate::engine::frame::{FrameResult, FrameSnapshot, twinkle_scale};
pub use crate::engine::subject::{FlagLoader, ImageOffer, SubjectTicket};
pub use crate::engine::swarm::{EngineOpts, SwarmEngine};
pub use crate::field::wave::{WaveField, wave_offset};
pub use crate::formation::{Formation, FormationKind, FormationSpec, generate};
pub use crate::show::presets::DEFAULT_DRONES;
pub use crate::show::{Coloring, ImageColoring, Motion, PRESET_NAMES, PaletteColoring, Show};
pub use crate::timeline::phase::{PhaseDef, PhaseDuration, PhaseKind};
pub use crate::timeline::sequencer::{
    EndPolicy, MIN_PHASE_SECONDS, Sequencer, SequencerState, Tick,
};
