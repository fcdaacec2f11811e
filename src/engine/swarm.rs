use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::animation::ease::Ease;
use crate::animation::stagger::Stagger;
use crate::color::palette::{PaletteEntry, boost_yellow, sparkle};
use crate::color::raster::RasterImage;
use crate::color::sampler::sample_color;
use crate::engine::frame::FrameResult;
use crate::engine::subject::{ImageOffer, ImageSlot, SubjectTicket};
use crate::field::wave::WaveField;
use crate::formation::{Formation, FormationSpec};
use crate::foundation::core::{Lerp, PointRecord, Rgb};
use crate::foundation::error::{SwarmError, SwarmResult};
use crate::foundation::math::formation_seed;
use crate::show::model::{Coloring, ImageColoring, Motion, Show};
use crate::timeline::phase::PhaseKind;
use crate::timeline::sequencer::{Sequencer, SequencerState};

/// Runtime knobs that are not part of a show.
#[derive(Clone, Copy, Debug)]
pub struct EngineOpts {
    /// Largest time step a single update may apply, in seconds.
    pub max_delta: f64,
    /// Update points on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            max_delta: 0.1,
            parallel: false,
            threads: None,
        }
    }
}

#[derive(Clone, Debug)]
struct PhasePlan {
    name: String,
    kind: PlanKind,
}

#[derive(Clone, Debug)]
enum PlanKind {
    Hold { formation: usize },
    Morph { from: usize, to: usize, ease: Ease },
    Wave { formation: usize, field: WaveField },
}

impl PlanKind {
    fn initial_formation(&self) -> usize {
        match self {
            Self::Hold { formation } | Self::Wave { formation, .. } => *formation,
            Self::Morph { from, .. } => *from,
        }
    }
}

#[derive(Clone, Debug)]
enum ColorPlan {
    Image(ImageColoring),
    // Indexed like `SwarmEngine::formations`; `None` for formations no phase uses.
    Palette {
        palettes: Vec<Option<PaletteEntry>>,
        pulse_hz: f64,
    },
}

/// Formation-interpolation animation engine.
///
/// Owns every formation of a show, the phase sequencer and the per-drone buffers. The caller
/// drives it with [`SwarmEngine::update`] once per displayed frame; nothing else mutates
/// animation state.
pub struct SwarmEngine {
    formations: Vec<Formation>,
    formation_names: Vec<String>,
    phases: Vec<PhasePlan>,
    sequencer: Sequencer,
    coloring: ColorPlan,
    motion: Motion,
    stagger: Stagger,

    positions: Vec<PointRecord>,
    colors: Vec<Rgb>,
    slot: ImageSlot,
    frame_tick: u64,

    opts: EngineOpts,
    pool: Option<rayon::ThreadPool>,
}

impl SwarmEngine {
    /// Validate `show`, generate its formations and start at phase 0.
    #[tracing::instrument(skip(show, opts), fields(drones = show.drone_count, phases = show.phases.len()))]
    pub fn new(show: &Show, opts: EngineOpts) -> SwarmResult<Self> {
        show.validate()?;
        let formations = show
            .formations
            .iter()
            .map(|(name, spec)| {
                let seed = formation_seed(show.seed, name);
                (name.clone(), spec.generate(show.drone_count, seed))
            })
            .collect::<BTreeMap<_, _>>();
        Self::with_formations(show, formations, opts)
    }

    /// Build from pre-generated formations instead of the show's specs.
    ///
    /// Every formation must hold exactly `show.drone_count` points and every name a phase
    /// references must be present; both are reported as [`SwarmError::Formation`].
    pub fn with_formations(
        show: &Show,
        formations: BTreeMap<String, Formation>,
        opts: EngineOpts,
    ) -> SwarmResult<Self> {
        if !opts.max_delta.is_finite() || opts.max_delta <= 0.0 {
            return Err(SwarmError::validation("max_delta must be finite and > 0"));
        }
        if show.drone_count == 0 {
            return Err(SwarmError::validation("drone_count must be > 0"));
        }
        for (name, f) in &formations {
            if f.len() != show.drone_count {
                return Err(SwarmError::formation(format!(
                    "formation \"{name}\" has {} points, expected {}",
                    f.len(),
                    show.drone_count
                )));
            }
        }

        let (formation_names, formations): (Vec<_>, Vec<_>) = formations.into_iter().unzip();
        let index_of = |name: &str| -> SwarmResult<usize> {
            formation_names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| SwarmError::formation(format!("undefined formation \"{name}\"")))
        };

        let mut phases = Vec::with_capacity(show.phases.len());
        for phase in &show.phases {
            let kind = match &phase.kind {
                PhaseKind::Hold { formation } => PlanKind::Hold {
                    formation: index_of(formation)?,
                },
                PhaseKind::Morph { from, to, ease } => PlanKind::Morph {
                    from: index_of(from)?,
                    to: index_of(to)?,
                    ease: *ease,
                },
                PhaseKind::Wave { formation } => {
                    let idx = index_of(formation)?;
                    PlanKind::Wave {
                        formation: idx,
                        field: wave_field_for(show.formations.get(formation), &formations[idx]),
                    }
                }
            };
            phases.push(PhasePlan {
                name: phase.name.clone(),
                kind,
            });
        }

        let sequencer = Sequencer::new(show.phases.iter().map(|p| p.duration), show.end)?;

        let coloring = match &show.coloring {
            Coloring::Image(img) => ColorPlan::Image(*img),
            Coloring::Palette(pal) => {
                let mut palettes = vec![None; formations.len()];
                for phase in &show.phases {
                    for (_, name) in phase.formation_refs() {
                        let entry = pal.palettes.get(name).ok_or_else(|| {
                            SwarmError::validation(format!(
                                "missing palette for formation \"{name}\""
                            ))
                        })?;
                        palettes[index_of(name)?] = Some(*entry);
                    }
                }
                ColorPlan::Palette {
                    palettes,
                    pulse_hz: pal.pulse_hz,
                }
            }
        };

        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };

        let initial = &formations[phases[0].kind.initial_formation()];
        let positions = initial.points().to_vec();
        let colors = match &coloring {
            ColorPlan::Image(img) => vec![img.accent; show.drone_count],
            ColorPlan::Palette { .. } => Vec::new(),
        };

        tracing::debug!(
            formations = formations.len(),
            parallel = opts.parallel,
            "swarm engine ready"
        );

        Ok(Self {
            formations,
            formation_names,
            phases,
            sequencer,
            coloring,
            motion: show.motion,
            stagger: Stagger::new(show.motion.stagger_spread),
            positions,
            colors,
            slot: ImageSlot::default(),
            frame_tick: 0,
            opts,
            pool,
        })
    }

    /// Number of drones.
    pub fn drone_count(&self) -> usize {
        self.positions.len()
    }

    /// Current position buffer.
    pub fn positions(&self) -> &[PointRecord] {
        &self.positions
    }

    /// Formation by name.
    pub fn formation(&self, name: &str) -> Option<&Formation> {
        let i = self.formation_names.iter().position(|n| n == name)?;
        Some(&self.formations[i])
    }

    /// Phase names in order.
    pub fn phase_names(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|p| p.name.as_str())
    }

    /// Sequencer clock.
    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Options the engine was built with.
    pub fn opts(&self) -> EngineOpts {
        self.opts
    }

    /// Advance by `delta` seconds (clamped to `max_delta`) and recompute every drone.
    ///
    /// Never fails and never reallocates the position or color buffers.
    pub fn update(&mut self, delta: f64) -> FrameResult<'_> {
        let delta = if delta.is_nan() || delta <= 0.0 {
            0.0
        } else {
            delta.min(self.opts.max_delta)
        };
        let tick = self.sequencer.advance(delta);
        self.frame_tick = self.frame_tick.wrapping_add(1);

        let phase = &self.phases[tick.phase_index];
        if tick.changed {
            tracing::debug!(
                phase = %phase.name,
                index = tick.phase_index,
                elapsed = tick.global_elapsed,
                "phase transition"
            );
        }

        let pose = Pose::new(
            &phase.kind,
            &self.formations,
            &self.motion,
            self.stagger,
            tick.global_elapsed,
            tick.progress,
        );
        match &self.pool {
            Some(pool) => pool.install(|| {
                self.positions
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(i, p)| *p = pose.point(i));
            }),
            None => {
                for (i, p) in self.positions.iter_mut().enumerate() {
                    *p = pose.point(i);
                }
            }
        }

        let color = match &self.coloring {
            ColorPlan::Image(cfg) => {
                let opening_hold =
                    tick.phase_index == 0 && matches!(phase.kind, PlanKind::Hold { .. });
                // One handle per frame; a concurrent subject change cannot tear this frame.
                let image = if opening_hold {
                    None
                } else {
                    self.slot.current()
                };
                let paint = Paint {
                    cfg: *cfg,
                    image,
                    tick: self.frame_tick,
                };
                match &self.pool {
                    Some(pool) => pool.install(|| {
                        self.colors
                            .par_iter_mut()
                            .zip(self.positions.par_iter())
                            .enumerate()
                            .for_each(|(i, (c, p))| *c = paint.color(i, p));
                    }),
                    None => {
                        for (i, (c, p)) in self.colors.iter_mut().zip(&self.positions).enumerate() {
                            *c = paint.color(i, p);
                        }
                    }
                }
                None
            }
            ColorPlan::Palette { palettes, pulse_hz } => Some(palette_color(
                &phase.kind,
                palettes,
                *pulse_hz,
                tick.global_elapsed,
                tick.progress,
            )),
        };

        FrameResult {
            positions: &self.positions,
            colors: color.is_none().then_some(self.colors.as_slice()),
            color,
            phase: &phase.name,
            phase_index: tick.phase_index,
            progress: tick.progress,
            elapsed: tick.global_elapsed,
            phase_changed: tick.changed,
        }
    }

    /// Rewind to phase 0 and repaint every drone from the opening formation.
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.frame_tick = 0;
        let initial = &self.formations[self.phases[0].kind.initial_formation()];
        self.positions.copy_from_slice(initial.points());
        if let ColorPlan::Image(cfg) = &self.coloring {
            self.colors.fill(cfg.accent);
        }
        tracing::debug!("swarm reset");
    }

    /// Switch to a new subject: drop the current image, reset, and return the ticket the new
    /// subject's image must be offered with.
    pub fn change_subject(&mut self) -> SubjectTicket {
        let ticket = self.slot.begin();
        self.reset();
        tracing::debug!(generation = ticket.generation(), "subject changed");
        ticket
    }

    /// Ticket of the current subject.
    pub fn subject(&self) -> SubjectTicket {
        self.slot.ticket()
    }

    /// Install `image` if `ticket` still names the current subject.
    pub fn offer_image(&mut self, ticket: SubjectTicket, image: RasterImage) -> ImageOffer {
        self.slot.offer(ticket, image)
    }

    /// Install `image` for the current subject.
    pub fn set_image(&mut self, image: RasterImage) -> ImageOffer {
        let ticket = self.slot.ticket();
        self.slot.offer(ticket, image)
    }

    /// Currently loaded subject image, if any.
    pub fn image(&self) -> Option<Arc<RasterImage>> {
        self.slot.current()
    }
}

/// Per-frame position rule; evaluated independently for every drone.
enum Pose<'a> {
    Hold {
        base: &'a [PointRecord],
        amplitude: f64,
        t: f64,
    },
    Morph {
        from: &'a [PointRecord],
        to: &'a [PointRecord],
        ease: Ease,
        stagger: Stagger,
        progress: f64,
    },
    Wave {
        base: &'a [PointRecord],
        field: WaveField,
        amplitude: f64,
        t: f64,
    },
}

impl<'a> Pose<'a> {
    fn new(
        kind: &PlanKind,
        formations: &'a [Formation],
        motion: &Motion,
        stagger: Stagger,
        t: f64,
        progress: f64,
    ) -> Self {
        match *kind {
            PlanKind::Hold { formation } => Self::Hold {
                base: formations[formation].points(),
                amplitude: motion.hover_amplitude,
                t,
            },
            PlanKind::Morph { from, to, ease } => Self::Morph {
                from: formations[from].points(),
                to: formations[to].points(),
                ease,
                stagger,
                progress,
            },
            PlanKind::Wave { formation, field } => Self::Wave {
                base: formations[formation].points(),
                field,
                amplitude: motion.wave_amplitude,
                t,
            },
        }
    }

    fn point(&self, i: usize) -> PointRecord {
        match self {
            Self::Hold { base, amplitude, t } => {
                let p = base[i];
                PointRecord {
                    y: p.y + hover(i, *t, *amplitude),
                    ..p
                }
            }
            Self::Morph {
                from,
                to,
                ease,
                stagger,
                progress,
            } => {
                let dst = &to[i];
                let local = stagger.local_progress(*progress, dst.v_or_zero());
                PointRecord::lerp(&from[i], dst, ease.apply(local))
            }
            Self::Wave {
                base,
                field,
                amplitude,
                t,
            } => {
                let p = base[i];
                PointRecord {
                    y: p.y + field.sway(p.x, *t, *amplitude),
                    z: p.z + field.offset(p.x, p.y, *t, *amplitude),
                    ..p
                }
            }
        }
    }
}

/// Vertical hover for drone `i`; exactly zero at `t = 0`.
pub(crate) fn hover(i: usize, t: f64, amplitude: f64) -> f64 {
    let phase = i as f64 * 0.01;
    ((t * 2.0 + phase).sin() - phase.sin()) * amplitude
}

struct Paint {
    cfg: ImageColoring,
    image: Option<Arc<RasterImage>>,
    tick: u64,
}

impl Paint {
    // The accent is a fixed color; only sampled colors get the boost and sparkle.
    fn color(&self, i: usize, p: &PointRecord) -> Rgb {
        match (&self.image, p.uv) {
            (Some(img), Some(uv)) => {
                let sampled = sample_color(Some(img.as_ref()), uv.u, uv.v);
                boost_yellow(sampled, self.cfg.yellow_boost)
                    .scale(sparkle(i, self.tick, self.cfg.sparkle))
            }
            _ => self.cfg.accent,
        }
    }
}

fn palette_color(
    kind: &PlanKind,
    palettes: &[Option<PaletteEntry>],
    pulse_hz: f64,
    t: f64,
    progress: f64,
) -> Rgb {
    let entry = |i: usize| palettes[i].unwrap_or(PaletteEntry::new(Rgb::WHITE, Rgb::WHITE));
    match *kind {
        PlanKind::Hold { formation } | PlanKind::Wave { formation, .. } => {
            entry(formation).pulse(t, pulse_hz)
        }
        PlanKind::Morph { from, to, ease } => {
            Rgb::lerp(&entry(from).primary, &entry(to).primary, ease.apply(progress))
        }
    }
}

fn wave_field_for(spec: Option<&FormationSpec>, formation: &Formation) -> WaveField {
    if let Some(FormationSpec::Flag(flag)) = spec {
        return WaveField::for_flag(flag);
    }
    match formation.bounds() {
        Some((min, max)) => WaveField {
            x_min: min[0],
            width: max[0] - min[0],
        },
        None => WaveField::default(),
    }
}

fn build_thread_pool(threads: Option<usize>) -> SwarmResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SwarmError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SwarmError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/engine/swarm.rs"]
mod tests;
