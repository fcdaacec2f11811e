use serde::{Deserialize, Serialize};

use crate::foundation::error::{SwarmError, SwarmResult};
use crate::timeline::phase::PhaseDuration;

/// Shortest finite phase the sequencer accepts, in seconds.
pub const MIN_PHASE_SECONDS: f64 = 1e-6;

/// What happens once the last phase completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EndPolicy {
    /// Stay on the last phase forever.
    #[default]
    Clamp,
    /// Wrap back to phase `restart_at` so the phases before it play only once.
    Loop {
        /// Phase index the cycle restarts from.
        restart_at: usize,
    },
}

/// Mutable clock of a [`Sequencer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SequencerState {
    /// Seconds accumulated since start or last reset.
    pub global_elapsed: f64,
    /// Active phase.
    pub phase_index: usize,
    /// Seconds spent in the active phase.
    pub phase_elapsed: f64,
}

/// Snapshot returned by [`Sequencer::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Active phase after advancing.
    pub phase_index: usize,
    /// `phase_elapsed / duration`, in `[0, 1]`; 0 for indefinite phases.
    pub progress: f64,
    /// Seconds since start or last reset.
    pub global_elapsed: f64,
    /// `true` when at least one phase boundary was crossed during this advance.
    pub changed: bool,
}

/// Phase state machine: walks an ordered list of durations, clamping or looping at the end.
#[derive(Clone, Debug)]
pub struct Sequencer {
    durations: Vec<f64>,
    end: EndPolicy,
    // Length of `[restart_at..]` under a loop policy; infinite when the loop never wraps.
    cycle: f64,
    state: SequencerState,
}

impl Sequencer {
    /// Build a sequencer over `durations`.
    ///
    /// Rejects an empty list, second counts that are NaN or below [`MIN_PHASE_SECONDS`], and a
    /// loop target past the last phase.
    pub fn new(
        durations: impl IntoIterator<Item = PhaseDuration>,
        end: EndPolicy,
    ) -> SwarmResult<Self> {
        let durations = durations
            .into_iter()
            .map(PhaseDuration::seconds)
            .collect::<Vec<_>>();
        if durations.is_empty() {
            return Err(SwarmError::validation("sequencer needs at least one phase"));
        }
        for (i, d) in durations.iter().enumerate() {
            if d.is_nan() || *d < MIN_PHASE_SECONDS {
                return Err(SwarmError::validation(format!(
                    "phase {i} duration must be >= {MIN_PHASE_SECONDS} s, got {d}"
                )));
            }
        }
        if let EndPolicy::Loop { restart_at } = end
            && restart_at >= durations.len()
        {
            return Err(SwarmError::validation(format!(
                "restart_at {restart_at} out of range for {} phases",
                durations.len()
            )));
        }

        let cycle = match end {
            EndPolicy::Loop { restart_at } => durations[restart_at..].iter().sum(),
            EndPolicy::Clamp => f64::INFINITY,
        };

        Ok(Self {
            durations,
            end,
            cycle,
            state: SequencerState::default(),
        })
    }

    /// Number of phases.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Always `false`; construction rejects empty phase lists.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// End-of-list policy.
    pub fn end_policy(&self) -> EndPolicy {
        self.end
    }

    /// Current clock.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Progress of the active phase without advancing.
    pub fn progress(&self) -> f64 {
        let d = self.durations[self.state.phase_index];
        if d.is_infinite() {
            0.0
        } else {
            (self.state.phase_elapsed / d).clamp(0.0, 1.0)
        }
    }

    /// Accumulate `delta` seconds and resolve every phase boundary it crosses.
    ///
    /// Negative or NaN deltas count as zero. Whole loop cycles are skipped in one step, so the
    /// cost does not grow with `delta`.
    pub fn advance(&mut self, delta: f64) -> Tick {
        let delta = if delta > 0.0 { delta } else { 0.0 };
        self.state.global_elapsed += delta;
        self.state.phase_elapsed += delta;

        let mut changed = false;
        loop {
            let i = self.state.phase_index;
            let d = self.durations[i];
            if self.state.phase_elapsed < d {
                break;
            }
            let (next, wrapped) = if i + 1 < self.durations.len() {
                (i + 1, false)
            } else {
                match self.end {
                    EndPolicy::Clamp => break,
                    EndPolicy::Loop { restart_at } => (restart_at, true),
                }
            };

            let rest = self.state.phase_elapsed - d;
            // `d` below the float resolution of the elapsed time: the remainder is noise.
            self.state.phase_elapsed = if rest < self.state.phase_elapsed {
                rest
            } else {
                0.0
            };
            if wrapped && self.cycle.is_finite() && self.state.phase_elapsed >= self.cycle {
                self.state.phase_elapsed %= self.cycle;
            }
            self.state.phase_index = next;
            changed = true;
        }

        Tick {
            phase_index: self.state.phase_index,
            progress: self.progress(),
            global_elapsed: self.state.global_elapsed,
            changed,
        }
    }

    /// Back to phase 0 with zero elapsed time.
    pub fn reset(&mut self) {
        self.state = SequencerState::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
