use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;

/// How long a phase lasts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseDuration {
    /// A finite, positive number of seconds.
    Seconds(f64),
    /// Never ends on its own; progress stays at 0.
    Indefinite,
}

impl PhaseDuration {
    /// Length in seconds; [`f64::INFINITY`] for [`PhaseDuration::Indefinite`].
    pub fn seconds(self) -> f64 {
        match self {
            Self::Seconds(s) => s,
            Self::Indefinite => f64::INFINITY,
        }
    }

    /// `true` for [`PhaseDuration::Indefinite`].
    pub fn is_indefinite(self) -> bool {
        matches!(self, Self::Indefinite)
    }
}

impl Serialize for PhaseDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Seconds(s) => serializer.serialize_f64(*s),
            Self::Indefinite => serializer.serialize_str("indefinite"),
        }
    }
}

impl<'de> Deserialize<'de> for PhaseDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(s) => Ok(Self::Seconds(s)),
            Repr::Str(s) if s == "indefinite" => Ok(Self::Indefinite),
            Repr::Str(s) => Err(serde::de::Error::custom(format!(
                "duration must be seconds or \"indefinite\", got \"{s}\""
            ))),
        }
    }
}

/// What a phase does with the swarm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseKind {
    /// Hover over a formation.
    Hold {
        /// Formation name.
        formation: String,
    },
    /// Staggered, eased transition between two formations.
    Morph {
        /// Source formation name.
        from: String,
        /// Destination formation name.
        to: String,
        /// Curve applied to each point's local progress.
        #[serde(default)]
        ease: Ease,
    },
    /// Cloth flutter over a formation, driven by global time.
    Wave {
        /// Formation name.
        formation: String,
    },
}

/// One named, time-bounded segment of a show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseDef {
    /// Display name reported in frame results.
    pub name: String,
    /// Phase length.
    pub duration: PhaseDuration,
    /// Behaviour while active.
    #[serde(flatten)]
    pub kind: PhaseKind,
}

impl PhaseDef {
    /// Hold phase over `formation`.
    pub fn hold(name: &str, duration: PhaseDuration, formation: &str) -> Self {
        Self {
            name: name.to_owned(),
            duration,
            kind: PhaseKind::Hold {
                formation: formation.to_owned(),
            },
        }
    }

    /// Morph phase from `from` to `to` with the given curve.
    pub fn morph(name: &str, duration: PhaseDuration, from: &str, to: &str, ease: Ease) -> Self {
        Self {
            name: name.to_owned(),
            duration,
            kind: PhaseKind::Morph {
                from: from.to_owned(),
                to: to.to_owned(),
                ease,
            },
        }
    }

    /// Wave phase over `formation`.
    pub fn wave(name: &str, duration: PhaseDuration, formation: &str) -> Self {
        Self {
            name: name.to_owned(),
            duration,
            kind: PhaseKind::Wave {
                formation: formation.to_owned(),
            },
        }
    }

    /// Formation the swarm ends up in when this phase completes.
    pub fn target_formation(&self) -> &str {
        match &self.kind {
            PhaseKind::Hold { formation } | PhaseKind::Wave { formation } => formation,
            PhaseKind::Morph { to, .. } => to,
        }
    }

    /// Every formation name this phase references, in `(field, name)` pairs.
    pub(crate) fn formation_refs(&self) -> Vec<(&'static str, &str)> {
        match &self.kind {
            PhaseKind::Hold { formation } | PhaseKind::Wave { formation } => {
                vec![("formation", formation.as_str())]
            }
            PhaseKind::Morph { from, to, .. } => vec![("from", from.as_str()), ("to", to.as_str())],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
