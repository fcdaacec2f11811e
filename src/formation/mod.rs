//! Point-cloud formations.
//!
//! Every generator returns exactly `count` points for any `count >= 0` and never panics. Jitter
//! comes from a seeded [`Rng64`](crate::Rng64), so the same `(spec, count, seed)` always produces
//! the same formation.

pub(crate) mod flag;
pub(crate) mod silhouette;
pub(crate) mod staff;
pub(crate) mod station;

use crate::foundation::core::PointRecord;
use crate::foundation::math::Rng64;

pub use flag::FlagSpec;
pub use silhouette::{FillBox, SilhouetteSpec, SoftRegion};
pub use staff::StaffSpec;
pub use station::StationSpec;

/// A fully materialized, immutable ordered point set.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Formation {
    points: Vec<PointRecord>,
}

impl Formation {
    /// Wrap an existing point list.
    pub fn from_points(points: Vec<PointRecord>) -> Self {
        Self { points }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the formation has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in index order.
    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty formation.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let first = self.points.first()?;
        let mut min = [first.x, first.y, first.z];
        let mut max = min;
        for p in &self.points[1..] {
            for (k, c) in [p.x, p.y, p.z].into_iter().enumerate() {
                min[k] = min[k].min(c);
                max[k] = max[k].max(c);
            }
        }
        Some((min, max))
    }
}

impl std::ops::Index<usize> for Formation {
    type Output = PointRecord;

    fn index(&self, i: usize) -> &PointRecord {
        &self.points[i]
    }
}

/// Built-in formation families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationKind {
    /// Ground-level staging grid.
    Station,
    /// Flat raster grid carrying flag texture coordinates.
    Flag,
    /// Weighted ellipsoid body silhouette.
    Silhouette,
    /// Long cylinder with end caps.
    Staff,
}

/// Parameterized description of one formation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormationSpec {
    /// See [`StationSpec`].
    Station(StationSpec),
    /// See [`FlagSpec`].
    Flag(FlagSpec),
    /// See [`SilhouetteSpec`].
    Silhouette(SilhouetteSpec),
    /// See [`StaffSpec`].
    Staff(StaffSpec),
}

impl FormationSpec {
    /// Default parameters for a formation family.
    pub fn default_for(kind: FormationKind) -> Self {
        match kind {
            FormationKind::Station => Self::Station(StationSpec::default()),
            FormationKind::Flag => Self::Flag(FlagSpec::default()),
            FormationKind::Silhouette => Self::Silhouette(SilhouetteSpec::default()),
            FormationKind::Staff => Self::Staff(StaffSpec::default()),
        }
    }

    /// Family of this spec.
    pub fn kind(&self) -> FormationKind {
        match self {
            Self::Station(_) => FormationKind::Station,
            Self::Flag(_) => FormationKind::Flag,
            Self::Silhouette(_) => FormationKind::Silhouette,
            Self::Staff(_) => FormationKind::Staff,
        }
    }

    /// `true` when generated points carry texture coordinates.
    pub fn has_uv(&self) -> bool {
        match self {
            Self::Station(s) => s.uv_columns.is_some(),
            Self::Flag(_) => true,
            Self::Silhouette(_) | Self::Staff(_) => false,
        }
    }

    /// Materialize exactly `count` points.
    #[tracing::instrument(skip(self), fields(kind = ?self.kind()))]
    pub fn generate(&self, count: usize, seed: u64) -> Formation {
        let mut rng = Rng64::new(seed);
        let points = match self {
            Self::Station(s) => station::generate(s, count, &mut rng),
            Self::Flag(s) => flag::generate(s, count),
            Self::Silhouette(s) => silhouette::generate(s, count, &mut rng),
            Self::Staff(s) => staff::generate(s, count, &mut rng),
        };
        debug_assert_eq!(points.len(), count);
        Formation { points }
    }
}

/// Generate a formation family with default parameters and seed 0.
pub fn generate(kind: FormationKind, count: usize) -> Formation {
    FormationSpec::default_for(kind).generate(count, 0)
}

/// Smallest `n` with `n * n >= count`.
pub(crate) fn ceil_sqrt(count: usize) -> usize {
    let mut n = (count as f64).sqrt() as usize;
    while n * n < count {
        n += 1;
    }
    while n > 0 && (n - 1) * (n - 1) >= count {
        n -= 1;
    }
    n
}

#[cfg(test)]
#[path = "../../tests/unit/formation/generate.rs"]
mod tests;
