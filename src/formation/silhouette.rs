use std::f64::consts::TAU;

use crate::foundation::core::PointRecord;
use crate::foundation::math::Rng64;

/// Ellipsoid body part with a share of the point budget.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SoftRegion {
    /// Human-readable part name.
    pub name: String,
    /// Ellipsoid center.
    pub center: [f64; 3],
    /// Ellipsoid radii along x, y, z.
    pub radii: [f64; 3],
    /// Relative share of points.
    pub weight: f64,
}

impl SoftRegion {
    fn new(name: &str, center: [f64; 3], radii: [f64; 3], weight: f64) -> Self {
        Self {
            name: name.to_owned(),
            center,
            radii,
            weight,
        }
    }

    fn sample(&self, rng: &mut Rng64) -> PointRecord {
        let theta = rng.next_f64_01() * TAU;
        let phi = (2.0 * rng.next_f64_01() - 1.0).clamp(-1.0, 1.0).acos();
        // Cube root keeps the density uniform over the volume.
        let r = rng.next_f64_01().cbrt();
        let [cx, cy, cz] = self.center;
        let [rx, ry, rz] = self.radii;
        PointRecord::new(
            cx + r * rx * phi.sin() * theta.cos(),
            cy + r * ry * phi.sin() * theta.sin(),
            cz + r * rz * phi.cos(),
        )
    }
}

/// Box that absorbs points left over after per-region floor rounding.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FillBox {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
}

impl FillBox {
    fn sample(&self, rng: &mut Rng64) -> PointRecord {
        PointRecord::new(
            rng.range(self.min[0], self.max[0]),
            rng.range(self.min[1], self.max[1]),
            rng.range(self.min[2], self.max[2]),
        )
    }
}

/// Volumetric figure built from weighted soft regions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SilhouetteSpec {
    /// Body parts, filled in order.
    pub regions: Vec<SoftRegion>,
    /// Scatter volume for the rounding remainder.
    pub fill: FillBox,
}

impl SilhouetteSpec {
    /// Sum of region weights (non-positive weights count as zero).
    pub fn total_weight(&self) -> f64 {
        self.regions.iter().map(|r| r.weight.max(0.0)).sum()
    }
}

impl Default for SilhouetteSpec {
    /// Monkey king in a martial stance: raised hand, extended arm, tail and a cloud underfoot.
    fn default() -> Self {
        Self {
            regions: vec![
                SoftRegion::new("head", [0.0, 12.0, 0.0], [1.2, 1.4, 1.0], 0.12),
                SoftRegion::new("crown", [0.0, 13.5, 0.0], [1.5, 0.5, 0.8], 0.05),
                SoftRegion::new("chest", [0.0, 9.0, 0.0], [1.5, 1.8, 0.8], 0.15),
                SoftRegion::new("belly", [0.0, 7.0, 0.0], [1.2, 1.0, 0.7], 0.08),
                SoftRegion::new("left_arm", [-2.5, 10.0, 0.0], [0.5, 2.0, 0.5], 0.08),
                SoftRegion::new("left_hand", [-3.5, 12.0, 0.0], [0.6, 0.6, 0.6], 0.03),
                SoftRegion::new("right_arm", [2.5, 9.0, 0.0], [0.5, 1.8, 0.5], 0.08),
                SoftRegion::new("right_hand", [4.0, 8.0, 0.0], [0.5, 0.5, 0.5], 0.03),
                SoftRegion::new("left_leg", [-0.8, 4.0, 0.0], [0.6, 2.5, 0.6], 0.10),
                SoftRegion::new("left_foot", [-1.2, 1.0, 0.3], [0.8, 0.4, 0.5], 0.03),
                SoftRegion::new("right_leg", [1.0, 3.5, 1.0], [0.6, 2.2, 0.6], 0.10),
                SoftRegion::new("right_foot", [1.5, 0.8, 1.5], [0.8, 0.4, 0.5], 0.03),
                SoftRegion::new("tail_base", [0.5, 5.5, -1.0], [0.3, 0.3, 1.5], 0.04),
                SoftRegion::new("tail_mid", [1.0, 5.0, -2.5], [0.3, 0.3, 1.0], 0.03),
                SoftRegion::new("tail_tip", [1.5, 5.5, -3.5], [0.4, 0.4, 0.4], 0.02),
                SoftRegion::new("cloud", [0.0, 0.0, 0.0], [3.0, 0.5, 3.0], 0.03),
            ],
            fill: FillBox {
                min: [-4.0, 0.0, -2.0],
                max: [4.0, 14.0, 2.0],
            },
        }
    }
}

pub(crate) fn generate(spec: &SilhouetteSpec, count: usize, rng: &mut Rng64) -> Vec<PointRecord> {
    let mut out = Vec::with_capacity(count);
    let total = spec.total_weight();

    if total > 0.0 {
        for region in &spec.regions {
            let share = region.weight.max(0.0) / total;
            let n = ((share * count as f64).floor() as usize).min(count - out.len());
            out.extend((0..n).map(|_| region.sample(rng)));
        }
    }

    while out.len() < count {
        out.push(spec.fill.sample(rng));
    }
    out
}
