use std::f64::consts::TAU;

use crate::foundation::core::PointRecord;
use crate::foundation::math::Rng64;

const SHAFT_SHARE: f64 = 0.70;
const CAP_SHARE: f64 = 0.15;

/// Vertical cylinder (a staff) with a wider cap at each end.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaffSpec {
    /// Shaft length.
    pub length: f64,
    /// Shaft radius.
    pub radius: f64,
    /// End cap radius.
    pub cap_radius: f64,
    /// End cap length.
    pub cap_length: f64,
    /// Height of the shaft's midpoint.
    pub center_y: f64,
}

impl Default for StaffSpec {
    fn default() -> Self {
        Self {
            length: 25.0,
            radius: 0.8,
            cap_radius: 1.2,
            cap_length: 2.0,
            center_y: 7.0,
        }
    }
}

/// Point counts for shaft, top cap and bottom cap; always sums to `count`.
pub(crate) fn split_counts(count: usize) -> (usize, usize, usize) {
    let shaft = ((count as f64 * SHAFT_SHARE).floor() as usize).min(count);
    let top = ((count as f64 * CAP_SHARE).floor() as usize).min(count - shaft);
    (shaft, top, count - shaft - top)
}

fn disk_point(rng: &mut Rng64, radius: f64, y: f64) -> PointRecord {
    let theta = rng.next_f64_01() * TAU;
    // sqrt keeps the density uniform over the disk area.
    let r = rng.next_f64_01().sqrt() * radius;
    PointRecord::new(r * theta.cos(), y, r * theta.sin())
}

pub(crate) fn generate(spec: &StaffSpec, count: usize, rng: &mut Rng64) -> Vec<PointRecord> {
    let (shaft, top, bottom) = split_counts(count);
    let half = spec.length / 2.0;
    let mut out = Vec::with_capacity(count);

    for _ in 0..shaft {
        let y = (rng.next_f64_01() - 0.5) * spec.length;
        out.push(disk_point(rng, spec.radius, y + spec.center_y));
    }
    for _ in 0..top {
        let y = half + rng.next_f64_01() * spec.cap_length;
        out.push(disk_point(rng, spec.cap_radius, y + spec.center_y));
    }
    for _ in 0..bottom {
        let y = -half - rng.next_f64_01() * spec.cap_length;
        out.push(disk_point(rng, spec.cap_radius, y + spec.center_y));
    }
    out
}
