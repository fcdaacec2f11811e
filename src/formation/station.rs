use crate::foundation::core::PointRecord;
use crate::foundation::math::Rng64;

use super::{ceil_sqrt, flag::grid_uv};

/// Square staging grid at ground level.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StationSpec {
    /// Distance between neighbouring points.
    pub spacing: f64,
    /// Maximum random height above the ground.
    pub jitter: f64,
    /// When set, points also get raster-scan texture coordinates over this many columns.
    pub uv_columns: Option<usize>,
}

impl Default for StationSpec {
    fn default() -> Self {
        Self {
            spacing: 0.15,
            jitter: 0.5,
            uv_columns: None,
        }
    }
}

pub(crate) fn generate(spec: &StationSpec, count: usize, rng: &mut Rng64) -> Vec<PointRecord> {
    let side = ceil_sqrt(count).max(1);
    let half = side as f64 * spec.spacing / 2.0;

    (0..count)
        .map(|i| {
            let x = (i % side) as f64 * spec.spacing - half;
            let z = (i / side) as f64 * spec.spacing - half;
            let y = rng.next_f64_01() * spec.jitter;
            match spec.uv_columns {
                Some(cols) => PointRecord::with_uv(x, y, z, grid_uv(i, count, cols)),
                None => PointRecord::new(x, y, z),
            }
        })
        .collect()
}
