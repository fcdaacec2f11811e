use crate::foundation::core::{PointRecord, Uv};

/// Flat raster layout whose texture coordinates map straight onto a flag image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlagSpec {
    /// Points per row.
    pub columns: usize,
    /// Physical width of the flag.
    pub width: f64,
    /// Physical height of the flag.
    pub height: f64,
    /// Height of the flag's center above the ground.
    pub lift: f64,
}

impl Default for FlagSpec {
    fn default() -> Self {
        Self {
            columns: 150,
            width: 16.0,
            height: 10.5,
            lift: 8.0,
        }
    }
}

/// Raster-scan texture coordinate for linear index `i` of `count` points laid out in `columns`.
///
/// `rows = ceil(count / columns)`; a single row or column maps to coordinate 0.
pub(crate) fn grid_uv(i: usize, count: usize, columns: usize) -> Uv {
    let columns = columns.max(1);
    let rows = count.div_ceil(columns).max(1);
    let col = i % columns;
    let row = (i / columns) % rows;
    let u = if columns > 1 {
        col as f64 / (columns - 1) as f64
    } else {
        0.0
    };
    let v = if rows > 1 {
        row as f64 / (rows - 1) as f64
    } else {
        0.0
    };
    Uv::new(u, v)
}

pub(crate) fn generate(spec: &FlagSpec, count: usize) -> Vec<PointRecord> {
    (0..count)
        .map(|i| {
            let uv = grid_uv(i, count, spec.columns);
            let x = (uv.u - 0.5) * spec.width;
            let y = (0.5 - uv.v) * spec.height + spec.lift;
            PointRecord::with_uv(x, y, 0.0, uv)
        })
        .collect()
}
