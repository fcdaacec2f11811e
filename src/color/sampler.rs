use crate::color::raster::RasterImage;
use crate::foundation::core::Rgb;

/// Nearest-neighbour color at texture coordinate `(u, v)`.
///
/// `u = 0, v = 0` is the top-left pixel and `u = 1, v = 1` the bottom-right one; in between the
/// coordinate snaps to the closest pixel center. No filtering.
///
/// Rounding, not flooring: `floor(0.99 * (w - 1))` would read pixel (0, 0) at `(0.99, 0.99)` on a
/// 2x2 image instead of the bottom-right one.
///
/// A missing or malformed image yields [`Rgb::WHITE`]; callers usually substitute their own
/// fallback color in that case. Coordinates are clamped into `[0, 1]` (NaN maps to 0), so this
/// never panics.
pub fn sample_color(image: Option<&RasterImage>, u: f64, v: f64) -> Rgb {
    let Some(img) = image.filter(|img| img.is_valid()) else {
        return Rgb::WHITE;
    };

    let px = (clamp01(u) * f64::from(img.width - 1)).round() as u32;
    let py = (clamp01(v) * f64::from(img.height - 1)).round() as u32;
    let [r, g, b, _] = img.pixel(px.min(img.width - 1), py.min(img.height - 1));

    Rgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    )
}

fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/color/sampler.rs"]
mod tests;
