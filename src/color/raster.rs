use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{SwarmError, SwarmResult};

/// Decoded raster in straight (non-premultiplied) RGBA8, row-major, top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba8: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap raw RGBA8 pixels, rejecting buffers whose length does not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> SwarmResult<Self> {
        let img = Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        };
        if !img.is_valid() {
            return Err(SwarmError::image(format!(
                "expected {width}x{height} RGBA8 ({} bytes), got {} bytes",
                expected_len(width, height),
                img.rgba8.len()
            )));
        }
        Ok(img)
    }

    /// `true` for a non-empty image whose buffer holds exactly `width * height` RGBA pixels.
    pub fn is_valid(&self) -> bool {
        self.width >= 1 && self.height >= 1 && self.rgba8.len() == expected_len(self.width, self.height)
    }

    /// Straight RGBA8 at pixel `(x, y)`; caller guarantees the coordinate is in bounds.
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ]
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

/// Decode encoded image bytes (PNG, JPEG, ...) into straight RGBA8.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> SwarmResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: impl AsRef<Path>) -> SwarmResult<RasterImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/color/raster.rs"]
mod tests;
