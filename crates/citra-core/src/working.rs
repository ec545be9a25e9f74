//! Floating-point working buffer shared by the pipeline stages.
//!
//! Channel values stay on the 0-255 scale but are stored as `f32`, so
//! rounding happens exactly once, when the pipeline produces its output.

use crate::luminance::calculate_luminance;
use crate::RasterImage;

/// An RGB image with `f32` channels on the 0-255 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples, `width * height * 3` values.
    pub data: Vec<f32>,
}

impl WorkingImage {
    /// A black image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize) * 3],
        }
    }

    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.as_raw().iter().map(|&v| v as f32).collect(),
        }
    }

    pub fn from_raster(image: &RasterImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            data: image.pixels.iter().map(|&v| v as f32).collect(),
        }
    }

    /// Round and clamp into an 8-bit image.
    pub fn to_raster(&self) -> RasterImage {
        let pixels = self.data.iter().map(|&v| quantize(v)).collect();
        RasterImage::new(self.width, self.height, pixels)
    }

    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * 3
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let idx = self.index(x, y);
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Apply `f` to every channel value.
    pub fn map_channels(&mut self, f: impl Fn(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Apply `f` to every RGB triple.
    pub fn map_pixels(&mut self, f: impl Fn([f32; 3]) -> [f32; 3]) {
        for chunk in self.data.chunks_exact_mut(3) {
            let [r, g, b] = f([chunk[0], chunk[1], chunk[2]]);
            chunk[0] = r;
            chunk[1] = g;
            chunk[2] = b;
        }
    }

    /// Mean luminance over all pixels, or 0 for an empty image.
    pub fn mean_luminance(&self) -> f32 {
        let count = self.data.len() / 3;
        if count == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .data
            .chunks_exact(3)
            .map(|c| calculate_luminance(c[0], c[1], c[2]) as f64)
            .sum();
        (sum / count as f64) as f32
    }
}

/// Convert a working value to a channel byte.
#[inline]
pub fn quantize(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}
