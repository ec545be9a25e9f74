//! Convolution effects: Gaussian blur and sharpen.
//!
//! Neighbors outside the image are taken from the nearest edge pixel.

use crate::WorkingImage;

/// 3x3 smoothing kernel the sharpen effect amplifies away from.
const SMOOTH_KERNEL: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 5.0, 1.0], [1.0, 1.0, 1.0]];
const SMOOTH_DIVISOR: f32 = 13.0;

/// Normalized 1D Gaussian kernel of odd length `ceil(6 * sigma) | 1`.
///
/// A sigma of zero or less yields the identity kernel `[1.0]`.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Separable Gaussian blur with the given sigma.
pub fn apply_gaussian_blur(image: &WorkingImage, sigma: f32) -> WorkingImage {
    if sigma <= 0.0 || image.data.is_empty() {
        return image.clone();
    }

    let kernel = gaussian_kernel_1d(sigma);
    let half = kernel.len() as isize / 2;
    let (width, height) = (image.width as usize, image.height as usize);

    // Horizontal pass
    let mut temp = WorkingImage::new(image.width, image.height);
    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + ki as isize - half).clamp(0, width as isize - 1) as usize;
                let p = image.pixel(sx, y);
                for c in 0..3 {
                    sum[c] += p[c] * kv;
                }
            }
            let idx = temp.index(x, y);
            temp.data[idx..idx + 3].copy_from_slice(&sum);
        }
    }

    // Vertical pass
    let mut output = WorkingImage::new(image.width, image.height);
    for y in 0..height {
        for x in 0..width {
            let mut sum = [0.0f32; 3];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + ki as isize - half).clamp(0, height as isize - 1) as usize;
                let p = temp.pixel(x, sy);
                for c in 0..3 {
                    sum[c] += p[c] * kv;
                }
            }
            let idx = output.index(x, y);
            for c in 0..3 {
                output.data[idx + c] = sum[c].clamp(0.0, 255.0);
            }
        }
    }

    output
}

/// Sharpen by pushing each pixel away from its smoothed neighborhood:
/// `v + amount * (v - smooth(v))`.
///
/// Border pixels have an incomplete neighborhood and are copied unchanged.
pub fn apply_sharpen(image: &WorkingImage, amount: f32) -> WorkingImage {
    if amount <= 0.0 || image.width < 3 || image.height < 3 {
        return image.clone();
    }

    let (width, height) = (image.width as usize, image.height as usize);
    let mut output = image.clone();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut smooth = [0.0f32; 3];
            for (ky, row) in SMOOTH_KERNEL.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    let p = image.pixel(x + kx - 1, y + ky - 1);
                    for c in 0..3 {
                        smooth[c] += p[c] * weight;
                    }
                }
            }

            let center = image.pixel(x, y);
            let idx = output.index(x, y);
            for c in 0..3 {
                let detail = center[c] - smooth[c] / SMOOTH_DIVISOR;
                output.data[idx + c] = (center[c] + amount * detail).clamp(0.0, 255.0);
            }
        }
    }

    output
}
