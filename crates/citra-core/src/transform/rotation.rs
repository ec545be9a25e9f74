//! Image rotation with canvas expansion.
//!
//! Rotation is counter-clockwise about the image center. The output canvas
//! grows to hold every rotated corner and uncovered area is filled black.
//!
//! Exact multiples of 90 degrees are lossless index remaps. Any other angle
//! uses inverse mapping: for each output pixel center we find the source
//! position and sample it with the chosen [`InterpolationFilter`].
//!
//! For a counter-clockwise rotation by θ in image coordinates (y down),
//! the inverse transform relative to the two centers is:
//! ```text
//! src_x =  dx * cos(θ) - dy * sin(θ)
//! src_y =  dx * sin(θ) + dy * cos(θ)
//! ```

use serde::{Deserialize, Serialize};

use crate::WorkingImage;

/// Interpolation filter for arbitrary-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest source pixel. Keeps the original palette of values.
    #[default]
    Nearest,
    /// Weighted average of the four nearest source pixels.
    Bilinear,
}

/// Reduce an angle to `[0, 360)`.
fn normalize_degrees(angle_degrees: f64) -> f64 {
    let a = angle_degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Quarter turns for angles that are a multiple of 90 degrees.
fn quarter_turns(normalized: f64) -> Option<u8> {
    const EPS: f64 = 1e-9;
    [0.0, 90.0, 180.0, 270.0, 360.0]
        .iter()
        .position(|&q| (normalized - q).abs() < EPS)
        .map(|i| (i % 4) as u8)
}

/// Round trigonometric values so exact angles produce exact coefficients.
#[inline]
fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

/// Compute the dimensions of the canvas holding the rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the expanded canvas.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let normalized = normalize_degrees(angle_degrees);

    match quarter_turns(normalized) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let rad = normalized.to_radians();
    let cos = round15(rad.cos()).abs();
    let sin = round15(rad.sin()).abs();

    let (w, h) = (width as f64, height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);

    // Half extents of the rotated bounding box
    let ex = (w * cos + h * sin) / 2.0;
    let ey = (w * sin + h * cos) / 2.0;

    let new_w = ((cx + ex).ceil() - (cx - ex).floor()) as u32;
    let new_h = ((cy + ey).ceil() - (cy - ey).floor()) as u32;

    (new_w.max(1), new_h.max(1))
}

/// Apply rotation to an image.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `filter` - Interpolation used for angles that are not multiples of 90
///
/// # Returns
///
/// New `WorkingImage` with the rotated content. The dimensions may differ
/// from the source due to canvas expansion.
pub fn apply_rotation(
    image: &WorkingImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> WorkingImage {
    let normalized = normalize_degrees(angle_degrees);

    match quarter_turns(normalized) {
        Some(0) => image.clone(),
        Some(turns) => rotate_quarter_turns(image, turns),
        None => rotate_resampled(image, normalized, filter),
    }
}

/// Lossless counter-clockwise rotation by `turns` quarter turns.
fn rotate_quarter_turns(image: &WorkingImage, turns: u8) -> WorkingImage {
    let (w, h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = if turns % 2 == 1 { (h, w) } else { (w, h) };
    let mut output = WorkingImage::new(dst_w as u32, dst_h as u32);

    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = match turns {
                1 => (y, w - 1 - x),
                2 => (w - 1 - x, h - 1 - y),
                _ => (h - 1 - y, x),
            };
            let src = image.index(x, y);
            let dst = output.index(dx, dy);
            output.data[dst..dst + 3].copy_from_slice(&image.data[src..src + 3]);
        }
    }

    output
}

fn rotate_resampled(
    image: &WorkingImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> WorkingImage {
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let rad = angle_degrees.to_radians();
    let cos = round15(rad.cos());
    let sin = round15(rad.sin());

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = WorkingImage::new(dst_w, dst_h);

    for dst_y in 0..dst_h as usize {
        for dst_x in 0..dst_w as usize {
            // Offset of the output pixel center from the canvas center
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
            };

            if let Some(pixel) = pixel {
                let idx = output.index(dst_x, dst_y);
                output.data[idx..idx + 3].copy_from_slice(&pixel);
            }
        }
    }

    output
}

/// Whether a continuous position lies on the source image.
#[inline]
fn covers(image: &WorkingImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width as f64 && y < image.height as f64
}

/// Pick the source pixel containing `(x, y)`; `None` outside the image.
fn sample_nearest(image: &WorkingImage, x: f64, y: f64) -> Option<[f32; 3]> {
    if !covers(image, x, y) {
        return None;
    }
    Some(image.pixel(x.floor() as usize, y.floor() as usize))
}

/// Interpolate between the four pixel centers around `(x, y)`;
/// `None` outside the image. Neighbors past the edge repeat the edge.
fn sample_bilinear(image: &WorkingImage, x: f64, y: f64) -> Option<[f32; 3]> {
    if !covers(image, x, y) {
        return None;
    }

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;

    // Shift to pixel-center coordinates
    let cx = x - 0.5;
    let cy = y - 0.5;
    let x0 = cx.floor() as i64;
    let y0 = cy.floor() as i64;
    let fx = (cx - x0 as f64) as f32;
    let fy = (cy - y0 as f64) as f32;

    let clamp_x = |v: i64| v.clamp(0, max_x) as usize;
    let clamp_y = |v: i64| v.clamp(0, max_y) as usize;

    let p00 = image.pixel(clamp_x(x0), clamp_y(y0));
    let p10 = image.pixel(clamp_x(x0 + 1), clamp_y(y0));
    let p01 = image.pixel(clamp_x(x0), clamp_y(y0 + 1));
    let p11 = image.pixel(clamp_x(x0 + 1), clamp_y(y0 + 1));

    let mut result = [0.0f32; 3];
    for i in 0..3 {
        result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    Some(result)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the expanded canvas never has less area than the source.
        #[test]
        fn prop_area_never_shrinks(
            width in 1u32..=400,
            height in 1u32..=400,
            angle in -180i32..=180,
        ) {
            let (w, h) = compute_rotated_bounds(width, height, angle as f64);
            prop_assert!(w as u64 * h as u64 >= width as u64 * height as u64);
        }

        /// Property: rotating by a full turn keeps dimensions.
        #[test]
        fn prop_full_turns_keep_dimensions(
            width in 1u32..=400,
            height in 1u32..=400,
            turns in -3i32..=3,
        ) {
            let (w, h) = compute_rotated_bounds(width, height, (turns * 360) as f64);
            prop_assert_eq!((w, h), (width, height));
        }
    }
}
