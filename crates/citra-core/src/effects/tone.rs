//! Per-pixel tone effects: grayscale, sepia and negative.

use crate::luminance::calculate_luminance;
use crate::WorkingImage;

/// Canonical sepia mixing matrix. Row `i` produces output channel `i`
/// from the input `(r, g, b)`.
pub const SEPIA_BASE: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Per-step change of every coefficient away from intensity 5.
const SEPIA_STEP: f32 = 0.05;

/// Intensity at which the canonical matrix is used unchanged.
const SEPIA_NEUTRAL_INTENSITY: i32 = 5;

/// Sepia matrix for an intensity: every coefficient is offset by
/// `0.05 * (intensity - 5)`.
pub fn sepia_matrix(intensity: i32) -> [[f32; 3]; 3] {
    let offset = SEPIA_STEP * (intensity - SEPIA_NEUTRAL_INTENSITY) as f32;
    SEPIA_BASE.map(|row| row.map(|c| c + offset))
}

/// Replace each pixel with its luminance on all three channels.
pub fn apply_grayscale(image: &mut WorkingImage) {
    image.map_pixels(|[r, g, b]| {
        let lum = calculate_luminance(r, g, b).clamp(0.0, 255.0);
        [lum, lum, lum]
    });
}

/// Mix channels through the sepia matrix, clamping the result.
pub fn apply_sepia(image: &mut WorkingImage, intensity: i32) {
    let m = sepia_matrix(intensity);
    image.map_pixels(|[r, g, b]| {
        m.map(|row| (row[0] * r + row[1] * g + row[2] * b).clamp(0.0, 255.0))
    });
}

/// Invert every channel: `255 - v`.
pub fn apply_negative(image: &mut WorkingImage) {
    image.map_channels(|v| 255.0 - v);
}
