//! Brightness and contrast enhancement.
//!
//! Both adjustments take a percentage in -100..=100 and turn it into an
//! enhancement factor `1 + value / 100`, where 1.0 leaves the image
//! unchanged. Results are clamped to 0-255 after each adjustment.

use serde::{Deserialize, Serialize};

use crate::WorkingImage;

/// Midpoint of the 0-255 channel range.
pub const CONTRAST_MIDPOINT: f32 = 127.5;

/// Reference level contrast is stretched around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContrastPivot {
    /// Fixed middle gray (127.5).
    #[default]
    Midpoint,
    /// The image's own mean luminance, rounded to a whole level.
    MeanLuminance,
}

/// Apply brightness adjustment.
///
/// Formula: `output = input * (1 + brightness/100)`
pub fn apply_brightness(image: &mut WorkingImage, brightness: i32) {
    if brightness == 0 {
        return;
    }
    let factor = 1.0 + brightness as f32 / 100.0;
    image.map_channels(|v| (v * factor).clamp(0.0, 255.0));
}

/// Apply contrast adjustment.
///
/// Formula: `output = (input - pivot) * (1 + contrast/100) + pivot`
pub fn apply_contrast(image: &mut WorkingImage, contrast: i32, pivot: ContrastPivot) {
    if contrast == 0 {
        return;
    }
    let factor = 1.0 + contrast as f32 / 100.0;
    let pivot = match pivot {
        ContrastPivot::Midpoint => CONTRAST_MIDPOINT,
        ContrastPivot::MeanLuminance => image.mean_luminance().round(),
    };
    image.map_channels(|v| ((v - pivot) * factor + pivot).clamp(0.0, 255.0));
}
