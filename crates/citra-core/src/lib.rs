//! Citra Core - Image adjustment library
//!
//! This crate provides the core functionality of the Citra editor: the
//! transform pipeline (brightness, contrast, named effects, rotation), the
//! luminance histogram and the metadata report, plus the decode/encode
//! adapters around them.

pub mod adjustments;
pub mod decode;
pub mod editor;
pub mod effects;
pub mod encode;
pub mod histogram;
pub mod luminance;
pub mod pipeline;
pub mod report;
pub mod transform;
pub mod working;

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adjustments::ContrastPivot;
pub use decode::{ColorMode, Dpi, RasterImage, SourceImage};
pub use editor::{apply_edits, EditOutcome, EditorOptions, NO_IMAGE_MESSAGE};
pub use effects::{apply_effect, sepia_matrix};
pub use histogram::{compute_luminance_histogram, render_histogram_chart, ChartStyle};
pub use pipeline::{transform, transform_image, PipelineError, PipelineOptions};
pub use report::{analyze, Analysis, ImageFormat, MetadataReport};
pub use transform::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
pub use working::WorkingImage;

/// Valid brightness values (percent change).
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -100..=100;
/// Valid contrast values (percent change).
pub const CONTRAST_RANGE: RangeInclusive<i32> = -100..=100;
/// Valid effect intensity values.
pub const INTENSITY_RANGE: RangeInclusive<i32> = 0..=10;
/// Valid rotation angles in degrees.
pub const ROTATION_RANGE: RangeInclusive<i32> = -180..=180;

/// Named effect applied after brightness and contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Effect {
    /// No effect.
    #[default]
    None,
    /// Luminance only, spread over three equal channels.
    Grayscale,
    /// Warm antique tone from a 3x3 color mixing matrix.
    Sepia,
    /// Inverted channel values.
    Negative,
    /// Gaussian blur, intensity is the sigma.
    Blur,
    /// Edge amplification, intensity is the strength.
    Sharpen,
}

impl Effect {
    /// All effects in presentation order.
    pub const ALL: [Effect; 6] = [
        Effect::None,
        Effect::Grayscale,
        Effect::Sepia,
        Effect::Negative,
        Effect::Blur,
        Effect::Sharpen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Effect::None => "None",
            Effect::Grayscale => "Grayscale",
            Effect::Sepia => "Sepia",
            Effect::Negative => "Negative",
            Effect::Blur => "Blur",
            Effect::Sharpen => "Sharpen",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an effect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown effect: {0}")]
pub struct ParseEffectError(pub String);

impl FromStr for Effect {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Effect::ALL
            .into_iter()
            .find(|effect| effect.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseEffectError(s.to_string()))
    }
}

/// Edit parameters for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Brightness (-100 to 100)
    pub brightness: i32,
    /// Contrast (-100 to 100)
    pub contrast: i32,
    /// Named effect
    pub effect: Effect,
    /// Effect intensity (0 to 10)
    pub intensity: i32,
    /// Rotation in degrees, counter-clockwise (-180 to 180)
    pub rotation: i32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            effect: Effect::None,
            intensity: 5,
            rotation: 0,
        }
    }
}

impl ParameterSet {
    /// Create a new ParameterSet with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with every field clamped into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: clamp_to(self.brightness, &BRIGHTNESS_RANGE),
            contrast: clamp_to(self.contrast, &CONTRAST_RANGE),
            effect: self.effect,
            intensity: clamp_to(self.intensity, &INTENSITY_RANGE),
            rotation: clamp_to(self.rotation, &ROTATION_RANGE),
        }
    }

    /// Check whether every field is inside its documented range.
    pub fn is_valid(&self) -> bool {
        *self == self.clamped()
    }

    /// Brightness as an enhancement factor (1.0 = unchanged).
    pub fn brightness_factor(&self) -> f32 {
        1.0 + self.brightness as f32 / 100.0
    }

    /// Contrast as an enhancement factor (1.0 = unchanged).
    pub fn contrast_factor(&self) -> f32 {
        1.0 + self.contrast as f32 / 100.0
    }

    /// Check if running the pipeline would leave pixels untouched.
    pub fn is_identity(&self) -> bool {
        let effect_is_noop = match self.effect {
            Effect::None => true,
            Effect::Blur | Effect::Sharpen => self.intensity == 0,
            Effect::Grayscale | Effect::Sepia | Effect::Negative => false,
        };
        self.brightness == 0 && self.contrast == 0 && effect_is_noop && self.rotation % 360 == 0
    }
}

#[inline]
fn clamp_to(value: i32, range: &RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}

/// Luminance histogram data for an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceHistogram {
    /// Pixel count per luminance level (256 bins)
    pub bins: [u32; 256],
}

impl Default for LuminanceHistogram {
    fn default() -> Self {
        Self { bins: [0; 256] }
    }
}

impl LuminanceHistogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of pixels counted
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Find the tallest bin for normalization
    pub fn max_count(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Pixel counts indexed by luminance level
    pub fn bins(&self) -> &[u32; 256] {
        &self.bins
    }
}
