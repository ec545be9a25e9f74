//! The transform pipeline.
//!
//! ## Stage Order
//! 1. Normalize to RGB
//! 2. Brightness
//! 3. Contrast
//! 4. Named effect
//! 5. Rotation
//!
//! Every stage works on the floating-point [`WorkingImage`]; the result is
//! rounded to 8 bits once at the end.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adjustments::{apply_brightness, apply_contrast};
use crate::effects::apply_effect;
use crate::encode::EncodeError;
use crate::transform::apply_rotation;
use crate::{
    ContrastPivot, InterpolationFilter, ParameterSet, RasterImage, SourceImage, WorkingImage,
};

/// Errors raised while editing or analyzing an image.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No image was supplied.
    #[error("No image to process")]
    MissingInput,

    /// The edited image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Tunables that are not part of the per-edit parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Reference level for the contrast stretch.
    pub contrast_pivot: ContrastPivot,
    /// Resampling used for angles that are not multiples of 90 degrees.
    pub interpolation: InterpolationFilter,
}

/// Run the pipeline on an optional source image.
///
/// # Errors
///
/// Returns `PipelineError::MissingInput` when `source` is `None`.
pub fn transform(
    source: Option<&SourceImage>,
    params: &ParameterSet,
    options: &PipelineOptions,
) -> Result<RasterImage, PipelineError> {
    let source = source.ok_or(PipelineError::MissingInput)?;
    Ok(transform_image(&source.image, params, options))
}

/// Run the pipeline on a decoded image.
///
/// Parameters outside their documented ranges are clamped first.
pub fn transform_image(
    image: &DynamicImage,
    params: &ParameterSet,
    options: &PipelineOptions,
) -> RasterImage {
    let params = params.clamped();

    let rgb = image.to_rgb8();
    log::debug!(
        "Editing {}x{} image with {:?}",
        rgb.width(),
        rgb.height(),
        params
    );
    let mut working = WorkingImage::from_rgb_image(&rgb);

    apply_brightness(&mut working, params.brightness);
    apply_contrast(&mut working, params.contrast, options.contrast_pivot);

    let working = apply_effect(working, params.effect, params.intensity);
    log::debug!("Applied {} at intensity {}", params.effect, params.intensity);

    let working = apply_rotation(&working, params.rotation as f64, options.interpolation);
    log::debug!(
        "Rotated {} degrees to {}x{}",
        params.rotation,
        working.width,
        working.height
    );

    working.to_raster()
}
