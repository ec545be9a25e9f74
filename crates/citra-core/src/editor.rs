//! One complete edit: transform, then analyze.
//!
//! This is the boundary the presentation layer calls on every parameter
//! change. A missing upload is not an error here; it becomes
//! [`EditOutcome::NoImage`] with a placeholder message.

use serde::{Deserialize, Serialize};

use crate::histogram::ChartStyle;
use crate::pipeline::{transform, PipelineError, PipelineOptions};
use crate::report::{analyze, MetadataReport};
use crate::{LuminanceHistogram, ParameterSet, RasterImage, SourceImage};

/// Metadata text shown while no image has been uploaded.
pub const NO_IMAGE_MESSAGE: &str = "Belum ada gambar yang diproses.";

/// Options for a complete edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub pipeline: PipelineOptions,
    pub chart: ChartStyle,
}

/// Result of one edit.
#[derive(Debug, Clone)]
pub enum EditOutcome {
    /// The upload was edited and analyzed.
    Edited {
        image: RasterImage,
        histogram: LuminanceHistogram,
        chart: RasterImage,
        report: MetadataReport,
    },
    /// There was nothing to edit.
    NoImage,
}

impl EditOutcome {
    /// The edited image, if any.
    pub fn image(&self) -> Option<&RasterImage> {
        match self {
            EditOutcome::Edited { image, .. } => Some(image),
            EditOutcome::NoImage => None,
        }
    }

    /// The luminance histogram of the edited image, if any.
    pub fn histogram(&self) -> Option<&LuminanceHistogram> {
        match self {
            EditOutcome::Edited { histogram, .. } => Some(histogram),
            EditOutcome::NoImage => None,
        }
    }

    /// The rendered histogram chart, if any.
    pub fn chart(&self) -> Option<&RasterImage> {
        match self {
            EditOutcome::Edited { chart, .. } => Some(chart),
            EditOutcome::NoImage => None,
        }
    }

    /// The metadata report, if any.
    pub fn report(&self) -> Option<&MetadataReport> {
        match self {
            EditOutcome::Edited { report, .. } => Some(report),
            EditOutcome::NoImage => None,
        }
    }

    /// Metadata text block, or the placeholder when there is no image.
    pub fn metadata_text(&self) -> String {
        match self {
            EditOutcome::Edited { report, .. } => report.to_string(),
            EditOutcome::NoImage => NO_IMAGE_MESSAGE.to_string(),
        }
    }
}

/// Edit an optional upload and analyze the result.
///
/// # Errors
///
/// Returns `PipelineError::Encode` if the edited image cannot be encoded.
/// A missing upload yields `Ok(EditOutcome::NoImage)`.
pub fn apply_edits(
    source: Option<&SourceImage>,
    params: &ParameterSet,
    options: &EditorOptions,
) -> Result<EditOutcome, PipelineError> {
    let image = match transform(source, params, &options.pipeline) {
        Ok(image) => image,
        Err(PipelineError::MissingInput) => {
            log::debug!("No image uploaded, skipping edit");
            return Ok(EditOutcome::NoImage);
        }
        Err(e) => return Err(e),
    };

    let original_dpi = source.and_then(|s| s.dpi);
    let analysis = analyze(Some(&image), original_dpi, &options.chart)?;

    Ok(EditOutcome::Edited {
        image,
        histogram: analysis.histogram,
        chart: analysis.chart,
        report: analysis.report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorMode, Dpi, Effect};
    use image::{DynamicImage, Rgba, RgbaImage};

    fn upload() -> SourceImage {
        let img = RgbaImage::from_fn(6, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 90, 200]));
        SourceImage::new(DynamicImage::ImageRgba8(img)).with_dpi(Dpi::new(300, 300))
    }

    #[test]
    fn test_no_image() {
        let outcome =
            apply_edits(None, &ParameterSet::default(), &EditorOptions::default()).unwrap();

        assert!(matches!(outcome, EditOutcome::NoImage));
        assert!(outcome.image().is_none());
        assert!(outcome.chart().is_none());
        assert!(outcome.histogram().is_none());
        assert!(outcome.report().is_none());
        assert_eq!(outcome.metadata_text(), "Belum ada gambar yang diproses.");
    }

    #[test]
    fn test_no_image_for_any_parameters() {
        let params = ParameterSet {
            brightness: 50,
            contrast: -20,
            effect: Effect::Sharpen,
            intensity: 10,
            rotation: 90,
        };
        let outcome = apply_edits(None, &params, &EditorOptions::default()).unwrap();
        assert!(matches!(outcome, EditOutcome::NoImage));
    }

    #[test]
    fn test_edit_reports_rotated_size_and_original_dpi() {
        let source = upload();
        let params = ParameterSet {
            rotation: 90,
            ..ParameterSet::default()
        };
        let outcome = apply_edits(Some(&source), &params, &EditorOptions::default()).unwrap();

        let image = outcome.image().unwrap();
        assert_eq!((image.width, image.height), (4, 6));

        let report = outcome.report().unwrap();
        assert_eq!((report.width, report.height), (4, 6));
        assert_eq!(report.color_mode, ColorMode::Rgb);
        assert_eq!(report.dpi, Some(Dpi::new(300, 300)));

        let text = outcome.metadata_text();
        assert!(text.starts_with("📐 Ukuran Setelah Edit: 4 x 6 px\n"));
        assert!(text.contains("🎨 Mode Warna: RGB\n"));
        assert!(text.contains("📂 Format: PNG\n"));
        assert!(text.ends_with("🧭 Resolusi (DPI): 300 x 300 DPI"));
    }

    #[test]
    fn test_histogram_counts_edited_pixels() {
        let source = upload();
        let params = ParameterSet {
            rotation: 45,
            ..ParameterSet::default()
        };
        let outcome = apply_edits(Some(&source), &params, &EditorOptions::default()).unwrap();

        let image = outcome.image().unwrap();
        let histogram = outcome.histogram().unwrap();
        assert_eq!(histogram.total(), image.pixel_count());
    }

    #[test]
    fn test_unknown_dpi_text() {
        let source = SourceImage::new(DynamicImage::new_rgb8(3, 3));
        let options = EditorOptions::default();
        let outcome = apply_edits(Some(&source), &ParameterSet::default(), &options).unwrap();
        assert!(outcome
            .metadata_text()
            .ends_with("🧭 Resolusi (DPI): Tidak diketahui"));
    }

    #[test]
    fn test_chart_uses_configured_style() {
        let source = upload();
        let mut options = EditorOptions::default();
        options.chart.width = 320;
        options.chart.height = 120;

        let outcome = apply_edits(Some(&source), &ParameterSet::default(), &options).unwrap();
        let chart = outcome.chart().unwrap();
        assert_eq!((chart.width, chart.height), (320, 120));
    }
}
