//! Analysis of an edited image: histogram, chart and metadata report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encode::encode_png;
use crate::histogram::{compute_luminance_histogram, render_histogram_chart, ChartStyle};
use crate::{ColorMode, Dpi, LuminanceHistogram, PipelineError, RasterImage};

/// Shown in place of a resolution the upload did not record.
pub const UNKNOWN_DPI_TEXT: &str = "Tidak diketahui";

/// Encoding the edited image is delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    Png,
}

impl ImageFormat {
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
        }
    }
}

/// Facts about an edited image, shown next to the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataReport {
    /// Width after editing, in pixels.
    pub width: u32,
    /// Height after editing, in pixels.
    pub height: u32,
    /// Pixel layout of the edited image.
    pub color_mode: ColorMode,
    /// Target encoding.
    pub format: ImageFormat,
    /// Size of the image in the target encoding.
    pub encoded_bytes: usize,
    /// Resolution of the original upload.
    pub dpi: Option<Dpi>,
}

impl MetadataReport {
    /// Build the report for an edited image.
    ///
    /// `original_dpi` comes from the upload, not the edited image; edits
    /// do not change physical resolution.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Encode` if the image cannot be encoded.
    pub fn from_image(
        image: &RasterImage,
        original_dpi: Option<Dpi>,
    ) -> Result<Self, PipelineError> {
        let format = ImageFormat::Png;
        let encoded = encode_png(image)?;

        Ok(Self {
            width: image.width,
            height: image.height,
            color_mode: image.color_mode(),
            format,
            encoded_bytes: encoded.len(),
            dpi: original_dpi,
        })
    }

    /// Encoded size in kilobytes, rounded to 2 decimal places with ties
    /// to even.
    pub fn size_kb(&self) -> f64 {
        // bytes * 100 / 1024 == bytes * 25 / 256, exact in f64
        ((self.encoded_bytes as u64 * 25) as f64 / 256.0).round_ties_even() / 100.0
    }

    /// `"{x} x {y} DPI"`, or the unknown placeholder for a missing or zero
    /// resolution.
    pub fn dpi_text(&self) -> String {
        match self.dpi {
            Some(dpi) if dpi.is_known() => format!("{} x {} DPI", dpi.x, dpi.y),
            _ => UNKNOWN_DPI_TEXT.to_string(),
        }
    }
}

/// Print a rounded kilobyte value, always with a fractional part.
fn format_kb(kb: f64) -> String {
    if kb.fract() == 0.0 {
        format!("{kb:.1}")
    } else {
        format!("{kb}")
    }
}

impl fmt::Display for MetadataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📐 Ukuran Setelah Edit: {} x {} px", self.width, self.height)?;
        writeln!(f, "🎨 Mode Warna: {}", self.color_mode)?;
        writeln!(f, "📂 Format: {}", self.format.name())?;
        writeln!(f, "💾 Ukuran File: {} KB", format_kb(self.size_kb()))?;
        write!(f, "🧭 Resolusi (DPI): {}", self.dpi_text())
    }
}

/// Everything derived from an edited image.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub histogram: LuminanceHistogram,
    pub chart: RasterImage,
    pub report: MetadataReport,
}

/// Derive the histogram, its chart and the metadata report.
///
/// # Errors
///
/// Returns `PipelineError::MissingInput` when there is no image, and
/// `PipelineError::Encode` if the image cannot be encoded for sizing.
pub fn analyze(
    image: Option<&RasterImage>,
    original_dpi: Option<Dpi>,
    chart_style: &ChartStyle,
) -> Result<Analysis, PipelineError> {
    let image = image.ok_or(PipelineError::MissingInput)?;

    let histogram = compute_luminance_histogram(image);
    let chart = render_histogram_chart(&histogram, chart_style);
    let report = MetadataReport::from_image(image, original_dpi)?;

    log::debug!(
        "Analyzed {}x{} image: {} bytes as {}",
        report.width,
        report.height,
        report.encoded_bytes,
        report.format.name()
    );

    Ok(Analysis {
        histogram,
        chart,
        report,
    })
}
