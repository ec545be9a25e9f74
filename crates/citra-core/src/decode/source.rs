//! Decoding of uploaded image files into a [`SourceImage`].

use std::io::Cursor;

use image::{DynamicImage, ImageError, ImageReader};

use super::dpi::extract_dpi;
use super::{ColorMode, DecodeError, Dpi};

/// An uploaded image before any edits, in its original pixel layout.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Decoded pixels in whatever color type the file used.
    pub image: DynamicImage,
    /// Pixel layout of the upload.
    pub color_mode: ColorMode,
    /// Resolution recorded in the file, if any.
    pub dpi: Option<Dpi>,
}

impl SourceImage {
    /// Wrap an already decoded image with no resolution metadata.
    pub fn new(image: DynamicImage) -> Self {
        let color_mode = ColorMode::from(image.color());
        Self {
            image,
            color_mode,
            dpi: None,
        }
    }

    /// Attach a resolution to the source.
    pub fn with_dpi(mut self, dpi: Dpi) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode an uploaded image (PNG or JPEG) from bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let image = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let mut source = SourceImage::new(image);
    source.dpi = extract_dpi(bytes).filter(Dpi::is_known);

    log::trace!(
        "Decoded {}x{} {} upload, dpi {:?}",
        source.width(),
        source.height(),
        source.color_mode,
        source.dpi
    );

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, RgbaImage};

    fn encode_png_rgba(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 128]));
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_keeps_color_mode() {
        let bytes = encode_png_rgba(4, 3);
        let source = decode_source(&bytes).unwrap();

        assert_eq!(source.width(), 4);
        assert_eq!(source.height(), 3);
        assert_eq!(source.color_mode, ColorMode::Rgba);
        assert_eq!(source.dpi, None);
    }

    #[test]
    fn test_decode_png_reads_dpi() {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, 3, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: 3780,
            yppu: 3780,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[200u8; 9]).unwrap();
        writer.finish().unwrap();

        let source = decode_source(&bytes).unwrap();
        assert_eq!(source.dpi, Some(Dpi::new(96, 96)));
        assert_eq!(source.color_mode, ColorMode::Rgb);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_source(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let mut bytes = encode_png_rgba(16, 16);
        bytes.truncate(40);
        let result = decode_source(&bytes);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_source_with_dpi() {
        let source = SourceImage::new(DynamicImage::new_rgb8(2, 2)).with_dpi(Dpi::new(96, 96));
        assert_eq!(source.dpi, Some(Dpi::new(96, 96)));
        assert_eq!(source.color_mode, ColorMode::Rgb);
    }
}
