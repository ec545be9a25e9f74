//! Physical resolution extraction from encoded image bytes.
//!
//! Sources are tried in order:
//! 1. PNG `pHYs` chunk (pixels per metre), read with the `png` decoder
//! 2. JPEG JFIF APP0 density (dots per inch or per centimetre)
//! 3. EXIF `XResolution` / `YResolution` with `ResolutionUnit`

use std::io::Cursor;

use exif::{In, Reader, Tag, Value};

use super::Dpi;

const INCHES_PER_METRE: f64 = 0.0254;
const CM_PER_INCH: f64 = 2.54;

/// Read the resolution stored in an encoded image, if any.
pub fn extract_dpi(bytes: &[u8]) -> Option<Dpi> {
    let dpi = if bytes.starts_with(&[0xFF, 0xD8]) {
        jfif_dpi(bytes)
    } else {
        png_dpi(bytes)
    };

    dpi.or_else(|| exif_dpi(bytes))
}

/// Pixel density from the PNG header chunks.
fn png_dpi(bytes: &[u8]) -> Option<Dpi> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;

    // Unspecified units only give an aspect ratio
    match dims.unit {
        png::Unit::Meter => Some(Dpi::new(
            to_dpi(dims.xppu as f64 * INCHES_PER_METRE),
            to_dpi(dims.yppu as f64 * INCHES_PER_METRE),
        )),
        png::Unit::Unspecified => None,
    }
}

/// Walk JPEG marker segments looking for a JFIF APP0 header.
fn jfif_dpi(bytes: &[u8]) -> Option<Dpi> {
    let mut pos = 2;

    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        // Start of scan: no more headers
        if marker == 0xDA {
            return None;
        }

        let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        if len < 2 || pos + 2 + len > bytes.len() {
            return None;
        }
        let payload = &bytes[pos + 4..pos + 2 + len];

        if marker == 0xE0 && payload.len() >= 12 && payload.starts_with(b"JFIF\0") {
            let units = payload[7];
            let x = u16::from_be_bytes([payload[8], payload[9]]) as f64;
            let y = u16::from_be_bytes([payload[10], payload[11]]) as f64;
            return match units {
                1 => Some(Dpi::new(to_dpi(x), to_dpi(y))),
                2 => Some(Dpi::new(to_dpi(x * CM_PER_INCH), to_dpi(y * CM_PER_INCH))),
                _ => None,
            };
        }

        pos += 2 + len;
    }

    None
}

fn exif_dpi(bytes: &[u8]) -> Option<Dpi> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;

    let x = rational_field(&exif, Tag::XResolution)?;
    let y = rational_field(&exif, Tag::YResolution)?;
    let unit = exif
        .get_field(Tag::ResolutionUnit, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(2);

    let scale = match unit {
        2 => 1.0,
        3 => CM_PER_INCH,
        _ => return None,
    };

    log::trace!("EXIF resolution {x} x {y} (unit {unit})");
    Some(Dpi::new(to_dpi(x * scale), to_dpi(y * scale)))
}

fn rational_field(exif: &exif::Exif, tag: Tag) -> Option<f64> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(values) => values.first().map(|r| r.to_f64()),
        _ => None,
    }
}

#[inline]
fn to_dpi(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_with_pixel_dims(dims: Option<png::PixelDimensions>) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, 2, 2);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(dims);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0u8; 12]).unwrap();
        writer.finish().unwrap();
        bytes
    }

    fn metres(xppu: u32, yppu: u32) -> Option<png::PixelDimensions> {
        Some(png::PixelDimensions {
            xppu,
            yppu,
            unit: png::Unit::Meter,
        })
    }

    /// Big-endian TIFF block holding only the three resolution tags.
    fn tiff_resolution(x: u32, y: u32, unit: u16) -> Vec<u8> {
        let mut tiff = b"MM\0\x2a".to_vec();
        tiff.extend_from_slice(&8u32.to_be_bytes());
        tiff.extend_from_slice(&3u16.to_be_bytes());

        // tag, type, count, value or offset
        let entry = |tiff: &mut Vec<u8>, tag: u16, kind: u16, value: [u8; 4]| {
            tiff.extend_from_slice(&tag.to_be_bytes());
            tiff.extend_from_slice(&kind.to_be_bytes());
            tiff.extend_from_slice(&1u32.to_be_bytes());
            tiff.extend_from_slice(&value);
        };
        entry(&mut tiff, 0x011A, 5, 50u32.to_be_bytes());
        entry(&mut tiff, 0x011B, 5, 58u32.to_be_bytes());
        let [hi, lo] = unit.to_be_bytes();
        entry(&mut tiff, 0x0128, 3, [hi, lo, 0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes());

        for value in [x, y] {
            tiff.extend_from_slice(&value.to_be_bytes());
            tiff.extend_from_slice(&1u32.to_be_bytes());
        }
        tiff
    }

    /// JPEG headers with an EXIF APP1 segment and no JFIF APP0.
    fn jpeg_with_exif(x: u32, y: u32, unit: u16) -> Vec<u8> {
        let mut payload = b"Exif\0\0".to_vec();
        payload.extend_from_slice(&tiff_resolution(x, y, unit));

        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
        bytes.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        bytes.extend_from_slice(&payload);
        bytes.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02]);
        bytes
    }

    fn jpeg_with_jfif(units: u8, x: u16, y: u16) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[0x01, 0x01, units]);
        bytes.extend_from_slice(&x.to_be_bytes());
        bytes.extend_from_slice(&y.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x00]);
        bytes.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02]);
        bytes
    }

    #[test]
    fn test_png_phys_metre() {
        // 2835 px/m is the usual encoding of 72 DPI
        let bytes = png_with_pixel_dims(metres(2835, 2835));
        assert_eq!(extract_dpi(&bytes), Some(Dpi::new(72, 72)));
    }

    #[test]
    fn test_png_phys_anisotropic() {
        let bytes = png_with_pixel_dims(metres(11811, 5906));
        assert_eq!(extract_dpi(&bytes), Some(Dpi::new(300, 150)));
    }

    #[test]
    fn test_png_phys_unknown_unit() {
        let bytes = png_with_pixel_dims(Some(png::PixelDimensions {
            xppu: 1,
            yppu: 1,
            unit: png::Unit::Unspecified,
        }));
        assert_eq!(png_dpi(&bytes), None);
    }

    #[test]
    fn test_png_without_phys() {
        let bytes = png_with_pixel_dims(None);
        assert_eq!(png_dpi(&bytes), None);
        assert_eq!(extract_dpi(&bytes), None);
    }

    #[test]
    fn test_truncated_png() {
        let mut bytes = png_with_pixel_dims(metres(2835, 2835));
        bytes.truncate(20);
        assert_eq!(png_dpi(&bytes), None);
    }

    #[test]
    fn test_exif_inches_without_jfif() {
        let bytes = jpeg_with_exif(72, 96, 2);
        assert_eq!(jfif_dpi(&bytes), None);
        assert_eq!(extract_dpi(&bytes), Some(Dpi::new(72, 96)));
    }

    #[test]
    fn test_exif_centimetres() {
        // 118 px/cm is 299.72 DPI, 59 px/cm is 149.86 DPI
        let bytes = jpeg_with_exif(118, 59, 3);
        assert_eq!(exif_dpi(&bytes), Some(Dpi::new(300, 150)));
        assert_eq!(extract_dpi(&bytes), Some(Dpi::new(300, 150)));
    }

    #[test]
    fn test_exif_unsupported_unit() {
        let bytes = jpeg_with_exif(72, 72, 1);
        assert_eq!(extract_dpi(&bytes), None);
    }

    #[test]
    fn test_jfif_inches() {
        let bytes = jpeg_with_jfif(1, 300, 300);
        assert_eq!(jfif_dpi(&bytes), Some(Dpi::new(300, 300)));
    }

    #[test]
    fn test_jfif_centimetres() {
        let bytes = jpeg_with_jfif(2, 100, 50);
        assert_eq!(jfif_dpi(&bytes), Some(Dpi::new(254, 127)));
    }

    #[test]
    fn test_jfif_aspect_only() {
        let bytes = jpeg_with_jfif(0, 1, 1);
        assert_eq!(jfif_dpi(&bytes), None);
    }

    #[test]
    fn test_unknown_bytes() {
        assert_eq!(extract_dpi(b"not an image"), None);
        assert_eq!(extract_dpi(&[]), None);
    }

    #[test]
    fn test_to_dpi() {
        assert_eq!(to_dpi(71.9989), 72);
        assert_eq!(to_dpi(-3.0), 0);
        assert_eq!(to_dpi(f64::NAN), 0);
    }
}
