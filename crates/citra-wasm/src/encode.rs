//! PNG encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@citra/wasm';
//!
//! const png = encode_png(result.image());
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::types::JsRasterImage;
use citra_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a JsRasterImage to PNG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match width * height * 3,
/// if either dimension is zero, or if encoding fails internally.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// `Result<T, JsValue>` only works on wasm32 targets; the native tests go
/// through `citra_core::encode` directly.
#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_from_image_creates_valid_png() {
        let img = JsRasterImage::new(10, 10, vec![128u8; 10 * 10 * 3]);

        let png = encode::encode_png(&img.to_raster()).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_rejects_short_buffer() {
        let img = JsRasterImage::new(10, 10, vec![128u8; 10]);
        assert!(encode::encode_png(&img.to_raster()).is_err());
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let img = JsRasterImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_dimensions() {
        let img = JsRasterImage::new(0, 100, vec![]);
        assert!(encode_png(&img).is_err());
    }
}
