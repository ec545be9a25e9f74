//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! This is the grayscale projection shared by the Grayscale effect, the
//! mean-luminance contrast pivot and the histogram.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.114;

/// Calculate luminance from channel values on any common scale.
///
/// Returns a value on the same scale as the inputs.
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Calculate luminance from u8 RGB values (0 to 255).
///
/// Uses fixed-point weights (299/587/114 per mille) with rounding so that
/// gray inputs map to themselves exactly.
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000;
    lum.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luminance_pure_white() {
        assert!((calculate_luminance(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
        assert_eq!(calculate_luminance_u8(255, 255, 255), 255);
    }

    #[test]
    fn test_luminance_pure_black() {
        assert_eq!(calculate_luminance(0.0, 0.0, 0.0), 0.0);
        assert_eq!(calculate_luminance_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in 0..=255u8 {
            assert_eq!(calculate_luminance_u8(v, v, v), v);
        }
    }

    #[test]
    fn test_luminance_primaries() {
        // 0.299 * 255 = 76.245
        assert_eq!(calculate_luminance_u8(255, 0, 0), 76);
        // 0.587 * 255 = 149.685
        assert_eq!(calculate_luminance_u8(0, 255, 0), 150);
        // 0.114 * 255 = 29.07
        assert_eq!(calculate_luminance_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_luminance_f32_matches_u8() {
        for r in [0u8, 64, 128, 192, 255] {
            for g in [0u8, 64, 128, 192, 255] {
                for b in [0u8, 64, 128, 192, 255] {
                    let lum_f32 = calculate_luminance(r as f32, g as f32, b as f32);
                    let lum_u8 = calculate_luminance_u8(r, g, b);
                    assert!(
                        (lum_u8 as f32 - lum_f32).abs() <= 0.5 + 1e-3,
                        "f32 and u8 luminance should match for ({}, {}, {})",
                        r,
                        g,
                        b
                    );
                }
            }
        }
    }
}
