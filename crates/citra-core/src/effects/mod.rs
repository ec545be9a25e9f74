//! Named effects applied after brightness and contrast.
//!
//! Each [`Effect`] variant has exactly one handler:
//!
//! | Effect    | Handler                | Intensity meaning        |
//! |-----------|------------------------|--------------------------|
//! | None      | identity               | ignored                  |
//! | Grayscale | [`apply_grayscale`]    | ignored                  |
//! | Sepia     | [`apply_sepia`]        | shifts every coefficient |
//! | Negative  | [`apply_negative`]     | ignored                  |
//! | Blur      | [`apply_gaussian_blur`]| sigma                    |
//! | Sharpen   | [`apply_sharpen`]      | edge gain                |

mod filter;
mod tone;

pub use filter::{apply_gaussian_blur, apply_sharpen, gaussian_kernel_1d};
pub use tone::{apply_grayscale, apply_negative, apply_sepia, sepia_matrix, SEPIA_BASE};

use crate::{Effect, WorkingImage};

/// Apply `effect` at the given intensity (0 to 10).
///
/// Blur and Sharpen return the input unchanged at intensity 0.
pub fn apply_effect(image: WorkingImage, effect: Effect, intensity: i32) -> WorkingImage {
    match effect {
        Effect::None => image,
        Effect::Grayscale => {
            let mut image = image;
            apply_grayscale(&mut image);
            image
        }
        Effect::Sepia => {
            let mut image = image;
            apply_sepia(&mut image, intensity);
            image
        }
        Effect::Negative => {
            let mut image = image;
            apply_negative(&mut image);
            image
        }
        Effect::Blur => apply_gaussian_blur(&image, intensity as f32),
        Effect::Sharpen => apply_sharpen(&image, intensity as f32),
    }
}
