//! Geometric transforms.
//!
//! Rotation is the last pipeline stage, so it sees the result of every
//! tonal adjustment and effect.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Origin is the top-left corner, y grows downward
//! - The canvas expands so no rotated corner is cropped

mod rotation;

pub use rotation::{apply_rotation, compute_rotated_bounds, InterpolationFilter};
