//! Image decoding for Citra.
//!
//! This module provides functionality for:
//! - Decoding uploaded PNG and JPEG files
//! - Reading the physical resolution (DPI) recorded in the file
//! - The RGB raster type every pipeline stage produces
//!
//! # Examples
//!
//! ```ignore
//! use citra_core::decode::decode_source;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let source = decode_source(&bytes).unwrap();
//! println!("Decoded {}x{} {}", source.width(), source.height(), source.color_mode);
//! ```

mod dpi;
mod source;
mod types;

pub use dpi::extract_dpi;
pub use source::{decode_source, SourceImage};
pub use types::{ColorMode, DecodeError, Dpi, RasterImage};
