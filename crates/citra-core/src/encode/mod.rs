//! Image encoding for Citra.
//!
//! Edited images and histogram charts are encoded to PNG before they reach
//! the presentation layer. The encoded length also feeds the metadata
//! report's file size.
//!
//! # Examples
//!
//! ```ignore
//! use citra_core::{encode::encode_png, RasterImage};
//!
//! let image = RasterImage::filled(100, 100, [128, 128, 128]);
//! let png = encode_png(&image).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};
