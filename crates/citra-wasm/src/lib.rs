//! Citra WASM - WebAssembly bindings for Citra
//!
//! This crate provides WASM bindings to expose the citra-core editor
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - Edit parameters and the `apply_filters` entry point
//! - `types` - WASM-compatible wrapper types for image data
//! - `encode` - PNG encoding bindings
//! - `guide` - Usage guide text
//!
//! # Usage
//!
//! ```typescript
//! import init, { apply_filters, JsEditParams } from '@citra/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const params = new JsEditParams();
//! params.rotation = 90;
//! const result = apply_filters(new Uint8Array(await file.arrayBuffer()), params);
//! console.log(result.metadata());
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod encode;
mod guide;
mod logger;
mod types;

// Re-export public types
pub use editor::{apply_filters, apply_filters_with_options, JsEditParams, JsEditResult};
pub use encode::encode_png;
pub use guide::usage_guide;
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
///
/// Routes `log` records to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    logger::init_logger(log::LevelFilter::Info);
}

/// Enable per-stage debug logging in the browser console.
#[wasm_bindgen]
pub fn set_debug_logging(enabled: bool) {
    let level = if enabled {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    log::set_max_level(level);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
