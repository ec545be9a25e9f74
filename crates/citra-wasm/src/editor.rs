//! Editor WASM bindings.
//!
//! This module provides JavaScript bindings for the edit parameters and the
//! single entry point the UI calls whenever an input changes.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const params = new JsEditParams();
//! params.brightness = 20;
//! params.effect = 'Sepia';
//!
//! const bytes = file ? new Uint8Array(await file.arrayBuffer()) : undefined;
//! const result = apply_filters(bytes, params);
//! metadataBox.value = result.metadata();
//! ```

use std::str::FromStr;

use citra_core::decode::decode_source;
use citra_core::{
    apply_edits, EditOutcome, EditorOptions, Effect, ParameterSet, ParseEffectError,
};
use wasm_bindgen::prelude::*;

use crate::types::JsRasterImage;

/// Edit parameters wrapper for JavaScript
#[wasm_bindgen]
pub struct JsEditParams {
    inner: ParameterSet,
}

#[wasm_bindgen]
impl JsEditParams {
    /// Create parameters with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ParameterSet::default(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: i32) {
        self.inner.contrast = value;
    }

    /// Effect name: "None", "Grayscale", "Sepia", "Negative", "Blur" or "Sharpen"
    #[wasm_bindgen(getter)]
    pub fn effect(&self) -> String {
        self.inner.effect.name().to_string()
    }

    /// Set the effect by name (case-insensitive).
    ///
    /// An unknown name is logged and leaves the current effect unchanged.
    #[wasm_bindgen(setter)]
    pub fn set_effect(&mut self, value: &str) {
        if let Err(e) = self.set_effect_name(value) {
            log::warn!("{e}, keeping {}", self.inner.effect);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn intensity(&self) -> i32 {
        self.inner.intensity
    }

    #[wasm_bindgen(setter)]
    pub fn set_intensity(&mut self, value: i32) {
        self.inner.intensity = value;
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> i32 {
        self.inner.rotation
    }

    #[wasm_bindgen(setter)]
    pub fn set_rotation(&mut self, value: i32) {
        self.inner.rotation = value;
    }

    /// Check whether every value lies in its slider range
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// Check whether these parameters leave an image unchanged
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Names of all effects in presentation order
    pub fn effect_names() -> Vec<String> {
        Effect::ALL.iter().map(|e| e.name().to_string()).collect()
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON
    pub fn from_json(value: JsValue) -> Result<JsEditParams, JsValue> {
        let inner: ParameterSet =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsEditParams {
    fn default() -> Self {
        Self::new()
    }
}

impl JsEditParams {
    pub(crate) fn inner(&self) -> &ParameterSet {
        &self.inner
    }

    fn set_effect_name(&mut self, name: &str) -> Result<(), ParseEffectError> {
        self.inner.effect = Effect::from_str(name)?;
        Ok(())
    }
}

/// Everything the UI shows after an edit.
///
/// When no image was uploaded, the image accessors return `undefined` and
/// `metadata()` returns the placeholder text.
#[wasm_bindgen]
pub struct JsEditResult {
    outcome: EditOutcome,
    image_png: Option<Vec<u8>>,
    histogram_png: Option<Vec<u8>>,
    options: EditorOptions,
}

#[wasm_bindgen]
impl JsEditResult {
    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.outcome.image().is_some()
    }

    /// The edited image
    pub fn image(&self) -> Option<JsRasterImage> {
        self.outcome.image().cloned().map(JsRasterImage::from_raster)
    }

    /// The rendered histogram chart
    pub fn histogram_chart(&self) -> Option<JsRasterImage> {
        self.outcome.chart().cloned().map(JsRasterImage::from_raster)
    }

    /// The edited image as PNG bytes
    pub fn image_png(&self) -> Option<Vec<u8>> {
        self.image_png.clone()
    }

    /// The histogram chart as PNG bytes
    pub fn histogram_png(&self) -> Option<Vec<u8>> {
        self.histogram_png.clone()
    }

    /// Luminance counts (256 bins), empty without an image
    pub fn histogram_bins(&self) -> Vec<u32> {
        self.outcome
            .histogram()
            .map(|h| h.bins().to_vec())
            .unwrap_or_default()
    }

    /// Metadata text block
    pub fn metadata(&self) -> String {
        self.outcome.metadata_text()
    }

    /// Metadata report as a plain object
    pub fn metadata_report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.outcome.report())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn histogram_title(&self) -> String {
        self.options.chart.title.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn histogram_x_label(&self) -> String {
        self.options.chart.x_label.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn histogram_y_label(&self) -> String {
        self.options.chart.y_label.clone()
    }
}

/// Decode an optional upload, edit it and encode the results.
fn edit_upload(
    upload: Option<&[u8]>,
    params: &ParameterSet,
    options: EditorOptions,
) -> Result<JsEditResult, String> {
    let source = upload
        .map(decode_source)
        .transpose()
        .map_err(|e| e.to_string())?;

    let outcome = apply_edits(source.as_ref(), params, &options).map_err(|e| e.to_string())?;

    let image_png = outcome
        .image()
        .map(citra_core::encode::encode_png)
        .transpose()
        .map_err(|e| e.to_string())?;
    let histogram_png = outcome
        .chart()
        .map(citra_core::encode::encode_png)
        .transpose()
        .map_err(|e| e.to_string())?;

    Ok(JsEditResult {
        outcome,
        image_png,
        histogram_png,
        options,
    })
}

/// Apply the edit parameters to an uploaded image.
///
/// # Arguments
/// * `upload` - Encoded image bytes (PNG or JPEG), or `undefined` when nothing
///   has been uploaded yet
/// * `params` - The edit parameters
///
/// # Errors
/// Returns an error if the upload cannot be decoded.
#[wasm_bindgen]
pub fn apply_filters(
    upload: Option<Vec<u8>>,
    params: &JsEditParams,
) -> Result<JsEditResult, JsValue> {
    edit_upload(upload.as_deref(), params.inner(), EditorOptions::default())
        .map_err(|e| JsValue::from_str(&e))
}

/// Like [`apply_filters`], with editor options given as a plain object.
///
/// Missing fields keep their defaults, e.g.
/// `{ pipeline: { interpolation: 'Bilinear' }, chart: { width: 600 } }`.
#[wasm_bindgen]
pub fn apply_filters_with_options(
    upload: Option<Vec<u8>>,
    params: &JsEditParams,
    options: JsValue,
) -> Result<JsEditResult, JsValue> {
    let options: EditorOptions = if options.is_undefined() || options.is_null() {
        EditorOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    edit_upload(upload.as_deref(), params.inner(), options).map_err(|e| JsValue::from_str(&e))
}
