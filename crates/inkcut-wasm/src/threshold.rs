//! Thresholding WASM bindings.
//!
//! The two slider controls feed [`ThresholdParams`]. Setters clamp into 0-255
//! so out-of-range input from the UI never reaches the engine.

use crate::types::JsPixelBuffer;
use inkcut_core::threshold::{self as core_threshold, ink_coverage, PARAM_MAX, PARAM_MIN};
use wasm_bindgen::prelude::*;

/// Threshold parameters wrapper for JavaScript
#[wasm_bindgen]
pub struct ThresholdParams {
    inner: core_threshold::ThresholdParams,
}

#[wasm_bindgen]
impl ThresholdParams {
    /// Create params with default values (luminance 200, alpha 50)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: core_threshold::ThresholdParams::new(),
        }
    }

    /// Get luminance threshold
    #[wasm_bindgen(getter)]
    pub fn luminance_threshold(&self) -> i32 {
        self.inner.luminance_threshold
    }

    /// Set luminance threshold, clamped to 0-255
    #[wasm_bindgen(setter)]
    pub fn set_luminance_threshold(&mut self, value: f64) {
        self.inner.luminance_threshold = clamp_slider(value);
    }

    /// Get alpha cutoff
    #[wasm_bindgen(getter)]
    pub fn alpha_cutoff(&self) -> i32 {
        self.inner.alpha_cutoff
    }

    /// Set alpha cutoff, clamped to 0-255
    #[wasm_bindgen(setter)]
    pub fn set_alpha_cutoff(&mut self, value: f64) {
        self.inner.alpha_cutoff = clamp_slider(value);
    }

    /// Check if both values are at their defaults
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON. Values are clamped like the setters.
    pub fn from_json(value: JsValue) -> Result<ThresholdParams, JsValue> {
        let raw: core_threshold::ThresholdParams =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: core_threshold::ThresholdParams::from_controls(
                raw.luminance_threshold as i64,
                raw.alpha_cutoff as i64,
            ),
        })
    }
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ThresholdParams {
    pub(crate) fn inner(&self) -> &core_threshold::ThresholdParams {
        &self.inner
    }
}

/// Slider values arrive as JS numbers; round then clamp.
pub(crate) fn clamp_slider(value: f64) -> i32 {
    if value.is_nan() {
        return PARAM_MIN;
    }
    value.round().clamp(PARAM_MIN as f64, PARAM_MAX as f64) as i32
}

/// Binarize an image into black ink on a transparent background.
///
/// # Example (TypeScript)
/// ```typescript
/// const params = new ThresholdParams();
/// params.luminance_threshold = slider.valueAsNumber;
/// const ink = apply_threshold(image, params);
/// ctx.putImageData(new ImageData(ink.image_data(), ink.width, ink.height), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_threshold(image: &JsPixelBuffer, params: &ThresholdParams) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_core()?;
    Ok(JsPixelBuffer::from_core(core_threshold::threshold(&src, params.inner())))
}

/// Count ink pixels, for showing how much of the signature survived.
#[wasm_bindgen]
pub fn count_ink(image: &JsPixelBuffer) -> Result<usize, JsValue> {
    Ok(ink_coverage(&image.to_core()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_params_defaults() {
        let params = ThresholdParams::new();
        assert_eq!(params.luminance_threshold(), 200);
        assert_eq!(params.alpha_cutoff(), 50);
        assert!(params.is_default());
    }

    #[test]
    fn test_setters_clamp() {
        let mut params = ThresholdParams::new();

        params.set_luminance_threshold(300.0);
        assert_eq!(params.luminance_threshold(), 255);

        params.set_alpha_cutoff(-4.0);
        assert_eq!(params.alpha_cutoff(), 0);

        params.set_alpha_cutoff(127.6);
        assert_eq!(params.alpha_cutoff(), 128);

        params.set_luminance_threshold(f64::NAN);
        assert_eq!(params.luminance_threshold(), 0);
        assert!(!params.is_default());
    }

    #[test]
    fn test_apply_threshold() {
        let image = JsPixelBuffer::new(2, 1, vec![10, 10, 10, 255, 250, 250, 250, 255]);
        let params = ThresholdParams::new();

        let result = apply_threshold(&image, &params).unwrap();
        assert_eq!(result.pixels(), vec![0, 0, 0, 255, 0, 0, 0, 0]);
        assert_eq!(count_ink(&result).unwrap(), 1);
    }

    #[test]
    fn test_apply_threshold_does_not_modify_original() {
        let pixels = vec![100, 100, 100, 255];
        let image = JsPixelBuffer::new(1, 1, pixels.clone());
        let _ = apply_threshold(&image, &ThresholdParams::new()).unwrap();
        assert_eq!(image.pixels(), pixels);
    }
}
