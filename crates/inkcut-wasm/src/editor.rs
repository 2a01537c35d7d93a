//! Editing session WASM bindings.
//!
//! One `SignatureEditor` backs one signature canvas. The page forwards
//! uploads, slider changes and pointer events; after each call it repaints
//! from `active()`, `crop_rect()`, `handles()` and `cursor()`.
//!
//! # Example
//!
//! ```typescript
//! const editor = new SignatureEditor();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! editor.set_canvas_size(canvas.clientWidth, canvas.clientHeight);
//!
//! slider.oninput = () => { editor.set_luminance_threshold(slider.valueAsNumber); repaint(); };
//! canvas.onpointerdown = (e) => { editor.pointer_down(e.offsetX, e.offsetY); repaint(); };
//! canvas.onpointermove = (e) => { editor.pointer_move(e.offsetX, e.offsetY); repaint(); };
//! canvas.onpointerup = () => editor.pointer_up();
//! canvas.onpointerleave = () => editor.pointer_leave();
//! canvas.onpointercancel = () => editor.pointer_cancel();
//! ```

use crate::crop::mode_name;
use crate::threshold::{clamp_slider, ThresholdParams};
use crate::types::JsPixelBuffer;
use inkcut_core::crop::{CanvasSize, Point};
use inkcut_core::editor;
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Signature editing session for JavaScript
#[wasm_bindgen]
pub struct SignatureEditor {
    inner: editor::SignatureEditor,
}

#[wasm_bindgen]
impl SignatureEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: editor::SignatureEditor::new(),
        }
    }

    /// Decode an upload and threshold it. The previous image is kept on failure.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load(bytes).map(|_| ()).map_err(to_js_error)
    }

    /// Load pixels already decoded by the browser (e.g. from `ImageData`).
    pub fn load_pixels(&mut self, image: &JsPixelBuffer) -> Result<(), JsValue> {
        self.inner.load_buffer(image.to_core()?);
        Ok(())
    }

    /// Set the luminance threshold from a slider (clamped to 0-255).
    pub fn set_luminance_threshold(&mut self, value: f64) {
        self.inner.set_luminance_threshold(clamp_slider(value));
    }

    /// Set the alpha cutoff from a slider (clamped to 0-255).
    pub fn set_alpha_cutoff(&mut self, value: f64) {
        self.inner.set_alpha_cutoff(clamp_slider(value));
    }

    /// Replace both parameters at once.
    pub fn set_params(&mut self, params: &ThresholdParams) {
        self.inner.set_params(*params.inner());
    }

    #[wasm_bindgen(getter)]
    pub fn luminance_threshold(&self) -> i32 {
        self.inner.params().luminance_threshold
    }

    #[wasm_bindgen(getter)]
    pub fn alpha_cutoff(&self) -> i32 {
        self.inner.params().alpha_cutoff
    }

    /// The thresholded image to paint, if one is loaded.
    pub fn active(&self) -> Option<JsPixelBuffer> {
        self.inner.active().cloned().map(JsPixelBuffer::from_core)
    }

    /// Tell the editor the on-screen size of the canvas, in CSS pixels.
    /// Leaves crop mode.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.inner.crop_mut().set_canvas(CanvasSize::new(width, height));
    }

    pub fn enter_crop_mode(&mut self) {
        self.inner.crop_mut().enter_crop_mode();
    }

    pub fn reset_crop(&mut self) {
        self.inner.crop_mut().reset();
    }

    pub fn cancel_crop(&mut self) {
        self.inner.crop_mut().cancel();
    }

    #[wasm_bindgen(getter)]
    pub fn is_cropping(&self) -> bool {
        self.inner.crop().is_active()
    }

    /// Returns the drag mode started ("draw", "move", "nw", "ne", "sw", "se"),
    /// or undefined outside crop mode.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<String> {
        self.inner
            .crop_mut()
            .pointer_down(Point::new(x, y))
            .map(|mode| mode_name(mode).to_string())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.crop_mut().pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.inner.crop_mut().pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.crop_mut().pointer_leave();
    }

    pub fn pointer_cancel(&mut self) {
        self.inner.crop_mut().pointer_cancel();
    }

    /// CSS cursor keyword for the canvas.
    pub fn cursor(&self) -> String {
        self.inner.crop().cursor_hint().css_name().to_string()
    }

    /// Current crop rectangle as `{ x, y, width, height }`.
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop().rect()).map_err(to_js_error)
    }

    /// Corner handle squares as `[{ corner, bounds }]`, empty outside crop mode.
    pub fn handles(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop().handles()).map_err(to_js_error)
    }

    /// Crop to the current rectangle. Fails on an empty selection, leaving
    /// crop mode active so the user can try again.
    pub fn apply_crop(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .apply_crop()
            .map(|buf| JsPixelBuffer::from_core(buf.clone()))
            .map_err(to_js_error)
    }

    /// Undo all crops.
    pub fn revert(&mut self) -> Result<(), JsValue> {
        self.inner.revert().map(|_| ()).map_err(to_js_error)
    }

    /// Encode the current image as a transparent PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export_png().map_err(to_js_error)
    }
}

impl Default for SignatureEditor {
    fn default() -> Self {
        Self::new()
    }
}
