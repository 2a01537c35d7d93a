//! WASM bindings for crop extraction.
//!
//! Interactive cropping goes through [`crate::editor::SignatureEditor`]; this
//! module exposes the stateless extraction for hosts that track the rectangle
//! themselves.

use crate::types::JsPixelBuffer;
use inkcut_core::crop::{apply_crop as core_crop, Corner, CropRect, DragMode};
use wasm_bindgen::prelude::*;

/// Extract a display-space rectangle from an image.
///
/// # Arguments
///
/// * `image` - Source image
/// * `x`, `y`, `width`, `height` - Rectangle in canvas units
/// * `scale_x`, `scale_y` - Buffer pixels per canvas unit
///   (`image.width / canvas.clientWidth` for a CSS-scaled canvas)
///
/// # Errors
///
/// Returns an error if the rectangle has zero width or height.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const scaleX = image.width / canvas.clientWidth;
/// const scaleY = image.height / canvas.clientHeight;
/// const cropped = apply_crop(image, rect.x, rect.y, rect.width, rect.height, scaleX, scaleY);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsPixelBuffer,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let src = image.to_core()?;
    let rect = CropRect::new(x, y, width, height);
    core_crop(&rect, &src, scale_x, scale_y)
        .map(JsPixelBuffer::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Name of a drag mode as reported to JavaScript.
pub(crate) fn mode_name(mode: DragMode) -> &'static str {
    match mode {
        DragMode::Draw => "draw",
        DragMode::Move => "move",
        DragMode::Resize(Corner::Nw) => "nw",
        DragMode::Resize(Corner::Ne) => "ne",
        DragMode::Resize(Corner::Sw) => "sw",
        DragMode::Resize(Corner::Se) => "se",
    }
}
