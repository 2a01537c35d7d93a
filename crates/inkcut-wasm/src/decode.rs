//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@inkcut/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsPixelBuffer;
use inkcut_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image (PNG, JPEG or WebP) from bytes.
///
/// EXIF orientation is applied so phone photos come out upright.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
