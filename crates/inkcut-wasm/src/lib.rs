//! Inkcut WASM - WebAssembly bindings for Inkcut
//!
//! This crate provides WASM bindings to expose the inkcut-core functionality
//! to JavaScript/TypeScript applications. Painting, file pickers and sliders
//! stay in the page; this crate supplies the pixels and crop geometry.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA pixel buffers
//! - `decode` - Upload decoding
//! - `threshold` - Binarization parameters and engine
//! - `crop` - Stateless crop extraction
//! - `editor` - Stateful session with pointer-driven cropping
//! - `encode` - PNG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { SignatureEditor } from '@inkcut/wasm';
//!
//! await init();
//! const editor = new SignatureEditor();
//! editor.load(new Uint8Array(await file.arrayBuffer()));
//! const png = editor.export_png();
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod editor;
mod encode;
mod threshold;
mod types;

// Re-export public types
pub use crop::apply_crop;
pub use decode::decode_image;
pub use editor::SignatureEditor;
pub use encode::encode_png;
pub use threshold::{apply_threshold, count_ink, ThresholdParams};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "inkcut-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
