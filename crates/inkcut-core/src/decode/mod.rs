//! Image decoding for uploaded signatures.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and WebP uploads into RGBA8
//! - Applying EXIF orientation so phone photos are upright
//!
//! # Architecture
//!
//! Decoding is designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use inkcut_core::decode::decode_image;
//!
//! let bytes = std::fs::read("signature.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::decode_image;
pub use types::{DecodeError, Orientation, PixelBuffer, CHANNELS};
