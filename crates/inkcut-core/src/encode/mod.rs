//! Image encoding for export.
//!
//! Exported signatures are PNG so the transparent background survives.
//! Encoding is synchronous and single-threaded within WASM.

mod png;

pub use png::{encode_png, encode_png_raw, EncodeError};
