//! Inkcut Core - Signature cleanup library
//!
//! This crate turns a photo or scan of a handwritten signature into pure black
//! ink on a transparent background, and provides the geometry for cropping it
//! interactively.
//!
//! # Module Structure
//!
//! - `decode` - Upload decoding into RGBA pixel buffers
//! - `threshold` - Binarization into ink/background
//! - `crop` - Crop rectangle state machine and extraction
//! - `encode` - Lossless PNG export
//! - `editor` - Session wiring the pieces together

pub mod crop;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod luminance;
pub mod threshold;

pub use crop::{apply_crop, CanvasSize, CropController, CropError, CropRect, Point};
pub use decode::{decode_image, DecodeError, PixelBuffer};
pub use editor::{EditorError, RecomputeTicket, SignatureEditor};
pub use encode::{encode_png, EncodeError};
pub use threshold::{threshold, ThresholdParams};
