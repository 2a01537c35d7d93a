//! Crop extraction: map a display-space rectangle onto a pixel buffer.
//!
//! The interactive rectangle is tracked in canvas units, which differ from the
//! buffer's native pixels whenever the canvas is displayed scaled. Callers
//! pass the display-to-buffer ratio explicitly so this stays independent of
//! any rendering surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::{CanvasSize, CropRect};
use crate::decode::{PixelBuffer, CHANNELS};

/// Errors that can occur when applying a crop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// The rectangle covers no pixels.
    #[error("Invalid crop: selection is {width}x{height}, draw a larger area")]
    InvalidCrop { width: f64, height: f64 },
}

/// Ratio of buffer pixels to display units on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayScale {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::identity()
    }
}

impl DisplayScale {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Canvas drawn at native resolution.
    pub fn identity() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Ratio between a buffer and the canvas it is shown on.
    ///
    /// A canvas with no extent on an axis maps 1:1 on that axis.
    pub fn between(buffer: &PixelBuffer, canvas: CanvasSize) -> Self {
        let ratio = |pixels: u32, display: f64| {
            if display > 0.0 {
                pixels as f64 / display
            } else {
                1.0
            }
        };
        Self::new(
            ratio(buffer.width, canvas.width),
            ratio(buffer.height, canvas.height),
        )
    }
}

/// Extract the region under `rect` from `source`.
///
/// Display coordinates are multiplied by the scale factors and rounded to the
/// nearest pixel; the output is `round(width * scale_x)` by
/// `round(height * scale_y)`, trimmed to the buffer if rounding overshoots.
///
/// # Errors
///
/// Returns `CropError::InvalidCrop` when the rectangle has zero width or
/// height, or maps to no pixels at the given scale.
///
/// # Example
///
/// ```
/// use inkcut_core::crop::{apply_crop, CropRect};
/// use inkcut_core::decode::PixelBuffer;
///
/// let image = PixelBuffer::new(100, 100, vec![0u8; 100 * 100 * 4]);
/// let cropped = apply_crop(&CropRect::new(25.0, 25.0, 50.0, 50.0), &image, 1.0, 1.0).unwrap();
/// assert_eq!(cropped.width, 50);
/// ```
pub fn apply_crop(
    rect: &CropRect,
    source: &PixelBuffer,
    scale_x: f64,
    scale_y: f64,
) -> Result<PixelBuffer, CropError> {
    if rect.is_empty() {
        return Err(CropError::InvalidCrop {
            width: rect.width,
            height: rect.height,
        });
    }

    let rect = rect.normalized();

    let px_left = to_pixels(rect.x * scale_x).min(source.width);
    let px_top = to_pixels(rect.y * scale_y).min(source.height);
    let px_width = to_pixels(rect.width * scale_x);
    let px_height = to_pixels(rect.height * scale_y);

    let px_right = px_left.saturating_add(px_width).min(source.width);
    let px_bottom = px_top.saturating_add(px_height).min(source.height);

    let out_width = px_right - px_left;
    let out_height = px_bottom - px_top;

    if out_width == 0 || out_height == 0 {
        log::warn!(
            "crop {:?} at scale ({}, {}) maps to no pixels",
            rect,
            scale_x,
            scale_y
        );
        return Err(CropError::InvalidCrop {
            width: rect.width,
            height: rect.height,
        });
    }

    // Fast path: full crop returns a clone
    if px_left == 0 && px_top == 0 && out_width == source.width && out_height == source.height {
        return Ok(source.clone());
    }

    let src_stride = source.width as usize * CHANNELS;
    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in px_top..px_bottom {
        let start = y as usize * src_stride + px_left as usize * CHANNELS;
        output.extend_from_slice(&source.pixels[start..start + row_bytes]);
    }

    log::debug!(
        "cropped {}x{} -> {}x{} at ({}, {})",
        source.width,
        source.height,
        out_width,
        out_height,
        px_left,
        px_top
    );

    Ok(PixelBuffer {
        width: out_width,
        height: out_height,
        pixels: output,
    })
}

/// Round a non-negative display-derived coordinate to whole pixels.
#[inline]
fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
