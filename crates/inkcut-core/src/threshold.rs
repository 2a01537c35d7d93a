//! Signature binarization.
//!
//! Every pixel is classified independently as either ink (opaque black) or
//! background (fully transparent). A pixel is background when it is brighter
//! than the luminance threshold OR more transparent than the alpha cutoff;
//! either condition alone is enough.

use serde::{Deserialize, Serialize};

use crate::decode::{PixelBuffer, CHANNELS};
use crate::luminance::luma_exceeds;

/// Output value for background pixels.
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 0];

/// Output value for ink pixels.
pub const INK: [u8; 4] = [0, 0, 0, 255];

/// Lowest value a parameter control can produce.
pub const PARAM_MIN: i32 = 0;

/// Highest value a parameter control can produce.
pub const PARAM_MAX: i32 = 255;

/// Parameters for the thresholding engine.
///
/// The engine applies these literally. Clamping slider input into range is the
/// job of [`ThresholdParams::from_controls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdParams {
    /// Pixels with luminance strictly above this are background (default 200)
    pub luminance_threshold: i32,
    /// Pixels with alpha strictly below this are background (default 50)
    pub alpha_cutoff: i32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            luminance_threshold: 200,
            alpha_cutoff: 50,
        }
    }
}

impl ThresholdParams {
    /// Create params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build params from raw control values, clamping each into 0-255.
    pub fn from_controls(luminance_threshold: i64, alpha_cutoff: i64) -> Self {
        Self {
            luminance_threshold: clamp_control(luminance_threshold),
            alpha_cutoff: clamp_control(alpha_cutoff),
        }
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[inline]
fn clamp_control(value: i64) -> i32 {
    value.clamp(PARAM_MIN as i64, PARAM_MAX as i64) as i32
}

/// Returns true when the pixel should become background.
///
/// Luminance is computed from the pixel's original RGB and compared exactly.
#[inline]
pub fn classify(px: [u8; 4], params: &ThresholdParams) -> bool {
    let [r, g, b, a] = px;
    luma_exceeds(r, g, b, params.luminance_threshold) || (a as i32) < params.alpha_cutoff
}

/// Binarize a buffer into black ink on a transparent background.
///
/// Returns a new buffer with the same dimensions where every pixel is either
/// [`INK`] or [`BACKGROUND`]. The input is left untouched.
///
/// # Example
///
/// ```
/// use inkcut_core::decode::PixelBuffer;
/// use inkcut_core::threshold::{threshold, ThresholdParams};
///
/// let src = PixelBuffer::new(2, 1, vec![10, 10, 10, 255, 250, 250, 250, 255]);
/// let out = threshold(&src, &ThresholdParams::default());
/// assert_eq!(out.pixels, vec![0, 0, 0, 255, 0, 0, 0, 0]);
/// ```
pub fn threshold(buffer: &PixelBuffer, params: &ThresholdParams) -> PixelBuffer {
    let mut output = vec![0u8; buffer.pixels.len()];

    for (src, dst) in buffer
        .pixels
        .chunks_exact(CHANNELS)
        .zip(output.chunks_exact_mut(CHANNELS))
    {
        let px = [src[0], src[1], src[2], src[3]];
        let value = if classify(px, params) { BACKGROUND } else { INK };
        dst.copy_from_slice(&value);
    }

    log::debug!(
        "threshold pass: {}x{} ({} px, luminance > {}, alpha < {})",
        buffer.width,
        buffer.height,
        buffer.pixel_count(),
        params.luminance_threshold,
        params.alpha_cutoff
    );

    PixelBuffer {
        width: buffer.width,
        height: buffer.height,
        pixels: output,
    }
}

/// Count the ink pixels in a buffer.
pub fn ink_coverage(buffer: &PixelBuffer) -> usize {
    buffer
        .pixels
        .chunks_exact(CHANNELS)
        .filter(|px| px[3] != 0)
        .count()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<u8>(), (w * h * 4) as usize)
                .prop_map(move |pixels| PixelBuffer::new(w, h, pixels))
        })
    }

    fn params_strategy() -> impl Strategy<Value = ThresholdParams> {
        (0i32..=255, 0i32..=255).prop_map(|(luminance_threshold, alpha_cutoff)| ThresholdParams {
            luminance_threshold,
            alpha_cutoff,
        })
    }

    proptest! {
        /// Property: every output pixel is exactly ink or background.
        #[test]
        fn prop_output_is_binary(src in buffer_strategy(), params in params_strategy()) {
            let out = threshold(&src, &params);

            prop_assert_eq!(out.width, src.width);
            prop_assert_eq!(out.height, src.height);
            prop_assert_eq!(out.pixels.len(), src.pixels.len());
            for px in out.pixels.chunks_exact(4) {
                prop_assert!(px == INK || px == BACKGROUND, "unexpected pixel {:?}", px);
            }
        }

        /// Property: thresholding its own output changes nothing when the
        /// alpha cutoff lets opaque ink through.
        #[test]
        fn prop_idempotent(src in buffer_strategy(), params in params_strategy()) {
            let once = threshold(&src, &params);
            let twice = threshold(&once, &params);
            // Ink passes both gates; background stays background (alpha 0 < cutoff)
            // unless the cutoff is 0, in which case black-transparent is ink.
            if params.alpha_cutoff > 0 {
                prop_assert_eq!(once.pixels, twice.pixels);
            } else {
                prop_assert!(ink_coverage(&twice) >= ink_coverage(&once));
            }
        }

        /// Property: raising the luminance threshold never turns ink into background.
        #[test]
        fn prop_monotonic_in_luminance(
            src in buffer_strategy(),
            params in params_strategy(),
            raise in 0i32..=255,
        ) {
            let low = threshold(&src, &params);
            let higher_params = ThresholdParams {
                luminance_threshold: params.luminance_threshold + raise,
                ..params
            };
            let high = threshold(&src, &higher_params);

            for (a, b) in low.pixels.chunks_exact(4).zip(high.pixels.chunks_exact(4)) {
                if a == INK {
                    prop_assert_eq!(b, INK);
                }
            }
            prop_assert!(ink_coverage(&high) >= ink_coverage(&low));
        }

        /// Property: the engine is deterministic.
        #[test]
        fn prop_deterministic(src in buffer_strategy(), params in params_strategy()) {
            prop_assert_eq!(threshold(&src, &params), threshold(&src, &params));
        }
    }
}
