//! Luminance calculation using ITU-R BT.601 broadcast-luma coefficients.
//!
//! The coefficients 0.299, 0.587 and 0.114 are not exact in binary floating
//! point, so luma is kept as an integer scaled by [`LUMA_SCALE`]. Comparing
//! against `threshold * LUMA_SCALE` is then exact for every input.

/// ITU-R BT.601 red weight, in thousandths.
pub const LUMA_R: u32 = 299;

/// ITU-R BT.601 green weight, in thousandths.
pub const LUMA_G: u32 = 587;

/// ITU-R BT.601 blue weight, in thousandths.
pub const LUMA_B: u32 = 114;

/// Denominator of the weights; luma 255.0 is `255 * LUMA_SCALE`.
pub const LUMA_SCALE: u32 = 1000;

/// Calculate luminance from u8 RGB values, scaled by [`LUMA_SCALE`].
///
/// # Returns
/// Scaled luminance in the range 0 to 255_000
#[inline]
pub fn calculate_luma(r: u8, g: u8, b: u8) -> u32 {
    LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32
}

/// True when the luminance of (r, g, b) is strictly greater than `threshold`.
#[inline]
pub fn luma_exceeds(r: u8, g: u8, b: u8, threshold: i32) -> bool {
    calculate_luma(r, g, b) as i64 > LUMA_SCALE as i64 * threshold as i64
}
