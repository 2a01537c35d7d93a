//! Rectangle primitives shared by the crop controller and crop extraction.
//!
//! All values are in display (canvas) units. A rectangle is "settled" when
//! its width and height are non-negative and it lies inside the canvas.

use serde::{Deserialize, Serialize};

/// A pointer position in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// False for NaN or infinite coordinates.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Size of the interactive canvas the crop rectangle lives in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Crop rectangle. Width and height may be negative mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The (0, 0, 0, 0) rectangle used when no crop is in progress.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A zero-size rectangle anchored at `point`.
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Rectangle covering the whole canvas.
    pub fn full(canvas: CanvasSize) -> Self {
        Self::new(0.0, 0.0, canvas.width, canvas.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when there is nothing to extract.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Strict interior test; points on an edge are outside.
    pub fn contains_strictly(&self, point: Point) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }

    /// Flip negative extents so width and height are non-negative.
    ///
    /// The covered area is unchanged: a negative width means the rectangle
    /// extends left of `x`, so the origin moves there instead.
    pub fn normalized(&self) -> Self {
        let mut out = *self;
        if out.width < 0.0 {
            out.x += out.width;
            out.width = -out.width;
        }
        if out.height < 0.0 {
            out.y += out.height;
            out.height = -out.height;
        }
        out
    }

    /// Pull the rectangle fully inside the canvas.
    ///
    /// Expects a normalized rectangle. The origin is clamped into the canvas
    /// first, then the extent is shrunk so the far edge does not overshoot.
    /// NaN components collapse to zero.
    pub fn clamped_to(&self, canvas: CanvasSize) -> Self {
        let max_w = canvas.width.max(0.0);
        let max_h = canvas.height.max(0.0);

        let width = self.width.max(0.0).min(max_w);
        let height = self.height.max(0.0).min(max_h);
        let x = self.x.max(0.0).min(max_w - width);
        let y = self.y.max(0.0).min(max_h - height);

        Self {
            x,
            y,
            width: fit_extent(x, width, max_w),
            height: fit_extent(y, height, max_h),
        }
    }

    /// Normalize and then clamp, the settle step run after every drag update.
    pub fn settle(&self, canvas: CanvasSize) -> Self {
        let out = self.normalized().clamped_to(canvas);
        debug_assert!(out.is_within(canvas), "settled rect {:?} escapes {:?}", out, canvas);
        out
    }

    /// Check the settled-state invariants against a canvas.
    pub fn is_within(&self, canvas: CanvasSize) -> bool {
        self.width >= 0.0
            && self.height >= 0.0
            && self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= canvas.width.max(0.0)
            && self.bottom() <= canvas.height.max(0.0)
    }
}

/// Largest extent no greater than `extent` with `start + extent <= max`.
///
/// `max - start` can round so that adding it back to `start` lands one ulp
/// past `max`; step down until the sum fits.
fn fit_extent(start: f64, extent: f64, max: f64) -> f64 {
    let mut extent = extent.min(max - start).max(0.0);
    while extent > 0.0 && start + extent > max {
        extent = f64::from_bits(extent.to_bits() - 1);
    }
    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: CanvasSize = CanvasSize {
        width: 100.0,
        height: 80.0,
    };

    #[test]
    fn test_full_rect_matches_canvas() {
        let rect = CropRect::full(CANVAS);
        assert_eq!(rect, CropRect::new(0.0, 0.0, 100.0, 80.0));
        assert!(rect.is_within(CANVAS));
    }

    #[test]
    fn test_zero_rect_is_empty() {
        assert!(CropRect::zero().is_empty());
        assert!(CropRect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!CropRect::new(0.0, 0.0, 1.0, 5.0).is_empty());
    }

    #[test]
    fn test_contains_strictly_excludes_edges() {
        let rect = CropRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains_strictly(Point::new(15.0, 15.0)));
        assert!(!rect.contains_strictly(Point::new(10.0, 15.0)));
        assert!(!rect.contains_strictly(Point::new(15.0, 30.0)));
        assert!(!rect.contains_strictly(Point::new(31.0, 15.0)));
    }

    #[test]
    fn test_normalize_negative_extents() {
        let rect = CropRect::new(50.0, 40.0, -20.0, -10.0).normalized();
        assert_eq!(rect, CropRect::new(30.0, 30.0, 20.0, 10.0));
    }

    #[test]
    fn test_normalize_positive_is_noop() {
        let rect = CropRect::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn test_clamp_moves_origin_inside() {
        let rect = CropRect::new(-10.0, -5.0, 20.0, 20.0).clamped_to(CANVAS);
        assert_eq!(rect, CropRect::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_clamp_pushes_back_from_far_edge() {
        let rect = CropRect::new(90.0, 70.0, 20.0, 20.0).clamped_to(CANVAS);
        assert_eq!(rect, CropRect::new(80.0, 60.0, 20.0, 20.0));
    }

    #[test]
    fn test_clamp_shrinks_oversized() {
        let rect = CropRect::new(-10.0, -10.0, 500.0, 500.0).clamped_to(CANVAS);
        assert_eq!(rect, CropRect::full(CANVAS));
    }

    #[test]
    fn test_settle_normalizes_then_clamps() {
        // Dragged from (95, 75) back past the origin
        let rect = CropRect::new(95.0, 75.0, -120.0, -90.0).settle(CANVAS);
        assert!(rect.is_within(CANVAS));
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 80.0);
    }

    #[test]
    fn test_clamp_far_edge_lands_exactly_inside() {
        // 233.793 + 5.134 rounds to one ulp past 238.927
        let canvas = CanvasSize::new(238.927, 100.0);
        let rect = CropRect::new(500.0, 0.0, 5.134, 10.0).clamped_to(canvas);
        assert!(rect.right() <= canvas.width, "right edge {}", rect.right());
        assert!((rect.width - 5.134).abs() < 1e-9);
        assert!(rect.is_within(canvas));
    }

    #[test]
    fn test_clamp_nan_components_collapse() {
        let rect = CropRect::new(f64::NAN, 10.0, f64::NAN, f64::NAN).clamped_to(CANVAS);
        assert_eq!(rect, CropRect::new(0.0, 10.0, 0.0, 0.0));
        assert!(rect.is_within(CANVAS));
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
