//! Editing session that wires decoding, thresholding and cropping together.
//!
//! The editor owns the "current buffer" and the crop controller owns the
//! "current rectangle"; nothing else mutates either. Parameter changes re-run
//! the thresholding engine directly, there is no observer mechanism.
//!
//! # Recompute ordering
//!
//! Hosts that run threshold passes off the main thread take a
//! [`RecomputeTicket`] per request and hand the result back with
//! [`SignatureEditor::complete_recompute`]. A result is only accepted if its
//! ticket is newer than the last accepted one, so a slow pass for an old
//! slider value can never overwrite a newer result.

use thiserror::Error;

use crate::crop::{apply_crop, CanvasSize, CropController, CropError, DisplayScale};
use crate::decode::{decode_image, DecodeError, PixelBuffer};
use crate::encode::{encode_png, EncodeError};
use crate::threshold::{threshold, ThresholdParams};

/// Errors surfaced to the user by the editor. None of them change state.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// An operation needed an image but none is loaded.
    #[error("No image loaded")]
    NoImage,
}

/// Identifies one threshold request, in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeTicket {
    seq: u64,
    params: ThresholdParams,
}

impl RecomputeTicket {
    /// Parameters this request was made with.
    pub fn params(&self) -> ThresholdParams {
        self.params
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignatureEditor {
    /// Decoded upload, never modified.
    original: Option<PixelBuffer>,
    /// Threshold input: the original with any applied crops.
    source: Option<PixelBuffer>,
    /// Latest accepted threshold output.
    active: Option<PixelBuffer>,
    params: ThresholdParams,
    crop: CropController,
    next_seq: u64,
    accepted_seq: Option<u64>,
}

impl SignatureEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: ThresholdParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Decode an upload and make it the active image.
    ///
    /// On a decode failure the previous image and crop state are kept.
    pub fn load(&mut self, bytes: &[u8]) -> Result<&PixelBuffer, EditorError> {
        let buffer = decode_image(bytes).map_err(|e| {
            log::warn!("upload rejected: {}", e);
            e
        })?;
        let active: &PixelBuffer = self.load_buffer(buffer);
        Ok(active)
    }

    /// Make an already-decoded buffer the active image.
    pub fn load_buffer(&mut self, buffer: PixelBuffer) -> &PixelBuffer {
        self.crop
            .set_canvas(CanvasSize::new(buffer.width as f64, buffer.height as f64));

        let ticket = self.begin_recompute();
        let result = threshold(&buffer, &ticket.params);
        self.accepted_seq = Some(ticket.seq);

        self.original = Some(buffer.clone());
        self.source = Some(buffer);
        self.active.insert(result)
    }

    pub fn params(&self) -> ThresholdParams {
        self.params
    }

    /// Replace both parameters and re-threshold.
    pub fn set_params(&mut self, params: ThresholdParams) {
        self.params = params;
        self.recompute_now();
    }

    pub fn set_luminance_threshold(&mut self, value: i32) {
        self.set_params(ThresholdParams {
            luminance_threshold: value,
            ..self.params
        });
    }

    pub fn set_alpha_cutoff(&mut self, value: i32) {
        self.set_params(ThresholdParams {
            alpha_cutoff: value,
            ..self.params
        });
    }

    /// The buffer a renderer should paint.
    pub fn active(&self) -> Option<&PixelBuffer> {
        self.active.as_ref()
    }

    /// The un-thresholded input for the current crop.
    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    pub fn crop(&self) -> &CropController {
        &self.crop
    }

    pub fn crop_mut(&mut self) -> &mut CropController {
        &mut self.crop
    }

    /// Register a threshold request with the current parameters.
    pub fn begin_recompute(&mut self) -> RecomputeTicket {
        self.next_seq += 1;
        RecomputeTicket {
            seq: self.next_seq,
            params: self.params,
        }
    }

    /// Offer a finished threshold pass. Returns whether it was accepted.
    pub fn complete_recompute(&mut self, ticket: RecomputeTicket, result: PixelBuffer) -> bool {
        if self.accepted_seq.is_some_and(|seq| seq >= ticket.seq) {
            log::debug!(
                "discarding stale threshold result #{} (have #{:?})",
                ticket.seq,
                self.accepted_seq
            );
            return false;
        }
        self.accepted_seq = Some(ticket.seq);
        self.active = Some(result);
        true
    }

    fn recompute_now(&mut self) {
        let ticket = self.begin_recompute();
        if let Some(source) = &self.source {
            let result = threshold(source, &ticket.params);
            self.complete_recompute(ticket, result);
        }
    }

    /// Crop the image to the controller's rectangle.
    ///
    /// The display-to-buffer scale is derived from the controller's canvas.
    /// On success crop mode ends and the canvas shrinks to the new image; on
    /// `InvalidCrop` the rectangle and crop mode are left as they were.
    pub fn apply_crop(&mut self) -> Result<&PixelBuffer, EditorError> {
        let (source, active) = match (&self.source, &self.active) {
            (Some(source), Some(active)) => (source, active),
            _ => return Err(EditorError::NoImage),
        };

        let rect = self.crop.rect();
        let scale = DisplayScale::between(active, self.crop.canvas());

        let cropped_active = apply_crop(&rect, active, scale.scale_x, scale.scale_y)?;
        let cropped_source = apply_crop(&rect, source, scale.scale_x, scale.scale_y)?;

        log::debug!(
            "applied crop {:?}: {}x{}",
            rect,
            cropped_active.width,
            cropped_active.height
        );

        let canvas = CanvasSize::new(
            cropped_active.width as f64 / scale.scale_x,
            cropped_active.height as f64 / scale.scale_y,
        );
        self.crop.set_canvas(canvas);
        self.crop.finish();

        // Passes still in flight were computed on the uncropped source
        let ticket = self.begin_recompute();
        self.accepted_seq = Some(ticket.seq);

        self.source = Some(cropped_source);
        let active: &PixelBuffer = self.active.insert(cropped_active);
        Ok(active)
    }

    /// Drop all applied crops and re-threshold the original upload.
    pub fn revert(&mut self) -> Result<&PixelBuffer, EditorError> {
        let original = self.original.clone().ok_or(EditorError::NoImage)?;
        let active: &PixelBuffer = self.load_buffer(original);
        Ok(active)
    }

    /// Encode the active image as PNG for download.
    pub fn export_png(&self) -> Result<Vec<u8>, EditorError> {
        let active = self.active.as_ref().ok_or(EditorError::NoImage)?;
        Ok(encode_png(active)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::{CropRect, Point};
    use crate::threshold::{ink_coverage, INK};

    /// Left half dark ink, right half light paper.
    fn signature(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    pixels.extend_from_slice(&[30, 30, 60, 255]);
                } else {
                    pixels.extend_from_slice(&[240, 240, 235, 255]);
                }
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_load_buffer_thresholds_immediately() {
        let mut editor = SignatureEditor::new();
        let active = editor.load_buffer(signature(10, 4)).clone();

        assert_eq!(active.width, 10);
        assert_eq!(ink_coverage(&active), 20);
        assert_eq!(active.pixel(0, 0), Some(INK));
        assert_eq!(editor.crop().canvas(), CanvasSize::new(10.0, 4.0));
    }

    #[test]
    fn test_param_change_recomputes() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(10, 4));

        // Raising the threshold above the paper's luminance turns it to ink
        editor.set_luminance_threshold(250);
        assert_eq!(ink_coverage(editor.active().unwrap()), 40);

        // Alpha cutoff above 255 removes everything
        editor.set_alpha_cutoff(256);
        assert_eq!(ink_coverage(editor.active().unwrap()), 0);
        assert_eq!(editor.params().luminance_threshold, 250);
    }

    #[test]
    fn test_bad_upload_keeps_previous_image() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(10, 4));

        let err = editor.load(b"not an image").unwrap_err();
        assert!(matches!(err, EditorError::Decode(_)));
        assert_eq!(editor.active().unwrap().width, 10);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(10, 4));
        let src = editor.source().unwrap().clone();

        let slow = editor.begin_recompute();
        editor.set_params(ThresholdParams::from_controls(250, 50));
        let newest = editor.active().unwrap().clone();

        // The older request finishes last and must not win
        let stale = threshold(&src, &slow.params());
        assert!(!editor.complete_recompute(slow, stale));
        assert_eq!(editor.active().unwrap(), &newest);
    }

    #[test]
    fn test_out_of_order_completion_keeps_latest_request() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(10, 4));
        let src = editor.source().unwrap().clone();

        let first = editor.begin_recompute();
        editor.params = ThresholdParams::from_controls(250, 50);
        let second = editor.begin_recompute();

        assert!(editor.complete_recompute(second, threshold(&src, &second.params())));
        assert!(!editor.complete_recompute(first, threshold(&src, &first.params())));
        assert_eq!(ink_coverage(editor.active().unwrap()), 40);
    }

    /// Drag the SE handle of the full-canvas rectangle to `to`.
    fn drag_se_corner(editor: &mut SignatureEditor, to: Point) {
        let canvas = editor.crop().canvas();
        let crop = editor.crop_mut();
        crop.enter_crop_mode();
        crop.pointer_down(Point::new(canvas.width, canvas.height));
        crop.pointer_move(to);
        crop.pointer_up();
    }

    #[test]
    fn test_apply_crop_replaces_active_and_exits_mode() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(40, 20));

        drag_se_corner(&mut editor, Point::new(20.0, 20.0));
        assert_eq!(editor.crop().rect(), CropRect::new(0.0, 0.0, 20.0, 20.0));

        let cropped = editor.apply_crop().unwrap().clone();
        assert_eq!((cropped.width, cropped.height), (20, 20));
        assert_eq!(ink_coverage(&cropped), 400);
        assert!(!editor.crop().is_active());
        assert_eq!(editor.crop().rect(), CropRect::zero());
        assert_eq!(editor.crop().canvas(), CanvasSize::new(20.0, 20.0));

        // Later threshold changes keep the crop
        editor.set_luminance_threshold(10);
        assert_eq!(editor.active().unwrap().width, 20);
    }

    #[test]
    fn test_invalid_crop_leaves_state() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(40, 20));

        // Collapse the rectangle onto its own origin
        drag_se_corner(&mut editor, Point::new(0.0, 0.0));
        let collapsed = editor.crop().rect();
        assert!(collapsed.is_empty());

        let err = editor.apply_crop().unwrap_err();
        assert!(matches!(err, EditorError::Crop(CropError::InvalidCrop { .. })));
        assert!(editor.crop().is_active());
        assert_eq!(editor.crop().rect(), collapsed);
        assert_eq!(editor.active().unwrap().width, 40);
    }

    #[test]
    fn test_crop_invalidates_in_flight_passes() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(40, 20));
        let src = editor.source().unwrap().clone();
        let pending = editor.begin_recompute();

        drag_se_corner(&mut editor, Point::new(20.0, 10.0));
        editor.apply_crop().unwrap();

        let late = threshold(&src, &pending.params());
        assert!(!editor.complete_recompute(pending, late));
        assert_eq!(editor.active().unwrap().width, 20);
    }

    #[test]
    fn test_revert_restores_original() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(40, 20));
        drag_se_corner(&mut editor, Point::new(16.0, 8.0));
        editor.apply_crop().unwrap();
        assert_eq!(editor.active().unwrap().width, 16);

        let restored = editor.revert().unwrap();
        assert_eq!((restored.width, restored.height), (40, 20));
    }

    #[test]
    fn test_no_image_errors() {
        let mut editor = SignatureEditor::new();
        assert!(matches!(editor.apply_crop(), Err(EditorError::NoImage)));
        assert!(matches!(editor.export_png(), Err(EditorError::NoImage)));
        assert!(matches!(editor.revert(), Err(EditorError::NoImage)));
    }

    #[test]
    fn test_export_png() {
        let mut editor = SignatureEditor::new();
        editor.load_buffer(signature(6, 2));
        let png = editor.export_png().unwrap();

        let mut reloaded = SignatureEditor::new();
        let active = reloaded.load(&png).unwrap();
        assert_eq!((active.width, active.height), (6, 2));
        assert_eq!(ink_coverage(active), 6);
    }
}
