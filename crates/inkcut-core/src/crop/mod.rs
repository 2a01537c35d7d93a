//! Interactive cropping: rectangle geometry, pointer state machine, extraction.
//!
//! # Coordinate System
//!
//! - The crop rectangle lives in display (canvas) units, origin top-left
//! - Extraction maps display units to buffer pixels through a [`DisplayScale`]
//! - A settled rectangle has non-negative extents and lies inside the canvas

mod controller;
mod extract;
mod rect;

pub use controller::{
    begin_drag, classify_handle, classify_press, drag_rect, hover_hint, update_drag, Corner,
    CropController, CursorHint, DragMode, DragSession, Handle, HANDLE_SIZE,
};
pub use extract::{apply_crop, CropError, DisplayScale};
pub use rect::{CanvasSize, CropRect, Point};
