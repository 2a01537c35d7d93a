//! Pointer-driven crop rectangle state machine.
//!
//! The controller is either idle or dragging. A drag begins on pointer-down,
//! is classified once into a [`DragMode`], and that mode is fixed until the
//! pointer is released, leaves the canvas, or the gesture is cancelled.
//!
//! # Hit testing
//!
//! Each corner has a square handle of side [`HANDLE_SIZE`] centered on it.
//! Handles are checked in the order NW, NE, SW, SE, so on a tiny rectangle
//! where handles overlap the north-west one wins. A press strictly inside
//! the rectangle moves it; anything else starts drawing a new one.

use serde::{Deserialize, Serialize};

use super::rect::{CanvasSize, CropRect, Point};

/// Side length of a corner handle in display units.
pub const HANDLE_SIZE: f64 = 12.0;

/// Corner of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    /// Hit-test priority order.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    /// Position of this corner on `rect`.
    pub fn position(self, rect: &CropRect) -> Point {
        match self {
            Corner::Nw => Point::new(rect.x, rect.y),
            Corner::Ne => Point::new(rect.right(), rect.y),
            Corner::Sw => Point::new(rect.x, rect.bottom()),
            Corner::Se => Point::new(rect.right(), rect.bottom()),
        }
    }
}

/// What a drag gesture does. Fixed for the lifetime of a [`DragSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    /// Drawing a fresh rectangle from the press point.
    Draw,
    /// Translating the whole rectangle.
    Move,
    /// Resizing by one corner.
    Resize(Corner),
}

/// Cursor feedback for the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorHint {
    #[default]
    Default,
    Crosshair,
    Grab,
    NwResize,
    NeResize,
    SwResize,
    SeResize,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Crosshair => "crosshair",
            CursorHint::Grab => "grab",
            CursorHint::NwResize => "nw-resize",
            CursorHint::NeResize => "ne-resize",
            CursorHint::SwResize => "sw-resize",
            CursorHint::SeResize => "se-resize",
        }
    }
}

impl From<DragMode> for CursorHint {
    fn from(mode: DragMode) -> Self {
        match mode {
            DragMode::Draw => CursorHint::Crosshair,
            DragMode::Move => CursorHint::Grab,
            DragMode::Resize(Corner::Nw) => CursorHint::NwResize,
            DragMode::Resize(Corner::Ne) => CursorHint::NeResize,
            DragMode::Resize(Corner::Sw) => CursorHint::SwResize,
            DragMode::Resize(Corner::Se) => CursorHint::SeResize,
        }
    }
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub mode: DragMode,
    /// Start point for `Draw`, pointer offset from the origin for `Move`.
    /// Zero for resizes, which work from the current rectangle.
    pub anchor: Point,
}

/// A corner handle square for the renderer to paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub corner: Corner,
    pub bounds: CropRect,
}

/// Find the corner handle under `point`, if any.
pub fn classify_handle(point: Point, rect: &CropRect) -> Option<Corner> {
    let half = HANDLE_SIZE / 2.0;
    Corner::ALL.into_iter().find(|corner| {
        let c = corner.position(rect);
        (point.x - c.x).abs() <= half && (point.y - c.y).abs() <= half
    })
}

/// Classify a press into the mode it would start.
pub fn classify_press(point: Point, rect: &CropRect) -> DragMode {
    if let Some(corner) = classify_handle(point, rect) {
        DragMode::Resize(corner)
    } else if rect.contains_strictly(point) {
        DragMode::Move
    } else {
        DragMode::Draw
    }
}

/// Cursor to show when hovering over `point` without a drag in progress.
pub fn hover_hint(point: Point, rect: &CropRect) -> CursorHint {
    classify_press(point, rect).into()
}

/// Start a drag at `point`.
///
/// Returns the session and the rectangle to continue from. Drawing replaces
/// the rectangle with a zero-size one anchored at the press point; the other
/// modes leave it as is.
pub fn begin_drag(point: Point, rect: &CropRect) -> (DragSession, CropRect) {
    match classify_press(point, rect) {
        DragMode::Draw => (
            DragSession {
                mode: DragMode::Draw,
                anchor: point,
            },
            CropRect::at(point),
        ),
        DragMode::Move => (
            DragSession {
                mode: DragMode::Move,
                anchor: Point::new(point.x - rect.x, point.y - rect.y),
            },
            *rect,
        ),
        mode @ DragMode::Resize(_) => (
            DragSession {
                mode,
                anchor: Point::default(),
            },
            *rect,
        ),
    }
}

/// Compute the raw rectangle for a pointer position, before settling.
///
/// The result may have negative width or height.
pub fn drag_rect(point: Point, rect: &CropRect, session: &DragSession) -> CropRect {
    let old = rect;
    match session.mode {
        DragMode::Move => CropRect::new(
            point.x - session.anchor.x,
            point.y - session.anchor.y,
            old.width,
            old.height,
        ),
        DragMode::Draw => CropRect::new(
            session.anchor.x,
            session.anchor.y,
            point.x - session.anchor.x,
            point.y - session.anchor.y,
        ),
        DragMode::Resize(Corner::Nw) => CropRect::new(
            point.x,
            point.y,
            old.width + (old.x - point.x),
            old.height + (old.y - point.y),
        ),
        DragMode::Resize(Corner::Ne) => CropRect::new(
            old.x,
            point.y,
            point.x - old.x,
            old.height + (old.y - point.y),
        ),
        DragMode::Resize(Corner::Sw) => CropRect::new(
            point.x,
            old.y,
            old.width + (old.x - point.x),
            point.y - old.y,
        ),
        DragMode::Resize(Corner::Se) => {
            CropRect::new(old.x, old.y, point.x - old.x, point.y - old.y)
        }
    }
}

/// Advance a drag to `point`, returning the settled rectangle.
///
/// The result always has non-negative extents and lies inside `canvas`.
pub fn update_drag(
    point: Point,
    rect: &CropRect,
    session: &DragSession,
    canvas: CanvasSize,
) -> CropRect {
    drag_rect(point, rect, session).settle(canvas)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging(DragSession),
}

/// Crop interaction state for one canvas.
///
/// Owns the current rectangle; all mutation goes through pointer events and
/// the mode operations below. Reusable across any number of crops.
#[derive(Debug, Clone)]
pub struct CropController {
    canvas: CanvasSize,
    rect: CropRect,
    state: DragState,
    active: bool,
    cursor: CursorHint,
}

impl Default for CropController {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl CropController {
    /// Create an idle controller for a canvas, with a zero rectangle.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            rect: CropRect::zero(),
            state: DragState::Idle,
            active: false,
            cursor: CursorHint::Default,
        }
    }

    /// Replace the canvas (new image loaded). Leaves crop mode.
    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
        self.exit();
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn cursor_hint(&self) -> CursorHint {
        self.cursor
    }

    /// True while in crop mode.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Enter crop mode with the rectangle covering the whole canvas.
    pub fn enter_crop_mode(&mut self) {
        self.active = true;
        self.state = DragState::Idle;
        self.rect = CropRect::full(self.canvas);
        self.cursor = CursorHint::Crosshair;
    }

    /// Reset the rectangle to the full canvas.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.rect = CropRect::full(self.canvas);
    }

    /// Abandon crop mode without applying.
    pub fn cancel(&mut self) {
        self.exit();
    }

    /// Clear state after a crop has been applied.
    pub fn finish(&mut self) {
        self.exit();
    }

    fn exit(&mut self) {
        self.active = false;
        self.state = DragState::Idle;
        self.rect = CropRect::zero();
        self.cursor = CursorHint::Default;
    }

    /// Pointer pressed. Ignored outside crop mode and for non-finite points.
    pub fn pointer_down(&mut self, point: Point) -> Option<DragMode> {
        if !self.active || !point.is_finite() {
            return None;
        }
        let (session, rect) = begin_drag(point, &self.rect);
        self.rect = rect.settle(self.canvas);
        self.state = DragState::Dragging(session);
        self.cursor = session.mode.into();
        Some(session.mode)
    }

    /// Pointer moved. Updates the rectangle while dragging, otherwise only
    /// the hover cursor. Non-finite points are ignored.
    pub fn pointer_move(&mut self, point: Point) -> CropRect {
        if !self.active || !point.is_finite() {
            return self.rect;
        }
        match self.state {
            DragState::Dragging(session) => {
                self.rect = update_drag(point, &self.rect, &session, self.canvas);
            }
            DragState::Idle => {
                self.cursor = hover_hint(point, &self.rect);
            }
        }
        self.rect
    }

    /// Pointer released. Idempotent.
    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// Pointer left the canvas. Ends any drag so it cannot get stuck.
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    /// Gesture cancelled by the platform (e.g. touch interrupted).
    pub fn pointer_cancel(&mut self) {
        self.end_drag();
    }

    /// End the current drag, if any.
    pub fn end_drag(&mut self) {
        if let DragState::Dragging(session) = self.state {
            log::debug!(
                "crop drag {:?} ended at {:?}",
                session.mode,
                self.rect
            );
            self.state = DragState::Idle;
        }
    }

    /// Handle squares for the renderer. Empty outside crop mode.
    pub fn handles(&self) -> Vec<Handle> {
        if !self.active {
            return Vec::new();
        }
        let half = HANDLE_SIZE / 2.0;
        Corner::ALL
            .into_iter()
            .map(|corner| {
                let c = corner.position(&self.rect);
                Handle {
                    corner,
                    bounds: CropRect::new(c.x - half, c.y - half, HANDLE_SIZE, HANDLE_SIZE),
                }
            })
            .collect()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
