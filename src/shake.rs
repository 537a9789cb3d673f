// ============================================================================
// FRAME SHAKE
// ============================================================================

use tracing::debug;

use crate::layout::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        /// Where the frame was grabbed.
        start: Point,
    },
}

#[derive(Debug, Clone)]
pub struct FrameDragger {
    state: DragState,
    translation: Point,
}

impl Default for FrameDragger {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDragger {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            translation: Point::ZERO,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Current visual offset of the frame.
    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Begin a drag at `point`. The frame always rests at zero translation
    /// when grabbed, so the drag start is the press point itself.
    pub fn press(&mut self, point: Point) {
        debug!(x = point.x, y = point.y, "frame grabbed");
        self.state = DragState::Dragging { start: point };
    }

    /// Follow the pointer. Returns false when no drag is in progress.
    pub fn drag(&mut self, point: Point) -> bool {
        match self.state {
            DragState::Dragging { start } => {
                self.translation = point.minus(start);
                true
            }
            DragState::Idle => false,
        }
    }

    /// End the drag and snap the frame back. Returns true when a drag was
    /// actually in progress, meaning the drawing must be cleared.
    pub fn release(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        debug!(
            dx = self.translation.x,
            dy = self.translation.y,
            "frame released"
        );
        self.state = DragState::Idle;
        self.translation = Point::ZERO;
        true
    }
}
