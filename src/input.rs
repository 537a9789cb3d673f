// ============================================================================
// POINTER INPUT
// ============================================================================

use crate::dial::Axis;
use crate::layout::{Point, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
    /// The pointer left the window.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    /// First touch point only; later fingers are dropped by the host.
    Touch,
}

/// One host input event, already hit tested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    pub target: Target,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, point: Point, target: Target, source: PointerSource) -> Self {
        Self {
            kind,
            point,
            target,
            source,
        }
    }
}

/// Scripted input, fed through a channel instead of the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SketchCommand {
    /// Move the pen along an axis as if its dial turned by one step of this size.
    Nudge(Axis, f64),
    /// Clear the drawing.
    Shake,
}
