// ============================================================================
// PEN MARKER
// ============================================================================

use crate::config::{Color, SketchConfig};
use crate::scene::{DrawCommand, Scene};
use crate::surface::PenPosition;

/// The small marker showing where the pen sits.
#[derive(Debug, Clone, Copy)]
pub struct Needle {
    radius: i32,
    color: Color,
}

impl Needle {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            radius: config.needle_radius,
            color: config.needle_color,
        }
    }

    pub fn add_to(&self, scene: &mut Scene, at: PenPosition) {
        scene.add_command(DrawCommand::Needle {
            at,
            radius: self.radius,
            color: self.color,
        });
    }
}
