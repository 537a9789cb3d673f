// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::canvas::Layer;
use crate::config::Color;
use crate::surface::PenPosition;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Wipe the visible screen to a flat color.
    Clear(Color),
    /// Copy the offscreen stroke buffer onto the visible screen.
    Blit,
    Stroke {
        from: PenPosition,
        to: PenPosition,
        thickness: f32,
        color: Color,
    },
    /// Stamp the needle, remembering what it covers.
    Needle {
        at: PenPosition,
        radius: i32,
        color: Color,
    },
    /// Restore the pixels under the last stamped needle.
    LiftNeedle,
}

/// Ordered draw commands for the visible screen, executed front to back.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Strokes in the order they will be painted.
    pub fn strokes(&self) -> impl Iterator<Item = (PenPosition, PenPosition)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Stroke { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    /// Position of the last needle stamp, if any.
    pub fn needle(&self) -> Option<PenPosition> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Needle { at, .. } => Some(*at),
            _ => None,
        })
    }

    pub fn render(&self, screen: &mut Layer, offscreen: Option<&Layer>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    screen.fill(*color);
                }
                DrawCommand::Blit => {
                    if let Some(source) = offscreen {
                        screen.copy_from(source);
                    }
                }
                DrawCommand::Stroke {
                    from,
                    to,
                    thickness,
                    color,
                } => {
                    screen
                        .canvas()
                        .draw_line(from.x, from.y, to.x, to.y, *thickness, *color, 1.0);
                }
                DrawCommand::Needle { at, radius, color } => {
                    let (cx, cy) = at.pixel();
                    screen.save_under(cx, cy, *radius);
                    screen.canvas().draw_circle(cx, cy, *radius, *color, 1.0);
                }
                DrawCommand::LiftNeedle => {
                    screen.restore_under();
                }
            }
        }
    }
}
