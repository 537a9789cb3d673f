// ============================================================================
// DRAWING SURFACE
// ============================================================================

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::canvas::Layer;
use crate::config::{Color, SketchConfig};
use crate::dial::{Axis, DirectionSignal};
use crate::error::UnknownStrategy;
use crate::needle::Needle;
use crate::scene::{DrawCommand, Scene};

/// Pen position in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenPosition {
    pub x: f64,
    pub y: f64,
}

impl PenPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest pixel.
    pub fn pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// One accepted move, kept in drawing order when replaying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub fn between(from: PenPosition, to: PenPosition) -> Self {
        Self {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        }
    }

    pub fn start(&self) -> PenPosition {
        PenPosition::new(self.x1, self.y1)
    }

    pub fn end(&self) -> PenPosition {
        PenPosition::new(self.x2, self.y2)
    }
}

/// How strokes reach the visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    /// Strokes land straight on the persistent screen; the needle is lifted
    /// and restamped around each stroke.
    Direct,
    /// Strokes go into an offscreen layer that is blitted under a fresh needle.
    #[default]
    Buffered,
    /// Strokes are kept as segments and replayed in order under a fresh needle.
    Replay,
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderStrategy::Direct => "direct",
            RenderStrategy::Buffered => "buffered",
            RenderStrategy::Replay => "replay",
        };
        f.write_str(name)
    }
}

impl FromStr for RenderStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(RenderStrategy::Direct),
            "buffered" => Ok(RenderStrategy::Buffered),
            "replay" => Ok(RenderStrategy::Replay),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// What a call to [`DrawingSurface::draw_line`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Not drawing, or a zero-length request.
    Ignored,
    /// Candidate fell outside the padded bounds; only the needle was refreshed.
    Rejected,
    Drawn(LineSegment),
}

#[derive(Debug, Clone, Copy)]
struct StrokeStyle {
    color: Color,
    thickness: f32,
}

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    width: f64,
    height: f64,
    padding: f64,
    pen: PenPosition,
    drawing: bool,
    strategy: RenderStrategy,
    history: Vec<LineSegment>,
    offscreen: Option<Layer>,
    pending: Scene,
    stroke: StrokeStyle,
    screen_color: Color,
    needle: Needle,
}

impl DrawingSurface {
    pub fn new(config: &SketchConfig) -> Self {
        let offscreen = (config.strategy == RenderStrategy::Buffered).then(|| {
            Layer::new(config.surface_width, config.surface_height, config.screen_color)
        });
        let (cx, cy) = config.surface_center();

        let mut surface = Self {
            width: config.surface_width as f64,
            height: config.surface_height as f64,
            padding: config.padding,
            pen: PenPosition::new(cx, cy),
            drawing: false,
            strategy: config.strategy,
            history: Vec::new(),
            offscreen,
            pending: Scene::new(),
            stroke: StrokeStyle {
                color: config.stroke_color,
                thickness: config.stroke_thickness,
            },
            screen_color: config.screen_color,
            needle: Needle::new(config),
        };
        surface.redraw_from_scratch();
        surface
    }

    pub fn pen(&self) -> PenPosition {
        self.pen
    }

    pub fn center(&self) -> PenPosition {
        PenPosition::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn set_drawing(&mut self, drawing: bool) {
        self.drawing = drawing;
    }

    /// Recorded segments, oldest first. Only the replay strategy records.
    pub fn history(&self) -> &[LineSegment] {
        &self.history
    }

    /// The offscreen stroke buffer, present for the buffered strategy.
    pub fn offscreen(&self) -> Option<&Layer> {
        self.offscreen.as_ref()
    }

    /// Draw commands queued since the last call.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.pending)
    }

    pub fn within_bounds(&self, x: f64, y: f64) -> bool {
        x >= self.padding
            && x <= self.width - self.padding
            && y >= self.padding
            && y <= self.height - self.padding
    }

    pub fn apply(&mut self, signal: DirectionSignal) -> MoveOutcome {
        self.draw_line(signal.axis, signal.amount)
    }

    /// Move the pen `amount` pixels along `axis`, drawing as it goes.
    pub fn draw_line(&mut self, axis: Axis, amount: f64) -> MoveOutcome {
        if !self.drawing || amount == 0.0 || !amount.is_finite() {
            return MoveOutcome::Ignored;
        }

        let candidate = match axis {
            Axis::Horizontal => PenPosition::new(self.pen.x + amount, self.pen.y),
            Axis::Vertical => PenPosition::new(self.pen.x, self.pen.y + amount),
        };

        if !self.within_bounds(candidate.x, candidate.y) {
            trace!(%axis, amount, x = candidate.x, y = candidate.y, "move rejected at boundary");
            self.present(None);
            return MoveOutcome::Rejected;
        }

        let segment = LineSegment::between(self.pen, candidate);
        match self.strategy {
            RenderStrategy::Direct => {}
            RenderStrategy::Buffered => {
                if let Some(layer) = self.offscreen.as_mut() {
                    layer.canvas().draw_line(
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2,
                        self.stroke.thickness,
                        self.stroke.color,
                        1.0,
                    );
                }
            }
            RenderStrategy::Replay => self.history.push(segment),
        }
        self.pen = candidate;
        trace!(%axis, amount, x = candidate.x, y = candidate.y, "stroke");

        self.present(Some(segment));
        MoveOutcome::Drawn(segment)
    }

    /// Wipe every stroke and return the pen to the center.
    pub fn reset(&mut self) {
        self.history.clear();
        if let Some(layer) = self.offscreen.as_mut() {
            layer.fill(self.screen_color);
        }
        self.pen = self.center();
        self.pending.clear();
        self.redraw_from_scratch();
    }

    fn stroke_command(&self, segment: &LineSegment) -> DrawCommand {
        DrawCommand::Stroke {
            from: segment.start(),
            to: segment.end(),
            thickness: self.stroke.thickness,
            color: self.stroke.color,
        }
    }

    /// Queue whatever the strategy needs to show the current state, given the
    /// segment just committed (if any).
    fn present(&mut self, committed: Option<LineSegment>) {
        match self.strategy {
            RenderStrategy::Direct => {
                self.pending.add_command(DrawCommand::LiftNeedle);
                if let Some(segment) = committed {
                    let stroke = self.stroke_command(&segment);
                    self.pending.add_command(stroke);
                }
                self.needle.add_to(&mut self.pending, self.pen);
            }
            RenderStrategy::Buffered | RenderStrategy::Replay => {
                self.pending.clear();
                self.redraw_from_scratch();
            }
        }
    }

    fn redraw_from_scratch(&mut self) {
        self.pending.add_command(DrawCommand::Clear(self.screen_color));
        match self.strategy {
            RenderStrategy::Direct => {}
            RenderStrategy::Buffered => self.pending.add_command(DrawCommand::Blit),
            RenderStrategy::Replay => {
                let strokes: Vec<DrawCommand> =
                    self.history.iter().map(|s| self.stroke_command(s)).collect();
                for stroke in strokes {
                    self.pending.add_command(stroke);
                }
            }
        }
        self.needle.add_to(&mut self.pending, self.pen);
    }
}
