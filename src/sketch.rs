// ============================================================================
// SKETCH STATE MACHINE
// ============================================================================

use tracing::{debug, trace};

use crate::config::SketchConfig;
use crate::dial::{Axis, DialTracker};
use crate::error::SketchError;
use crate::input::{PointerEvent, PointerKind, PointerSource, SketchCommand};
use crate::layout::{Layout, Point, Target};
use crate::scene::Scene;
use crate::shake::FrameDragger;
use crate::surface::{DrawingSurface, MoveOutcome, PenPosition};

#[derive(Debug, Clone)]
pub struct Sketch {
    layout: Layout,
    dials: [DialTracker; 2],
    surface: DrawingSurface,
    dragger: FrameDragger,
    resets: u64,
}

impl Sketch {
    pub fn new(config: &SketchConfig) -> Result<Self, SketchError> {
        config.validate()?;
        let layout = Layout::new(config);
        let dials = [Axis::Horizontal, Axis::Vertical]
            .map(|axis| DialTracker::new(axis, layout.dial(axis).center, config.step));

        Ok(Self {
            dials,
            surface: DrawingSurface::new(config),
            dragger: FrameDragger::new(),
            layout,
            resets: 0,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn pen(&self) -> PenPosition {
        self.surface.pen()
    }

    pub fn dial(&self, axis: Axis) -> &DialTracker {
        match axis {
            Axis::Horizontal => &self.dials[0],
            Axis::Vertical => &self.dials[1],
        }
    }

    fn dial_mut(&mut self, axis: Axis) -> &mut DialTracker {
        match axis {
            Axis::Horizontal => &mut self.dials[0],
            Axis::Vertical => &mut self.dials[1],
        }
    }

    pub fn dragger(&self) -> &FrameDragger {
        &self.dragger
    }

    /// How many times the drawing has been cleared.
    pub fn reset_count(&self) -> u64 {
        self.resets
    }

    pub fn take_scene(&mut self) -> Scene {
        self.surface.take_scene()
    }

    /// Hit test a window point against the frame where it is currently drawn.
    pub fn locate(&self, point: Point) -> Target {
        self.layout.hit(point, self.dragger.translation())
    }

    /// Hit test and dispatch in one go.
    pub fn pointer(&mut self, kind: PointerKind, point: Point, source: PointerSource) {
        let target = self.locate(point);
        self.handle(PointerEvent::new(kind, point, target, source));
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event.kind {
            PointerKind::Press => self.press(event),
            PointerKind::Move => self.motion(event),
            PointerKind::Release => self.release(),
            PointerKind::Leave => self.release_dials(),
        }
    }

    pub fn apply(&mut self, command: SketchCommand) {
        match command {
            SketchCommand::Nudge(axis, amount) => {
                self.nudge(axis, amount);
            }
            SketchCommand::Shake => self.shake(),
        }
    }

    /// One step along `axis` without a dial gesture.
    pub fn nudge(&mut self, axis: Axis, amount: f64) -> MoveOutcome {
        self.surface.set_drawing(true);
        let outcome = self.surface.draw_line(axis, amount);
        self.sync_drawing();
        outcome
    }

    /// Clear the drawing, as if the frame had been shaken.
    pub fn shake(&mut self) {
        self.reset();
    }

    fn press(&mut self, event: PointerEvent) {
        match event.target {
            Target::Dial(axis) => {
                debug!(%axis, "dial pressed");
                self.dial_mut(axis).press();
                self.surface.set_drawing(true);
            }
            Target::Frame => self.dragger.press(event.point),
            Target::Outside => {}
        }
    }

    fn motion(&mut self, event: PointerEvent) {
        if self.dragger.drag(event.point) {
            return;
        }

        for index in 0..self.dials.len() {
            if !self.dials[index].is_active() {
                continue;
            }
            let axis = self.dials[index].axis();
            // Touches stay with the dial they started on; a mouse that wanders
            // off the knob lets go of it.
            let over_dial = event.target == Target::Dial(axis);
            if event.source == PointerSource::Mouse && !over_dial {
                debug!(%axis, "pointer left dial");
                self.dials[index].release();
                continue;
            }
            if let Some(signal) = self.dials[index].track(event.point) {
                trace!(%axis, amount = signal.amount, "dial turned");
                self.surface.apply(signal);
            }
        }
        self.sync_drawing();
    }

    fn release(&mut self) {
        self.release_dials();
        if self.dragger.release() {
            self.reset();
        }
    }

    fn release_dials(&mut self) {
        for dial in &mut self.dials {
            dial.release();
        }
        self.surface.set_drawing(false);
    }

    fn sync_drawing(&mut self) {
        let active = self.dials.iter().any(DialTracker::is_active);
        self.surface.set_drawing(active);
    }

    fn reset(&mut self) {
        self.surface.reset();
        for dial in &mut self.dials {
            dial.forget();
        }
        self.resets += 1;
        debug!(resets = self.resets, "drawing cleared");
    }
}
