// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod canvas;
pub mod config;
pub mod dial;
pub mod error;
pub mod input;
pub mod layout;
pub mod logging;
pub mod needle;
pub mod scene;
pub mod shake;
pub mod sketch;
pub mod surface;

pub use config::{Color, SketchConfig};
pub use dial::{Axis, DirectionSignal};
pub use error::{SketchError, UnknownStrategy};
pub use input::{PointerEvent, PointerKind, PointerSource, SketchCommand};
pub use layout::{Point, Target};
pub use sketch::Sketch;
pub use surface::{LineSegment, MoveOutcome, PenPosition, RenderStrategy};

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use tracing::{debug, error, info, warn};

// Standard library imports
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{CursorIcon, WindowBuilder};

use canvas::{Canvas, Layer};
use layout::DialGeometry;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// A windowed Etch A Sketch: the toy's state plus the configuration it was
/// built from.
#[derive(Debug, Clone)]
pub struct EtchASketch {
    config: SketchConfig,
    sketch: Sketch,
}

impl EtchASketch {
    pub fn new(config: SketchConfig) -> Result<Self, SketchError> {
        let sketch = Sketch::new(&config)?;
        Ok(Self { config, sketch })
    }

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    /// Open the window and run until it is closed.
    pub fn show(self) -> Result<(), SketchError> {
        self.run_window(None)
    }

    /// Like [`EtchASketch::show`], also applying commands from `receiver` once per frame.
    pub fn show_with_commands(self, receiver: Receiver<SketchCommand>) -> Result<(), SketchError> {
        self.run_window(Some(receiver))
    }

    fn run_window(self, receiver: Option<Receiver<SketchCommand>>) -> Result<(), SketchError> {
        let Self { config, mut sketch } = self;
        let layout = sketch.layout().clone();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(
                layout.window_width as f64,
                layout.window_height as f64,
            ))
            .with_resizable(false)
            .build(&event_loop)?;

        window.set_cursor_icon(frame_cursor(false));

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(
            layout.window_width as u32,
            layout.window_height as u32,
            surface_texture,
        )?;

        let mut screen = Layer::new(
            config.surface_width,
            config.surface_height,
            config.screen_color,
        );
        let mut cursor = Point::ZERO;
        let mut tracked_touch: Option<u64> = None;
        let mut grabbing = false;
        let failure: Rc<Cell<Option<pixels::Error>>> = Rc::new(Cell::new(None));
        let render_failure = failure.clone();

        let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate);
        let mut last_frame = Instant::now();

        info!(
            width = config.surface_width,
            height = config.surface_height,
            strategy = %config.strategy,
            "sketch window open"
        );

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => {
                    match event {
                        WindowEvent::CloseRequested => {
                            window_target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                                warn!(%err, "could not resize pixel surface");
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            cursor = buffer_point(&pixels, position.x, position.y);
                            sketch.pointer(PointerKind::Move, cursor, PointerSource::Mouse);
                        }
                        WindowEvent::CursorLeft { .. } => {
                            sketch.pointer(PointerKind::Leave, cursor, PointerSource::Mouse);
                        }
                        WindowEvent::MouseInput {
                            state,
                            button: MouseButton::Left,
                            ..
                        } => {
                            let kind = match state {
                                ElementState::Pressed => PointerKind::Press,
                                ElementState::Released => PointerKind::Release,
                            };
                            sketch.pointer(kind, cursor, PointerSource::Mouse);
                        }
                        WindowEvent::Touch(touch) => {
                            handle_touch(&mut sketch, &pixels, &mut tracked_touch, touch);
                        }
                        WindowEvent::RedrawRequested => {
                            if let Some(ref receiver) = receiver {
                                while let Ok(command) = receiver.try_recv() {
                                    sketch.apply(command);
                                }
                            }

                            let scene = sketch.take_scene();
                            scene.render(&mut screen, sketch.surface().offscreen());

                            let mut canvas = Canvas::new(
                                pixels.frame_mut(),
                                layout.window_width,
                                layout.window_height,
                            );
                            render_sketch(&mut canvas, &sketch, &screen, &config);
                            if let Err(err) = pixels.render() {
                                error!(%err, "rendering failed, closing window");
                                render_failure.set(Some(err));
                                window_target.exit();
                            }
                        }
                        _ => {}
                    }

                    let dragging = sketch.dragger().is_dragging();
                    if dragging != grabbing {
                        grabbing = dragging;
                        window_clone.set_cursor_icon(frame_cursor(dragging));
                    }
                }
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        finish(failure.take())
    }
}

/// Outcome of a finished event loop: a render failure that closed the window
/// is still an error.
fn finish(failure: Option<pixels::Error>) -> Result<(), SketchError> {
    match failure {
        Some(err) => Err(SketchError::Pixels(err)),
        None => Ok(()),
    }
}

/// Open hand over the frame, closed hand while it is being shaken.
fn frame_cursor(dragging: bool) -> CursorIcon {
    if dragging {
        CursorIcon::Grabbing
    } else {
        CursorIcon::Grab
    }
}

// ============================================================================
// INPUT TRANSLATION
// ============================================================================

/// Map a physical window position into framebuffer coordinates. Positions off
/// the buffer keep their (out of range) coordinates so they hit test as outside.
fn buffer_point(pixels: &Pixels, x: f64, y: f64) -> Point {
    match pixels.window_pos_to_pixel((x as f32, y as f32)) {
        Ok((px, py)) => Point::new(px as f64, py as f64),
        Err((px, py)) => Point::new(px as f64, py as f64),
    }
}

fn handle_touch(sketch: &mut Sketch, pixels: &Pixels, tracked: &mut Option<u64>, touch: Touch) {
    if let Some(kind) = touch_pointer(tracked, touch.id, touch.phase) {
        let point = buffer_point(pixels, touch.location.x, touch.location.y);
        sketch.pointer(kind, point, PointerSource::Touch);
    }
}

/// Only the first finger down is followed until it lifts; every other finger
/// maps to `None`.
fn touch_pointer(tracked: &mut Option<u64>, id: u64, phase: TouchPhase) -> Option<PointerKind> {
    match phase {
        TouchPhase::Started if tracked.is_none() => {
            *tracked = Some(id);
            Some(PointerKind::Press)
        }
        TouchPhase::Started => {
            debug!(id, "ignoring extra touch point");
            None
        }
        TouchPhase::Moved if *tracked == Some(id) => Some(PointerKind::Move),
        TouchPhase::Ended | TouchPhase::Cancelled if *tracked == Some(id) => {
            *tracked = None;
            Some(PointerKind::Release)
        }
        _ => None,
    }
}

// ============================================================================
// WINDOW COMPOSITION
// ============================================================================

fn render_sketch(canvas: &mut Canvas, sketch: &Sketch, screen: &Layer, config: &SketchConfig) {
    let layout = sketch.layout();
    let offset = sketch.dragger().translation();
    let alpha = if sketch.dragger().is_dragging() {
        config.shake_alpha
    } else {
        1.0
    };

    canvas.clear(config.background_color);

    let frame = layout.frame;
    canvas.fill_rect(
        (frame.x + offset.x).round() as i32,
        (frame.y + offset.y).round() as i32,
        frame.width as i32,
        frame.height as i32,
        config.frame_color,
        alpha,
    );

    canvas.draw_layer(
        screen,
        (layout.screen.x + offset.x).round() as i32,
        (layout.screen.y + offset.y).round() as i32,
        alpha,
    );

    for dial in &layout.dials {
        let rotation = sketch.dial(dial.axis).rotation();
        draw_knob(canvas, dial, rotation, offset, alpha, config);
    }
}

fn draw_knob(
    canvas: &mut Canvas,
    dial: &DialGeometry,
    rotation: f64,
    offset: Point,
    alpha: f32,
    config: &SketchConfig,
) {
    let center = dial.center.offset(offset);
    let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
    canvas.draw_circle(cx, cy, dial.radius as i32, config.dial_color, alpha);

    // Grip mark showing the knob's current rotation
    let reach = dial.radius * 0.8;
    canvas.draw_line(
        center.x,
        center.y,
        center.x + rotation.cos() * reach,
        center.y + rotation.sin() * reach,
        3.0,
        config.dial_mark_color,
        alpha,
    );
    canvas.draw_circle(cx, cy, 3, config.dial_mark_color, alpha);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let config = SketchConfig::builder().step(-1.0).build();
        assert!(matches!(
            EtchASketch::new(config),
            Err(SketchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn composed_window_shows_screen_and_frame() {
        let config = SketchConfig::default();
        let app = EtchASketch::new(config.clone()).unwrap();
        let layout = app.sketch().layout().clone();
        let screen = Layer::new(config.surface_width, config.surface_height, config.screen_color);
        let mut window = Layer::new(layout.window_width, layout.window_height, Color::BLACK);

        render_sketch(&mut window.canvas(), app.sketch(), &screen, &config);

        let inside_screen = (layout.screen.x + 50.0) as usize;
        assert_eq!(window.pixel(inside_screen, inside_screen), Some(config.screen_color.to_rgba()));
        let bezel = (layout.frame.x + 5.0) as usize;
        assert_eq!(window.pixel(bezel, bezel), Some(config.frame_color.to_rgba()));
        assert_eq!(window.pixel(2, 2), Some(config.background_color.to_rgba()));
    }

    #[test]
    fn render_failure_is_reported_after_the_loop() {
        assert!(finish(None).is_ok());
        assert!(matches!(
            finish(Some(pixels::Error::AdapterNotFound)),
            Err(SketchError::Pixels(pixels::Error::AdapterNotFound))
        ));
    }

    #[test]
    fn cursor_follows_frame_grab() {
        assert_eq!(frame_cursor(false), CursorIcon::Grab);
        assert_eq!(frame_cursor(true), CursorIcon::Grabbing);
    }

    #[test]
    fn second_finger_is_ignored() {
        let mut tracked = None;
        assert_eq!(touch_pointer(&mut tracked, 1, TouchPhase::Started), Some(PointerKind::Press));
        assert_eq!(touch_pointer(&mut tracked, 2, TouchPhase::Started), None);
        assert_eq!(touch_pointer(&mut tracked, 2, TouchPhase::Moved), None);
        assert_eq!(touch_pointer(&mut tracked, 2, TouchPhase::Ended), None);
        assert_eq!(tracked, Some(1));
        assert_eq!(touch_pointer(&mut tracked, 1, TouchPhase::Moved), Some(PointerKind::Move));
        assert_eq!(touch_pointer(&mut tracked, 1, TouchPhase::Ended), Some(PointerKind::Release));
        assert_eq!(tracked, None);
        assert_eq!(touch_pointer(&mut tracked, 2, TouchPhase::Started), Some(PointerKind::Press));
    }

    #[test]
    fn cancelled_touch_ends_a_frame_shake() {
        let mut sketch = Sketch::new(&SketchConfig::default()).unwrap();
        let mut tracked = None;
        let grab = sketch.layout().screen.origin().offset(Point::new(10.0, 10.0));
        let steps = [
            (1, TouchPhase::Started, grab),
            (2, TouchPhase::Started, grab.offset(Point::new(80.0, 0.0))),
            (1, TouchPhase::Moved, grab.offset(Point::new(30.0, 5.0))),
            (2, TouchPhase::Moved, grab.offset(Point::new(90.0, 0.0))),
        ];
        for (id, phase, point) in steps {
            if let Some(kind) = touch_pointer(&mut tracked, id, phase) {
                sketch.pointer(kind, point, PointerSource::Touch);
            }
        }
        assert_eq!(sketch.dragger().translation(), Point::new(30.0, 5.0));

        // A stray finger lifting does not end the shake.
        if let Some(kind) = touch_pointer(&mut tracked, 2, TouchPhase::Ended) {
            sketch.pointer(kind, grab, PointerSource::Touch);
        }
        assert!(sketch.dragger().is_dragging());

        if let Some(kind) = touch_pointer(&mut tracked, 1, TouchPhase::Cancelled) {
            sketch.pointer(kind, grab, PointerSource::Touch);
        }
        assert!(!sketch.dragger().is_dragging());
        assert_eq!(sketch.reset_count(), 1);
        assert_eq!(tracked, None);
    }
}
