// ============================================================================
// KNOB TRACKING
// ============================================================================

use std::fmt;

use crate::layout::Point;

/// Drawing axis driven by one dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// One incremental move request for the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionSignal {
    pub axis: Axis,
    pub amount: f64,
}

/// Angle of `pointer` around `center`, in (-pi, pi].
pub fn pointer_angle(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x)
}

/// -1, 0 or +1. `f64::signum` maps 0.0 to 1.0, which would turn a still
/// pointer into a step.
fn direction_of(delta: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct DialTracker {
    axis: Axis,
    center: Point,
    step: f64,
    last_angle: Option<f64>,
    rotation: f64,
    active: bool,
}

impl DialTracker {
    pub fn new(axis: Axis, center: Point, step: f64) -> Self {
        Self {
            axis,
            center,
            step,
            last_angle: None,
            rotation: 0.0,
            active: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Visual rotation of the knob: the raw angle of the last tracked pointer.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn last_angle(&self) -> Option<f64> {
        self.last_angle
    }

    pub fn press(&mut self) {
        self.active = true;
    }

    pub fn release(&mut self) {
        self.active = false;
    }

    /// Drop the angle history so the next tracked move only records.
    pub fn forget(&mut self) {
        self.last_angle = None;
    }

    /// Track a pointer position over the dial.
    ///
    /// Returns `None` while the dial is inactive or on the first observation.
    /// No unwrapping is done at the +/-pi seam: a move across it reads as a
    /// reversal.
    pub fn track(&mut self, pointer: Point) -> Option<DirectionSignal> {
        if !self.active {
            return None;
        }

        let angle = pointer_angle(self.center, pointer);
        let signal = self.last_angle.map(|previous| DirectionSignal {
            axis: self.axis,
            amount: direction_of(angle - previous) * self.step,
        });

        self.last_angle = Some(angle);
        self.rotation = angle;
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn on_circle(center: Point, angle: f64) -> Point {
        Point::new(center.x + 20.0 * angle.cos(), center.y + 20.0 * angle.sin())
    }

    fn tracker() -> DialTracker {
        let mut dial = DialTracker::new(Axis::Horizontal, Point::new(50.0, 50.0), 2.0);
        dial.press();
        dial
    }

    #[test]
    fn angle_matches_atan2() {
        let center = Point::new(10.0, 10.0);
        assert_eq!(pointer_angle(center, Point::new(20.0, 10.0)), 0.0);
        assert!((pointer_angle(center, Point::new(10.0, 20.0)) - PI / 2.0).abs() < 1e-12);
        assert!((pointer_angle(center, Point::new(0.0, 10.0)) - PI).abs() < 1e-12);
    }

    #[test]
    fn first_observation_only_records() {
        let mut dial = tracker();
        assert_eq!(dial.track(on_circle(dial.center, 0.3)), None);
        assert!((dial.last_angle().unwrap() - 0.3).abs() < 1e-12);
        assert!((dial.rotation() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn clockwise_and_counter_clockwise_steps() {
        let mut dial = tracker();
        dial.track(on_circle(dial.center, 0.0));
        let forward = dial.track(on_circle(dial.center, 0.2)).unwrap();
        assert_eq!(forward, DirectionSignal { axis: Axis::Horizontal, amount: 2.0 });
        let back = dial.track(on_circle(dial.center, 0.1)).unwrap();
        assert_eq!(back.amount, -2.0);
    }

    #[test]
    fn still_pointer_yields_zero_step() {
        let mut dial = tracker();
        let p = on_circle(dial.center, 1.0);
        dial.track(p);
        assert_eq!(dial.track(p).unwrap().amount, 0.0);
    }

    #[test]
    fn inactive_dial_ignores_moves() {
        let mut dial = DialTracker::new(Axis::Vertical, Point::ZERO, 2.0);
        assert_eq!(dial.track(Point::new(1.0, 1.0)), None);
        assert_eq!(dial.last_angle(), None);
        assert_eq!(dial.rotation(), 0.0);
    }

    #[test]
    fn crossing_the_seam_reads_as_reversal() {
        let mut dial = tracker();
        dial.track(on_circle(dial.center, PI - 0.05));
        // Still turning the same way, but atan2 jumps from ~pi to ~-pi.
        let signal = dial.track(on_circle(dial.center, -PI + 0.05)).unwrap();
        assert_eq!(signal.amount, -2.0);
    }

    #[test]
    fn forget_clears_history_but_keeps_rotation() {
        let mut dial = tracker();
        dial.track(on_circle(dial.center, 0.5));
        dial.forget();
        assert_eq!(dial.last_angle(), None);
        assert!((dial.rotation() - 0.5).abs() < 1e-12);
        assert_eq!(dial.track(on_circle(dial.center, 0.7)), None);
    }
}
