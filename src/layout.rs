// ============================================================================
// WINDOW GEOMETRY & HIT TESTING
// ============================================================================

use crate::config::SketchConfig;
use crate::dial::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }

    pub fn minus(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// A round knob bound to one drawing axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub axis: Axis,
    pub center: Point,
    pub radius: f64,
}

impl DialGeometry {
    pub fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// What a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Dial(Axis),
    Frame,
    Outside,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub window_width: usize,
    pub window_height: usize,
    pub frame: Rect,
    pub screen: Rect,
    pub dials: [DialGeometry; 2],
}

impl Layout {
    pub fn new(config: &SketchConfig) -> Self {
        let margin = config.window_margin as f64;
        let bezel = config.bezel as f64;
        let surface_w = config.surface_width as f64;
        let surface_h = config.surface_height as f64;
        let dial_r = config.dial_radius as f64;

        let frame = Rect::new(
            margin,
            margin,
            surface_w + 2.0 * bezel,
            surface_h + bezel + config.knob_band as f64,
        );
        let screen = Rect::new(frame.x + bezel, frame.y + bezel, surface_w, surface_h);

        let knob_y = screen.y + surface_h + config.knob_band as f64 / 2.0;
        let dials = [
            DialGeometry {
                axis: Axis::Horizontal,
                center: Point::new(screen.x + dial_r, knob_y),
                radius: dial_r,
            },
            DialGeometry {
                axis: Axis::Vertical,
                center: Point::new(screen.x + surface_w - dial_r, knob_y),
                radius: dial_r,
            },
        ];

        Self {
            window_width: (frame.width + 2.0 * margin) as usize,
            window_height: (frame.height + 2.0 * margin) as usize,
            frame,
            screen,
            dials,
        }
    }

    pub fn dial(&self, axis: Axis) -> &DialGeometry {
        match axis {
            Axis::Horizontal => &self.dials[0],
            Axis::Vertical => &self.dials[1],
        }
    }

    /// Hit test a window point against the frame drawn at `translation`.
    /// Dials sit on top of the frame and win over it.
    pub fn hit(&self, point: Point, translation: Point) -> Target {
        let local = point.minus(translation);
        if let Some(dial) = self.dials.iter().find(|d| d.contains(local)) {
            return Target::Dial(dial.axis);
        }
        if self.frame.contains(local) {
            Target::Frame
        } else {
            Target::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(&SketchConfig::default())
    }

    #[test]
    fn screen_is_surface_sized_inside_frame() {
        let layout = layout();
        assert_eq!(layout.screen.width, 300.0);
        assert_eq!(layout.screen.height, 300.0);
        assert!(layout.frame.contains(layout.screen.origin()));
        assert_eq!(layout.window_width, 300 + 2 * 40 + 2 * 60);
        assert_eq!(layout.window_height, 300 + 40 + 90 + 2 * 60);
    }

    #[test]
    fn dial_centers_hit_their_own_axis() {
        let layout = layout();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let center = layout.dial(axis).center;
            assert_eq!(layout.hit(center, Point::ZERO), Target::Dial(axis));
        }
    }

    #[test]
    fn screen_counts_as_frame() {
        let layout = layout();
        let p = Point::new(layout.screen.x + 10.0, layout.screen.y + 10.0);
        assert_eq!(layout.hit(p, Point::ZERO), Target::Frame);
        assert_eq!(layout.hit(Point::new(1.0, 1.0), Point::ZERO), Target::Outside);
    }

    #[test]
    fn hit_follows_translated_frame() {
        let layout = layout();
        let center = layout.dial(Axis::Vertical).center;
        let shift = Point::new(25.0, -10.0);
        assert_eq!(layout.hit(center.offset(shift), shift), Target::Dial(Axis::Vertical));
        assert_eq!(layout.hit(Point::new(1.0, 1.0), Point::new(-59.5, -59.5)), Target::Frame);
    }
}
