// ============================================================================
// CONFIGURATION
// ============================================================================

use bon::Builder;

use crate::error::SketchError;
use crate::surface::RenderStrategy;

/// Color representation for frame, screen and stroke elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

/// Everything needed to lay out, draw and drive the toy.
///
/// Build with [`SketchConfig::builder`]; every field has a default so an empty
/// builder gives the classic red toy with a 300x300 screen.
#[derive(Debug, Clone, Builder)]
pub struct SketchConfig {
    #[builder(default = "Etch A Sketch".to_string())]
    pub title: String,

    // Drawing surface
    #[builder(default = 300)]
    pub surface_width: usize,
    #[builder(default = 300)]
    pub surface_height: usize,
    #[builder(default = 10.0)]
    pub padding: f64,
    #[builder(default = 2.0)]
    pub step: f64,
    #[builder(default)]
    pub strategy: RenderStrategy,

    // Strokes and needle
    #[builder(default = Color::BLACK)]
    pub stroke_color: Color,
    #[builder(default = 1.0)]
    pub stroke_thickness: f32,
    #[builder(default = 2)]
    pub needle_radius: i32,
    #[builder(default = Color::WHITE)]
    pub needle_color: Color,
    #[builder(default = Color::new(0xbd, 0xbd, 0xb5))]
    pub screen_color: Color,

    // Frame and knobs
    #[builder(default = 40)]
    pub bezel: i32,
    #[builder(default = 90)]
    pub knob_band: i32,
    #[builder(default = 30)]
    pub dial_radius: i32,
    #[builder(default = Color::new(0xc4, 0x1e, 0x24))]
    pub frame_color: Color,
    #[builder(default = Color::new(0xf2, 0xf0, 0xea))]
    pub dial_color: Color,
    #[builder(default = Color::new(0x5a, 0x5a, 0x5a))]
    pub dial_mark_color: Color,

    // Window
    #[builder(default = 60)]
    pub window_margin: i32,
    #[builder(default = Color::new(0x2b, 0x2b, 0x30))]
    pub background_color: Color,
    #[builder(default = 0.6)]
    pub shake_alpha: f32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SketchConfig {
    /// Check the geometric invariants the drawing surface relies on.
    pub fn validate(&self) -> Result<(), SketchError> {
        let invalid = |reason: String| Err(SketchError::InvalidConfig(reason));

        if !(self.padding >= 0.0 && self.padding.is_finite()) {
            return invalid(format!("padding must be a non-negative number, got {}", self.padding));
        }
        if (self.surface_width as f64) <= 2.0 * self.padding
            || (self.surface_height as f64) <= 2.0 * self.padding
        {
            return invalid(format!(
                "surface {}x{} leaves no drawable area inside padding {}",
                self.surface_width, self.surface_height, self.padding
            ));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return invalid(format!("step must be positive, got {}", self.step));
        }
        if !(1..=2).contains(&self.needle_radius) {
            return invalid(format!("needle radius must be 1 or 2, got {}", self.needle_radius));
        }
        if self.dial_radius <= 0 || self.knob_band < 2 * self.dial_radius {
            return invalid(format!(
                "knob band {} cannot hold dials of radius {}",
                self.knob_band, self.dial_radius
            ));
        }
        if (self.surface_width as i32) < 4 * self.dial_radius {
            return invalid(format!(
                "surface width {} is too narrow for two dials of radius {}",
                self.surface_width, self.dial_radius
            ));
        }
        if !(0.0..=1.0).contains(&self.shake_alpha) {
            return invalid(format!("shake alpha must be within 0..=1, got {}", self.shake_alpha));
        }
        if !(self.max_framerate > 0.0 && self.max_framerate.is_finite()) {
            return invalid(format!("max framerate must be positive, got {}", self.max_framerate));
        }
        Ok(())
    }

    pub fn surface_center(&self) -> (f64, f64) {
        (self.surface_width as f64 / 2.0, self.surface_height as f64 / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.surface_width, 300);
        assert_eq!(config.padding, 10.0);
        assert_eq!(config.step, 2.0);
        assert_eq!(config.strategy, RenderStrategy::Buffered);
    }

    #[test]
    fn builder_overrides_single_fields() {
        let config = SketchConfig::builder().surface_width(640).step(4.0).build();
        assert_eq!(config.surface_width, 640);
        assert_eq!(config.surface_height, 300);
        assert_eq!(config.step, 4.0);
    }

    #[test]
    fn surface_smaller_than_padding_is_rejected() {
        let config = SketchConfig::builder()
            .surface_width(20)
            .padding(10.0)
            .dial_radius(4)
            .build();
        assert!(matches!(config.validate(), Err(SketchError::InvalidConfig(_))));
    }

    #[test]
    fn zero_step_is_rejected() {
        let config = SketchConfig::builder().step(0.0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_needle_is_rejected() {
        let config = SketchConfig::builder().needle_radius(5).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn center_is_half_the_surface() {
        let config = SketchConfig::builder().surface_width(400).surface_height(200).build();
        assert_eq!(config.surface_center(), (200.0, 100.0));
    }
}
