// ============================================================================
// PIXEL TARGETS
// ============================================================================

use crate::config::Color;

/// Borrowed RGBA8 frame with the drawing primitives used by the scene and the
/// window compositor.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, alpha: f32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px as usize, py as usize, color, alpha);
            }
        }
    }

    /// Alpha-blend `color` over the pixel at (x, y). Out-of-range writes are dropped.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    /// Antialiased line of the given thickness, round at both ends.
    pub fn draw_line(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        thickness: f32,
        color: Color,
        alpha: f32,
    ) {
        let half = thickness as f64 / 2.0;
        let reach = half.ceil() as i32 + 1;
        let min_x = x0.min(x1).floor() as i32 - reach;
        let max_x = x0.max(x1).ceil() as i32 + reach;
        let min_y = y0.min(y1).floor() as i32 - reach;
        let max_y = y0.max(y1).ceil() as i32 + reach;
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;
        for y in min_y.max(0)..=max_y {
            for x in min_x.max(0)..=max_x {
                let px = x as f64 - x0;
                let py = y as f64 - y0;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = x0 + t * dx;
                let ly = y0 + t * dy;
                let dist = ((lx - x as f64).powi(2) + (ly - y as f64).powi(2)).sqrt();
                let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) as f32;
                if aa > 0.01 {
                    self.set_pixel(x as usize, y as usize, color, aa * alpha);
                }
            }
        }
    }

    /// Filled disc with a one pixel soft edge.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color, alpha: f32) {
        for y in -radius - 1..=radius + 1 {
            for x in -radius - 1..=radius + 1 {
                let dist = ((x * x + y * y) as f64).sqrt();
                let aa = if dist > radius as f64 {
                    1.0 - (dist - radius as f64).min(1.0)
                } else {
                    1.0
                };
                let px = cx + x;
                let py = cy + y;
                if aa > 0.0 && px >= 0 && py >= 0 {
                    self.set_pixel(px as usize, py as usize, color, aa as f32 * alpha);
                }
            }
        }
    }

    /// Composite a whole layer with its top-left corner at (x, y).
    pub fn draw_layer(&mut self, layer: &Layer, x: i32, y: i32, alpha: f32) {
        for ly in 0..layer.height {
            let py = y + ly as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            for lx in 0..layer.width {
                let px = x + lx as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let idx = (ly * layer.width + lx) * 4;
                let color = Color::new(
                    layer.pixels[idx],
                    layer.pixels[idx + 1],
                    layer.pixels[idx + 2],
                );
                self.set_pixel(px as usize, py as usize, color, alpha);
            }
        }
    }
}

/// Pixels saved from under the needle so a direct-drawn surface can lift it again.
#[derive(Debug, Clone)]
struct SavedPatch {
    x: i32,
    y: i32,
    size: i32,
    pixels: Vec<Option<[u8; 4]>>,
}

/// Owned RGBA8 buffer: the visible screen, or the offscreen stroke buffer.
#[derive(Debug, Clone)]
pub struct Layer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    under: Option<SavedPatch>,
}

impl Layer {
    pub fn new(width: usize, height: usize, color: Color) -> Self {
        let mut layer = Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
            under: None,
        };
        layer.fill(color);
        layer
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(out)
    }

    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(&mut self.pixels, self.width, self.height)
    }

    /// Flood the layer; any saved needle patch is stale afterwards.
    pub fn fill(&mut self, color: Color) {
        self.canvas().clear(color);
        self.under = None;
    }

    /// Copy `source` over this layer. Layers of different sizes share their
    /// top-left overlap.
    pub fn copy_from(&mut self, source: &Layer) {
        if source.width == self.width && source.height == self.height {
            self.pixels.copy_from_slice(&source.pixels);
        } else {
            let w = self.width.min(source.width) * 4;
            for y in 0..self.height.min(source.height) {
                let dst = y * self.width * 4;
                let src = y * source.width * 4;
                self.pixels[dst..dst + w].copy_from_slice(&source.pixels[src..src + w]);
            }
        }
        self.under = None;
    }

    /// Remember the square patch a disc of `radius` at (cx, cy) will cover.
    pub fn save_under(&mut self, cx: i32, cy: i32, radius: i32) {
        let reach = radius + 1;
        let size = 2 * reach + 1;
        let (x, y) = (cx - reach, cy - reach);
        let mut pixels = Vec::with_capacity((size * size) as usize);
        for py in y..y + size {
            for px in x..x + size {
                let saved = if px >= 0 && py >= 0 {
                    self.pixel(px as usize, py as usize)
                } else {
                    None
                };
                pixels.push(saved);
            }
        }
        self.under = Some(SavedPatch { x, y, size, pixels });
    }

    /// Put back the patch saved by [`Layer::save_under`], if any.
    pub fn restore_under(&mut self) {
        let Some(patch) = self.under.take() else {
            return;
        };
        for (i, saved) in patch.pixels.iter().enumerate() {
            let Some(rgba) = saved else { continue };
            let px = (patch.x + i as i32 % patch.size) as usize;
            let py = (patch.y + i as i32 / patch.size) as usize;
            let idx = (py * self.width + px) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(rgba);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Color = Color::new(0x80, 0x80, 0x80);

    #[test]
    fn horizontal_line_paints_its_pixels() {
        let mut layer = Layer::new(20, 20, Color::WHITE);
        layer.canvas().draw_line(2.0, 10.0, 12.0, 10.0, 1.0, Color::BLACK, 1.0);
        assert_eq!(layer.pixel(5, 10), Some([0, 0, 0, 0xff]));
        assert_eq!(layer.pixel(5, 14), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(layer.pixel(18, 10), Some([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn zero_length_line_is_a_dot() {
        let mut layer = Layer::new(10, 10, Color::WHITE);
        layer.canvas().draw_line(4.0, 4.0, 4.0, 4.0, 1.0, Color::BLACK, 1.0);
        assert_eq!(layer.pixel(4, 4), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn circle_covers_center_and_clips_at_edges() {
        let mut layer = Layer::new(10, 10, Color::BLACK);
        layer.canvas().draw_circle(0, 0, 2, Color::WHITE, 1.0);
        assert_eq!(layer.pixel(0, 0), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(layer.pixel(9, 9), Some([0, 0, 0, 0xff]));
    }

    #[test]
    fn half_alpha_blends_toward_source() {
        let mut layer = Layer::new(1, 1, Color::BLACK);
        layer.canvas().set_pixel(0, 0, Color::WHITE, 0.5);
        assert_eq!(layer.pixel(0, 0), Some([0x80, 0x80, 0x80, 0xff]));
    }

    #[test]
    fn save_and_restore_under_round_trips() {
        let mut layer = Layer::new(12, 12, GREY);
        layer.canvas().draw_line(0.0, 6.0, 11.0, 6.0, 1.0, Color::BLACK, 1.0);
        let before = layer.pixels().to_vec();
        layer.save_under(6, 6, 2);
        layer.canvas().draw_circle(6, 6, 2, Color::WHITE, 1.0);
        assert_ne!(layer.pixels(), &before[..]);
        layer.restore_under();
        assert_eq!(layer.pixels(), &before[..]);
    }

    #[test]
    fn fill_discards_saved_patch() {
        let mut layer = Layer::new(8, 8, GREY);
        layer.save_under(4, 4, 1);
        layer.fill(Color::WHITE);
        layer.restore_under();
        assert_eq!(layer.pixel(4, 4), Some([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn layer_composites_at_offset() {
        let mut window = Layer::new(10, 10, Color::BLACK);
        let screen = Layer::new(3, 3, Color::WHITE);
        window.canvas().draw_layer(&screen, 8, 8, 1.0);
        assert_eq!(window.pixel(9, 9), Some([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(window.pixel(7, 7), Some([0, 0, 0, 0xff]));
    }
}
