use super::{load_font, Chart};
use crate::error::TransformError;
use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_text_mut, text_size};
use imageproc::pixelops::interpolate;

/// Space added around the plot area on each axis
pub const MARGIN: u32 = 50;
/// Horizontal position of the y axis
pub const ORIGIN_X: i32 = 25;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);
pub const CURVE: Rgb<u8> = Rgb([255, 0, 0]);

/// White RGB raster with a plot area offset by the chart margin
pub struct Canvas {
    image: RgbImage,
    font: FontRef<'static>,
    plot_width: u32,
    plot_height: u32,
}

impl Canvas {
    pub fn new(plot_width: u32, plot_height: u32) -> Result<Self, TransformError> {
        Ok(Self {
            image: RgbImage::from_pixel(plot_width + MARGIN, plot_height + MARGIN, BACKGROUND),
            font: load_font()?,
            plot_width,
            plot_height,
        })
    }

    /// Anti-aliased line. Thicker lines are drawn as parallel strokes offset
    /// along the normal.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb<u8>, thickness: u32) {
        if from == to {
            self.dot(from, color);
            return;
        }

        if thickness <= 1 {
            draw_antialiased_line_segment_mut(&mut self.image, from, to, color, interpolate);
            return;
        }

        let dx = (to.0 - from.0) as f32;
        let dy = (to.1 - from.1) as f32;
        let len = dx.hypot(dy);
        let (nx, ny) = (-dy / len, dx / len);

        for k in 0..thickness {
            let offset = k as f32 - (thickness - 1) as f32 / 2.0;
            let ox = (nx * offset).floor() as i32;
            let oy = (ny * offset).floor() as i32;
            draw_antialiased_line_segment_mut(
                &mut self.image,
                (from.0 + ox, from.1 + oy),
                (to.0 + ox, to.1 + oy),
                color,
                interpolate,
            );
        }
    }

    /// Text `size` pixels tall with its baseline starting at `origin`.
    /// Each extra weight step overdraws it one pixel further right.
    pub fn text(&mut self, text: &str, origin: (i32, i32), size: f32, color: Rgb<u8>, weight: u32) {
        let scale = PxScale::from(size);
        // draw_text_mut positions the top of the line box
        let top = origin.1 - self.font.as_scaled(scale).ascent().round() as i32;
        for dx in 0..weight.max(1) as i32 {
            draw_text_mut(&mut self.image, color, origin.0 + dx, top, scale, &self.font, text);
        }
    }

    /// Advance width of `text` in pixels
    pub fn text_width(&self, text: &str, size: f32) -> i32 {
        text_size(PxScale::from(size), &self.font, text).0 as i32
    }

    /// Draw the x axis along the plot baseline and the y axis at the origin
    pub fn axes(&mut self) {
        let w = self.plot_width as i32;
        let h = self.plot_height as i32;
        self.line((ORIGIN_X, h), (w + ORIGIN_X, h), INK, 1);
        self.line((ORIGIN_X, 0), (ORIGIN_X, h), INK, 1);
    }

    pub fn finish(self) -> Chart {
        Chart::new(self.image)
    }

    fn dot(&mut self, at: (i32, i32), color: Rgb<u8>) {
        let (x, y) = at;
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}
