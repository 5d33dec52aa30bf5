//! CPU framebuffer
//!
//! A plain RGB pixel grid with scanline polygon fill and Bresenham outlines.
//! No anti-aliasing, so every pixel is exactly one of the colors drawn,
//! which is what the pixel-probe collision strategy reads back.

use std::convert::Infallible;

use glam::Vec2;

use super::surface::RenderSurface;
use crate::sim::{PixelProbe, Rgb};

#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    /// Frames presented so far
    pub frames_presented: u64,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; (width as usize) * (height as usize)],
            frames_presented: 0,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill pixels on row `y` whose centers fall in [x0, x1)
    fn fill_span(&mut self, y: i32, x0: f32, x1: f32, color: Rgb) {
        let start = (x0 - 0.5).ceil().max(0.0) as i32;
        let end = (x1 - 0.5).ceil().min(self.width as f32) as i32;
        for x in start..end {
            self.put(x, y, color);
        }
    }

    fn line(&mut self, a: Vec2, b: Vec2, color: Rgb) {
        let (mut x0, mut y0) = (a.x.floor() as i32, a.y.floor() as i32);
        let (x1, y1) = (b.x.floor() as i32, b.y.floor() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl PixelProbe for Framebuffer {
    fn read_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }
}

impl RenderSurface for Framebuffer {
    type Error = Infallible;

    fn fill_background(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn draw_polygon(&mut self, fill: Rgb, vertices: &[Vec2]) {
        if vertices.len() < 3 {
            return;
        }
        let (min_y, max_y) = vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v.y), hi.max(v.y)));
        let row_start = (min_y - 0.5).ceil().max(0.0) as i32;
        let row_end = (max_y - 0.5).ceil().min(self.height as f32) as i32;

        let mut crossings: Vec<f32> = Vec::with_capacity(vertices.len());
        for y in row_start..row_end {
            let sample_y = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in vertices.iter().enumerate() {
                let b = vertices[(i + 1) % vertices.len()];
                // Half-open so shared vertices are counted once
                if (a.y <= sample_y && b.y > sample_y) || (b.y <= sample_y && a.y > sample_y) {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                self.fill_span(y, pair[0], pair[1], fill);
            }
        }
    }

    fn draw_outline(&mut self, color: Rgb, vertices: &[Vec2], closed: bool) {
        for pair in vertices.windows(2) {
            self.line(pair[0], pair[1], color);
        }
        if closed && vertices.len() > 2 {
            self.line(vertices[vertices.len() - 1], vertices[0], color);
        }
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.frames_presented += 1;
        Ok(())
    }
}
