//! Draw surfaces
//!
//! The renderer paints through the [`DrawSurface`] trait so the scrolling
//! logic is independent of any particular host canvas. [`PixelSurface`] is
//! the in-memory implementation used by the panel and the tests.

use std::io::{self, Write};

use super::channel::TraceColor;

/// Minimal painting interface the trace renderer needs.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Whether the surface can accept paint. A zero-sized or detached
    /// surface reports false and the renderer skips the frame.
    fn is_ready(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    /// Fill an axis-aligned rectangle, clipped to the surface.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: TraceColor);

    /// Draw a one-pixel line segment, clipped to the surface.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: TraceColor);
}

/// In-memory ARGB pixel buffer.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelSurface {
    /// Create a surface filled with `fill`.
    pub fn new(width: u32, height: u32, fill: TraceColor) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill.to_argb_u32(); (width as usize) * (height as usize)],
        }
    }

    /// Read one pixel; `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<TraceColor> {
        self.index(x, y)
            .map(|i| TraceColor::from_argb_u32(self.pixels[i]))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = argb;
        }
    }

    /// Count pixels matching `color`, for test assertions and diagnostics.
    pub fn count_pixels(&self, color: TraceColor) -> usize {
        let argb = color.to_argb_u32();
        self.pixels.iter().filter(|&&p| p == argb).count()
    }

    /// Write the surface as a binary PPM image (alpha discarded).
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P6\n{} {}\n255", self.width, self.height)?;
        for p in &self.pixels {
            let c = TraceColor::from_argb_u32(*p);
            out.write_all(&[c.red, c.green, c.blue])?;
        }
        Ok(())
    }
}

impl DrawSurface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: TraceColor) {
        let argb = color.to_argb_u32();
        for yy in y..y.saturating_add(h as i32) {
            for xx in x..x.saturating_add(w as i32) {
                self.set_pixel(xx, yy, argb);
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: TraceColor) {
        // Bresenham; endpoints outside the surface clip per pixel.
        let argb = color.to_argb_u32();
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, argb);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: TraceColor = TraceColor::rgb(0, 0, 0);
    const FG: TraceColor = TraceColor::rgb(255, 255, 255);

    #[test]
    fn fill_rect_clips_to_surface() {
        let mut s = PixelSurface::new(4, 4, BG);
        s.fill_rect(-2, -2, 10, 10, FG);
        assert_eq!(s.count_pixels(FG), 16);
    }

    #[test]
    fn vertical_line() {
        let mut s = PixelSurface::new(3, 5, BG);
        s.draw_line(1, 0, 1, 4, FG);
        for y in 0..5 {
            assert_eq!(s.pixel(1, y), Some(FG));
        }
        assert_eq!(s.count_pixels(FG), 5);
    }

    #[test]
    fn diagonal_line_touches_endpoints() {
        let mut s = PixelSurface::new(10, 10, BG);
        s.draw_line(0, 0, 9, 9, FG);
        assert_eq!(s.pixel(0, 0), Some(FG));
        assert_eq!(s.pixel(9, 9), Some(FG));
    }

    #[test]
    fn zero_sized_surface_is_not_ready() {
        let s = PixelSurface::new(0, 0, BG);
        assert!(!s.is_ready());
    }

    #[test]
    fn ppm_header_and_length() {
        let s = PixelSurface::new(2, 2, BG);
        let mut buf = Vec::new();
        s.write_ppm(&mut buf).unwrap();
        assert!(buf.starts_with(b"P6\n2 2\n255\n"));
        assert_eq!(buf.len(), b"P6\n2 2\n255\n".len() + 12);
    }
}
