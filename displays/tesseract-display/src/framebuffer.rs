//! 1-bit frame buffer
//!
//! Pixels are packed the way SSD1306/SH1106 controllers store them: the
//! screen is split into 8-pixel tall pages, each byte is one column of a
//! page with the least significant bit on top.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Monochrome frame buffer
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank frame buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Set a pixel, ignoring coordinates outside the buffer
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !Self::in_bounds(x, y) {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1u8 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Read a pixel; out-of-bounds pixels read as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Raw bytes of one page
    pub fn page(&self, index: usize) -> &[u8; WIDTH] {
        &self.pages[index]
    }

    /// Iterate over all pages, top to bottom
    pub fn pages(&self) -> impl Iterator<Item = &[u8; WIDTH]> {
        self.pages.iter()
    }

    /// Number of pixels currently on
    pub fn lit_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
        Ok(())
    }
}

// Cohen-Sutherland region codes
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BELOW: u8 = 0b0100;
const ABOVE: u8 = 0b1000;

/// Clip a line segment to a `width` x `height` area anchored at the origin
///
/// Returns the visible part of the segment, or `None` if no part of it is
/// visible. Endpoints may be anywhere in the `i32` range.
pub fn clip_line(
    start: (i32, i32),
    end: (i32, i32),
    width: u32,
    height: u32,
) -> Option<((i32, i32), (i32, i32))> {
    if width == 0 || height == 0 {
        return None;
    }

    let max_x = i128::from(width) - 1;
    let max_y = i128::from(height) - 1;
    let outcode = |x: i128, y: i128| -> u8 {
        let mut code = 0;
        if x < 0 {
            code |= LEFT;
        } else if x > max_x {
            code |= RIGHT;
        }
        if y < 0 {
            code |= ABOVE;
        } else if y > max_y {
            code |= BELOW;
        }
        code
    };

    let (mut x0, mut y0) = (i128::from(start.0), i128::from(start.1));
    let (mut x1, mut y1) = (i128::from(end.0), i128::from(end.1));
    let mut code0 = outcode(x0, y0);
    let mut code1 = outcode(x1, y1);

    // Each pass moves one endpoint onto a boundary; integer rounding can
    // need an extra pass per endpoint, never more.
    for _ in 0..8 {
        if code0 | code1 == 0 {
            return Some(((x0 as i32, y0 as i32), (x1 as i32, y1 as i32)));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let out = if code0 != 0 { code0 } else { code1 };
        let (x, y) = if out & BELOW != 0 {
            (x0 + (x1 - x0) * (max_y - y0) / (y1 - y0), max_y)
        } else if out & ABOVE != 0 {
            (x0 + (x1 - x0) * (0 - y0) / (y1 - y0), 0)
        } else if out & RIGHT != 0 {
            (max_x, y0 + (y1 - y0) * (max_x - x0) / (x1 - x0))
        } else {
            (0, y0 + (y1 - y0) * (0 - x0) / (x1 - x0))
        };

        if out == code0 {
            (x0, y0) = (x, y);
            code0 = outcode(x0, y0);
        } else {
            (x1, y1) = (x, y);
            code1 = outcode(x1, y1);
        }
    }

    None
}
