//! Buffered canvas
//!
//! Rasterizes into a local `FrameBuffer` and hands the whole frame to a
//! `Panel` when presented.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{Canvas, DisplayError};
use crate::framebuffer::{clip_line, FrameBuffer, HEIGHT, WIDTH};

/// Physical display that accepts a complete frame
pub trait Panel {
    /// Run the controller's power-up sequence
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Transfer a frame to display memory
    fn write_frame(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}

/// `Canvas` implementation backed by a frame buffer and a panel
pub struct BufferedCanvas<P> {
    panel: P,
    frame: FrameBuffer,
    initialized: bool,
}

impl<P: Panel> BufferedCanvas<P> {
    /// Wrap a panel; call `init` before presenting
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            frame: FrameBuffer::new(),
            initialized: false,
        }
    }

    /// Initialize the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.panel.init()?;
        self.initialized = true;
        Ok(())
    }

    /// Current (not yet presented) frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Access the underlying panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutable access to the underlying panel
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}

fn color(on: bool) -> BinaryColor {
    if on {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

impl<P: Panel> Canvas for BufferedCanvas<P> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear();
        Ok(())
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), DisplayError> {
        self.frame.set_pixel(x, y, on);
        Ok(())
    }

    fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        on: bool,
    ) -> Result<(), DisplayError> {
        // Clip first so far-away endpoints don't cost a walk over
        // thousands of invisible pixels
        let Some((start, end)) = clip_line((x0, y0), (x1, y1), WIDTH as u32, HEIGHT as u32) else {
            return Ok(());
        };

        Line::new(Point::new(start.0, start.1), Point::new(end.0, end.1))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.frame)
            .ok();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.frame)
            .ok();
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.panel.write_frame(&self.frame)
    }

    fn size(&self) -> (u32, u32) {
        (WIDTH as u32, HEIGHT as u32)
    }
}
