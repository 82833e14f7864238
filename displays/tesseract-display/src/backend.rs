//! Display backend trait
//!
//! Defines the drawing surface the animation core renders into.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display (bus NAK, timeout, ...)
    Communication,
    /// Display not initialized
    NotInitialized,
}

/// Pixel drawing surface
///
/// Coordinates are signed so callers can pass projected points without
/// checking them first. Every method except `present` only touches the
/// in-memory frame; `present` pushes the frame to the hardware.
pub trait Canvas {
    /// Turn every pixel off
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Set a single pixel
    ///
    /// Out-of-bounds coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), DisplayError>;

    /// Draw a one pixel wide line
    ///
    /// Endpoints may lie anywhere; the line is clipped to the visible area.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool)
        -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;

    /// Push the frame to the display
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Get the pixel dimensions as (width, height)
    fn size(&self) -> (u32, u32);
}
