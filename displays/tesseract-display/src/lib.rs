//! Display abstraction and frame buffer for Tesseract
//!
//! This crate provides:
//! - `Canvas` trait: the drawing surface the animation core renders into
//! - `FrameBuffer`: a 128x64 1-bit buffer in SSD1306/SH1106 page layout
//! - `Panel` trait for the hardware that receives a finished frame
//! - `BufferedCanvas`: a `Canvas` that rasterizes into a `FrameBuffer`
//!   with embedded-graphics and hands it to a `Panel` on `present()`
//!
//! # Architecture
//!
//! The animation core only knows about `Canvas`. Firmware pairs a
//! `BufferedCanvas` with a panel driver (e.g. SSD1306 over I2C); host tests
//! pair it with a recording panel, or implement `Canvas` directly.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod buffered;
pub mod framebuffer;

// Re-export key types
pub use backend::{Canvas, DisplayError};
pub use buffered::{BufferedCanvas, Panel};
pub use framebuffer::{clip_line, FrameBuffer, HEIGHT, PAGES, WIDTH};
