//! Pixel-strip transport boundary
//!
//! The frame loop only needs two things from the hardware: accept a full
//! color buffer in chain order, then make it visible. [`DisplayTransport`]
//! captures exactly that, so the loop can drive a real strip driver, a
//! terminal preview or an in-memory buffer for tests.

use std::convert::Infallible;
use std::fmt;

use smart_leds::{SmartLedsWrite, RGB8};

/// Something that can show a frame of pixel colors
pub trait DisplayTransport {
    /// Error reported by the underlying device
    type Error: fmt::Debug;

    /// Stage a full frame, in chain order
    ///
    /// # Errors
    ///
    /// Returns the device error if the frame cannot be staged.
    fn write(&mut self, colors: &[RGB8]) -> Result<(), Self::Error>;

    /// Make the staged frame visible
    ///
    /// # Errors
    ///
    /// Returns the device error if the frame cannot be latched.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Transport that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl DisplayTransport for NullDisplay {
    type Error = Infallible;

    fn write(&mut self, _colors: &[RGB8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Transport that keeps the last presented frame in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    staged: Vec<RGB8>,
    shown: Vec<RGB8>,
    presents: u64,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frame made visible by [`DisplayTransport::present`]
    pub fn shown(&self) -> &[RGB8] {
        &self.shown
    }

    /// Number of frames presented so far
    pub fn presents(&self) -> u64 {
        self.presents
    }
}

impl DisplayTransport for MemoryDisplay {
    type Error = Infallible;

    fn write(&mut self, colors: &[RGB8]) -> Result<(), Infallible> {
        self.staged.clear();
        self.staged.extend_from_slice(colors);
        Ok(())
    }

    fn present(&mut self) -> Result<(), Infallible> {
        std::mem::swap(&mut self.staged, &mut self.shown);
        self.presents += 1;
        Ok(())
    }
}

/// Adapter for any `smart-leds` strip driver
///
/// `smart-leds` drivers latch the frame as part of `write`, so the colors are
/// staged here and pushed to the driver on present.
#[derive(Debug)]
pub struct SmartLedsDisplay<W> {
    writer: W,
    staged: Vec<RGB8>,
}

impl<W> SmartLedsDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            staged: Vec::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> DisplayTransport for SmartLedsDisplay<W>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    W::Error: fmt::Debug,
{
    type Error = W::Error;

    fn write(&mut self, colors: &[RGB8]) -> Result<(), W::Error> {
        self.staged.clear();
        self.staged.extend_from_slice(colors);
        Ok(())
    }

    fn present(&mut self) -> Result<(), W::Error> {
        self.writer.write(self.staged.iter().copied())
    }
}
