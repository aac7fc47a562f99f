//! Terminal preview of the LED panel
//!
//! Receives the color buffer in chain order, exactly as a strip driver would,
//! and undoes the wiring to draw each pixel where it sits on the panel: two
//! background-colored cells per LED, flame base at the bottom.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{Clear, ClearType},
};
use gas_fire_core::{compositor::base_orientation, DisplayTransport, PixelMapper, StripLayout, RGB8};

pub struct TerminalDisplay {
    out: Stdout,
    mapper: PixelMapper,
    staged: Vec<RGB8>,
}

impl TerminalDisplay {
    /// Clear the screen and hide the cursor
    ///
    /// # Errors
    ///
    /// Fails if the terminal cannot be written to.
    pub fn new(width: usize, height: usize, layout: StripLayout) -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, Clear(ClearType::All), cursor::Hide)?;
        Ok(Self {
            out,
            mapper: PixelMapper::new(width, height, layout, base_orientation(layout)),
            staged: Vec::with_capacity(width * height),
        })
    }
}

impl DisplayTransport for TerminalDisplay {
    type Error = io::Error;

    fn write(&mut self, colors: &[RGB8]) -> io::Result<()> {
        self.staged.clear();
        self.staged.extend_from_slice(colors);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let height = self.mapper.height();
        for screen_row in 0..height {
            queue!(self.out, cursor::MoveTo(0, screen_row as u16))?;
            let row = height - 1 - screen_row;
            for x in 0..self.mapper.width() {
                let RGB8 { r, g, b } = self.staged[self.mapper.index(x, row)];
                queue!(
                    self.out,
                    SetBackgroundColor(Color::Rgb { r, g, b }),
                    Print("  ")
                )?;
            }
            queue!(self.out, ResetColor)?;
        }
        self.out.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let row = self.mapper.height() as u16;
        let _ = execute!(self.out, ResetColor, cursor::MoveTo(0, row), cursor::Show, Print("\n"));
    }
}
