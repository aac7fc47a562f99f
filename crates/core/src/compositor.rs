//! Intensity grid to strip colors
//!
//! The compositor has no simulation logic. It looks every cell up in the
//! palette and writes the color at the cell's chain position. The heat field
//! keeps the flame base in row 0, and the compositor picks the mapper
//! orientation that puts row 0 of the first strip at the chain input
//! (lower-left corner). For a serpentine chain that is [`Orientation::BottomUp`];
//! a sequential chain already starts every strip at the input edge.

use smart_leds::RGB8;

use crate::layout::{Orientation, PixelMapper, StripLayout};
use crate::palette::Palette;
use crate::simulation::HeatField;

const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Orientation that maps row 0 of column 0 to chain position 0
pub fn base_orientation(layout: StripLayout) -> Orientation {
    match layout {
        StripLayout::Serpentine => Orientation::BottomUp,
        StripLayout::Sequential => Orientation::TopDown,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    mapper: PixelMapper,
    palette: Palette,
}

impl Compositor {
    /// Compositor for a `width` × `height` panel with the given wiring
    pub fn new(width: usize, height: usize, layout: StripLayout, palette: Palette) -> Self {
        Self {
            mapper: PixelMapper::new(width, height, layout, base_orientation(layout)),
            palette,
        }
    }

    pub fn mapper(&self) -> &PixelMapper {
        &self.mapper
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Write every cell of `field` into `buffer`
    ///
    /// `buffer` must hold exactly one color per pixel; `field` must match the
    /// panel dimensions.
    pub fn composite(&self, field: &HeatField, buffer: &mut [RGB8]) {
        debug_assert_eq!(buffer.len(), self.mapper.pixel_count());
        debug_assert_eq!(
            (field.width(), field.height()),
            (self.mapper.width(), self.mapper.height())
        );
        for x in 0..self.mapper.width() {
            for (row, &intensity) in field.column(x).iter().enumerate() {
                buffer[self.mapper.index(x, row)] = self.palette.color(intensity);
            }
        }
    }

    /// Fill `buffer` with black
    pub fn blackout(buffer: &mut [RGB8]) {
        buffer.fill(BLACK);
    }
}
