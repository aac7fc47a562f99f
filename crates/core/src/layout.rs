//! Logical-to-physical pixel addressing for strip-wired panels
//!
//! The panel is a chain of vertical strips. Column `x` is the `x`-th strip
//! along the chain, and `y` is the position along that strip. Every column
//! occupies `height` consecutive slots of the chain, so the only question is
//! which end of each strip the data enters from.
//!
//! # Layouts
//!
//! - **Sequential**: every strip is wired from the same edge, `x * height + y`.
//! - **Serpentine**: strips alternate direction so the end of one strip sits
//!   next to the start of the next. Even columns run backwards
//!   (`x * height + (height - 1 - y)`), odd columns run forwards.
//!
//! # Orientation
//!
//! [`Orientation::BottomUp`] mirrors `y` before the layout formula is applied.
//! It replaces a second hand-written copy of the serpentine mapping: both
//! directions go through [`PixelMapper::index`].

use serde::{Deserialize, Serialize};

/// Physical wiring of the strip chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StripLayout {
    /// Adjacent strips run in opposite directions
    #[default]
    Serpentine,
    /// Every strip runs in the same direction
    Sequential,
}

/// Which end of the logical `y` axis is row 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// `y` is passed to the layout formula unchanged
    #[default]
    TopDown,
    /// `y` is mirrored to `height - 1 - y` first
    BottomUp,
}

/// Maps `(column, row)` grid coordinates to positions on the strip chain
///
/// # Example
///
/// ```
/// use gas_fire_core::{Orientation, PixelMapper, StripLayout};
///
/// let mapper = PixelMapper::new(14, 9, StripLayout::Serpentine, Orientation::TopDown);
/// assert_eq!(mapper.index(0, 0), 8);
/// assert_eq!(mapper.index(1, 0), 9);
/// assert_eq!(mapper.index(0, 8), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelMapper {
    width: usize,
    height: usize,
    layout: StripLayout,
    orientation: Orientation,
}

impl PixelMapper {
    /// Create a mapper for a `width` × `height` panel
    ///
    /// `height` must be positive; [`FireConfig::validate`](crate::FireConfig::validate)
    /// rejects zero dimensions. A mapper deserialized with `height == 0` cannot
    /// address anything: [`PixelMapper::index`] would underflow.
    pub const fn new(
        width: usize,
        height: usize,
        layout: StripLayout,
        orientation: Orientation,
    ) -> Self {
        debug_assert!(height > 0, "PixelMapper::new: height must be positive");
        Self {
            width,
            height,
            layout,
            orientation,
        }
    }

    /// Same panel and layout, different orientation
    pub const fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn layout(&self) -> StripLayout {
        self.layout
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Total number of addressable pixels on the chain
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Linear chain position of grid cell `(x, y)`
    ///
    /// `x` must be below `width` and `y` below `height`. Out-of-range input is
    /// a caller bug and yields an unspecified (possibly colliding) index in
    /// release builds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "PixelMapper::index: ({x}, {y}) outside {}x{} panel",
            self.width,
            self.height
        );
        let last = self.height - 1;
        let y = match self.orientation {
            Orientation::TopDown => y,
            Orientation::BottomUp => last - y,
        };
        let along = match self.layout {
            StripLayout::Sequential => y,
            StripLayout::Serpentine if x % 2 == 0 => last - y,
            StripLayout::Serpentine => y,
        };
        x * self.height + along
    }

    /// Grid cell addressed by chain position `index`
    ///
    /// Inverse of [`PixelMapper::index`]; `index` must be below
    /// [`PixelMapper::pixel_count`].
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.pixel_count());
        let last = self.height - 1;
        let x = index / self.height;
        let along = index % self.height;
        let y = match self.layout {
            StripLayout::Sequential => along,
            StripLayout::Serpentine if x % 2 == 0 => last - along,
            StripLayout::Serpentine => along,
        };
        let y = match self.orientation {
            Orientation::TopDown => y,
            Orientation::BottomUp => last - y,
        };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_mappers(width: usize, height: usize) -> Vec<PixelMapper> {
        let mut mappers = Vec::new();
        for layout in [StripLayout::Serpentine, StripLayout::Sequential] {
            for orientation in [Orientation::TopDown, Orientation::BottomUp] {
                mappers.push(PixelMapper::new(width, height, layout, orientation));
            }
        }
        mappers
    }

    #[test]
    fn test_reference_panel_serpentine_corners() {
        let mapper = PixelMapper::new(14, 9, StripLayout::Serpentine, Orientation::TopDown);
        assert_eq!(mapper.index(0, 0), 8);
        assert_eq!(mapper.index(1, 0), 9);
        assert_eq!(mapper.index(0, 8), 0);
        assert_eq!(mapper.index(1, 8), 17);
        assert_eq!(mapper.index(13, 0), 13 * 9);
        assert_eq!(mapper.index(12, 0), 12 * 9 + 8);
    }

    #[test]
    fn test_serpentine_strips_join_end_to_start() {
        // The last pixel of one strip and the first of the next share a row.
        let mapper = PixelMapper::new(14, 9, StripLayout::Serpentine, Orientation::TopDown);
        for x in 0..13 {
            let end_of_strip = (x + 1) * 9 - 1;
            let (ex, ey) = mapper.coordinates(end_of_strip);
            let (nx, ny) = mapper.coordinates(end_of_strip + 1);
            assert_eq!(ex, x);
            assert_eq!(nx, x + 1);
            assert_eq!(ey, ny, "strip {x} does not join its neighbour");
        }
    }

    #[test]
    fn test_sequential_is_column_major() {
        let mapper = PixelMapper::new(4, 5, StripLayout::Sequential, Orientation::TopDown);
        assert_eq!(mapper.index(0, 0), 0);
        assert_eq!(mapper.index(0, 4), 4);
        assert_eq!(mapper.index(1, 0), 5);
        assert_eq!(mapper.index(3, 2), 17);
    }

    #[test]
    fn test_bottom_up_mirrors_rows() {
        let top = PixelMapper::new(14, 9, StripLayout::Serpentine, Orientation::TopDown);
        let bottom = top.with_orientation(Orientation::BottomUp);
        for x in 0..14 {
            for y in 0..9 {
                assert_eq!(bottom.index(x, y), top.index(x, 8 - y));
            }
        }
        // Row 0 of a bottom-up panel starts at the chain input.
        assert_eq!(bottom.index(0, 0), 0);
    }

    #[test]
    fn test_index_is_bijection() {
        for (width, height) in [(14, 9), (1, 1), (1, 7), (5, 1), (8, 8), (3, 16)] {
            for mapper in all_mappers(width, height) {
                let mut seen = vec![false; width * height];
                for x in 0..width {
                    for y in 0..height {
                        let i = mapper.index(x, y);
                        assert!(i < seen.len(), "{mapper:?}: index {i} out of range");
                        assert!(!seen[i], "{mapper:?}: index {i} produced twice");
                        seen[i] = true;
                    }
                }
                assert!(seen.iter().all(|&s| s), "{mapper:?}: not surjective");
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "height must be positive")]
    fn test_zero_height_rejected() {
        let _ = PixelMapper::new(3, 0, StripLayout::Serpentine, Orientation::TopDown);
    }

    #[test]
    fn test_coordinates_inverts_index() {
        for mapper in all_mappers(7, 6) {
            for x in 0..7 {
                for y in 0..6 {
                    assert_eq!(mapper.coordinates(mapper.index(x, y)), (x, y));
                }
            }
        }
    }
}
