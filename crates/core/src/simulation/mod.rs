//! Heat field simulation
//!
//! [`HeatField`] owns the per-column ember state (the only state carried from
//! frame to frame) and the transient intensity grid recomputed every frame.
//! The per-column work lives in [`column`]; this module only fans it out over
//! the panel.

pub mod column;

pub use column::{step_column, COOLING_SHIFT, SPARK_SHIFT};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-frame simulation parameters derived from the gas knob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FireParams {
    /// Upper bound on displayed intensity (H)
    pub heat_ceiling: u8,
    /// Magnitude of per-frame ember decay (C)
    pub cooling_rate: u8,
}

impl FireParams {
    pub const fn new(heat_ceiling: u8, cooling_rate: u8) -> Self {
        Self {
            heat_ceiling,
            cooling_rate,
        }
    }
}

/// Ember state and intensity grid for a `width` × `height` panel
///
/// Intensities are stored column-major, one contiguous run of `height` values
/// per column, row 0 being the flame base.
#[derive(Debug, Clone)]
pub struct HeatField {
    width: usize,
    height: usize,
    embers: Vec<u8>,
    intensity: Vec<u8>,
}

impl HeatField {
    /// Create a cold field
    ///
    /// # Panics
    ///
    /// Panics if `height` is zero. Validate dimensions with
    /// [`FireConfig::validate`](crate::FireConfig::validate) first.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(height > 0, "HeatField::new: height must be positive");
        Self {
            width,
            height,
            embers: vec![0; width],
            intensity: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Advance every column by one frame
    ///
    /// Columns are stepped left to right and each consumes its own draws from
    /// `rng`; they never read each other's state.
    pub fn step<R: Rng>(&mut self, params: FireParams, rng: &mut R) {
        for (ember, column) in self
            .embers
            .iter_mut()
            .zip(self.intensity.chunks_exact_mut(self.height))
        {
            step_column(ember, column, params, rng);
        }
    }

    /// Intensity at column `x`, row `row` (row 0 is the base)
    #[inline]
    pub fn intensity(&self, x: usize, row: usize) -> u8 {
        debug_assert!(x < self.width && row < self.height);
        self.intensity[x * self.height + row]
    }

    /// All rows of column `x`, base first
    pub fn column(&self, x: usize) -> &[u8] {
        let start = x * self.height;
        &self.intensity[start..start + self.height]
    }

    /// Current ember value of every column
    pub fn embers(&self) -> &[u8] {
        &self.embers
    }

    /// Overwrite the ember of column `x`
    pub fn set_ember(&mut self, x: usize, value: u8) {
        self.embers[x] = value;
    }

    /// Mean intensity of `row` across all columns
    pub fn row_mean(&self, row: usize) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        let total: u32 = (0..self.width)
            .map(|x| u32::from(self.intensity(x, row)))
            .sum();
        total as f32 / self.width as f32
    }

    /// Drop all heat: embers and intensities go back to zero
    pub fn clear(&mut self) {
        self.embers.fill(0);
        self.intensity.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_field_is_cold() {
        let field = HeatField::new(14, 9);
        assert_eq!(field.embers(), &[0u8; 14]);
        assert!((0..14).all(|x| field.column(x).iter().all(|&v| v == 0)));
    }

    #[test]
    fn test_step_matches_column_kernel() {
        let params = FireParams::new(160, 40);
        let mut field = HeatField::new(14, 9);
        let mut rng = StdRng::seed_from_u64(42);

        let mut embers = vec![0u8; 14];
        let mut columns = vec![[0u8; 9]; 14];
        let mut replay = StdRng::seed_from_u64(42);

        for _ in 0..30 {
            field.step(params, &mut rng);
            for x in 0..14 {
                step_column(&mut embers[x], &mut columns[x], params, &mut replay);
            }
            assert_eq!(field.embers(), embers.as_slice());
            for x in 0..14 {
                assert_eq!(field.column(x), &columns[x]);
            }
        }
    }

    #[test]
    fn test_intensity_and_column_agree() {
        let mut field = HeatField::new(3, 5);
        field.step(FireParams::new(200, 20), &mut StdRng::seed_from_u64(1));
        for x in 0..3 {
            for row in 0..5 {
                assert_eq!(field.intensity(x, row), field.column(x)[row]);
            }
        }
    }

    #[test]
    fn test_set_ember_above_ceiling_suppresses_spark() {
        let mut field = HeatField::new(2, 4);
        field.set_ember(0, 250);
        field.step(FireParams::new(100, 0), &mut StdRng::seed_from_u64(9));
        // No cooling and no spark: ember 250 is untouched.
        assert_eq!(field.embers()[0], 250);
        assert!(field.embers()[1] >= 25);
    }

    #[test]
    fn test_clear_resets_state() {
        let mut field = HeatField::new(4, 4);
        field.step(FireParams::new(255, 10), &mut StdRng::seed_from_u64(2));
        assert!(field.row_mean(0) > 0.0);
        field.clear();
        assert_eq!(field.embers(), &[0u8; 4]);
        assert_eq!(field.row_mean(0), 0.0);
    }

    #[test]
    #[should_panic(expected = "height must be positive")]
    fn test_zero_height_rejected() {
        let _ = HeatField::new(3, 0);
    }
}
