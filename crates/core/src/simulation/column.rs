//! Single-column flame kernel
//!
//! Every column of the panel is an independent flame. Its only memory is one
//! ember value; each frame the ember may re-ignite, always cools a little, and
//! then drives a heat profile that decays stochastically from the base of the
//! column towards its tip.
//!
//! # Frame steps
//!
//! 1. **Spark**: a column whose ember fell below the heat ceiling `H` draws a
//!    fresh ember from `[H, H * height)`, scaled down by [`SPARK_SHIFT`].
//!    Embers above the ceiling are left alone, which is what makes the flame
//!    flicker instead of glowing evenly.
//! 2. **Cooling**: the ember loses a draw from `[0, C)` scaled down by
//!    [`COOLING_SHIFT`], saturating at zero.
//! 3. **Propagation**: a working heat value starts from the ember, clamped to
//!    `[H / 2, H * height]`, and loses a draw from `[0, H)` per row. Each row
//!    shows the working heat capped at `H`.

use rand::Rng;

use super::FireParams;

/// Right shift applied to a spark draw
pub const SPARK_SHIFT: u32 = 2;

/// Right shift applied to a cooling draw
pub const COOLING_SHIFT: u32 = 3;

/// Uniform draw from `[low, high)`, or `low` when the range is empty
#[inline]
fn draw<R: Rng>(rng: &mut R, low: u32, high: u32) -> u32 {
    if high <= low {
        low
    } else {
        rng.random_range(low..high)
    }
}

#[inline]
fn saturate(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Advance one column by a frame
///
/// `column` receives one intensity per row, row 0 being the flame base. All
/// written intensities lie in `[0, params.heat_ceiling]`. The ember stays a
/// `u8`, so spark draws above 255 saturate.
///
/// Random draws are taken in a fixed order (spark if it fires, cooling, then
/// one per row), so a column's trace depends only on its own ember and the
/// draws it consumes.
pub fn step_column<R: Rng>(
    ember: &mut u8,
    column: &mut [u8],
    params: FireParams,
    rng: &mut R,
) {
    let ceiling = u32::from(params.heat_ceiling);
    let limit = ceiling * column.len() as u32;

    if *ember < params.heat_ceiling {
        *ember = saturate(draw(rng, ceiling, limit) >> SPARK_SHIFT);
    }

    let cooling = draw(rng, 0, u32::from(params.cooling_rate)) >> COOLING_SHIFT;
    *ember = ember.saturating_sub(saturate(cooling));

    // max-then-min rather than clamp: a zero-length column has limit 0
    let mut heat = u32::from(*ember).max(ceiling / 2).min(limit);
    for cell in column.iter_mut() {
        *cell = saturate(heat.min(ceiling));
        let drop = draw(rng, 0, ceiling);
        heat = heat.saturating_sub(drop).min(limit);
    }
}
