//! Intensity-to-color ramps
//!
//! Ramps are pure lookups from an 8-bit intensity to an RGB color. The heat
//! ramp approximates black-body radiation: black, then red, orange, yellow and
//! finally near-white at full intensity.

use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

/// Named color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Palette {
    /// Black-body ramp: black → red → orange → yellow → white
    #[default]
    Heat,
    /// Dim coals: black → deep red → orange, never reaching yellow
    Ember,
}

impl Palette {
    /// Color for `intensity`
    #[inline]
    pub fn color(self, intensity: u8) -> RGB8 {
        match self {
            Self::Heat => heat_color(intensity),
            Self::Ember => ember_color(intensity),
        }
    }
}

/// Scale `value` by `scale / 256`, never rounding a lit value down to zero
#[inline]
fn scale_video(value: u8, scale: u8) -> u8 {
    let scaled = ((u16::from(value) * u16::from(scale)) >> 8) as u8;
    if value != 0 && scale != 0 {
        scaled + 1
    } else {
        scaled
    }
}

/// Black-body heat ramp
///
/// The intensity is compressed into `0..=191` and split into three 64-step
/// thirds: red rises in the first, green in the second, blue in the last.
pub fn heat_color(intensity: u8) -> RGB8 {
    let t192 = scale_video(intensity, 191);
    let ramp = (t192 & 0x3F) << 2;
    if t192 & 0x80 != 0 {
        RGB8::new(255, 255, ramp)
    } else if t192 & 0x40 != 0 {
        RGB8::new(255, ramp, 0)
    } else {
        RGB8::new(ramp, 0, 0)
    }
}

/// Dim coal ramp
pub fn ember_color(intensity: u8) -> RGB8 {
    let green = ((u16::from(intensity) * u16::from(intensity)) >> 9) as u8;
    RGB8::new(intensity, green, 0)
}
