//! Gas knob input
//!
//! The knob is a potentiometer sampled into a fixed integer range (0..=1023 on
//! the reference hardware). Each frame the raw sample is turned into the two
//! simulation parameters by independent linear maps.
//!
//! The sample axis is inverted relative to the heat ceiling: the low end of
//! the knob is the hot end (tall flames, little cooling), the high end is the
//! cool end (short flames, heavy cooling).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::simulation::FireParams;

/// Lowest raw sample the reference ADC produces
pub const RAW_MIN: u16 = 0;

/// Highest raw sample the reference ADC produces
pub const RAW_MAX: u16 = 1023;

/// Source of raw knob samples
pub trait ControlSource {
    /// Read the current knob position. Reads cannot fail.
    fn read_raw(&mut self) -> u16;
}

impl<S: ControlSource + ?Sized> ControlSource for Box<S> {
    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}

/// Knob parked at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedKnob(pub u16);

impl ControlSource for FixedKnob {
    fn read_raw(&mut self) -> u16 {
        self.0
    }
}

/// Knob swept back and forth across a range, one step per read
#[derive(Debug, Clone)]
pub struct SweepKnob {
    min: u16,
    max: u16,
    step: u16,
    value: u16,
    rising: bool,
}

impl SweepKnob {
    /// Sweep `min..=max`, starting at `min` and moving `step` per read
    pub fn new(min: u16, max: u16, step: u16) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            step: step.max(1),
            value: min,
            rising: true,
        }
    }
}

impl ControlSource for SweepKnob {
    fn read_raw(&mut self) -> u16 {
        let current = self.value;
        if self.rising {
            self.value = self.value.saturating_add(self.step).min(self.max);
            if self.value == self.max {
                self.rising = false;
            }
        } else {
            self.value = self.value.saturating_sub(self.step).max(self.min);
            if self.value == self.min {
                self.rising = true;
            }
        }
        current
    }
}

/// Linear interpolation from a raw input range onto an 8-bit output range
///
/// Inputs outside `input_min..=input_max` are clamped to the nearest end
/// before interpolating, so the output always lies between the two output
/// extremes. `output_at_min` may be larger than `output_at_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearMap {
    pub input_min: u16,
    pub input_max: u16,
    pub output_at_min: u8,
    pub output_at_max: u8,
}

impl LinearMap {
    pub const fn new(input_min: u16, input_max: u16, output_at_min: u8, output_at_max: u8) -> Self {
        Self {
            input_min,
            input_max,
            output_at_min,
            output_at_max,
        }
    }

    /// Interpolate `raw` with integer arithmetic (truncating toward the
    /// `output_at_min` end)
    pub fn apply(&self, raw: u16) -> u8 {
        let span_in = i32::from(self.input_max) - i32::from(self.input_min);
        if span_in <= 0 {
            return self.output_at_min;
        }
        let raw = raw.max(self.input_min).min(self.input_max);
        let offset = i32::from(raw) - i32::from(self.input_min);
        let span_out = i32::from(self.output_at_max) - i32::from(self.output_at_min);
        let value = i32::from(self.output_at_min) + offset * span_out / span_in;
        u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
    }

    fn validate(&self, parameter: &'static str) -> Result<(), ConfigError> {
        if self.input_min >= self.input_max {
            return Err(ConfigError::EmptyInputRange {
                parameter,
                min: self.input_min,
                max: self.input_max,
            });
        }
        Ok(())
    }
}

/// The pair of maps turning one raw sample into [`FireParams`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCurve {
    pub heat_ceiling: LinearMap,
    pub cooling_rate: LinearMap,
}

impl ControlCurve {
    /// Reference knob: fully counter-clockwise is a roaring fire
    pub const fn reference() -> Self {
        Self {
            heat_ceiling: LinearMap::new(RAW_MIN, RAW_MAX, 255, 10),
            cooling_rate: LinearMap::new(RAW_MIN, RAW_MAX, 10, 200),
        }
    }

    pub fn apply(&self, raw: u16) -> FireParams {
        FireParams::new(self.heat_ceiling.apply(raw), self.cooling_rate.apply(raw))
    }

    /// Reject maps with an empty input range
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyInputRange`] naming the first bad map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heat_ceiling.validate("heat ceiling")?;
        self.cooling_rate.validate("cooling rate")
    }
}

impl Default for ControlCurve {
    fn default() -> Self {
        Self::reference()
    }
}

/// One knob reading together with the parameters derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSample {
    pub raw: u16,
    pub params: FireParams,
}

/// Reads the knob and derives the simulation parameters
#[derive(Debug, Clone)]
pub struct ControlReader<S> {
    source: S,
    curve: ControlCurve,
}

impl<S: ControlSource> ControlReader<S> {
    pub fn new(source: S, curve: ControlCurve) -> Self {
        Self { source, curve }
    }

    /// Sample the knob once, keeping the raw value for diagnostics
    pub fn sample(&mut self) -> ControlSample {
        let raw = self.source.read_raw();
        ControlSample {
            raw,
            params: self.curve.apply(raw),
        }
    }

    /// Sample the knob once
    pub fn read(&mut self) -> FireParams {
        self.sample().params
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
