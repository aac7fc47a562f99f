//! Configuration errors
//!
//! The simulation itself cannot fail: every arithmetic step saturates or
//! clamps. The only thing that can be rejected up front is a panel
//! configuration that the buffers or the heat arithmetic cannot represent.

use std::error::Error;
use std::fmt;

/// Reasons a [`FireConfig`](crate::FireConfig) is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    ZeroDimension { width: usize, height: usize },

    /// Strips are longer than the heat arithmetic supports.
    StripTooLong { height: usize, max: usize },

    /// Pixel count overflows the address space.
    TooManyPixels { width: usize, height: usize },

    /// Target frame rate of zero frames per second.
    ZeroFrameRate,

    /// A control mapping whose input range is a single point or reversed.
    EmptyInputRange {
        parameter: &'static str,
        min: u16,
        max: u16,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "panel must have at least one pixel, got {width}x{height}")
            }
            Self::StripTooLong { height, max } => {
                write!(f, "strip length {height} exceeds maximum of {max}")
            }
            Self::TooManyPixels { width, height } => {
                write!(f, "panel of {width}x{height} pixels cannot be addressed")
            }
            Self::ZeroFrameRate => write!(f, "frame rate must be positive"),
            Self::EmptyInputRange {
                parameter,
                min,
                max,
            } => write!(
                f,
                "control mapping for {parameter}: input range {min}..={max} is empty"
            ),
        }
    }
}

impl Error for ConfigError {}
