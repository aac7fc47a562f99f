//! Gas-Fire Core Library
//!
//! Renders a procedural fire on a panel of addressable LED strips wired as a
//! serpentine chain of vertical columns. A single "gas level" knob drives how
//! tall and how lively the flames are.
//!
//! ## Frame pipeline
//!
//! Each frame flows one way through the crate:
//! - [`control`] reads the knob and derives the heat ceiling and cooling rate
//! - [`simulation`] advances per-column ember state into an intensity grid
//! - [`compositor`] turns intensities into colors through a [`palette`] ramp
//!   and writes them at the chain positions given by [`layout`]
//! - [`display`] hands the color buffer to the strip transport
//!
//! [`driver::FrameDriver`] owns every buffer and runs the loop at a fixed
//! frame rate.

// Panel addressing and configuration
pub mod config;
pub mod error;
pub mod layout;

// Per-frame pipeline stages
pub mod compositor;
pub mod control;
pub mod palette;
pub mod simulation;

// Collaborators at the edges of the loop
pub mod display;
pub mod entropy;

// Frame loop
pub mod driver;
pub mod timing;

pub use compositor::Compositor;
pub use config::{DiagnosticsConfig, FireConfig};
pub use control::{ControlCurve, ControlReader, ControlSample, ControlSource, FixedKnob, LinearMap, SweepKnob};
pub use display::{DisplayTransport, MemoryDisplay, NullDisplay, SmartLedsDisplay};
pub use driver::{FrameDriver, FrameReport};
pub use entropy::{ClockEntropy, EntropySource, FireRng, FixedEntropy};
pub use error::ConfigError;
pub use layout::{Orientation, PixelMapper, StripLayout};
pub use palette::Palette;
pub use simulation::{step_column, FireParams, HeatField};
pub use timing::{FramePacer, FrameTimer, Pacing, ReportThrottle};

/// Color type written to the strip transport
pub use smart_leds::RGB8;
