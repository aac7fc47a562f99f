//! Panel configuration
//!
//! Everything here is fixed for the life of the wiring: panel size, strip
//! layout, frame rate, the knob curve and the color ramp. A [`FireConfig`] is
//! validated once when the frame driver is built and never changes after.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::control::ControlCurve;
use crate::error::ConfigError;
use crate::layout::StripLayout;
use crate::palette::Palette;
use crate::timing::Pacing;

/// Strips on the reference panel
pub const REFERENCE_WIDTH: usize = 14;

/// Pixels per strip on the reference panel
pub const REFERENCE_HEIGHT: usize = 9;

/// Frame rate of the reference panel
pub const REFERENCE_FPS: u32 = 12;

/// Longest strip whose heat range `255 * height` still fits in a `u32`
pub const MAX_STRIP_LENGTH: usize = (u32::MAX / 255) as usize;

/// Optional diagnostic output from the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Minimum interval between frame reports; `None` turns them off
    pub report_every: Option<Duration>,
}

impl DiagnosticsConfig {
    pub const fn disabled() -> Self {
        Self { report_every: None }
    }

    pub const fn every(interval: Duration) -> Self {
        Self {
            report_every: Some(interval),
        }
    }
}

/// Build-time description of the panel and the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireConfig {
    /// Number of strips (columns)
    pub width: usize,
    /// Pixels per strip (rows)
    pub height: usize,
    pub layout: StripLayout,
    pub pacing: Pacing,
    pub curve: ControlCurve,
    pub palette: Palette,
    pub diagnostics: DiagnosticsConfig,
}

impl FireConfig {
    /// The 14×9 serpentine panel at 12 frames per second
    pub const fn reference() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            layout: StripLayout::Serpentine,
            pacing: Pacing::Fixed { fps: REFERENCE_FPS },
            curve: ControlCurve::reference(),
            palette: Palette::Heat,
            diagnostics: DiagnosticsConfig::disabled(),
        }
    }

    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_layout(mut self, layout: StripLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.pacing = Pacing::Fixed { fps };
        self
    }

    /// Run frames back to back, without sleeping
    pub fn unpaced(mut self) -> Self {
        self.pacing = Pacing::Unpaced;
        self
    }

    pub fn with_curve(mut self, curve: ControlCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Check that the buffers and the heat arithmetic can represent the panel
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.height > MAX_STRIP_LENGTH {
            return Err(ConfigError::StripTooLong {
                height: self.height,
                max: MAX_STRIP_LENGTH,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::TooManyPixels {
                width: self.width,
                height: self.height,
            });
        }
        if self.pacing == (Pacing::Fixed { fps: 0 }) {
            return Err(ConfigError::ZeroFrameRate);
        }
        self.curve.validate()
    }
}

impl Default for FireConfig {
    fn default() -> Self {
        Self::reference()
    }
}
