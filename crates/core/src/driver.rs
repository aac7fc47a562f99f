//! The frame loop
//!
//! [`FrameDriver`] owns every piece of per-frame state (ember state, color
//! buffer, random generator) and runs the pipeline once per frame:
//!
//! 1. mix an entropy sample into the generator
//! 2. read the gas knob
//! 3. advance the heat field
//! 4. composite colors into the buffer
//! 5. write and present the buffer
//! 6. sleep out the rest of the frame budget
//!
//! All buffers are allocated in [`FrameDriver::new`]; stepping a frame does
//! not allocate.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use smart_leds::RGB8;
use tracing::{debug, info, warn};

use crate::compositor::Compositor;
use crate::config::FireConfig;
use crate::control::{ControlReader, ControlSample, ControlSource};
use crate::display::DisplayTransport;
use crate::entropy::{EntropySource, FireRng};
use crate::error::ConfigError;
use crate::simulation::HeatField;
use crate::timing::{FramePacer, FrameTimer, ReportThrottle};

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Zero-based frame number
    pub frame: u64,
    /// Knob reading, `None` for a blacked-out frame
    pub control: Option<ControlSample>,
    /// Time spent simulating, compositing and presenting
    pub compute_time: Duration,
}

/// Runs the fire animation against a display
pub struct FrameDriver<C, E, D> {
    config: FireConfig,
    control: ControlReader<C>,
    entropy: E,
    display: D,
    rng: FireRng,
    field: HeatField,
    compositor: Compositor,
    buffer: Vec<RGB8>,
    pacer: FramePacer,
    timer: FrameTimer,
    throttle: ReportThrottle,
    enabled: bool,
    frames: u64,
}

impl<C, E, D> FrameDriver<C, E, D>
where
    C: ControlSource,
    E: EntropySource,
    D: DisplayTransport,
{
    /// Validate `config` and allocate every buffer
    ///
    /// The generator is seeded from the first entropy sample.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: FireConfig, control: C, mut entropy: E, display: D) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = FireRng::from_seed(entropy.sample());
        info!(
            "Fire driver: {}x{} {:?} panel, {:?}, {:?} palette",
            config.width, config.height, config.layout, config.pacing, config.palette
        );

        Ok(Self {
            control: ControlReader::new(control, config.curve),
            entropy,
            display,
            rng,
            field: HeatField::new(config.width, config.height),
            compositor: Compositor::new(config.width, config.height, config.layout, config.palette),
            buffer: vec![RGB8::default(); config.pixel_count()],
            pacer: FramePacer::new(config.pacing),
            timer: FrameTimer::new(),
            throttle: ReportThrottle::new(config.diagnostics.report_every),
            enabled: true,
            frames: 0,
            config,
        })
    }

    /// Advance, present and pace one frame
    ///
    /// A disabled driver presents black and leaves the simulation untouched.
    ///
    /// # Errors
    ///
    /// Returns the display's error if the frame could not be shown. The
    /// simulation has already advanced and the frame number is used up when
    /// that happens.
    pub fn step_frame(&mut self) -> Result<FrameReport, D::Error> {
        let started = Instant::now();
        self.pacer.begin(started);

        let control = if self.enabled {
            self.rng.mix(self.entropy.sample());
            let sample = self.control.sample();
            self.field.step(sample.params, &mut self.rng);
            self.compositor.composite(&self.field, &mut self.buffer);
            Some(sample)
        } else {
            Compositor::blackout(&mut self.buffer);
            None
        };

        // The field has advanced, so the frame counts even if showing it fails.
        let frame = self.frames;
        self.frames += 1;
        if let Err(err) = self.show() {
            warn!("Display rejected frame {}: {:?}", frame, err);
            return Err(err);
        }

        let compute_time = started.elapsed();
        self.timer.record(compute_time);
        let report = FrameReport {
            frame,
            control,
            compute_time,
        };

        if let Some(sample) = control {
            debug!(
                frame = report.frame,
                raw = sample.raw,
                heat_ceiling = sample.params.heat_ceiling,
                cooling_rate = sample.params.cooling_rate,
                "frame"
            );
            if self.throttle.due(Instant::now()) {
                info!(
                    "Frame {}: knob {} -> heat ceiling {}, cooling {}, base {:.1}, tip {:.1}, {:.2} ms",
                    report.frame,
                    sample.raw,
                    sample.params.heat_ceiling,
                    sample.params.cooling_rate,
                    self.field.row_mean(0),
                    self.field.row_mean(self.field.height() - 1),
                    self.timer.last_frame_time_ms()
                );
            }
        }

        self.pacer.wait();
        Ok(report)
    }

    /// Run `count` frames back to back
    ///
    /// # Errors
    ///
    /// Stops at the first display error and returns it.
    pub fn run_frames(&mut self, count: u64) -> Result<(), D::Error> {
        for _ in 0..count {
            self.step_frame()?;
        }
        Ok(())
    }

    /// Run until the display fails
    ///
    /// # Errors
    ///
    /// Only returns on a display error.
    pub fn run(&mut self) -> Result<Infallible, D::Error> {
        loop {
            self.step_frame()?;
        }
    }

    /// Present an all-black frame immediately, without pacing
    ///
    /// # Errors
    ///
    /// Returns the display's error if the frame could not be shown.
    pub fn blackout(&mut self) -> Result<(), D::Error> {
        Compositor::blackout(&mut self.buffer);
        self.show()
    }

    /// Enable or disable the animation
    ///
    /// Disabling also drops the accumulated heat, so re-enabling starts from
    /// a cold panel.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.field.clear();
        }
        self.enabled = enabled;
    }

    fn show(&mut self) -> Result<(), D::Error> {
        self.display.write(&self.buffer)?;
        self.display.present()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    pub fn field(&self) -> &HeatField {
        &self.field
    }

    /// Colors of the last frame, in chain order
    pub fn buffer(&self) -> &[RGB8] {
        &self.buffer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn control_mut(&mut self) -> &mut C {
        self.control.source_mut()
    }

    /// Frames stepped so far, including any the display rejected
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame_time(&self) -> Duration {
        self.timer.last_frame_time()
    }
}
