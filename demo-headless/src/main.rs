mod terminal;

use std::process::ExitCode;
use std::time::{Duration, TryFromFloatSecsError};

use clap::{Parser, ValueEnum};
use gas_fire_core::{
    control::{RAW_MAX, RAW_MIN},
    ClockEntropy, ControlSource, DiagnosticsConfig, DisplayTransport, EntropySource, FireConfig,
    FixedEntropy, FixedKnob, FrameDriver, NullDisplay, Palette, StripLayout, SweepKnob,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use terminal::TerminalDisplay;

/// Gas fire LED panel demo with a simulated knob
#[derive(Parser, Debug)]
#[command(name = "gas-fire-demo")]
#[command(about = "Procedural fire on a serpentine LED panel", long_about = None)]
struct Args {
    /// Number of strips (columns)
    #[arg(long, default_value_t = 14)]
    width: usize,

    /// Pixels per strip (rows)
    #[arg(long, default_value_t = 9)]
    height: usize,

    /// Target frames per second (0 = as fast as possible)
    #[arg(long, default_value_t = 12)]
    fps: u32,

    /// Strip wiring
    #[arg(long, value_enum, default_value_t = LayoutArg::Serpentine)]
    layout: LayoutArg,

    /// Color ramp
    #[arg(long, value_enum, default_value_t = PaletteArg::Heat)]
    palette: PaletteArg,

    /// Fixed knob position (0 = full gas, 1023 = minimum)
    #[arg(short, long, default_value_t = 300)]
    gas: u16,

    /// Sweep the knob back and forth instead of holding it
    #[arg(short, long)]
    sweep: bool,

    /// Knob steps per frame when sweeping
    #[arg(long, default_value_t = 8)]
    sweep_step: u16,

    /// Stop after this many frames (default: run forever)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Fixed entropy for a reproducible animation
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds between frame reports in the log (0 = off)
    #[arg(short, long, default_value_t = 5.0)]
    report_interval: f32,

    /// Simulate without drawing
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Serpentine,
    Sequential,
}

impl From<LayoutArg> for StripLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Serpentine => StripLayout::Serpentine,
            LayoutArg::Sequential => StripLayout::Sequential,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaletteArg {
    Heat,
    Ember,
}

impl From<PaletteArg> for Palette {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Heat => Palette::Heat,
            PaletteArg::Ember => Palette::Ember,
        }
    }
}

fn build_config(args: &Args) -> Result<FireConfig, TryFromFloatSecsError> {
    let mut config = FireConfig::reference()
        .with_dimensions(args.width, args.height)
        .with_layout(args.layout.into())
        .with_palette(args.palette.into());
    config = if args.fps == 0 {
        config.unpaced()
    } else {
        config.with_fps(args.fps)
    };
    if args.report_interval > 0.0 {
        let every = Duration::try_from_secs_f32(args.report_interval)?;
        config = config.with_diagnostics(DiagnosticsConfig::every(every));
    }
    Ok(config)
}

fn run<D: DisplayTransport>(args: &Args, config: FireConfig, display: D) -> ExitCode {
    let control: Box<dyn ControlSource> = if args.sweep {
        Box::new(SweepKnob::new(RAW_MIN, RAW_MAX, args.sweep_step))
    } else {
        Box::new(FixedKnob(args.gas))
    };
    let entropy: Box<dyn EntropySource> = match args.seed {
        Some(seed) => Box::new(FixedEntropy(seed)),
        None => Box::new(ClockEntropy::new()),
    };

    let mut driver = match FrameDriver::new(config, control, entropy, display) {
        Ok(driver) => driver,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.frames {
        Some(count) => driver.run_frames(count),
        None => driver.run().map(|never| match never {}),
    };
    if let Err(err) = result {
        error!("Display failed: {err:?}");
        return ExitCode::FAILURE;
    }

    let field = driver.field();
    info!(
        "Ran {} frames; mean base intensity {:.1}, mean tip intensity {:.1}",
        driver.frames(),
        field.row_mean(0),
        field.row_mean(field.height() - 1)
    );
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid report interval {}: {err}", args.report_interval);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        error!("Invalid configuration: {err}");
        return ExitCode::FAILURE;
    }

    if args.quiet {
        return run(&args, config, NullDisplay);
    }
    match TerminalDisplay::new(config.width, config.height, config.layout) {
        Ok(display) => run(&args, config, display),
        Err(err) => {
            error!("Cannot open terminal: {err}");
            ExitCode::FAILURE
        }
    }
}
