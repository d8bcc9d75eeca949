//! vision-targets CLI: run the locator over recorded contour frames.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use nalgebra::Point2;
use vision_targets::core::Polygon;
use vision_targets::{FrameReport, JsonLinesSink, LocatorConfig, TargetLocator, TelemetrySink};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "vision-targets")]
#[command(about = "Locate rectangular vision targets in recorded contour frames")]
#[command(version)]
struct Cli {
    /// Log verbosity on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Emit JSON log lines (requires the `tracing` feature).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, select and solve every frame; print one telemetry line per
    /// solved frame to stdout.
    Locate(LocateArgs),

    /// Print an example locator configuration.
    PrintConfig {
        /// Write the configuration to this path instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Args)]
struct LocateArgs {
    /// Locator configuration (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Frames to process: a JSON list of frames, each a list of contours,
    /// each a list of `[x, y]` pixel points.
    #[arg(long)]
    frames: PathBuf,

    /// Path to write the full per-frame report (JSON).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct FrameEntry {
    frame: usize,
    #[serde(flatten)]
    report: FrameReport,
}

#[derive(Serialize)]
struct LocateReport {
    config_path: String,
    frames_path: String,
    solved_frames: usize,
    frames: Vec<FrameEntry>,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.into(), cli.log_json);

    match cli.command {
        Commands::Locate(args) => run_locate(&args),
        Commands::PrintConfig { output } => run_print_config(output),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LevelFilter, json: bool) {
    if json {
        eprintln!("--log-json needs the `tracing` feature; using plain logs");
    }
    let _ = vision_targets::core::init_with_level(level);
}

#[cfg(feature = "tracing")]
fn init_logging(level: LevelFilter, json: bool) {
    vision_targets::core::init_tracing(json, level);
    let _ = tracing_log::LogTracer::init();
}

fn read_frames(path: &Path) -> CliResult<Vec<Vec<Polygon>>> {
    let raw = fs::read_to_string(path)?;
    let frames: Vec<Vec<Vec<Point2<f64>>>> = serde_json::from_str(&raw)?;
    Ok(frames
        .into_iter()
        .map(|contours| contours.into_iter().map(Polygon::from_points).collect())
        .collect())
}

fn run_locate(args: &LocateArgs) -> CliResult<()> {
    let config = LocatorConfig::load_json(&args.config)?;
    let locator = TargetLocator::new(config)?;
    let frames = read_frames(&args.frames)?;
    info!(
        "loaded {} frames for profile {}",
        frames.len(),
        locator.profile().name
    );

    let mut sink = JsonLinesSink::new(io::stdout().lock());
    let mut entries = Vec::with_capacity(frames.len());
    for (frame, contours) in frames.into_iter().enumerate() {
        let report = locator.locate(contours);
        if let Some(record) = report.telemetry() {
            sink.publish(&record)?;
        }
        entries.push(FrameEntry { frame, report });
    }
    let solved_frames = sink.written();
    info!("solved {solved_frames} of {} frames", entries.len());

    if let Some(output) = &args.output {
        let report = LocateReport {
            config_path: args.config.to_string_lossy().into_owned(),
            frames_path: args.frames.to_string_lossy().into_owned(),
            solved_frames,
            frames: entries,
        };
        fs::write(output, serde_json::to_string_pretty(&report)?)?;
        info!("report written to {}", output.display());
    }
    Ok(())
}

fn run_print_config(output: Option<PathBuf>) -> CliResult<()> {
    let config = LocatorConfig::example();
    match output {
        Some(path) => config.write_json(path)?,
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
