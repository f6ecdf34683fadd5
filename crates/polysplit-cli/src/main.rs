//! polysplit: split, resample, and route polylines from JSON input.
//!
//! Reads a JSON document, runs one operation of `polysplit-geometry`,
//! and writes the result as JSON together with per-run diagnostics.
//!
//! # Usage
//!
//! ```text
//! polysplit split input.json --tolerance 0.01 --svg preview.svg
//! polysplit sample input.json --spacing 2.5 --report
//! polysplit route graph.json --output paths.json
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod document;
mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use polysplit_export::SvgMetadata;
use polysplit_geometry::batch::{sample_all_with_diagnostics, split_all_with_diagnostics};
use polysplit_geometry::diagnostics::Clock;
use polysplit_geometry::{Polyline, ProcessConfig, shortest_paths_with_branches};

use crate::document::{GeometryInput, RouteInput, RouteOutput, SampleOutput, SplitOutput};
use crate::error::CliError;

/// Split, resample, and route 2D polylines.
#[derive(Parser)]
#[command(name = "polysplit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Write JSON output to this file instead of stdout.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Full processing config as a JSON string.
    ///
    /// When provided, `--tolerance` and `--spacing` are ignored. The
    /// JSON must be a valid `ProcessConfig` serialization; missing
    /// fields take their defaults.
    #[arg(long, global = true)]
    config_json: Option<String>,

    /// Print a human-readable diagnostics report to stderr.
    #[arg(long, global = true)]
    report: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Split polylines at the split points that lie on them.
    Split {
        /// JSON file with `polylines` and `split_points`.
        input: PathBuf,

        /// Maximum distance from a split point to its polyline.
        #[arg(long, default_value_t = ProcessConfig::DEFAULT_SNAP_TOLERANCE)]
        tolerance: f64,

        /// Write a colour-coded SVG preview to this file.
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Resample polylines at an even arc-length spacing.
    Sample {
        /// JSON file with `polylines`.
        input: PathBuf,

        /// Target distance between samples.
        #[arg(long, default_value_t = ProcessConfig::DEFAULT_SAMPLE_SPACING)]
        spacing: f64,

        /// Write an SVG preview with the samples to this file.
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Shortest paths with branch factors over a weighted graph.
    Route {
        /// JSON file with `node_count`, `start`, and `edges`.
        input: PathBuf,
    },
}

/// Build a [`ProcessConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// per-command parameter flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<ProcessConfig, CliError> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|source| CliError::Parse {
            what: "--config-json".to_owned(),
            source,
        });
    }

    let mut config = ProcessConfig::default();
    match cli.command {
        Command::Split { tolerance, .. } => config.snap_tolerance = tolerance,
        Command::Sample { spacing, .. } => config.sample_spacing = spacing,
        Command::Route { .. } => {}
    }
    Ok(config)
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        what: path.display().to_string(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON to `--output`, or stdout.
fn emit<T: Serialize>(cli: &Cli, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::Serialize)?;
    match cli.output {
        Some(ref path) => {
            write_file(path, &format!("{json}\n"))?;
            tracing::info!(path = %path.display(), bytes = json.len(), "output written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Render an SVG preview titled after `input` and write it to `path`.
fn write_svg(
    path: &Path,
    input: &Path,
    config: &ProcessConfig,
    render: impl FnOnce(&SvgMetadata<'_>) -> String,
) -> Result<(), CliError> {
    let title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("polysplit");
    let config_json = serde_json::to_string(config).map_err(CliError::Serialize)?;
    let metadata = SvgMetadata {
        title: Some(title),
        description: Some("Exported by polysplit"),
        config_json: Some(&config_json),
    };
    let svg = render(&metadata);
    write_file(path, &svg)?;
    eprintln!("SVG written to {} ({} bytes)", path.display(), svg.len());
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = config_from_cli(cli)?;
    tracing::debug!(?config, "configuration");

    match cli.command {
        Command::Split {
            ref input, ref svg, ..
        } => {
            let doc: GeometryInput = read_json(input)?;
            let polylines = doc.polylines()?;
            let candidates = doc.split_points()?;
            let (segments, diagnostics) =
                split_all_with_diagnostics(&polylines, &candidates, &config, &StdClock)?;

            if cli.report {
                eprintln!("{}", diagnostics.report());
            }
            if let Some(svg_path) = svg {
                write_svg(svg_path, input, &config, |metadata| {
                    polysplit_export::to_split_svg(&segments, &[], metadata)
                })?;
            }
            emit(cli, &SplitOutput::new(&segments, diagnostics))
        }
        Command::Sample {
            ref input, ref svg, ..
        } => {
            let doc: GeometryInput = read_json(input)?;
            let polylines = doc.polylines()?;
            let (samples, diagnostics) =
                sample_all_with_diagnostics(&polylines, &config, &StdClock)?;

            if cli.report {
                eprintln!("{}", diagnostics.report());
            }
            if let Some(svg_path) = svg {
                let outlines: Vec<Vec<Polyline>> = polylines
                    .iter()
                    .map(|line| vec![Polyline::normalized(line.points(), &config.tolerances)])
                    .collect();
                write_svg(svg_path, input, &config, |metadata| {
                    polysplit_export::to_split_svg(&outlines, &samples, metadata)
                })?;
            }
            emit(cli, &SampleOutput::new(&samples, diagnostics))
        }
        Command::Route { ref input } => {
            let doc: RouteInput = read_json(input)?;
            let start = Instant::now();
            let paths = shortest_paths_with_branches(&doc.graph()?, doc.start)?;

            if cli.report {
                let reachable = paths.distances.iter().filter(|d| d.is_finite()).count();
                eprintln!(
                    "Route: {reachable} of {} nodes reachable from {} ({:.3}ms)",
                    doc.node_count,
                    doc.start,
                    start.elapsed().as_secs_f64() * 1000.0,
                );
            }
            emit(cli, &RouteOutput::from(paths))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}
