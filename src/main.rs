use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trail_geometry::EngineConfig;

mod input;
mod report;

use input::{discover_tracks, load_track};
use report::{build_report, print_report, TrackReport};

#[derive(Parser, Debug)]
#[command(author, version, about = "Trail geometry report for lat/lon CSV tracks", long_about = None)]
struct Cli {
    /// CSV track files or directories to scan
    #[arg(required = true, value_hint = ValueHint::AnyPath)]
    inputs: Vec<PathBuf>,

    /// Map zoom level used for marker and arrow density
    #[arg(short, long, default_value_t = 14.0)]
    zoom: f64,

    /// JSON file with engine settings
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Maximum number of distance markers per track
    #[arg(long)]
    max_markers: Option<usize>,

    /// Maximum number of chart points after downsampling
    #[arg(long)]
    max_points: Option<usize>,

    /// Start/end distance in meters below which a track is a loop
    #[arg(long)]
    loop_threshold: Option<f64>,

    /// Print reports as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn load_config(cli: &Cli) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
            EngineConfig::from_json(&json)
                .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?
        }
        None => EngineConfig::default(),
    };

    if let Some(max_markers) = cli.max_markers {
        config.max_markers = max_markers;
    }
    if let Some(max_points) = cli.max_points {
        config.max_chart_points = max_points;
    }
    if let Some(threshold) = cli.loop_threshold {
        config.loop_threshold_m = threshold;
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = load_config(&cli)?;
    let paths = discover_tracks(&cli.inputs)?;
    if paths.is_empty() {
        return Err("No CSV track files found".into());
    }
    info!(files = paths.len(), zoom = cli.zoom, "processing tracks");

    let reports: Vec<TrackReport> = paths
        .par_iter()
        .filter_map(|path| match load_track(path) {
            Ok(track) => Some(build_report(&track, cli.zoom, &config)),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("\n🗺️  TRAIL GEOMETRY REPORT");
        println!("========================");
        for report in &reports {
            print_report(report);
        }
        println!(
            "\n✅ {} of {} tracks processed",
            reports.len(),
            paths.len()
        );
    }

    Ok(())
}
