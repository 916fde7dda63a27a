//! Coordinate CSV loading for the report tool.
//!
//! Expects a header row with `lat`, `lon` and an optional `ele` column.
//! Rows whose coordinates are missing or not finite numbers are dropped
//! before anything reaches the geometry engine.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use trail_geometry::GeoPoint;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("no valid coordinates found in {}", path.display())]
    NoValidPoints { path: PathBuf },
    #[error("failed to scan input directory: {0}")]
    Discovery(#[from] walkdir::Error),
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    #[serde(deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    lon: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ele: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LoadedTrack {
    pub name: String,
    pub points: Vec<GeoPoint>,
    /// Present only when every kept row carried a finite elevation.
    pub elevations: Option<Vec<f64>>,
    pub dropped_rows: usize,
}

/// Expand files and directories into the list of `.csv` tracks to process.
pub fn discover_tracks(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut tracks = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input) {
                let entry = entry?;
                if entry.file_type().is_file() && is_csv(entry.path()) {
                    tracks.push(entry.into_path());
                }
            }
        } else {
            tracks.push(input.clone());
        }
    }

    tracks.sort();
    tracks.dedup();
    debug!(count = tracks.len(), "discovered track files");
    Ok(tracks)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

pub fn load_track(path: &Path) -> Result<LoadedTrack, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut points = Vec::new();
    let mut elevations = Vec::new();
    let mut dropped_rows = 0;

    for result in reader.deserialize::<TrackRecord>() {
        let record = result.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        match (record.lat, record.lon) {
            (Some(lat), Some(lon)) if GeoPoint::new(lat, lon).is_valid() => {
                points.push(GeoPoint::new(lat, lon));
                elevations.push(record.ele.filter(|e| e.is_finite()));
            }
            _ => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        warn!(path = %path.display(), dropped_rows, "dropped rows with invalid coordinates");
    }

    if points.is_empty() {
        return Err(InputError::NoValidPoints {
            path: path.to_path_buf(),
        });
    }

    let elevations: Option<Vec<f64>> = elevations.into_iter().collect();

    Ok(LoadedTrack {
        name: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string(),
        points,
        elevations,
        dropped_rows,
    })
}
