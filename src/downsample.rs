//! Chart profile downsampling by chunk averaging.
//!
//! `step = ceil(N / max_points)` consecutive points collapse into one whose
//! x and y are the chunk means. The first output point keeps the first input
//! x so charts still start at the track origin.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geodesy::GeoPoint;
use crate::slope::SlopeSample;
use crate::track_metrics::cumulative_distances;

// Below this many points the sequential path is faster than splitting work.
const PARALLEL_THRESHOLD: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub x: f64,
    pub y: f64,
}

impl ProfilePoint {
    pub fn new(x: f64, y: f64) -> Self {
        ProfilePoint { x, y }
    }
}

impl From<SlopeSample> for ProfilePoint {
    fn from(sample: SlopeSample) -> Self {
        ProfilePoint::new(sample.distance_m, sample.slope_percent)
    }
}

fn chunk_mean(chunk: &[ProfilePoint]) -> ProfilePoint {
    let count = chunk.len() as f64;
    let (sum_x, sum_y) = chunk
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    ProfilePoint::new(sum_x / count, sum_y / count)
}

/// Reduce `points` to at most `max_points` chunk averages.
///
/// Inputs already within the cap are returned unchanged; `max_points == 0`
/// gives an empty vector.
pub fn downsample(points: &[ProfilePoint], max_points: usize) -> Vec<ProfilePoint> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    if max_points == 0 {
        return Vec::new();
    }

    let step = points.len().div_ceil(max_points);

    let mut result: Vec<ProfilePoint> = if points.len() >= PARALLEL_THRESHOLD {
        points.par_chunks(step).map(chunk_mean).collect()
    } else {
        points.chunks(step).map(chunk_mean).collect()
    };

    if let Some(first) = result.first_mut() {
        first.x = points[0].x;
    }

    debug!(
        input = points.len(),
        max_points,
        step,
        output = result.len(),
        "downsampled profile"
    );

    result
}

/// Elevation chart series: x is cumulative distance in km, y is elevation.
///
/// Pairs up to the shorter of the two inputs.
pub fn elevation_profile(track: &[GeoPoint], elevations_m: &[f64]) -> Vec<ProfilePoint> {
    let len = track.len().min(elevations_m.len());
    cumulative_distances(&track[..len])
        .into_iter()
        .zip(elevations_m)
        .map(|(distance_m, &elevation)| ProfilePoint::new(distance_m / 1000.0, elevation))
        .collect()
}
