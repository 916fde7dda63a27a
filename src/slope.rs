//! Slope classification for chart and path coloring.
//!
//! Gradients are classified through a fixed ordered bucket table. Climbs use
//! inclusive lower bounds; descents use inclusive upper bounds, so a boundary
//! value always lands in the steeper bucket on both sides of zero.

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlopeColor {
    DarkRed,
    Crimson,
    Tomato,
    LightOrange,
    Cyan,
    LightGreen,
    LimeGreen,
    ForestGreen,
    DarkGreen,
    /// Missing or non-numeric slope.
    Gray,
}

impl SlopeColor {
    pub const ALL: [SlopeColor; 10] = [
        SlopeColor::DarkRed,
        SlopeColor::Crimson,
        SlopeColor::Tomato,
        SlopeColor::LightOrange,
        SlopeColor::Cyan,
        SlopeColor::LightGreen,
        SlopeColor::LimeGreen,
        SlopeColor::ForestGreen,
        SlopeColor::DarkGreen,
        SlopeColor::Gray,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            SlopeColor::DarkRed => "#8B0000",
            SlopeColor::Crimson => "#DC143C",
            SlopeColor::Tomato => "#FF6347",
            SlopeColor::LightOrange => "#FFA500",
            SlopeColor::Cyan => "#00FFFF",
            SlopeColor::LightGreen => "#90EE90",
            SlopeColor::LimeGreen => "#32CD32",
            SlopeColor::ForestGreen => "#228B22",
            SlopeColor::DarkGreen => "#006400",
            SlopeColor::Gray => "#808080",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SlopeColor::DarkRed => "darkRed",
            SlopeColor::Crimson => "crimson",
            SlopeColor::Tomato => "tomato",
            SlopeColor::LightOrange => "lightOrange",
            SlopeColor::Cyan => "cyan",
            SlopeColor::LightGreen => "lightGreen",
            SlopeColor::LimeGreen => "limeGreen",
            SlopeColor::ForestGreen => "forestGreen",
            SlopeColor::DarkGreen => "darkGreen",
            SlopeColor::Gray => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// `percent >= bound`
    AtLeast(f64),
    /// `percent > bound`
    Above(f64),
}

impl Edge {
    fn admits(&self, percent: f64) -> bool {
        match *self {
            Edge::AtLeast(bound) => percent >= bound,
            Edge::Above(bound) => percent > bound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucket {
    pub edge: Edge,
    pub color: SlopeColor,
}

/// Steepest climb first. Anything below the last edge is `DARKEST_DESCENT`.
pub const SLOPE_BUCKETS: [ColorBucket; 8] = [
    ColorBucket { edge: Edge::AtLeast(18.0), color: SlopeColor::DarkRed },
    ColorBucket { edge: Edge::AtLeast(12.0), color: SlopeColor::Crimson },
    ColorBucket { edge: Edge::AtLeast(8.0), color: SlopeColor::Tomato },
    ColorBucket { edge: Edge::AtLeast(4.0), color: SlopeColor::LightOrange },
    ColorBucket { edge: Edge::AtLeast(0.0), color: SlopeColor::Cyan },
    ColorBucket { edge: Edge::Above(-4.0), color: SlopeColor::LightGreen },
    ColorBucket { edge: Edge::Above(-8.0), color: SlopeColor::LimeGreen },
    ColorBucket { edge: Edge::Above(-15.0), color: SlopeColor::ForestGreen },
];

pub const DARKEST_DESCENT: SlopeColor = SlopeColor::DarkGreen;

/// Classify a gradient in percent. Total over every input:
/// `None` and NaN map to `Gray`, infinities saturate into the outer buckets.
pub fn slope_color(percent: impl Into<Option<f64>>) -> SlopeColor {
    let percent = match percent.into() {
        Some(p) if !p.is_nan() => p,
        _ => return SlopeColor::Gray,
    };

    SLOPE_BUCKETS
        .iter()
        .find(|bucket| bucket.edge.admits(percent))
        .map(|bucket| bucket.color)
        .unwrap_or(DARKEST_DESCENT)
}

/// One segment of a gradient profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeSample {
    /// Distance from the start to the beginning of the segment.
    pub distance_m: f64,
    pub slope_percent: f64,
    pub length_m: f64,
}

/// Build a gradient profile from cumulative distances and elevations.
///
/// Points are grouped into segments covering at least `segment_m` of path
/// (the trailing segment may be shorter). Zero-length segments get 0%.
pub fn slope_profile(distances_m: &[f64], elevations_m: &[f64], segment_m: f64) -> Vec<SlopeSample> {
    let len = distances_m.len().min(elevations_m.len());
    let mut samples = Vec::new();
    if len < 2 {
        return samples;
    }

    let segment_m = if segment_m.is_finite() && segment_m > 0.0 { segment_m } else { 0.0 };
    let mut start = 0;

    for i in 1..len {
        let run = distances_m[i] - distances_m[start];
        if (run >= segment_m && run > 0.0) || i == len - 1 {
            let rise = elevations_m[i] - elevations_m[start];
            let slope_percent = if run > 0.0 { rise / run * 100.0 } else { 0.0 };

            samples.push(SlopeSample {
                distance_m: distances_m[start],
                slope_percent,
                length_m: run,
            });
            start = i;
        }
    }

    trace!(points = len, segments = samples.len(), "built slope profile");
    samples
}

/// Pair each sample with its display color.
pub fn colored_profile(samples: &[SlopeSample]) -> Vec<(SlopeSample, SlopeColor)> {
    samples
        .iter()
        .map(|sample| (*sample, slope_color(sample.slope_percent)))
        .collect()
}
