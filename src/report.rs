//! Per-track summary built from the geometry engine.

use std::collections::BTreeMap;

use serde::Serialize;

use trail_geometry::{
    colored_profile, cumulative_distances, distance_markers, downsample, elevation_profile,
    is_loop_track_within, slope_profile, DistanceMarker, EngineConfig, ProfilePoint,
};

use crate::input::LoadedTrack;

#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    pub name: String,
    pub points: usize,
    pub dropped_rows: usize,
    pub length_km: f64,
    pub is_loop: bool,
    pub zoom: f64,
    pub marker_interval_km: f64,
    pub markers: Vec<DistanceMarker>,
    pub arrow_interval_m: f64,
    /// Slope segment count per color name, empty without elevation.
    pub slope_histogram: BTreeMap<&'static str, usize>,
    pub chart_points: usize,
}

pub fn build_report(track: &LoadedTrack, zoom: f64, config: &EngineConfig) -> TrackReport {
    let distances = cumulative_distances(&track.points);
    let length_km = distances.last().copied().unwrap_or(0.0) / 1000.0;

    let marker_interval_km = config.marker_intervals.interval_km(zoom, length_km);
    let markers = if marker_interval_km > 0.0 {
        distance_markers(&track.points, marker_interval_km, config.max_markers)
    } else {
        Vec::new()
    };

    let mut slope_histogram = BTreeMap::new();
    let chart_points = match &track.elevations {
        Some(elevations) => {
            let samples = slope_profile(&distances, elevations, config.slope_segment_m);
            for (_, color) in colored_profile(&samples) {
                *slope_histogram.entry(color.name()).or_insert(0) += 1;
            }

            let profile: Vec<ProfilePoint> = elevation_profile(&track.points, elevations);
            downsample(&profile, config.max_chart_points).len()
        }
        None => 0,
    };

    TrackReport {
        name: track.name.clone(),
        points: track.points.len(),
        dropped_rows: track.dropped_rows,
        length_km,
        is_loop: is_loop_track_within(&track.points, config.loop_threshold_m),
        zoom,
        marker_interval_km,
        markers,
        arrow_interval_m: config.arrow_intervals.interval_m(zoom),
        slope_histogram,
        chart_points,
    }
}

pub fn print_report(report: &TrackReport) {
    println!("\n📍 {}", report.name);
    println!(
        "   {} points ({} dropped), {:.2}km{}",
        report.points,
        report.dropped_rows,
        report.length_km,
        if report.is_loop { ", 🔁 loop" } else { "" }
    );

    if report.marker_interval_km > 0.0 {
        println!(
            "   Zoom {}: {} markers every {}km, arrows every {}m",
            report.zoom,
            report.markers.len(),
            report.marker_interval_km,
            report.arrow_interval_m
        );
    } else {
        println!("   Zoom {}: markers hidden, arrows every {}m", report.zoom, report.arrow_interval_m);
    }

    if report.slope_histogram.is_empty() {
        println!("   ⚠️  No elevation data, slope profile skipped");
    } else {
        let buckets: Vec<String> = report
            .slope_histogram
            .iter()
            .map(|(name, count)| format!("{}={}", name, count))
            .collect();
        println!("   Slopes: {}", buckets.join(", "));
        println!("   Chart: {} points", report.chart_points);
    }
}
