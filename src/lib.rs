//! Track geometry and gradient classification for trail maps and charts.
//!
//! Pure, synchronous transforms from raw coordinates and profiles to the
//! values a map UI renders: cumulative distance, distance markers, loop
//! detection, zoom-adaptive marker/arrow density, slope colors and
//! downsampled chart series. Nothing here performs I/O or keeps state.

pub mod config;
pub mod downsample;
pub mod geodesy;
pub mod slope;
pub mod track_metrics;
pub mod visualization;

pub use config::EngineConfig;
pub use downsample::{downsample, elevation_profile, ProfilePoint};
pub use geodesy::{distance_meters, GeoPoint};
pub use slope::{colored_profile, slope_color, slope_profile, ColorBucket, SlopeColor, SlopeSample};
pub use track_metrics::{
    cumulative_distances, distance_markers, is_loop_track, is_loop_track_within, total_distance_km,
    DistanceMarker,
};
pub use visualization::{arrow_repeat_interval, marker_interval, ZoomTier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifty_point_track_gets_five_markers() {
        // 49 steps of ~106.7m, ~5.23km total
        let track: Vec<GeoPoint> = (0..50)
            .map(|i| GeoPoint::new(46.0 + i as f64 * 0.00096, 8.0))
            .collect();

        let total_km = total_distance_km(&track);
        assert!(total_km > 5.0 && total_km < 5.5, "got {}", total_km);

        let markers = distance_markers(&track, 1.0, 50);
        assert_eq!(markers.len(), 5);
        assert!(markers.windows(2).all(|w| w[0].distance_km < w[1].distance_km));
        for (i, marker) in markers.iter().enumerate() {
            assert!((marker.distance_km - (i + 1) as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_slope_sequence_colors() {
        let colors: Vec<SlopeColor> = [2.0, 6.0, 10.0, 15.0, 20.0]
            .iter()
            .map(|&p| slope_color(p))
            .collect();

        assert_eq!(
            colors,
            vec![
                SlopeColor::Cyan,
                SlopeColor::LightOrange,
                SlopeColor::Tomato,
                SlopeColor::Crimson,
                SlopeColor::DarkRed,
            ]
        );
        let distinct: std::collections::HashSet<_> = colors.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_large_profile_downsampled_for_chart() {
        let profile: Vec<ProfilePoint> = (0..2000)
            .map(|i| ProfilePoint::new(i as f64 * 5.0, 300.0 + (i as f64 / 40.0).sin() * 50.0))
            .collect();

        let chart = downsample(&profile, 300);
        assert!(chart.len() <= 300);
        assert_eq!(chart[0].x, profile[0].x);
    }

    #[test]
    fn test_track_to_map_decorations() {
        let mut track: Vec<GeoPoint> = (0..120)
            .map(|i| {
                let angle = i as f64 / 120.0 * std::f64::consts::TAU;
                GeoPoint::new(46.0 + 0.02 * angle.sin(), 8.0 + 0.03 * (1.0 - angle.cos()))
            })
            .collect();
        track.push(track[0]);

        assert!(is_loop_track(&track));

        let length_km = total_distance_km(&track);
        let config = EngineConfig::default();
        let interval = config.marker_intervals.interval_km(14.0, length_km);
        assert_eq!(interval, marker_interval(14.0, length_km));

        let markers = distance_markers(&track, interval, config.max_markers);
        assert!(!markers.is_empty());
        assert!(markers.len() <= config.max_markers);
        assert!(arrow_repeat_interval(14.0) > 0.0);
    }
}
