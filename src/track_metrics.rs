//! Track Metrics - cumulative distance, loop detection and distance markers.
//!
//! Everything here is derived from the haversine distance between
//! consecutive points, so results are stable for a given track.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geodesy::{distance_meters, GeoPoint};

/// Default start/end distance under which a track counts as a loop.
pub const DEFAULT_LOOP_THRESHOLD_M: f64 = 15.0;

// Slack for float drift when the track ends exactly on a marker multiple.
const MARKER_EPSILON_M: f64 = 1e-6;

/// A labeled point along the track, `distance_km` from the start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceMarker {
    pub id: String,
    pub position: GeoPoint,
    pub distance_km: f64,
}

/// Running path length in meters, one entry per point.
///
/// Entry 0 is always `0.0`. Empty input gives an empty vector.
pub fn cumulative_distances(track: &[GeoPoint]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(track.len());
    if track.is_empty() {
        return distances;
    }

    distances.push(0.0);
    for i in 1..track.len() {
        let segment_distance = distance_meters(track[i - 1], track[i]);
        distances.push(distances[i - 1] + segment_distance);
    }

    distances
}

/// Total length of the track in kilometers.
pub fn total_distance_km(track: &[GeoPoint]) -> f64 {
    cumulative_distances(track).last().copied().unwrap_or(0.0) / 1000.0
}

/// Place a marker every `interval_km` along the track, at most `max_markers`.
///
/// When the natural count would exceed the cap the spacing is widened to
/// the smallest whole multiple of `interval_km` that fits, so markers still
/// span the full length evenly. Positions are interpolated between the two
/// track points bracketing each crossing.
pub fn distance_markers(
    track: &[GeoPoint],
    interval_km: f64,
    max_markers: usize,
) -> Vec<DistanceMarker> {
    if track.len() < 2 || max_markers == 0 || !interval_km.is_finite() || interval_km <= 0.0 {
        return Vec::new();
    }

    let distances = cumulative_distances(track);
    let total_m = distances[distances.len() - 1];
    let total_km = total_m / 1000.0;

    if total_km + MARKER_EPSILON_M / 1000.0 < interval_km {
        return Vec::new();
    }

    let natural_count = ((total_m + MARKER_EPSILON_M) / (interval_km * 1000.0)).floor() as usize;
    let skip = if natural_count > max_markers {
        natural_count.div_ceil(max_markers)
    } else {
        1
    };
    let effective_km = interval_km * skip as f64;
    let effective_m = effective_km * 1000.0;

    let mut markers = Vec::new();
    let mut segment = 1;

    while markers.len() < max_markers {
        let n = markers.len() + 1;
        let target_m = effective_m * n as f64;
        if target_m > total_m + MARKER_EPSILON_M {
            break;
        }

        while segment < distances.len() - 1 && distances[segment] < target_m {
            segment += 1;
        }

        let position = interpolate_position(
            track[segment - 1],
            track[segment],
            distances[segment - 1],
            distances[segment],
            target_m,
        );

        markers.push(DistanceMarker {
            id: format!("marker-{}", n),
            position,
            distance_km: effective_km * n as f64,
        });
    }

    debug!(
        points = track.len(),
        total_km,
        interval_km,
        effective_km,
        markers = markers.len(),
        "placed distance markers"
    );

    markers
}

fn interpolate_position(
    from: GeoPoint,
    to: GeoPoint,
    from_m: f64,
    to_m: f64,
    target_m: f64,
) -> GeoPoint {
    let span = to_m - from_m;
    if span.abs() < 1e-10 {
        return to;
    }

    let t = ((target_m - from_m) / span).clamp(0.0, 1.0);
    GeoPoint::new(
        from.lat + t * (to.lat - from.lat),
        from.lon + t * (to.lon - from.lon),
    )
}

/// Loop check with the default 15m threshold.
pub fn is_loop_track(track: &[GeoPoint]) -> bool {
    is_loop_track_within(track, DEFAULT_LOOP_THRESHOLD_M)
}

/// True when the track has at least two points and its ends are within
/// `threshold_m` meters. A missing track is an empty slice.
pub fn is_loop_track_within(track: &[GeoPoint], threshold_m: f64) -> bool {
    match (track.first(), track.last()) {
        (Some(&first), Some(&last)) if track.len() >= 2 => {
            distance_meters(first, last) <= threshold_m
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ~111.19m per 0.001 deg of latitude
    fn north_track(points: usize, step_deg: f64) -> Vec<GeoPoint> {
        (0..points)
            .map(|i| GeoPoint::new(45.0 + i as f64 * step_deg, 7.0))
            .collect()
    }

    #[test]
    fn test_cumulative_distances_empty_and_single() {
        assert!(cumulative_distances(&[]).is_empty());
        assert_eq!(cumulative_distances(&[GeoPoint::new(1.0, 2.0)]), vec![0.0]);
    }

    #[test]
    fn test_cumulative_distances_shape() {
        let track = vec![
            GeoPoint::new(40.0, -74.0),
            GeoPoint::new(40.01, -74.01),
            GeoPoint::new(40.01, -74.01),
            GeoPoint::new(40.02, -74.0),
        ];

        let distances = cumulative_distances(&track);
        assert_eq!(distances.len(), track.len());
        assert_eq!(distances[0], 0.0);
        assert!(distances.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(distances[1], distances[2]);

        let expected = distances[1] + distance_meters(track[2], track[3]);
        assert!((distances[3] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_total_distance_km() {
        assert_eq!(total_distance_km(&[]), 0.0);
        let track = north_track(11, 0.001);
        let km = total_distance_km(&track);
        assert!((km - 1.112).abs() < 0.01, "got {}", km);
    }

    #[test]
    fn test_markers_empty_inputs() {
        assert!(distance_markers(&[], 1.0, 10).is_empty());
        assert!(distance_markers(&[GeoPoint::new(1.0, 1.0)], 1.0, 10).is_empty());

        let track = north_track(50, 0.001);
        assert!(distance_markers(&track, 0.0, 10).is_empty());
        assert!(distance_markers(&track, -1.0, 10).is_empty());
        assert!(distance_markers(&track, f64::NAN, 10).is_empty());
        assert!(distance_markers(&track, 1.0, 0).is_empty());
    }

    #[test]
    fn test_markers_track_shorter_than_interval() {
        // ~550m
        let track = north_track(6, 0.001);
        assert!(distance_markers(&track, 1.0, 10).is_empty());
    }

    #[test]
    fn test_markers_positions_are_interpolated() {
        // Two points ~2.2km apart, straight north
        let track = vec![GeoPoint::new(45.0, 7.0), GeoPoint::new(45.02, 7.0)];
        let markers = distance_markers(&track, 1.0, 10);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, "marker-1");
        assert_eq!(markers[1].id, "marker-2");
        assert!((markers[0].distance_km - 1.0).abs() < 1e-9);
        assert!((markers[1].distance_km - 2.0).abs() < 1e-9);

        let from_start = distance_meters(track[0], markers[0].position);
        assert!((from_start - 1000.0).abs() < 1.0, "got {}", from_start);
        assert!(markers[0].position.lat > 45.0 && markers[0].position.lat < 45.02);
    }

    #[test]
    fn test_markers_respect_cap() {
        // ~11km at 0.1km interval would be 111 markers
        let track = north_track(101, 0.001);
        for cap in [1, 3, 7, 10, 50, 200] {
            let markers = distance_markers(&track, 0.1, cap);
            assert!(markers.len() <= cap, "cap {} gave {}", cap, markers.len());
            assert!(!markers.is_empty());
        }
    }

    #[test]
    fn test_capped_markers_cover_whole_track() {
        let track = north_track(101, 0.001);
        let total_km = total_distance_km(&track);
        let markers = distance_markers(&track, 0.1, 10);

        assert!(markers.len() >= 5);
        let spacing = markers[0].distance_km;
        assert!(spacing > 0.1);
        for (i, marker) in markers.iter().enumerate() {
            assert!((marker.distance_km - spacing * (i + 1) as f64).abs() < 1e-9);
        }
        let last = markers.last().map(|m| m.distance_km).unwrap_or(0.0);
        assert!(total_km - last < spacing);
    }

    #[test]
    fn test_markers_ids_are_stable() {
        let track = north_track(40, 0.001);
        let a = distance_markers(&track, 0.5, 20);
        let b = distance_markers(&track, 0.5, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_loop_invalid_inputs() {
        assert!(!is_loop_track(&[]));
        assert!(!is_loop_track(&[GeoPoint::new(45.0, 7.0)]));
        let missing: Option<Vec<GeoPoint>> = None;
        assert!(!is_loop_track(missing.as_deref().unwrap_or_default()));
    }

    #[test]
    fn test_loop_detection() {
        let mut track = north_track(20, 0.001);
        track.push(GeoPoint::new(45.00005, 7.0));
        assert!(is_loop_track(&track));

        let open = north_track(20, 0.001);
        assert!(!is_loop_track(&open));
    }

    #[test]
    fn test_loop_threshold_monotonic() {
        let mut track = north_track(20, 0.001);
        // ~55m from the start
        track.push(GeoPoint::new(45.0005, 7.0));

        assert!(!is_loop_track_within(&track, 15.0));
        assert!(is_loop_track_within(&track, 60.0));

        let thresholds = [0.0, 10.0, 30.0, 55.0, 56.0, 100.0, 1000.0];
        for pair in thresholds.windows(2) {
            if is_loop_track_within(&track, pair[0]) {
                assert!(is_loop_track_within(&track, pair[1]));
            }
        }
    }

    #[test]
    fn test_loop_degenerate_threshold() {
        let track = vec![GeoPoint::new(45.0, 7.0), GeoPoint::new(45.0, 7.0)];
        assert!(is_loop_track_within(&track, 0.0));
        assert!(!is_loop_track_within(&track, -1.0));
        assert!(!is_loop_track_within(&track, f64::NAN));
    }
}
