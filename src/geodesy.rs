//! Great-circle distance between track points.
//!
//! Distances use the haversine formula on a spherical Earth (mean radius
//! ~6,371 km), the same `geo::HaversineDistance` path the rest of the
//! processing pipeline has always used for cumulative distances.

use geo::{point, HaversineDistance};
use serde::{Deserialize, Serialize};

/// A single track coordinate in decimal degrees. No altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// True when both coordinates are finite numbers.
    ///
    /// Range is not checked: |lat| > 90 is the caller's problem.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        point!(x: p.lon, y: p.lat)
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// `(lat, lon)` tuple.
    fn from((lat, lon): (f64, f64)) -> Self {
        GeoPoint::new(lat, lon)
    }
}

/// Surface distance in meters between two points.
///
/// Identical points always give exactly `0.0`.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    let point_a: geo::Point<f64> = a.into();
    let point_b: geo::Point<f64> = b.into();
    point_a.haversine_distance(&point_b)
}
