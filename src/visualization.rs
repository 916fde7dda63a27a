//! Adaptive Visualization Parameters
//!
//! Zoom-keyed tier tables deciding how dense markers and direction arrows are
//! drawn. Tables are sorted by descending `min_zoom` and the first tier whose
//! `min_zoom` the current zoom reaches wins. Below the last tier the value is
//! 0, meaning "do not render".

use serde::{Deserialize, Serialize};

/// Minimum track length for markers to be worth drawing at zoom 12.
pub const DEFAULT_MIN_TRACK_KM_AT_OVERVIEW: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTier {
    pub min_zoom: f64,
    pub value: f64,
    /// Tracks shorter than this get 0 at this tier.
    #[serde(default)]
    pub min_track_km: f64,
}

impl ZoomTier {
    pub const fn new(min_zoom: f64, value: f64) -> Self {
        ZoomTier {
            min_zoom,
            value,
            min_track_km: 0.0,
        }
    }

    pub const fn with_min_track_km(self, min_track_km: f64) -> Self {
        ZoomTier {
            min_zoom: self.min_zoom,
            value: self.value,
            min_track_km,
        }
    }
}

/// Marker interval in km per zoom tier.
pub const MARKER_INTERVAL_TIERS: &[ZoomTier] = &[
    ZoomTier::new(17.0, 0.1),
    ZoomTier::new(15.0, 0.5),
    ZoomTier::new(13.0, 1.0),
    ZoomTier::new(12.0, 5.0).with_min_track_km(DEFAULT_MIN_TRACK_KM_AT_OVERVIEW),
];

/// Meters between direction arrows per zoom tier. Strictly decreasing with zoom.
pub const ARROW_INTERVAL_TIERS: &[ZoomTier] = &[
    ZoomTier::new(20.0, 25.0),
    ZoomTier::new(19.0, 35.0),
    ZoomTier::new(18.0, 50.0),
    ZoomTier::new(17.0, 80.0),
    ZoomTier::new(16.0, 120.0),
    ZoomTier::new(15.0, 200.0),
    ZoomTier::new(14.0, 300.0),
    ZoomTier::new(13.0, 500.0),
    ZoomTier::new(12.0, 800.0),
    ZoomTier::new(11.0, 1200.0),
];

fn lookup(tiers: &[ZoomTier], zoom: f64, track_km: f64) -> f64 {
    if zoom.is_nan() {
        return 0.0;
    }

    match tiers.iter().find(|tier| zoom >= tier.min_zoom) {
        Some(tier) if track_km >= tier.min_track_km => tier.value,
        _ => 0.0,
    }
}

/// Owned marker tier table, for callers tuning the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIntervalTable {
    pub tiers: Vec<ZoomTier>,
}

impl Default for MarkerIntervalTable {
    fn default() -> Self {
        MarkerIntervalTable {
            tiers: MARKER_INTERVAL_TIERS.to_vec(),
        }
    }
}

impl MarkerIntervalTable {
    /// Default table with a different zoom-12 length cutoff.
    pub fn with_overview_min_km(min_track_km: f64) -> Self {
        let mut table = Self::default();
        if let Some(last) = table.tiers.last_mut() {
            last.min_track_km = min_track_km;
        }
        table
    }

    pub fn interval_km(&self, zoom: f64, track_length_km: f64) -> f64 {
        lookup(&self.tiers, zoom, track_length_km)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowIntervalTable {
    pub tiers: Vec<ZoomTier>,
}

impl Default for ArrowIntervalTable {
    fn default() -> Self {
        ArrowIntervalTable {
            tiers: ARROW_INTERVAL_TIERS.to_vec(),
        }
    }
}

impl ArrowIntervalTable {
    pub fn interval_m(&self, zoom: f64) -> f64 {
        lookup(&self.tiers, zoom, f64::INFINITY)
    }
}

/// Distance-marker spacing in km for the current view, 0 to hide markers.
pub fn marker_interval(zoom: f64, track_length_km: f64) -> f64 {
    lookup(MARKER_INTERVAL_TIERS, zoom, track_length_km)
}

/// Meters between direction arrows for the current view, 0 to hide them.
pub fn arrow_repeat_interval(zoom: f64) -> f64 {
    lookup(ARROW_INTERVAL_TIERS, zoom, f64::INFINITY)
}
