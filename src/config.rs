//! Caller tunables bundled in one place.

use serde::{Deserialize, Serialize};

use crate::track_metrics::DEFAULT_LOOP_THRESHOLD_M;
use crate::visualization::{ArrowIntervalTable, MarkerIntervalTable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub loop_threshold_m: f64,
    pub max_markers: usize,
    pub max_chart_points: usize,
    pub slope_segment_m: f64,
    pub marker_intervals: MarkerIntervalTable,
    pub arrow_intervals: ArrowIntervalTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            loop_threshold_m: DEFAULT_LOOP_THRESHOLD_M,
            max_markers: 50,
            max_chart_points: 300,
            slope_segment_m: 100.0,
            marker_intervals: MarkerIntervalTable::default(),
            arrow_intervals: ArrowIntervalTable::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
