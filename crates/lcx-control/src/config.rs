//! # Crossing Configuration
//!
//! The parameters a crossing is created with. Loadable from YAML by the CLI;
//! the crossing itself only reads these once at construction (lanes and the
//! validity window are mutable afterwards through administrator operations).

use serde::{Deserialize, Serialize};

/// Creation-time parameters of a crossing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingConfig {
    /// Number of lanes created at construction.
    pub lanes: usize,
    /// Registration capacity of each initial lane.
    pub max_capacity_per_lane: u32,
    /// Seconds a permission grant remains usable.
    pub validity_time_secs: u64,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            lanes: 3,
            max_capacity_per_lane: 10,
            validity_time_secs: 60,
        }
    }
}
