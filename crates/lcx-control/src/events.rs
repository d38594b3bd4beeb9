//! # Notifications
//!
//! Fire-and-forget events emitted as a side effect of successful crossing
//! operations. Failed operations emit nothing. Events are recorded in
//! emission order in an in-memory log on the crossing; external listeners
//! observe them via `Crossing::events()` or drain them with
//! `Crossing::drain_events()`.

use serde::{Deserialize, Serialize};

/// A crossing-level notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossingEvent {
    /// A train was signalled; every lane took the arrival transition.
    TrainComing,
    /// The train has left; every lane took the departure transition.
    TrainPassed,
    /// Every lane is locked and empty — a train may safely pass. Emitted
    /// exactly once each time the condition becomes true.
    TrainCanPass,
    /// A vehicle took the lane's crossing slot.
    LaneOccupied {
        /// The lane whose slot was taken.
        lane: usize,
    },
    /// The lane's crossing slot was released.
    LaneFree {
        /// The lane whose slot was released.
        lane: usize,
    },
}

impl std::fmt::Display for CrossingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrainComing => f.write_str("TrainComing"),
            Self::TrainPassed => f.write_str("TrainPassed"),
            Self::TrainCanPass => f.write_str("TrainCanPass"),
            Self::LaneOccupied { lane } => write!(f, "LaneOccupied({lane})"),
            Self::LaneFree { lane } => write!(f, "LaneFree({lane})"),
        }
    }
}
