//! # Lane State Machine
//!
//! One `Lane` per traffic lane, each with its own queueing capacity and a
//! single physical crossing slot. The lane-level state couples the train
//! lock with vehicle occupancy:
//!
//! ```text
//!                    train arrival                  train departure
//! FreeToCross ───────────────────────▶ Locked ───────────────────────▶ FreeToCross
//!      │                                                                    ▲
//!      │ car_enter                                                          │
//!      ▼                                                                    │ car_leave
//!  Occupied ──train arrival──▶ OccupiedAndLocking ──car_leave──▶ Locked     │
//!      ▲                               │                                    │
//!      └────────train departure────────┘          Occupied ─────────────────┘
//! ```
//!
//! ## Design Decision
//!
//! Lane state is a tagged enum with exhaustive matching, not an integer
//! code. The arrival/departure transitions are total functions on the enum —
//! adding a state forces every transition site to handle it.

use serde::{Deserialize, Serialize};

use lcx_core::ActorId;

// ─── Lane State ──────────────────────────────────────────────────────

/// The crossing state of a single lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneState {
    /// Open posture: vehicles may queue and, with permission, cross.
    FreeToCross,
    /// Closed for a train; no vehicle activity. Also the safe initial
    /// posture of a freshly created lane.
    Locked,
    /// A vehicle holds the physical crossing slot.
    Occupied,
    /// A train was signalled while a vehicle still holds the slot; the
    /// lane locks as soon as the occupant is removed.
    OccupiedAndLocking,
}

impl LaneState {
    /// The state after a train-arrival signal.
    pub fn on_train_arrival(self) -> LaneState {
        match self {
            Self::FreeToCross | Self::Locked => Self::Locked,
            Self::Occupied | Self::OccupiedAndLocking => Self::OccupiedAndLocking,
        }
    }

    /// The state after a train-departure (or no-train) signal.
    pub fn on_train_departure(self) -> LaneState {
        match self {
            Self::FreeToCross | Self::Locked => Self::FreeToCross,
            Self::Occupied | Self::OccupiedAndLocking => Self::Occupied,
        }
    }

    /// Whether the train lock bars vehicle activity (queuing, permission,
    /// entering).
    pub fn is_locked_for_traffic(&self) -> bool {
        matches!(self, Self::Locked | Self::OccupiedAndLocking)
    }
}

impl std::fmt::Display for LaneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FreeToCross => "FREE_TO_CROSS",
            Self::Locked => "LOCKED",
            Self::Occupied => "OCCUPIED",
            Self::OccupiedAndLocking => "OCCUPIED_AND_LOCKING",
        };
        f.write_str(s)
    }
}

// ─── Lane ────────────────────────────────────────────────────────────

/// A single traffic lane: queueing capacity plus one crossing slot.
///
/// Lanes are created through the registry, mutated only through crossing
/// operations, and never destroyed — the index is stable for the lifetime
/// of the crossing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    /// Stable identifier, assigned at creation, never reused.
    pub(crate) index: usize,
    /// Upper bound on vehicles simultaneously registered (queued or
    /// occupying). Mutable; enforced at entry time only.
    pub(crate) max_capacity: u32,
    /// Vehicles currently registered to the lane.
    pub(crate) current_count: u32,
    /// The vehicle holding the physical crossing slot, if any.
    pub(crate) occupant: Option<ActorId>,
    /// Crossing state.
    pub(crate) state: LaneState,
}

impl Lane {
    /// Create a lane in the safe/closed posture with no registrations.
    pub(crate) fn new(index: usize, max_capacity: u32) -> Self {
        Self {
            index,
            max_capacity,
            current_count: 0,
            occupant: None,
            state: LaneState::Locked,
        }
    }

    /// Stable lane index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Registration capacity bound.
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Vehicles currently registered (queued or occupying).
    pub fn current_count(&self) -> u32 {
        self.current_count
    }

    /// Whether another vehicle may register.
    ///
    /// An administrator may lower `max_capacity` below `current_count`;
    /// existing registrations are never evicted, this just reports no room.
    pub fn has_capacity(&self) -> bool {
        self.current_count < self.max_capacity
    }

    /// The vehicle holding the crossing slot, if any.
    pub fn occupant(&self) -> Option<ActorId> {
        self.occupant
    }

    /// Current crossing state.
    pub fn state(&self) -> LaneState {
        self.state
    }
}
