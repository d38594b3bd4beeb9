//! # Error Types — Caller-Visible Rejections
//!
//! Every failure in the crossing is a synchronous, caller-visible rejection
//! carrying a human-readable reason. There is no retry or recovery logic
//! inside the system — the caller decides whether to resubmit.
//!
//! A rejected operation has **no** observable effect: no state mutation, no
//! ledger entry, no notification. Operations check every precondition before
//! the first mutation.

use lcx_core::ActorId;
use thiserror::Error;

/// Rejection reasons for crossing operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossingError {
    /// A privileged operation was invoked by a caller other than the
    /// current administrator.
    #[error("caller is not the administrator")]
    NotAdministrator,

    /// The caller is already registered to a lane.
    #[error("car is already in a lane")]
    AlreadyInLane,

    /// The lane's crossing state does not permit queuing.
    #[error("crossing is blocked")]
    CrossingBlocked,

    /// The lane has reached its registration capacity.
    #[error("lane is full")]
    LaneFull,

    /// The caller is not registered to any lane.
    #[error("car is not in a lane")]
    NotInLane,

    /// The caller holds no permission, or the grant has expired.
    #[error("no permission to enter")]
    NoPermission,

    /// The lane is locked for an approaching or passing train.
    #[error("crossing is locked")]
    CrossingLocked,

    /// Another vehicle holds the lane's crossing slot.
    #[error("crossing is blocked by another car")]
    CrossingBlockedByOtherCar,

    /// The named vehicle is not the current occupant of the named lane.
    #[error("car {vehicle} is not the occupant of lane {lane}")]
    NotOccupant {
        /// The vehicle named by the caller.
        vehicle: ActorId,
        /// The lane named by the caller.
        lane: usize,
    },

    /// The lane index does not name an existing lane.
    #[error("lane index {index} out of range ({lanes} lanes)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of lanes in the registry.
        lanes: usize,
    },
}

/// Failure taxonomy, independent of the specific rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Privileged-operation misuse.
    AccessDenied,
    /// The operation's preconditions conflict with current machine state.
    StateConflict,
    /// A capacity bound was hit.
    ResourceExhausted,
    /// A vehicle-state precondition was not met.
    PreconditionFailed,
    /// A malformed argument.
    InvalidArgument,
}

impl CrossingError {
    /// The taxonomy class of this rejection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAdministrator => ErrorKind::AccessDenied,
            Self::AlreadyInLane
            | Self::CrossingBlocked
            | Self::CrossingLocked
            | Self::CrossingBlockedByOtherCar
            | Self::NotOccupant { .. } => ErrorKind::StateConflict,
            Self::LaneFull => ErrorKind::ResourceExhausted,
            Self::NotInLane | Self::NoPermission => ErrorKind::PreconditionFailed,
            Self::IndexOutOfRange { .. } => ErrorKind::InvalidArgument,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AccessDenied => "ACCESS_DENIED",
            Self::StateConflict => "STATE_CONFLICT",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
        };
        f.write_str(s)
    }
}
