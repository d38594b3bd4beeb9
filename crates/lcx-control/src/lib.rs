//! # lcx-control — Crossing Access-Control and Safety Core
//!
//! Models the access-control and safety logic of a multi-lane railroad
//! crossing: which vehicles may queue, receive permission, and physically
//! occupy a crossing lane, with a train-presence signal overriding all
//! vehicle activity.
//!
//! ## Components
//!
//! - **Lane registry** (`lane.rs`): the ordered collection of lanes, each an
//!   enum-coded state machine (`FreeToCross` / `Locked` / `Occupied` /
//!   `OccupiedAndLocking`) with a queueing capacity and one crossing slot.
//!
//! - **Vehicle directory** (`vehicle.rs`): per-vehicle lane membership and
//!   permission flag, created lazily, reset on eviction.
//!
//! - **Audit ledger** (`ledger.rs`): append-only log of permission and
//!   occupancy events, append-only at the interface.
//!
//! - **Administrator capability** (`authority.rs`): the single identity
//!   allowed to call privileged operations; transferable in one atomic swap.
//!
//! - **Crossing state machine** (`crossing.rs`): the operation surface that
//!   owns all of the above and emits notifications (`events.rs`).
//!
//! ## Design
//!
//! Every operation is synchronous and atomic: it fully applies (mutation,
//! ledger append, notifications) or fully fails with a structured
//! [`CrossingError`] and no observable effect. Caller identity is threaded
//! through every call as an explicit [`lcx_core::ActorId`] — there is no
//! ambient authority. Time enters only through the [`lcx_core::Clock`] seam,
//! consumed by lazy permission expiry at crossing-entry time.

pub mod authority;
pub mod config;
pub mod crossing;
pub mod error;
pub mod events;
pub mod lane;
pub mod ledger;
pub mod vehicle;

// ─── Re-exports ──────────────────────────────────────────────────────

pub use authority::Administrator;
pub use config::CrossingConfig;
pub use crossing::Crossing;
pub use error::{CrossingError, ErrorKind};
pub use events::CrossingEvent;
pub use lane::{Lane, LaneState};
pub use ledger::{Ledger, LedgerEntry, LedgerEntryKind};
pub use vehicle::{VehicleDirectory, VehicleRecord};
