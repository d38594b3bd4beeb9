//! # Crossing State Machine
//!
//! The lane-level FSM driven by train events and vehicle events. The
//! `Crossing` exclusively owns the lane registry, the vehicle directory, and
//! the audit ledger; external callers mutate them only through the
//! operations here, each an atomic synchronously-completing unit of work.
//!
//! ## Atomicity
//!
//! An operation either fully applies its effects (state mutation, ledger
//! append, notifications) or fully fails with no observable partial effect.
//! Every precondition is therefore checked before the first mutation, in the
//! documented order, and the first failing one is reported.
//!
//! ## Time
//!
//! The clock is consulted in exactly two places: stamping a permission grant
//! and evaluating expiry when a vehicle attempts to enter the crossing.
//! Expiry is lazy — there is no background sweep; a stale grant is simply
//! rejected at entry time. A production variant could proactively revoke via
//! a scheduled sweep instead, but the host environment here has no scheduler.

use std::sync::Arc;

use lcx_core::{ActorId, Clock, SystemClock};

use crate::authority::Administrator;
use crate::config::CrossingConfig;
use crate::error::CrossingError;
use crate::events::CrossingEvent;
use crate::lane::{Lane, LaneState};
use crate::ledger::{Ledger, LedgerEntryKind};
use crate::vehicle::VehicleDirectory;

/// A multi-lane railroad crossing: lanes, vehicles, audit ledger, and the
/// administrator capability, behind the operation surface of the state
/// machine.
pub struct Crossing {
    administrator: Administrator,
    lanes: Vec<Lane>,
    vehicles: VehicleDirectory,
    ledger: Ledger,
    validity_time_secs: u64,
    clock: Arc<dyn Clock>,
    events: Vec<CrossingEvent>,
    /// Whether `TrainCanPass` has been announced for the current
    /// all-lanes-locked period. Reset whenever the predicate turns false.
    train_can_pass_announced: bool,
}

impl std::fmt::Debug for Crossing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crossing")
            .field("administrator", &self.administrator)
            .field("lanes", &self.lanes)
            .field("ledger_len", &self.ledger.len())
            .field("validity_time_secs", &self.validity_time_secs)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Crossing {
    /// Create a crossing over the system clock.
    ///
    /// All lanes start `Locked` (the safe/closed posture); open the crossing
    /// with [`Crossing::no_train_update()`].
    pub fn new(administrator: ActorId, config: &CrossingConfig) -> Self {
        Self::with_clock(administrator, config, Arc::new(SystemClock))
    }

    /// Create a crossing over an explicit clock (tests, scripted replays).
    pub fn with_clock(
        administrator: ActorId,
        config: &CrossingConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let lanes: Vec<Lane> = (0..config.lanes)
            .map(|index| Lane::new(index, config.max_capacity_per_lane))
            .collect();
        // A fresh crossing is already fully locked down; counting it as
        // announced means the first train signal on an untouched crossing
        // does not re-announce a condition that never transitioned.
        let announced = lanes.iter().all(|lane| lane.state() == LaneState::Locked);
        Self {
            administrator: Administrator::new(administrator),
            lanes,
            vehicles: VehicleDirectory::default(),
            ledger: Ledger::default(),
            validity_time_secs: config.validity_time_secs,
            clock,
            events: Vec::new(),
            train_can_pass_announced: announced,
        }
    }

    // ─── Administrator capability ────────────────────────────────────

    /// The identity currently holding the administrator capability.
    pub fn administrator(&self) -> ActorId {
        self.administrator.current()
    }

    /// Transfer the administrator capability in one atomic swap.
    pub fn transfer_administration(
        &mut self,
        caller: ActorId,
        new: ActorId,
    ) -> Result<(), CrossingError> {
        self.administrator.transfer(caller, new)
    }

    // ─── Lane registry ───────────────────────────────────────────────

    /// Append a new lane with the given registration capacity.
    ///
    /// Administrator only. The lane starts `Locked` and empty; its index is
    /// stable and never reused.
    pub fn add_lane(&mut self, caller: ActorId, max_capacity: u32) -> Result<usize, CrossingError> {
        self.administrator.require(caller)?;
        let index = self.lanes.len();
        self.lanes.push(Lane::new(index, max_capacity));
        Ok(index)
    }

    /// Change a lane's registration capacity, effective immediately.
    ///
    /// Administrator only. Lowering the cap below the current registration
    /// count does not evict anyone — capacity is enforced at entry time
    /// only.
    pub fn set_max_capacity_of_lane(
        &mut self,
        caller: ActorId,
        lane_index: usize,
        value: u32,
    ) -> Result<(), CrossingError> {
        self.administrator.require(caller)?;
        self.lane(lane_index)?;
        self.lanes[lane_index].max_capacity = value;
        Ok(())
    }

    /// Set the permission validity window in seconds.
    ///
    /// Administrator only. Applies to expiry checks from this point on,
    /// including grants issued earlier.
    pub fn set_validity_time(&mut self, caller: ActorId, seconds: u64) -> Result<(), CrossingError> {
        self.administrator.require(caller)?;
        self.validity_time_secs = seconds;
        Ok(())
    }

    // ─── Train signals ───────────────────────────────────────────────

    /// Signal an approaching train. Administrator only.
    ///
    /// Every lane takes the arrival transition (open lanes lock; occupied
    /// lanes flag as locking). Emits one crossing-wide `TrainComing`, then
    /// announces `TrainCanPass` if the crossing just became fully locked
    /// down.
    pub fn train_coming(&mut self, caller: ActorId) -> Result<(), CrossingError> {
        self.administrator.require(caller)?;
        for lane in &mut self.lanes {
            lane.state = lane.state.on_train_arrival();
        }
        self.events.push(CrossingEvent::TrainComing);
        self.refresh_train_can_pass();
        Ok(())
    }

    /// Signal that the train has left. Administrator only.
    ///
    /// Every lane takes the departure transition; `TrainPassed` is emitted
    /// unconditionally.
    pub fn train_gone(&mut self, caller: ActorId) -> Result<(), CrossingError> {
        self.administrator.require(caller)?;
        for lane in &mut self.lanes {
            lane.state = lane.state.on_train_departure();
        }
        self.events.push(CrossingEvent::TrainPassed);
        self.refresh_train_can_pass();
        Ok(())
    }

    /// Apply the departure transition without implying a train event.
    ///
    /// Administrator only. Brings a freshly created (locked-by-default)
    /// crossing into normal operation; no `TrainPassed` is emitted.
    /// Idempotent: a second consecutive call changes nothing.
    pub fn no_train_update(&mut self, caller: ActorId) -> Result<(), CrossingError> {
        self.administrator.require(caller)?;
        for lane in &mut self.lanes {
            lane.state = lane.state.on_train_departure();
        }
        self.refresh_train_can_pass();
        Ok(())
    }

    /// True iff every lane is `Locked` — the physical crossing is empty and
    /// fully locked down, so a train may safely pass.
    pub fn check_train_can_pass(&self) -> bool {
        self.lanes.iter().all(|lane| lane.state() == LaneState::Locked)
    }

    // ─── Vehicle operations ──────────────────────────────────────────

    /// Register the caller to a lane's queue.
    ///
    /// Open to any caller. Queuing is not a permission/occupancy event: no
    /// ledger entry, no notification.
    pub fn try_to_enter_lane(
        &mut self,
        caller: ActorId,
        lane_index: usize,
    ) -> Result<(), CrossingError> {
        if self.vehicles.is_in_lane(caller) {
            return Err(CrossingError::AlreadyInLane);
        }
        let lane = self.lane(lane_index)?;
        if lane.state().is_locked_for_traffic() {
            return Err(CrossingError::CrossingBlocked);
        }
        if !lane.has_capacity() {
            return Err(CrossingError::LaneFull);
        }
        self.lanes[lane_index].current_count += 1;
        self.vehicles.register(caller, lane_index);
        Ok(())
    }

    /// Grant (or refresh) the caller's permission to attempt a crossing.
    ///
    /// Open to any caller registered to a lane whose state permits it.
    /// Appends a `PermissionGiven` ledger entry stamped with the current
    /// clock reading.
    pub fn request_permission(&mut self, caller: ActorId) -> Result<(), CrossingError> {
        let lane_index = self
            .vehicles
            .lane_of(caller)
            .ok_or(CrossingError::NotInLane)?;
        if self.lanes[lane_index].state().is_locked_for_traffic() {
            return Err(CrossingError::CrossingLocked);
        }
        let now = self.clock.now();
        self.vehicles.grant_permission(caller, now);
        self.ledger
            .append(caller, lane_index, now, LedgerEntryKind::PermissionGiven);
        Ok(())
    }

    /// Take the caller's lane's physical crossing slot.
    ///
    /// Open to any caller holding an unexpired permission grant, when the
    /// lane is open and unoccupied. The grant is not consumed here; it is
    /// cleared when the administrator removes the vehicle.
    pub fn car_enter(&mut self, caller: ActorId) -> Result<(), CrossingError> {
        let lane_index = self
            .vehicles
            .lane_of(caller)
            .ok_or(CrossingError::NotInLane)?;
        if !self.vehicles.has_permission(caller) {
            return Err(CrossingError::NoPermission);
        }
        let granted_at = self
            .vehicles
            .permission_granted_at(caller)
            .ok_or(CrossingError::NoPermission)?;
        let now = self.clock.now();
        let elapsed_secs = now.secs_since(granted_at).max(0) as u64;
        if elapsed_secs > self.validity_time_secs {
            return Err(CrossingError::NoPermission);
        }
        let lane = &self.lanes[lane_index];
        if lane.state().is_locked_for_traffic() {
            return Err(CrossingError::CrossingLocked);
        }
        if lane.occupant().is_some() {
            return Err(CrossingError::CrossingBlockedByOtherCar);
        }
        let lane = &mut self.lanes[lane_index];
        lane.occupant = Some(caller);
        lane.state = LaneState::Occupied;
        self.ledger
            .append(caller, lane_index, now, LedgerEntryKind::EnteredCrossing);
        self.events.push(CrossingEvent::LaneOccupied { lane: lane_index });
        Ok(())
    }

    /// Remove the named occupant from the named lane.
    ///
    /// Administrator only; the named vehicle must be the lane's current
    /// occupant. Clears the occupant and the vehicle's registration and
    /// grant, appends `PermissionRemoved`, emits `LaneFree`, and — if the
    /// lane locks behind the leaving vehicle — announces `TrainCanPass`
    /// when the crossing just became fully locked down.
    pub fn car_leave(
        &mut self,
        caller: ActorId,
        lane_index: usize,
        vehicle: ActorId,
    ) -> Result<(), CrossingError> {
        self.administrator.require(caller)?;
        let lane = self.lane(lane_index)?;
        if lane.occupant() != Some(vehicle) {
            return Err(CrossingError::NotOccupant {
                vehicle,
                lane: lane_index,
            });
        }
        let now = self.clock.now();
        let lane = &mut self.lanes[lane_index];
        lane.occupant = None;
        // An occupant implies an occupied state, so the only question is
        // whether a train lock is pending.
        lane.state = match lane.state {
            LaneState::OccupiedAndLocking => LaneState::Locked,
            _ => LaneState::FreeToCross,
        };
        lane.current_count = lane.current_count.saturating_sub(1);
        self.vehicles.reset(vehicle);
        self.ledger
            .append(vehicle, lane_index, now, LedgerEntryKind::PermissionRemoved);
        self.events.push(CrossingEvent::LaneFree { lane: lane_index });
        self.refresh_train_can_pass();
        Ok(())
    }

    // ─── Read-only queries ───────────────────────────────────────────

    /// Number of lanes in the registry.
    pub fn number_of_lanes(&self) -> usize {
        self.lanes.len()
    }

    /// Vehicles currently registered to the lane (queued or occupying).
    pub fn current_count(&self, lane_index: usize) -> Result<u32, CrossingError> {
        Ok(self.lane(lane_index)?.current_count())
    }

    /// The lane's registration capacity bound.
    pub fn max_capacity_of_lane(&self, lane_index: usize) -> Result<u32, CrossingError> {
        Ok(self.lane(lane_index)?.max_capacity())
    }

    /// Whether another vehicle may register to the lane.
    pub fn lane_has_capacity(&self, lane_index: usize) -> Result<bool, CrossingError> {
        Ok(self.lane(lane_index)?.has_capacity())
    }

    /// The lane's crossing state.
    pub fn lane_state(&self, lane_index: usize) -> Result<LaneState, CrossingError> {
        Ok(self.lane(lane_index)?.state())
    }

    /// The vehicle holding the lane's crossing slot, if any.
    pub fn lane_occupant(&self, lane_index: usize) -> Result<Option<ActorId>, CrossingError> {
        Ok(self.lane(lane_index)?.occupant())
    }

    /// Seconds a permission grant remains usable.
    pub fn validity_time(&self) -> u64 {
        self.validity_time_secs
    }

    /// Whether the vehicle is registered to some lane.
    pub fn car_is_in_lane(&self, vehicle: ActorId) -> bool {
        self.vehicles.is_in_lane(vehicle)
    }

    /// The lane the vehicle is registered to, if any.
    pub fn lane_of_car(&self, vehicle: ActorId) -> Option<usize> {
        self.vehicles.lane_of(vehicle)
    }

    /// Whether the vehicle holds a permission grant (expiry not evaluated).
    pub fn car_has_permission(&self, vehicle: ActorId) -> bool {
        self.vehicles.has_permission(vehicle)
    }

    /// The append-only audit ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Notifications emitted so far, in emission order.
    pub fn events(&self) -> &[CrossingEvent] {
        &self.events
    }

    /// Take all recorded notifications, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<CrossingEvent> {
        std::mem::take(&mut self.events)
    }

    /// The vehicle directory (for invariant checks and diagnostics).
    pub fn vehicles(&self) -> &VehicleDirectory {
        &self.vehicles
    }

    // ─── Internals ───────────────────────────────────────────────────

    fn lane(&self, index: usize) -> Result<&Lane, CrossingError> {
        self.lanes.get(index).ok_or(CrossingError::IndexOutOfRange {
            index,
            lanes: self.lanes.len(),
        })
    }

    /// Re-evaluate the train-can-pass predicate and announce the transition
    /// to true exactly once per locked-down period.
    fn refresh_train_can_pass(&mut self) {
        let ready = self.check_train_can_pass();
        if ready && !self.train_can_pass_announced {
            self.events.push(CrossingEvent::TrainCanPass);
        }
        self.train_can_pass_announced = ready;
    }
}
