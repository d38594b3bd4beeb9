//! # Vehicle Directory
//!
//! Tracks each vehicle's lane membership and permission flag. Records are
//! created lazily on the first registration attempt and reset to the default
//! state when the administrator removes the vehicle from the crossing.
//!
//! Invariant: `has_permission` implies `in_lane`. The directory never grants
//! permission to an unregistered vehicle, and a removal clears both flags in
//! the same step.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lcx_core::{ActorId, Timestamp};

/// Per-vehicle registration and permission state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Whether the vehicle is currently registered to some lane.
    pub in_lane: bool,
    /// The lane the vehicle is registered to; meaningful only while
    /// `in_lane`.
    pub lane_index: usize,
    /// Whether a permission grant is held and not yet cleared.
    pub has_permission: bool,
    /// Timestamp of the most recent grant, used for lazy expiry.
    pub permission_granted_at: Option<Timestamp>,
}

/// Directory of all vehicles that have ever registered to a lane.
///
/// Pure lookups never fail: unknown vehicles read as the default record
/// (not in a lane, no permission).
#[derive(Debug, Clone, Default)]
pub struct VehicleDirectory {
    records: HashMap<ActorId, VehicleRecord>,
}

impl VehicleDirectory {
    /// Whether the vehicle is registered to some lane.
    pub fn is_in_lane(&self, vehicle: ActorId) -> bool {
        self.records.get(&vehicle).is_some_and(|r| r.in_lane)
    }

    /// The lane the vehicle is registered to, if any.
    pub fn lane_of(&self, vehicle: ActorId) -> Option<usize> {
        self.records
            .get(&vehicle)
            .filter(|r| r.in_lane)
            .map(|r| r.lane_index)
    }

    /// Whether the vehicle holds an (unexpired-or-not) permission grant.
    ///
    /// Expiry is evaluated lazily at crossing-entry time, not here.
    pub fn has_permission(&self, vehicle: ActorId) -> bool {
        self.records.get(&vehicle).is_some_and(|r| r.has_permission)
    }

    /// The timestamp of the vehicle's most recent grant, if one is held.
    pub fn permission_granted_at(&self, vehicle: ActorId) -> Option<Timestamp> {
        self.records
            .get(&vehicle)
            .filter(|r| r.has_permission)
            .and_then(|r| r.permission_granted_at)
    }

    /// Register the vehicle to a lane with no permission.
    pub(crate) fn register(&mut self, vehicle: ActorId, lane_index: usize) {
        self.records.insert(
            vehicle,
            VehicleRecord {
                in_lane: true,
                lane_index,
                has_permission: false,
                permission_granted_at: None,
            },
        );
    }

    /// Grant (or refresh) permission for a registered vehicle.
    pub(crate) fn grant_permission(&mut self, vehicle: ActorId, at: Timestamp) {
        if let Some(record) = self.records.get_mut(&vehicle) {
            record.has_permission = true;
            record.permission_granted_at = Some(at);
        }
    }

    /// Reset the vehicle to the default state (not in a lane, no
    /// permission).
    pub(crate) fn reset(&mut self, vehicle: ActorId) {
        self.records.remove(&vehicle);
    }

    /// Iterate over all live records (for invariant checks).
    pub fn records(&self) -> impl Iterator<Item = (&ActorId, &VehicleRecord)> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Timestamp {
        Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
    }

    #[test]
    fn test_unknown_vehicle_reads_default() {
        let dir = VehicleDirectory::default();
        let v = ActorId::new();
        assert!(!dir.is_in_lane(v));
        assert_eq!(dir.lane_of(v), None);
        assert!(!dir.has_permission(v));
        assert_eq!(dir.permission_granted_at(v), None);
    }

    #[test]
    fn test_register_sets_lane_without_permission() {
        let mut dir = VehicleDirectory::default();
        let v = ActorId::new();
        dir.register(v, 1);
        assert!(dir.is_in_lane(v));
        assert_eq!(dir.lane_of(v), Some(1));
        assert!(!dir.has_permission(v));
    }

    #[test]
    fn test_grant_records_timestamp() {
        let mut dir = VehicleDirectory::default();
        let v = ActorId::new();
        dir.register(v, 0);
        dir.grant_permission(v, ts());
        assert!(dir.has_permission(v));
        assert_eq!(dir.permission_granted_at(v), Some(ts()));
    }

    #[test]
    fn test_grant_ignores_unregistered_vehicle() {
        let mut dir = VehicleDirectory::default();
        let v = ActorId::new();
        dir.grant_permission(v, ts());
        assert!(!dir.has_permission(v));
    }

    #[test]
    fn test_reset_returns_vehicle_to_default() {
        let mut dir = VehicleDirectory::default();
        let v = ActorId::new();
        dir.register(v, 0);
        dir.grant_permission(v, ts());
        dir.reset(v);
        assert!(!dir.is_in_lane(v));
        assert!(!dir.has_permission(v));
        assert_eq!(dir.lane_of(v), None);
    }

    #[test]
    fn test_permission_implies_in_lane() {
        let mut dir = VehicleDirectory::default();
        let v = ActorId::new();
        dir.register(v, 0);
        dir.grant_permission(v, ts());
        for (_, record) in dir.records() {
            assert!(!record.has_permission || record.in_lane);
        }
    }
}
