//! End-to-end crossing scenarios: the reference deployment (3 lanes,
//! capacity 10, validity 60 s) driven through full traffic/train cycles,
//! with the audit ledger and notification stream checked against the
//! expected sequences.

use std::sync::Arc;

use lcx_control::{
    Crossing, CrossingConfig, CrossingError, CrossingEvent, ErrorKind, LaneState, LedgerEntryKind,
};
use lcx_core::{ActorId, ManualClock, Timestamp};

/// Reference deployment over a manual clock.
fn deploy() -> (Crossing, ActorId, Arc<ManualClock>) {
    let admin = ActorId::new();
    let clock = Arc::new(ManualClock::starting_at(
        Timestamp::parse("2026-01-15T12:00:00Z").unwrap(),
    ));
    let crossing = Crossing::with_clock(admin, &CrossingConfig::default(), clock.clone());
    (crossing, admin, clock)
}

// ── Scenario A: creation posture and opening ─────────────────────────

#[test]
fn fresh_crossing_locks_every_lane_until_opened() {
    let (mut crossing, admin, _clock) = deploy();

    for i in 0..crossing.number_of_lanes() {
        assert_eq!(crossing.lane_state(i).unwrap(), LaneState::Locked);
    }

    crossing.no_train_update(admin).unwrap();

    for i in 0..crossing.number_of_lanes() {
        assert_eq!(crossing.lane_state(i).unwrap(), LaneState::FreeToCross);
    }
}

// ── Scenario B: lane capacity ────────────────────────────────────────

#[test]
fn lane_fills_to_capacity_and_rejects_the_next_vehicle() {
    let (mut crossing, admin, _clock) = deploy();
    crossing.no_train_update(admin).unwrap();
    crossing.set_max_capacity_of_lane(admin, 0, 2).unwrap();

    assert!(crossing.lane_has_capacity(0).unwrap());
    crossing.try_to_enter_lane(ActorId::new(), 0).unwrap();
    crossing.try_to_enter_lane(ActorId::new(), 0).unwrap();
    assert_eq!(crossing.current_count(0).unwrap(), 2);
    assert!(!crossing.lane_has_capacity(0).unwrap());

    assert_eq!(
        crossing.try_to_enter_lane(ActorId::new(), 0),
        Err(CrossingError::LaneFull)
    );
    assert_eq!(crossing.current_count(0).unwrap(), 2);
}

// ── Scenario C: train over an occupied lane ──────────────────────────

#[test]
fn train_waits_for_the_occupant_and_can_pass_fires_once() {
    let (mut crossing, admin, _clock) = deploy();
    crossing.no_train_update(admin).unwrap();

    let vehicle = ActorId::new();
    crossing.try_to_enter_lane(vehicle, 0).unwrap();
    crossing.request_permission(vehicle).unwrap();
    crossing.car_enter(vehicle).unwrap();
    assert_eq!(crossing.lane_state(0).unwrap(), LaneState::Occupied);
    crossing.drain_events();

    crossing.train_coming(admin).unwrap();
    assert_eq!(crossing.lane_state(0).unwrap(), LaneState::OccupiedAndLocking);
    assert!(
        !crossing.events().contains(&CrossingEvent::TrainCanPass),
        "an occupied lane must hold back the announcement"
    );

    crossing.car_leave(admin, 0, vehicle).unwrap();
    assert_eq!(crossing.lane_state(0).unwrap(), LaneState::Locked);
    let announcements = crossing
        .events()
        .iter()
        .filter(|e| **e == CrossingEvent::TrainCanPass)
        .count();
    assert_eq!(announcements, 1);
}

// ── Scenario D: one car blocks another ───────────────────────────────

#[test]
fn occupant_blocks_other_permitted_vehicle_until_removed() {
    let (mut crossing, admin, _clock) = deploy();
    crossing.no_train_update(admin).unwrap();

    let blocker = ActorId::new();
    let waiting = ActorId::new();
    crossing.try_to_enter_lane(blocker, 0).unwrap();
    crossing.request_permission(blocker).unwrap();
    crossing.try_to_enter_lane(waiting, 0).unwrap();
    crossing.request_permission(waiting).unwrap();

    crossing.car_enter(blocker).unwrap();
    assert_eq!(
        crossing.car_enter(waiting),
        Err(CrossingError::CrossingBlockedByOtherCar)
    );

    crossing.car_leave(admin, 0, blocker).unwrap();
    crossing.car_enter(waiting).unwrap();
    assert_eq!(crossing.lane_occupant(0).unwrap(), Some(waiting));
}

// ── Scenario E: privileged surface ───────────────────────────────────

#[test]
fn every_privileged_entry_point_denies_non_administrators() {
    let (mut crossing, admin, _clock) = deploy();
    crossing.no_train_update(admin).unwrap();
    let intruder = ActorId::new();

    let rejections = [
        crossing.add_lane(intruder, 10).map(|_| ()),
        crossing.set_max_capacity_of_lane(intruder, 0, 10),
        crossing.set_validity_time(intruder, 10),
        crossing.train_coming(intruder),
        crossing.train_gone(intruder),
        crossing.no_train_update(intruder),
        crossing.car_leave(intruder, 0, intruder),
        crossing.transfer_administration(intruder, intruder),
    ];
    for result in rejections {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::AccessDenied);
    }

    // All state untouched.
    assert_eq!(crossing.number_of_lanes(), 3);
    assert_eq!(crossing.validity_time(), 60);
    assert_eq!(crossing.administrator(), admin);
    assert!(crossing.ledger().is_empty());
    assert!(crossing.events().is_empty());
    for i in 0..3 {
        assert_eq!(crossing.lane_state(i).unwrap(), LaneState::FreeToCross);
    }
}

// ── Audit ledger sequences ───────────────────────────────────────────

#[test]
fn ledger_records_the_full_two_car_cycle_in_order() {
    let (mut crossing, admin, _clock) = deploy();
    crossing.no_train_update(admin).unwrap();

    let car1 = ActorId::new();
    let car2 = ActorId::new();
    crossing.try_to_enter_lane(car2, 0).unwrap();
    crossing.request_permission(car2).unwrap();
    crossing.try_to_enter_lane(car1, 0).unwrap();
    crossing.request_permission(car1).unwrap();

    crossing.car_enter(car2).unwrap();
    crossing.car_leave(admin, 0, car2).unwrap();
    crossing.car_enter(car1).unwrap();
    crossing.car_leave(admin, 0, car1).unwrap();

    let expected = [
        (car2, LedgerEntryKind::PermissionGiven),
        (car1, LedgerEntryKind::PermissionGiven),
        (car2, LedgerEntryKind::EnteredCrossing),
        (car2, LedgerEntryKind::PermissionRemoved),
        (car1, LedgerEntryKind::EnteredCrossing),
        (car1, LedgerEntryKind::PermissionRemoved),
    ];
    assert_eq!(crossing.ledger().len(), expected.len());
    for (i, (vehicle, kind)) in expected.into_iter().enumerate() {
        let entry = crossing.ledger().get(i).unwrap();
        assert_eq!(entry.vehicle, vehicle, "entry {i}");
        assert_eq!(entry.kind, kind, "entry {i}");
        assert_eq!(entry.lane_index, 0, "entry {i}");
    }
}

#[test]
fn train_passage_then_car_crossing_emits_the_expected_stream() {
    let (mut crossing, admin, _clock) = deploy();
    crossing.no_train_update(admin).unwrap();

    let vehicle = ActorId::new();
    crossing.try_to_enter_lane(vehicle, 0).unwrap();
    crossing.request_permission(vehicle).unwrap();

    crossing.train_coming(admin).unwrap();
    assert_eq!(crossing.car_enter(vehicle), Err(CrossingError::CrossingLocked));
    crossing.train_gone(admin).unwrap();
    crossing.car_enter(vehicle).unwrap();
    crossing.car_leave(admin, 0, vehicle).unwrap();

    assert_eq!(
        crossing.events(),
        &[
            CrossingEvent::TrainComing,
            CrossingEvent::TrainCanPass,
            CrossingEvent::TrainPassed,
            CrossingEvent::LaneOccupied { lane: 0 },
            CrossingEvent::LaneFree { lane: 0 },
        ]
    );
}

// ── Permission expiry over the manual clock ──────────────────────────

#[test]
fn stale_grant_is_rejected_and_a_fresh_one_recovers() {
    let (mut crossing, admin, clock) = deploy();
    crossing.no_train_update(admin).unwrap();

    let vehicle = ActorId::new();
    crossing.try_to_enter_lane(vehicle, 0).unwrap();
    crossing.request_permission(vehicle).unwrap();

    clock.advance_secs(61);
    assert_eq!(crossing.car_enter(vehicle), Err(CrossingError::NoPermission));

    crossing.request_permission(vehicle).unwrap();
    crossing.car_enter(vehicle).unwrap();
    assert_eq!(crossing.lane_state(0).unwrap(), LaneState::Occupied);
}

#[test]
fn widened_validity_window_revives_an_old_grant() {
    let (mut crossing, admin, clock) = deploy();
    crossing.no_train_update(admin).unwrap();

    let vehicle = ActorId::new();
    crossing.try_to_enter_lane(vehicle, 0).unwrap();
    crossing.request_permission(vehicle).unwrap();

    clock.advance_secs(90);
    assert_eq!(crossing.car_enter(vehicle), Err(CrossingError::NoPermission));

    // Expiry is evaluated against the window in force at entry time.
    crossing.set_validity_time(admin, 120).unwrap();
    crossing.car_enter(vehicle).unwrap();
}

// ── No-train update idempotence ──────────────────────────────────────

#[test]
fn no_train_update_twice_equals_once() {
    let (mut crossing_once, admin_once, _c1) = deploy();
    let (mut crossing_twice, admin_twice, _c2) = deploy();

    crossing_once.no_train_update(admin_once).unwrap();
    crossing_twice.no_train_update(admin_twice).unwrap();
    crossing_twice.no_train_update(admin_twice).unwrap();

    assert_eq!(crossing_once.events(), crossing_twice.events());
    assert_eq!(crossing_once.ledger().len(), crossing_twice.ledger().len());
    for i in 0..3 {
        assert_eq!(
            crossing_once.lane_state(i).unwrap(),
            crossing_twice.lane_state(i).unwrap()
        );
    }
}
