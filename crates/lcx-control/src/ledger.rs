//! # Audit Ledger
//!
//! Append-only log of permission and occupancy events. Every state-changing
//! operation that touches permission or occupancy appends exactly one entry;
//! queuing is not a permission/occupancy event and leaves no trace here.
//!
//! Append-only is enforced at the interface: the backing sequence is
//! private, `append` is crate-internal, and the public surface is indexed
//! reads and iteration. There is no mutation or removal API.

use serde::{Deserialize, Serialize};

use lcx_core::{ActorId, Timestamp};

/// The kind of event an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerEntryKind {
    /// A vehicle took a lane's physical crossing slot.
    EnteredCrossing,
    /// A permission grant was issued (or refreshed).
    PermissionGiven,
    /// A vehicle was removed from the crossing and its grant cleared.
    PermissionRemoved,
}

impl std::fmt::Display for LedgerEntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EnteredCrossing => "ENTERED_CROSSING",
            Self::PermissionGiven => "PERMISSION_GIVEN",
            Self::PermissionRemoved => "PERMISSION_REMOVED",
        };
        f.write_str(s)
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The vehicle the event concerns.
    pub vehicle: ActorId,
    /// The lane the event concerns.
    pub lane_index: usize,
    /// When the event was recorded.
    pub timestamp: Timestamp,
    /// What happened.
    pub kind: LedgerEntryKind,
}

impl std::fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} lane {} at {}",
            self.kind, self.vehicle, self.lane_index, self.timestamp
        )
    }
}

/// The append-only audit ledger.
///
/// Entries are totally ordered by append order; an entry's index is the
/// ledger length at the moment it was appended.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Append one entry. O(1).
    pub(crate) fn append(
        &mut self,
        vehicle: ActorId,
        lane_index: usize,
        timestamp: Timestamp,
        kind: LedgerEntryKind,
    ) {
        self.entries.push(LedgerEntry {
            vehicle,
            lane_index,
            timestamp,
            kind,
        });
    }

    /// Indexed read. O(1). `None` past the end.
    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }
}
