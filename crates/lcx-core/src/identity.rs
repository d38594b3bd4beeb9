//! # Caller Identity Newtype
//!
//! Newtype wrapper for the identities that invoke crossing operations.
//! Vehicles and the administrator are both just callers — the crossing
//! decides per operation whether the caller's identity carries the
//! privilege it needs. Threading the identity through every call keeps
//! authority explicit; there is no ambient "current caller" state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a caller (a vehicle or the administrator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}
