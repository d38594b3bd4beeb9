//! # Administrator Capability
//!
//! A single identity is permitted to call the privileged operations:
//! infrastructure control (lanes, capacities, validity window, train
//! signals) and vehicle eviction. The capability is installed once at
//! crossing creation and transferable in a single atomic swap — there is no
//! multi-step handshake and no intermediate "pending administrator" state.

use serde::{Deserialize, Serialize};

use lcx_core::ActorId;

use crate::error::CrossingError;

/// The administrator capability: who currently holds it, and how it moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Administrator {
    current: ActorId,
}

impl Administrator {
    /// Install the initial administrator.
    pub fn new(initial: ActorId) -> Self {
        Self { current: initial }
    }

    /// The identity currently holding the capability.
    pub fn current(&self) -> ActorId {
        self.current
    }

    /// Reject callers other than the current administrator.
    pub fn require(&self, caller: ActorId) -> Result<(), CrossingError> {
        if caller != self.current {
            return Err(CrossingError::NotAdministrator);
        }
        Ok(())
    }

    /// Transfer the capability to `new` in one atomic swap.
    ///
    /// Only the current administrator may transfer; afterwards the previous
    /// identity holds no privilege.
    pub fn transfer(&mut self, caller: ActorId, new: ActorId) -> Result<(), CrossingError> {
        self.require(caller)?;
        self.current = new;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_administrator_holds_capability() {
        let admin = ActorId::new();
        let authority = Administrator::new(admin);
        assert_eq!(authority.current(), admin);
        assert!(authority.require(admin).is_ok());
    }

    #[test]
    fn test_non_administrator_is_rejected() {
        let authority = Administrator::new(ActorId::new());
        let intruder = ActorId::new();
        assert_eq!(
            authority.require(intruder),
            Err(CrossingError::NotAdministrator)
        );
    }

    #[test]
    fn test_transfer_moves_capability() {
        let old = ActorId::new();
        let new = ActorId::new();
        let mut authority = Administrator::new(old);
        authority.transfer(old, new).unwrap();
        assert_eq!(authority.current(), new);
        assert!(authority.require(new).is_ok());
        // The previous holder has no privilege left.
        assert_eq!(authority.require(old), Err(CrossingError::NotAdministrator));
    }

    #[test]
    fn test_transfer_by_non_administrator_is_rejected() {
        let admin = ActorId::new();
        let intruder = ActorId::new();
        let mut authority = Administrator::new(admin);
        let result = authority.transfer(intruder, intruder);
        assert_eq!(result, Err(CrossingError::NotAdministrator));
        assert_eq!(authority.current(), admin);
    }
}
