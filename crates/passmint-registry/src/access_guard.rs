//! Single-owner access guard.
//!
//! Every administrative operation calls [`AccessGuard::ensure_owner`]
//! before touching state. The owner can hand the role to another non-zero
//! address or renounce it. After renouncement the slot holds
//! [`Address::ZERO`] and no caller passes the guard again, the zero address
//! included.

use passmint_types::{Address, PassmintError, Result};
use serde::{Deserialize, Serialize};

/// Holds the administrative principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGuard {
    owner: Address,
}

impl AccessGuard {
    /// Create a guard owned by `owner`.
    ///
    /// # Errors
    /// Returns [`PassmintError::InvalidNewOwner`] for the zero address.
    pub fn new(owner: Address) -> Result<Self> {
        if owner.is_zero() {
            return Err(PassmintError::InvalidNewOwner);
        }
        Ok(Self { owner })
    }

    /// Current owner, or `None` once renounced.
    #[must_use]
    pub fn owner(&self) -> Option<Address> {
        (!self.owner.is_zero()).then_some(self.owner)
    }

    #[must_use]
    pub fn is_renounced(&self) -> bool {
        self.owner.is_zero()
    }

    /// Fail unless `caller` is the current owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<()> {
        if self.owner.is_zero() || &self.owner != caller {
            tracing::warn!(caller = %caller, "Rejected owner-only call");
            return Err(PassmintError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Hand the owner role to `new_owner`. Returns the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<Address> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(PassmintError::InvalidNewOwner);
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        tracing::info!(previous = %previous, new_owner = %new_owner, "Ownership transferred");
        Ok(previous)
    }

    /// Give up the owner role for good. Returns the previous owner.
    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<Address> {
        self.ensure_owner(caller)?;
        let previous = std::mem::replace(&mut self.owner, Address::ZERO);
        tracing::info!(previous = %previous, "Ownership renounced");
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        Address::from_low_u64(1)
    }

    fn stranger() -> Address {
        Address::from_low_u64(2)
    }

    #[test]
    fn owner_passes_guard() {
        let guard = AccessGuard::new(owner()).unwrap();
        assert!(guard.ensure_owner(&owner()).is_ok());
        assert_eq!(guard.owner(), Some(owner()));
    }

    #[test]
    fn stranger_is_rejected() {
        let guard = AccessGuard::new(owner()).unwrap();
        let err = guard.ensure_owner(&stranger()).unwrap_err();
        assert!(matches!(err, PassmintError::Unauthorized { caller } if caller == stranger()));
    }

    #[test]
    fn zero_owner_rejected_at_creation() {
        assert!(matches!(
            AccessGuard::new(Address::ZERO),
            Err(PassmintError::InvalidNewOwner)
        ));
    }

    #[test]
    fn transfer_moves_capability() {
        let mut guard = AccessGuard::new(owner()).unwrap();
        let previous = guard.transfer_ownership(&owner(), stranger()).unwrap();
        assert_eq!(previous, owner());
        assert!(guard.ensure_owner(&stranger()).is_ok());
        assert!(guard.ensure_owner(&owner()).is_err());
    }

    #[test]
    fn transfer_by_stranger_fails_without_change() {
        let mut guard = AccessGuard::new(owner()).unwrap();
        let err = guard.transfer_ownership(&stranger(), stranger()).unwrap_err();
        assert!(matches!(err, PassmintError::Unauthorized { .. }));
        assert_eq!(guard.owner(), Some(owner()));
    }

    #[test]
    fn transfer_to_zero_fails() {
        let mut guard = AccessGuard::new(owner()).unwrap();
        let err = guard.transfer_ownership(&owner(), Address::ZERO).unwrap_err();
        assert!(matches!(err, PassmintError::InvalidNewOwner));
        assert_eq!(guard.owner(), Some(owner()));
    }

    #[test]
    fn renounce_locks_everyone_out() {
        let mut guard = AccessGuard::new(owner()).unwrap();
        guard.renounce_ownership(&owner()).unwrap();
        assert!(guard.is_renounced());
        assert_eq!(guard.owner(), None);
        assert!(guard.ensure_owner(&owner()).is_err());
        assert!(guard.ensure_owner(&Address::ZERO).is_err());
        assert!(guard.renounce_ownership(&owner()).is_err());
        assert!(guard.transfer_ownership(&owner(), stranger()).is_err());
    }
}
