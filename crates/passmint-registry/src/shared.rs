//! Thread-safe registry handle.
//!
//! Every call takes the lock for its whole duration, so operations from
//! different threads are applied one at a time and each one commits or
//! aborts before the next starts.

use std::sync::Arc;

use parking_lot::Mutex;
use passmint_types::{Address, MintPhase, RegistryEvent, Result, TokenId};
use rust_decimal::Decimal;

use crate::payout::PayoutSink;
use crate::registry::PassRegistry;
use crate::snapshot::RegistrySnapshot;

/// Cloneable handle to one registry shared between threads.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    inner: Arc<Mutex<PassRegistry>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: PassRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Run `f` with exclusive access to the registry.
    pub fn with<R>(&self, f: impl FnOnce(&mut PassRegistry) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn start_mint(&self, caller: &Address) -> Result<()> {
        self.inner.lock().start_mint(caller)
    }

    pub fn mint_pass(&self, caller: Address, payment: Decimal) -> Result<TokenId> {
        self.inner.lock().mint_pass(caller, payment)
    }

    pub fn withdraw(&self, caller: &Address, sink: &mut dyn PayoutSink) -> Result<Decimal> {
        self.inner.lock().withdraw(caller, sink)
    }

    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> Result<()> {
        self.inner.lock().transfer_ownership(caller, new_owner)
    }

    pub fn renounce_ownership(&self, caller: &Address) -> Result<()> {
        self.inner.lock().renounce_ownership(caller)
    }

    pub fn token_uri(&self, token_id: TokenId) -> Result<String> {
        self.inner.lock().token_uri(token_id)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        self.inner.lock().owner_of(token_id)
    }

    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.inner.lock().balance_of(holder)
    }

    #[must_use]
    pub fn token_ids(&self) -> u64 {
        self.inner.lock().token_ids()
    }

    #[must_use]
    pub fn max_token_ids(&self) -> u64 {
        self.inner.lock().max_token_ids()
    }

    #[must_use]
    pub fn owner(&self) -> Option<Address> {
        self.inner.lock().owner()
    }

    #[must_use]
    pub fn mint_phase(&self) -> MintPhase {
        self.inner.lock().mint_phase()
    }

    #[must_use]
    pub fn treasury_balance(&self) -> Decimal {
        self.inner.lock().treasury_balance()
    }

    #[must_use]
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.inner.lock().events().to_vec()
    }

    pub fn verify_invariants(&self) -> Result<()> {
        self.inner.lock().verify_invariants()
    }

    pub fn snapshot(&self) -> Result<RegistrySnapshot> {
        self.inner.lock().snapshot()
    }
}

impl From<PassRegistry> for SharedRegistry {
    fn from(registry: PassRegistry) -> Self {
        Self::new(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payout::LedgerPayout;
    use passmint_types::RegistryConfig;

    #[test]
    fn handle_clones_share_state() {
        let owner = Address::from_low_u64(1);
        let reg = PassRegistry::new(owner, RegistryConfig::new("Club Pass", "ipfs://Qm/"))
            .unwrap();
        let a = SharedRegistry::from(reg);
        let b = a.clone();

        a.start_mint(&owner).unwrap();
        b.mint_pass(Address::from_low_u64(2), Decimal::new(1, 1))
            .unwrap();

        assert_eq!(a.token_ids(), 1);
        assert_eq!(a.mint_phase(), MintPhase::Active);
        assert_eq!(b.treasury_balance(), Decimal::new(1, 1));

        let mut sink = LedgerPayout::new();
        assert_eq!(a.withdraw(&owner, &mut sink).unwrap(), Decimal::new(1, 1));
        assert_eq!(b.treasury_balance(), Decimal::ZERO);
        assert_eq!(b.with(|r| r.events().len()), 3);
    }
}
