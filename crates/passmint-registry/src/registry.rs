//! The registry aggregate.
//!
//! [`PassRegistry`] wires the four components together over one piece of
//! state and exposes the public operations. Every mutating operation either
//! commits fully and appends one event, or returns an error with the state
//! untouched.
//!
//! ```text
//! start_mint ──▶ AccessGuard ──▶ MintGate
//! mint_pass  ──▶ MintGate ──▶ IssuanceLedger ──▶ Treasury.deposit
//! withdraw   ──▶ AccessGuard ──▶ Treasury.withdraw_all ──▶ PayoutSink
//! ```

use passmint_types::{
    Address, EventKind, MintPhase, PassmintError, RegistryConfig, RegistryEvent, Result, TokenId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::access_guard::AccessGuard;
use crate::issuance_ledger::IssuanceLedger;
use crate::mint_gate::MintGate;
use crate::payout::PayoutSink;
use crate::treasury::Treasury;

/// Persisted state of a registry. This is exactly what a snapshot stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    pub name: String,
    pub payee: Option<Address>,
    pub access: AccessGuard,
    pub mint: MintGate,
    pub ledger: IssuanceLedger,
    pub treasury: Treasury,
    /// Sequence number the next emitted event will carry.
    #[serde(default)]
    pub next_sequence: u64,
}

impl RegistryState {
    /// Cross-component invariants.
    pub fn verify(&self) -> Result<()> {
        if self.payee.is_some_and(|p| p.is_zero()) {
            return Err(PassmintError::InvariantViolation {
                reason: "payee is the zero address".into(),
            });
        }
        self.ledger.verify()?;
        self.treasury.verify()?;
        if self.ledger.token_ids() > 0 && !self.mint.is_open() {
            return Err(PassmintError::InvariantViolation {
                reason: format!(
                    "{} passes issued while mint is {}",
                    self.ledger.token_ids(),
                    self.mint.phase()
                ),
            });
        }
        if self.ledger.token_ids() == 0 && !self.treasury.total_received().is_zero() {
            return Err(PassmintError::InvariantViolation {
                reason: "treasury received funds but no pass was issued".into(),
            });
        }
        Ok(())
    }
}

/// A capped-supply pass issuance registry.
#[derive(Debug)]
pub struct PassRegistry {
    state: RegistryState,
    events: Vec<RegistryEvent>,
}

impl PassRegistry {
    /// Create a registry owned by `owner`.
    ///
    /// # Errors
    /// - `Configuration` if `config` fails validation
    /// - `InvalidNewOwner` if `owner` is the zero address
    pub fn new(owner: Address, config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let access = AccessGuard::new(owner)?;
        tracing::info!(
            owner = %owner,
            name = %config.name,
            base_uri = %config.base_uri,
            unit_price = %config.unit_price,
            max_supply = config.max_supply,
            "Registry created"
        );
        Ok(Self {
            state: RegistryState {
                name: config.name,
                payee: config.payee,
                access,
                mint: MintGate::new(),
                ledger: IssuanceLedger::new(config.base_uri, config.unit_price, config.max_supply),
                treasury: Treasury::new(),
                next_sequence: 0,
            },
            events: Vec::new(),
        })
    }

    /// Rebuild a registry from previously persisted state. The event log
    /// starts empty; sequence numbers continue from the persisted state.
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the state is inconsistent or holds
    /// parameters a new registry would refuse (zero payee, negative price,
    /// zero supply cap, empty base URI).
    pub fn from_state(state: RegistryState) -> Result<Self> {
        state.verify()?;
        Ok(Self {
            state,
            events: Vec::new(),
        })
    }

    fn emit(&mut self, kind: EventKind) {
        let sequence = self.state.next_sequence;
        self.state.next_sequence += 1;
        tracing::debug!(sequence, event = %kind, "Event emitted");
        self.events.push(RegistryEvent::new(sequence, kind));
    }

    // -----------------------------------------------------------------
    // Administrative operations
    // -----------------------------------------------------------------

    /// Open issuance. Owner only; a second call is a no-op.
    pub fn start_mint(&mut self, caller: &Address) -> Result<()> {
        if self.state.mint.start(&self.state.access, caller)? {
            self.emit(EventKind::MintStarted);
        }
        Ok(())
    }

    /// Pay the whole treasury to the payee (or the owner if none was
    /// configured). Owner only. Returns the amount paid.
    pub fn withdraw(&mut self, caller: &Address, sink: &mut dyn PayoutSink) -> Result<Decimal> {
        self.state.access.ensure_owner(caller)?;
        let to = self.payout_destination()?;
        let amount = self.state.treasury.withdraw_all(sink, to)?;
        if !amount.is_zero() {
            self.emit(EventKind::Withdrawn { to, amount });
        }
        Ok(amount)
    }

    /// Hand the owner role to `new_owner`. Owner only.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: Address) -> Result<()> {
        let previous_owner = self.state.access.transfer_ownership(caller, new_owner)?;
        self.emit(EventKind::OwnershipTransferred {
            previous_owner,
            new_owner: Some(new_owner),
        });
        Ok(())
    }

    /// Give up the owner role permanently. Owner only.
    pub fn renounce_ownership(&mut self, caller: &Address) -> Result<()> {
        let previous_owner = self.state.access.renounce_ownership(caller)?;
        self.emit(EventKind::OwnershipTransferred {
            previous_owner,
            new_owner: None,
        });
        Ok(())
    }

    // -----------------------------------------------------------------
    // Issuance
    // -----------------------------------------------------------------

    /// Issue the next pass to `caller` for `payment`.
    ///
    /// # Errors
    /// In precedence order: `MintNotActive`, `InsufficientPayment`,
    /// `MaxSupplyReached`.
    pub fn mint_pass(&mut self, caller: Address, payment: Decimal) -> Result<TokenId> {
        let state = &mut self.state;
        let token_id = state
            .ledger
            .issue(&state.mint, &mut state.treasury, caller, payment)?;
        self.emit(EventKind::PassIssued {
            holder: caller,
            token_id,
            paid: payment,
        });
        Ok(token_id)
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    pub fn token_uri(&self, token_id: TokenId) -> Result<String> {
        self.state.ledger.token_uri(token_id)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        self.state.ledger.owner_of(token_id)
    }

    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.state.ledger.balance_of(holder)
    }

    /// Passes issued so far.
    #[must_use]
    pub fn token_ids(&self) -> u64 {
        self.state.ledger.token_ids()
    }

    /// Supply cap.
    #[must_use]
    pub fn max_token_ids(&self) -> u64 {
        self.state.ledger.max_token_ids()
    }

    /// Current owner, `None` once renounced.
    #[must_use]
    pub fn owner(&self) -> Option<Address> {
        self.state.access.owner()
    }

    #[must_use]
    pub fn payee(&self) -> Option<Address> {
        self.state.payee
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        self.state.ledger.base_uri()
    }

    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.state.ledger.unit_price()
    }

    #[must_use]
    pub fn mint_phase(&self) -> MintPhase {
        self.state.mint.phase()
    }

    #[must_use]
    pub fn is_mint_active(&self) -> bool {
        self.state.mint.is_open()
    }

    #[must_use]
    pub fn treasury_balance(&self) -> Decimal {
        self.state.treasury.balance()
    }

    #[must_use]
    pub fn treasury(&self) -> &Treasury {
        &self.state.treasury
    }

    #[must_use]
    pub fn ledger(&self) -> &IssuanceLedger {
        &self.state.ledger
    }

    /// Events committed since this instance was created or restored.
    #[must_use]
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Take the event log, leaving it empty. Sequence numbers continue
    /// from where the drained batch ended.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    /// Check every registry invariant.
    pub fn verify_invariants(&self) -> Result<()> {
        self.state.verify()
    }

    fn payout_destination(&self) -> Result<Address> {
        match self.state.payee {
            Some(payee) => Ok(payee),
            None => self.state.access.owner().ok_or_else(|| {
                PassmintError::Internal("owner check passed on a renounced registry".into())
            }),
        }
    }
}
