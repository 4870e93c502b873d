//! Issuance ledger: sequential pass ids and holder bookkeeping.
//!
//! Two maps are maintained together:
//! ```text
//! owner_of:   TokenId -> Address   (keys are exactly 1..=token_counter)
//! balance_of: Address -> u64       (Σ values == token_counter)
//! ```
//! Both are only written by [`IssuanceLedger::issue`], after every
//! precondition has passed, so they never diverge.

use std::collections::BTreeMap;

use passmint_types::{Address, PassmintError, Result, TokenId, constants};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::mint_gate::MintGate;
use crate::treasury::Treasury;

/// Sequential pass issuance with a fixed price and supply cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceLedger {
    /// Number of passes issued so far; also the id of the latest pass.
    token_counter: u64,
    max_supply: u64,
    unit_price: Decimal,
    base_uri: String,
    owner_of: BTreeMap<TokenId, Address>,
    balance_of: BTreeMap<Address, u64>,
}

impl IssuanceLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new(base_uri: impl Into<String>, unit_price: Decimal, max_supply: u64) -> Self {
        Self {
            token_counter: 0,
            max_supply,
            unit_price,
            base_uri: base_uri.into(),
            owner_of: BTreeMap::new(),
            balance_of: BTreeMap::new(),
        }
    }

    /// Issue the next pass to `holder`.
    ///
    /// Preconditions, checked in this order:
    /// 1. the mint gate is open
    /// 2. `payment >= unit_price`
    /// 3. the supply cap is not reached
    ///
    /// On success the whole `payment` is credited to `treasury` and the new
    /// id is returned. On failure nothing changes.
    pub fn issue(
        &mut self,
        gate: &MintGate,
        treasury: &mut Treasury,
        holder: Address,
        payment: Decimal,
    ) -> Result<TokenId> {
        gate.check_open()?;

        if payment < self.unit_price {
            return Err(PassmintError::InsufficientPayment {
                needed: self.unit_price,
                tendered: payment,
            });
        }

        if self.token_counter >= self.max_supply {
            return Err(PassmintError::MaxSupplyReached {
                max_supply: self.max_supply,
            });
        }

        // Fallible step first: nothing below can fail.
        treasury.deposit(payment)?;

        self.token_counter += 1;
        let token_id = TokenId(self.token_counter);
        self.owner_of.insert(token_id, holder);
        *self.balance_of.entry(holder).or_insert(0) += 1;

        tracing::debug!(
            token_id = %token_id,
            holder = %holder,
            paid = %payment,
            issued = self.token_counter,
            "Pass issued"
        );
        Ok(token_id)
    }

    /// Whether `token_id` has been issued.
    #[must_use]
    pub fn exists(&self, token_id: TokenId) -> bool {
        token_id.0 >= 1 && token_id.0 <= self.token_counter
    }

    /// Metadata pointer: `base_uri + id + ".json"`.
    pub fn token_uri(&self, token_id: TokenId) -> Result<String> {
        if !self.exists(token_id) {
            return Err(PassmintError::TokenNotFound(token_id));
        }
        Ok(format!(
            "{}{}{}",
            self.base_uri,
            token_id,
            constants::METADATA_SUFFIX
        ))
    }

    /// Holder of an issued pass.
    pub fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        self.owner_of
            .get(&token_id)
            .copied()
            .ok_or(PassmintError::TokenNotFound(token_id))
    }

    /// Number of passes held by `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.balance_of.get(holder).copied().unwrap_or(0)
    }

    /// Number of passes issued so far.
    #[must_use]
    pub fn token_ids(&self) -> u64 {
        self.token_counter
    }

    /// The supply cap.
    #[must_use]
    pub fn max_token_ids(&self) -> u64 {
        self.max_supply
    }

    #[must_use]
    pub fn remaining_supply(&self) -> u64 {
        self.max_supply.saturating_sub(self.token_counter)
    }

    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Distinct holders, in address order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, u64)> {
        self.balance_of.iter().map(|(addr, n)| (addr, *n))
    }

    /// Check the issuance parameters, then that the two maps and the
    /// counter agree.
    ///
    /// # Errors
    /// Returns [`PassmintError::InvariantViolation`] describing the first
    /// disagreement found.
    pub fn verify(&self) -> Result<()> {
        let violation =
            |reason: String| -> Result<()> { Err(PassmintError::InvariantViolation { reason }) };

        if self.base_uri.trim().is_empty() {
            return violation("base_uri is empty".into());
        }
        if self.unit_price < Decimal::ZERO {
            return violation(format!("unit_price {} is negative", self.unit_price));
        }
        if self.max_supply == 0 {
            return violation("max_supply is 0".into());
        }

        if self.token_counter > self.max_supply {
            return violation(format!(
                "token_counter {} exceeds max_supply {}",
                self.token_counter, self.max_supply
            ));
        }

        let issued = u64::try_from(self.owner_of.len()).unwrap_or(u64::MAX);
        if issued != self.token_counter {
            return violation(format!(
                "owner_of has {issued} entries, token_counter is {}",
                self.token_counter
            ));
        }
        for (expected, id) in (1..=self.token_counter).zip(self.owner_of.keys()) {
            if id.0 != expected {
                return violation(format!("token id {expected} missing, found {id}"));
            }
        }

        let mut tally: BTreeMap<Address, u64> = BTreeMap::new();
        for holder in self.owner_of.values() {
            *tally.entry(*holder).or_insert(0) += 1;
        }
        if tally != self.balance_of {
            let total: u64 = self.balance_of.values().sum();
            return violation(format!(
                "balance_of disagrees with owner_of (Σ balance_of = {total}, token_counter = {})",
                self.token_counter
            ));
        }
        Ok(())
    }
}
