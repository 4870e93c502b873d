//! Payout port: the external fund transfer used by withdrawals.
//!
//! The registry never moves funds itself. `withdraw` hands the amount to a
//! [`PayoutSink`] supplied by the host; if the sink fails, the treasury is
//! restored.

use std::collections::BTreeMap;

use passmint_types::{Address, Result};
use rust_decimal::Decimal;

/// Destination-side transfer of withdrawn funds.
pub trait PayoutSink {
    /// Move `amount` to `to`. An `Err` aborts the withdrawal.
    fn send(&mut self, to: Address, amount: Decimal) -> Result<()>;
}

/// In-memory sink that records what each address has been paid.
#[derive(Debug, Default, Clone)]
pub struct LedgerPayout {
    credited: BTreeMap<Address, Decimal>,
    transfers: usize,
}

impl LedgerPayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total received by `to` so far.
    #[must_use]
    pub fn credited(&self, to: &Address) -> Decimal {
        self.credited.get(to).copied().unwrap_or(Decimal::ZERO)
    }

    /// Number of successful transfers.
    #[must_use]
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// Sum over every destination.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.credited.values().copied().sum()
    }
}

impl PayoutSink for LedgerPayout {
    fn send(&mut self, to: Address, amount: Decimal) -> Result<()> {
        *self.credited.entry(to).or_insert(Decimal::ZERO) += amount;
        self.transfers += 1;
        Ok(())
    }
}
