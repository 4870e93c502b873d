//! Treasury: custody of mint payments until the owner withdraws them.
//!
//! Conservation identity, checked by [`Treasury::verify`]:
//! ```text
//! balance == total_received - total_withdrawn
//! ```
//!
//! Withdrawal is two-phase. The balance is zeroed first, then the payout
//! sink is called; if the sink fails the balance is put back, so funds are
//! never both marked spent and unsent.

use passmint_types::{Address, PassmintError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payout::PayoutSink;

/// Accumulated, unspent mint payments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    balance: Decimal,
    total_received: Decimal,
    total_withdrawn: Decimal,
}

impl Treasury {
    /// Create an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balance: Decimal::ZERO,
            total_received: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
        }
    }

    /// Credit a payment.
    ///
    /// # Errors
    /// Returns [`PassmintError::Internal`] if the running totals would
    /// overflow. The treasury is unchanged in that case.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        let balance = self.balance.checked_add(amount);
        let received = self.total_received.checked_add(amount);
        let (Some(balance), Some(received)) = (balance, received) else {
            return Err(PassmintError::Internal(format!(
                "treasury overflow crediting {amount}"
            )));
        };
        self.balance = balance;
        self.total_received = received;
        Ok(())
    }

    /// Pay the whole balance to `to` through `sink`.
    ///
    /// Returns the amount paid. An empty treasury pays `0` without calling
    /// the sink.
    ///
    /// # Errors
    /// Returns [`PassmintError::PayoutFailed`] if the sink fails; the
    /// balance is restored before returning.
    pub fn withdraw_all(&mut self, sink: &mut dyn PayoutSink, to: Address) -> Result<Decimal> {
        let amount = self.balance;
        if amount.is_zero() {
            tracing::debug!(to = %to, "Treasury empty; nothing to withdraw");
            return Ok(Decimal::ZERO);
        }

        // Effects before interaction.
        self.balance = Decimal::ZERO;

        if let Err(err) = sink.send(to, amount) {
            self.balance = amount;
            tracing::error!(
                to = %to,
                amount = %amount,
                error = %err,
                "Payout failed; treasury restored"
            );
            return Err(PassmintError::PayoutFailed {
                to,
                amount,
                reason: err.to_string(),
            });
        }

        self.total_withdrawn += amount;
        tracing::info!(to = %to, amount = %amount, "Treasury withdrawn");
        Ok(amount)
    }

    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    #[must_use]
    pub fn total_received(&self) -> Decimal {
        self.total_received
    }

    #[must_use]
    pub fn total_withdrawn(&self) -> Decimal {
        self.total_withdrawn
    }

    /// Verify the conservation identity.
    ///
    /// # Errors
    /// Returns [`PassmintError::InvariantViolation`] if it does not hold or
    /// any of the three amounts is negative.
    pub fn verify(&self) -> Result<()> {
        for (field, value) in [
            ("balance", self.balance),
            ("total_received", self.total_received),
            ("total_withdrawn", self.total_withdrawn),
        ] {
            if value < Decimal::ZERO {
                return Err(PassmintError::InvariantViolation {
                    reason: format!("treasury {field} {value} is negative"),
                });
            }
        }
        let Some(expected) = self.total_received.checked_sub(self.total_withdrawn) else {
            return Err(PassmintError::InvariantViolation {
                reason: format!(
                    "treasury totals overflow (received={}, withdrawn={})",
                    self.total_received, self.total_withdrawn
                ),
            });
        };
        if self.balance != expected {
            return Err(PassmintError::InvariantViolation {
                reason: format!(
                    "treasury balance {} != expected {expected} \
                     (received={}, withdrawn={})",
                    self.balance, self.total_received, self.total_withdrawn,
                ),
            });
        }
        Ok(())
    }
}
