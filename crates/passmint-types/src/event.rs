//! Externally observable registry events.
//!
//! Every committed state change appends one [`RegistryEvent`] to the
//! registry's log. Rejected or rolled-back calls append nothing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, TokenId};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The owner opened issuance.
    MintStarted,
    /// A pass was created for `holder`.
    PassIssued {
        holder: Address,
        token_id: TokenId,
        paid: Decimal,
    },
    /// The owner role moved. `new_owner` is `None` when it was renounced.
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Option<Address>,
    },
    /// The treasury was paid out.
    Withdrawn { to: Address, amount: Decimal },
}

impl EventKind {
    /// Short upper-case label for log lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::MintStarted => "MINT_STARTED",
            Self::PassIssued { .. } => "PASS_ISSUED",
            Self::OwnershipTransferred { .. } => "OWNERSHIP_TRANSFERRED",
            Self::Withdrawn { .. } => "WITHDRAWN",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One entry in the registry's append-only event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEvent {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    pub kind: EventKind,
    pub emitted_at: DateTime<Utc>,
}

impl RegistryEvent {
    #[must_use]
    pub fn new(sequence: u64, kind: EventKind) -> Self {
        Self {
            sequence,
            kind,
            emitted_at: Utc::now(),
        }
    }
}
