//! Error types for the Passmint registry.
//!
//! All errors use the `PM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access guard errors
//! - 2xx: Mint state errors
//! - 3xx: Payment errors
//! - 4xx: Supply errors
//! - 5xx: Lookup errors
//! - 6xx: Treasury errors
//! - 9xx: General / internal errors

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Address, MintPhase, TokenId};

/// Central error enum for all Passmint operations.
#[derive(Debug, Error)]
pub enum PassmintError {
    // =================================================================
    // Access Guard Errors (1xx)
    // =================================================================
    /// The caller is not the current owner (or ownership was renounced).
    #[error("PM_ERR_100: Caller {caller} is not the owner")]
    Unauthorized { caller: Address },

    /// Ownership cannot be handed to the zero address.
    #[error("PM_ERR_101: New owner must be a non-zero address")]
    InvalidNewOwner,

    /// A string could not be parsed into an [`Address`].
    #[error("PM_ERR_102: Invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    // =================================================================
    // Mint State Errors (2xx)
    // =================================================================
    /// Issuance was requested while the mint is not open.
    #[error("PM_ERR_200: Mint not active (phase {phase})")]
    MintNotActive { phase: MintPhase },

    // =================================================================
    // Payment Errors (3xx)
    // =================================================================
    /// The tendered amount is below the unit price.
    #[error("PM_ERR_300: Insufficient payment: need {needed}, tendered {tendered}")]
    InsufficientPayment { needed: Decimal, tendered: Decimal },

    // =================================================================
    // Supply Errors (4xx)
    // =================================================================
    /// Every pass up to the cap has been issued.
    #[error("PM_ERR_400: Max supply of {max_supply} passes reached")]
    MaxSupplyReached { max_supply: u64 },

    // =================================================================
    // Lookup Errors (5xx)
    // =================================================================
    /// The pass was never issued.
    #[error("PM_ERR_500: Token not found: {0}")]
    TokenNotFound(TokenId),

    // =================================================================
    // Treasury Errors (6xx)
    // =================================================================
    /// The external payout transfer failed; the treasury was rolled back.
    #[error("PM_ERR_600: Payout of {amount} to {to} failed: {reason}")]
    PayoutFailed {
        to: Address,
        amount: Decimal,
        reason: String,
    },

    /// Treasury or ledger accounting no longer adds up. Critical alert.
    #[error("PM_ERR_601: Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("PM_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("PM_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Invalid registry configuration.
    #[error("PM_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// A snapshot's digest does not match its contents.
    #[error("PM_ERR_903: Snapshot digest mismatch: expected {expected}, got {actual}")]
    SnapshotDigestMismatch { expected: String, actual: String },

    /// I/O error (disk, network).
    #[error("PM_ERR_904: I/O error: {0}")]
    Io(String),
}

/// Coarse classification of a [`PassmintError`], as surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks the required capability.
    Authorization,
    /// Operation invalid in the current mint state.
    State,
    /// Tendered amount below the unit price.
    InsufficientPayment,
    /// The supply cap has been reached.
    CapacityExceeded,
    /// Query for an identifier never issued.
    NotFound,
    /// Payout failure or accounting violation.
    Treasury,
    /// Configuration, serialization, integrity or I/O failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::State => write!(f, "STATE"),
            Self::InsufficientPayment => write!(f, "INSUFFICIENT_PAYMENT"),
            Self::CapacityExceeded => write!(f, "CAPACITY_EXCEEDED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Treasury => write!(f, "TREASURY"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl PassmintError {
    /// Which class of failure this is.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } | Self::InvalidNewOwner | Self::InvalidAddress { .. } => {
                ErrorKind::Authorization
            }
            Self::MintNotActive { .. } => ErrorKind::State,
            Self::InsufficientPayment { .. } => ErrorKind::InsufficientPayment,
            Self::MaxSupplyReached { .. } => ErrorKind::CapacityExceeded,
            Self::TokenNotFound(_) => ErrorKind::NotFound,
            Self::PayoutFailed { .. } | Self::InvariantViolation { .. } => ErrorKind::Treasury,
            Self::Internal(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::SnapshotDigestMismatch { .. }
            | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PassmintError>;

impl From<std::io::Error> for PassmintError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PassmintError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
