//! Mint phase of the registry.
//!
//! ```text
//!   ┌─────────────┐  start_mint (owner)  ┌────────┐
//!   │ NOT_STARTED ├─────────────────────▶│ ACTIVE │
//!   └─────────────┘                      └────────┘
//! ```
//!
//! The transition is one-way. Nothing moves a registry back to
//! `NotStarted`, and starting an already active mint is a no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether issuance is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MintPhase {
    /// Initial phase. Every issuance request is rejected.
    #[default]
    NotStarted,
    /// Issuance is open. Terminal.
    Active,
}

impl MintPhase {
    /// Can this phase move to `target`?
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::NotStarted, Self::Active))
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for MintPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "NOT_STARTED"),
            Self::Active => write!(f, "ACTIVE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        assert_eq!(MintPhase::default(), MintPhase::NotStarted);
        assert!(!MintPhase::default().is_active());
    }

    #[test]
    fn only_forward_transition_allowed() {
        assert!(MintPhase::NotStarted.can_transition_to(MintPhase::Active));
        assert!(!MintPhase::Active.can_transition_to(MintPhase::NotStarted));
        assert!(!MintPhase::Active.can_transition_to(MintPhase::Active));
        assert!(!MintPhase::NotStarted.can_transition_to(MintPhase::NotStarted));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", MintPhase::NotStarted), "NOT_STARTED");
        assert_eq!(format!("{}", MintPhase::Active), "ACTIVE");
    }
}
