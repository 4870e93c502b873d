//! One-way mint gate.
//!
//! Issuance is closed until the owner opens it. Once open it stays open;
//! opening it again is accepted and changes nothing.

use passmint_types::{Address, MintPhase, PassmintError, Result};
use serde::{Deserialize, Serialize};

use crate::access_guard::AccessGuard;

/// Tracks whether issuance is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintGate {
    phase: MintPhase,
}

impl MintGate {
    /// Create a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: MintPhase::NotStarted,
        }
    }

    #[must_use]
    pub fn phase(&self) -> MintPhase {
        self.phase
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase.is_active()
    }

    /// Open issuance. Owner only.
    ///
    /// Returns `true` if this call opened the gate, `false` if it was
    /// already open.
    pub fn start(&mut self, guard: &AccessGuard, caller: &Address) -> Result<bool> {
        guard.ensure_owner(caller)?;
        if !self.phase.can_transition_to(MintPhase::Active) {
            tracing::debug!(caller = %caller, "Mint already active; start is a no-op");
            return Ok(false);
        }
        self.phase = MintPhase::Active;
        tracing::info!(caller = %caller, "Mint started");
        Ok(true)
    }

    /// Guard an issuance attempt.
    ///
    /// # Errors
    /// Returns [`PassmintError::MintNotActive`] while the gate is closed.
    pub fn check_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(PassmintError::MintNotActive { phase: self.phase })
        }
    }
}
