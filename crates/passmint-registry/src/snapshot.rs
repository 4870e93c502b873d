//! Registry snapshots.
//!
//! A snapshot is the persisted [`RegistryState`] plus a SHA-256 digest of
//! its canonical JSON encoding:
//! ```text
//! digest = SHA256("passmint:snapshot:v1:" || json(state))
//! ```
//! Maps in the state are ordered, so the encoding and the digest are
//! deterministic. Restoring recomputes the digest and re-checks every
//! registry invariant before handing back a live registry.

use std::path::Path;

use chrono::{DateTime, Utc};
use passmint_types::{PassmintError, Result, constants};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::registry::{PassRegistry, RegistryState};

/// Point-in-time copy of a registry's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Crate version that wrote the snapshot.
    pub version: String,
    pub taken_at: DateTime<Utc>,
    /// Hex-encoded SHA-256 over the domain tag and `state`.
    pub digest: String,
    pub state: RegistryState,
}

/// Digest of a registry state.
pub fn state_digest(state: &RegistryState) -> Result<[u8; 32]> {
    let encoded = serde_json::to_vec(state)?;
    let mut hasher = Sha256::new();
    hasher.update(constants::SNAPSHOT_DOMAIN);
    hasher.update(&encoded);
    Ok(hasher.finalize().into())
}

impl RegistrySnapshot {
    /// Capture the current state of `registry`.
    pub fn capture(registry: &PassRegistry) -> Result<Self> {
        let state = registry.state().clone();
        let digest = hex::encode(state_digest(&state)?);
        tracing::debug!(
            digest = %digest,
            issued = state.ledger.token_ids(),
            "Snapshot captured"
        );
        Ok(Self {
            version: constants::VERSION.to_string(),
            taken_at: Utc::now(),
            digest,
            state,
        })
    }

    /// Whether the stored digest matches the state.
    pub fn verify_digest(&self) -> Result<()> {
        let actual = hex::encode(state_digest(&self.state)?);
        if actual != self.digest {
            return Err(PassmintError::SnapshotDigestMismatch {
                expected: self.digest.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Turn the snapshot back into a live registry.
    ///
    /// # Errors
    /// - `SnapshotDigestMismatch` if the state was altered
    /// - `InvariantViolation` if the state is internally inconsistent
    pub fn restore(self) -> Result<PassRegistry> {
        self.verify_digest()?;
        let registry = PassRegistry::from_state(self.state)?;
        tracing::info!(
            digest = %self.digest,
            issued = registry.token_ids(),
            "Registry restored from snapshot"
        );
        Ok(registry)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as JSON to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a JSON snapshot from `path`. The digest is not checked until
    /// [`RegistrySnapshot::restore`].
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl PassRegistry {
    /// Shorthand for [`RegistrySnapshot::capture`].
    pub fn snapshot(&self) -> Result<RegistrySnapshot> {
        RegistrySnapshot::capture(self)
    }
}
