//! Identifiers used throughout Passmint.
//!
//! `Address` is a 20-byte account identity rendered as `0x`-prefixed hex.
//! `TokenId` is the sequential pass number assigned by the issuance ledger.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PassmintError;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Identity of a principal: the registry owner, a payee, or a pass holder.
///
/// The all-zero address is the "no principal" sentinel. It is what the
/// owner slot holds after ownership is renounced and it is never accepted
/// as a new owner or payee.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The zero-address sentinel.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Address whose low 8 bytes hold `n` big-endian. Handy for fixtures.
    #[must_use]
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// First four bytes as hex, for compact log fields.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    /// Random non-zero address for tests.
    pub fn random() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; ADDRESS_LEN];
        loop {
            rand::thread_rng().fill_bytes(&mut bytes);
            if bytes != [0u8; ADDRESS_LEN] {
                return Self(bytes);
            }
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = PassmintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let decoded = hex::decode(digits).map_err(|e| PassmintError::InvalidAddress {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        let bytes: [u8; ADDRESS_LEN] =
            decoded
                .try_into()
                .map_err(|v: Vec<u8>| PassmintError::InvalidAddress {
                    input: s.to_string(),
                    reason: format!("expected {ADDRESS_LEN} bytes, got {}", v.len()),
                })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Sequential pass identifier. The first issued pass is `1`; `0` is never
/// issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
