//! Identifiers used throughout darkswap.
//!
//! Users and assets are identified by 20-byte chain addresses. Orders use
//! UUIDv7 for time-ordered sorting; fill ids are derived deterministically
//! from (pass, sequence) so a replayed pass yields identical ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DarkswapError, Result};

/// Length in bytes of a chain address (user or asset identifier).
pub const ADDRESS_LEN: usize = 20;

fn parse_address(s: &str) -> Result<[u8; ADDRESS_LEN]> {
    let hex_part = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| DarkswapError::MalformedOrder {
            reason: format!("address missing 0x prefix: {s}"),
        })?;
    let bytes = hex::decode(hex_part).map_err(|_| DarkswapError::MalformedOrder {
        reason: format!("address is not hex: {s}"),
    })?;
    bytes
        .try_into()
        .map_err(|_| DarkswapError::MalformedOrder {
            reason: format!("address must be {ADDRESS_LEN} bytes: {s}"),
        })
}

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Unique identifier for a user: the 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub [u8; ADDRESS_LEN]);

impl UserId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a `0x`-prefixed 40-hex-char address string.
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_address(s).map(Self)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Unique identifier for an asset: the 20-byte token contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetId(pub [u8; ADDRESS_LEN]);

impl AssetId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a `0x`-prefixed 40-hex-char address string.
    pub fn from_hex(s: &str) -> Result<Self> {
        parse_address(s).map(Self)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Globally unique order identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PassId
// ---------------------------------------------------------------------------

/// Monotonically increasing identifier for a match pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PassId(pub u64);

impl PassId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pass:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// FillId
// ---------------------------------------------------------------------------

/// Globally unique fill identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FillId(pub Uuid);

impl FillId {
    /// Deterministic `FillId` from pass id and fill sequence.
    ///
    /// A pass replayed over the same book and ledger snapshot produces the
    /// **exact same** fill ids, which keeps downstream audit streams
    /// deduplicatable.
    #[must_use]
    pub fn deterministic(pass_id: u64, fill_sequence: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"darkswap:fill_id:v1:");
        hasher.update(pass_id.to_le_bytes());
        hasher.update(fill_sequence.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for FillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// External event source identifier: (transaction hash, log index).
///
/// This is the idempotency key at the event-adapter boundary — the chain
/// may redeliver a log, but it never mints two logs with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId {
    pub tx_hash: [u8; 32],
    pub log_index: u32,
}

impl EventId {
    #[must_use]
    pub fn new(tx_hash: [u8; 32], log_index: u32) -> Self {
        Self { tx_hash, log_index }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}:{}", hex::encode(&self.tx_hash[..8]), self.log_index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
