//! Configuration for a darkswap engine instance.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Engine-level tunables. The keypair itself is provisioned separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Envelopes larger than this are rejected before decryption.
    pub max_envelope_bytes: usize,
    /// Capacity of the duplicate-event guard (LRU-evicted beyond this).
    pub idempotency_cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_envelope_bytes: constants::DEFAULT_MAX_ENVELOPE_BYTES,
            idempotency_cache_size: constants::DEFAULT_IDEMPOTENCY_CACHE_SIZE,
        }
    }
}
