//! System-wide constants for the darkswap engine.

/// Maximum accepted envelope size in bytes.
///
/// A sealed order is `32 (ephemeral key) + 12 (nonce) + JSON + 16 (tag)`;
/// well-formed submissions sit far below this cap.
pub const DEFAULT_MAX_ENVELOPE_BYTES: usize = 1024;

/// Default capacity of the duplicate-event guard before LRU eviction.
pub const DEFAULT_IDEMPOTENCY_CACHE_SIZE: usize = 65_536;
