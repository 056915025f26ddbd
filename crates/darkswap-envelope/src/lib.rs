//! # darkswap-envelope
//!
//! The order envelope codec: orders travel to the venue as sealed blobs so
//! the resting book is unreadable to outside observers before settlement —
//! only the holder of the engine's private key can decrypt and act on a
//! submission (front-running resistance).
//!
//! Construction: ephemeral-static X25519 ECDH, HKDF-SHA256 key derivation
//! with a versioned label, AES-256-GCM. Wire layout:
//!
//! ```text
//! eph_pub(32) ‖ nonce(12) ‖ ciphertext+tag
//! ```
//!
//! [`seal`] is the submitting side; [`open`] is the engine side. They
//! round-trip for every valid payload, and any bit flip fails the AEAD tag.

pub mod codec;
pub mod keys;

pub use codec::{OrderPayload, open, seal};
pub use keys::{EnginePublic, EngineSecret};
