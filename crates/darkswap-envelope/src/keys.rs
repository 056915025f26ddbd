//! The engine's pre-provisioned X25519 keypair.
//!
//! Distribution and rotation policy live outside this core; [`EngineSecret::generate`]
//! exists for operators and tests.

use std::fmt;

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};

/// The engine-side decryption key. Never logged, never serialized.
#[derive(Clone)]
pub struct EngineSecret(pub(crate) StaticSecret);

impl EngineSecret {
    /// Generate a fresh keypair from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        Self(StaticSecret::random_from_rng(OsRng))
    }

    /// Load a pre-provisioned key.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(StaticSecret::from(bytes))
    }

    /// The matching public key, handed to submitting parties.
    #[must_use]
    pub fn public(&self) -> EnginePublic {
        EnginePublic(PublicKey::from(&self.0))
    }
}

impl fmt::Debug for EngineSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineSecret(..)")
    }
}

/// The submission encryption key: safe to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePublic(pub(crate) PublicKey);

impl EnginePublic {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(PublicKey::from(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}
