//! Seal and open order envelopes.
//!
//! The plaintext is the JSON object the submitting side builds:
//!
//! ```json
//! { "user": "0x…", "give": "0x…", "giveAmount": "1000000000000000000",
//!   "take": "0x…", "takeAmount": "500000000000000000" }
//! ```
//!
//! Amounts are decimal strings (smallest unit), addresses are 0x-hex.
//! Failure taxonomy: anything that stops the AEAD from verifying is
//! `DecryptionFailed`; a verified plaintext that does not parse into the
//! required fields is `MalformedOrder`.

use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{Aes256Gcm, KeyInit};
use hkdf::Hkdf;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use x25519_dalek::{EphemeralSecret, PublicKey};

use darkswap_types::{Amount, AssetId, DarkswapError, Envelope, Result, UserId};

use crate::keys::{EnginePublic, EngineSecret};

const EPH_PUB_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Domain-separation label for HKDF; bump the suffix on any format change.
const HKDF_LABEL: &[u8] = b"darkswap-envelope-v1";

/// A decrypted, validated order intent — not yet an [`darkswap_types::Order`]:
/// the engine assigns id and sequence on acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPayload {
    pub user: UserId,
    pub give_asset: AssetId,
    pub give_amount: Amount,
    pub take_asset: AssetId,
    pub take_amount: Amount,
}

/// The JSON shape on the wire.
#[derive(Serialize, Deserialize)]
struct WirePayload {
    user: String,
    give: String,
    #[serde(rename = "giveAmount")]
    give_amount: String,
    take: String,
    #[serde(rename = "takeAmount")]
    take_amount: String,
}

fn derive_key(shared_secret: &[u8; 32]) -> Result<[u8; 32]> {
    let hk = Hkdf::<Sha256>::new(None, shared_secret);
    let mut okm = [0u8; 32];
    hk.expand(HKDF_LABEL, &mut okm)
        .map_err(|_| DarkswapError::Internal("hkdf expand failed".into()))?;
    Ok(okm)
}

fn seal_bytes(plaintext: &[u8], recipient: &EnginePublic) -> Result<Envelope> {
    let eph_secret = EphemeralSecret::random_from_rng(rand::thread_rng());
    let eph_pub = PublicKey::from(&eph_secret);
    let shared = eph_secret.diffie_hellman(&recipient.0);
    let key = derive_key(shared.as_bytes())?;

    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|_| DarkswapError::Internal("aes init failed".into()))?;
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    let ct = cipher
        .encrypt((&nonce).into(), plaintext)
        .map_err(|_| DarkswapError::Internal("envelope encryption failed".into()))?;

    let mut payload = Vec::with_capacity(EPH_PUB_LEN + NONCE_LEN + ct.len());
    payload.extend_from_slice(eph_pub.as_bytes());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ct);
    Ok(Envelope::from_bytes(payload))
}

/// Seal an order payload for the engine. Used by the submitting party; the
/// engine itself only ever [`open`]s, but the two must round-trip.
pub fn seal(payload: &OrderPayload, recipient: &EnginePublic) -> Result<Envelope> {
    let wire = WirePayload {
        user: payload.user.to_string(),
        give: payload.give_asset.to_string(),
        give_amount: payload.give_amount.to_string(),
        take: payload.take_asset.to_string(),
        take_amount: payload.take_amount.to_string(),
    };
    let plaintext =
        serde_json::to_vec(&wire).map_err(|e| DarkswapError::Serialization(e.to_string()))?;
    seal_bytes(&plaintext, recipient)
}

/// Open a sealed envelope with the engine's private key.
///
/// # Errors
/// - `DecryptionFailed` — truncated payload, tampered bytes, wrong key.
/// - `MalformedOrder` — plaintext verified but is not a valid order.
pub fn open(envelope: &Envelope, secret: &EngineSecret) -> Result<OrderPayload> {
    let bytes = envelope.as_bytes();
    if bytes.len() < EPH_PUB_LEN + NONCE_LEN + TAG_LEN {
        return Err(DarkswapError::DecryptionFailed);
    }

    let eph_pub: [u8; EPH_PUB_LEN] = bytes[..EPH_PUB_LEN]
        .try_into()
        .map_err(|_| DarkswapError::DecryptionFailed)?;
    let nonce: [u8; NONCE_LEN] = bytes[EPH_PUB_LEN..EPH_PUB_LEN + NONCE_LEN]
        .try_into()
        .map_err(|_| DarkswapError::DecryptionFailed)?;
    let ct = &bytes[EPH_PUB_LEN + NONCE_LEN..];

    let shared = secret.0.diffie_hellman(&PublicKey::from(eph_pub));
    let key = derive_key(shared.as_bytes())?;
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|_| DarkswapError::Internal("aes init failed".into()))?;
    let plaintext = cipher
        .decrypt((&nonce).into(), ct)
        .map_err(|_| DarkswapError::DecryptionFailed)?;

    parse_payload(&plaintext)
}

fn parse_payload(plaintext: &[u8]) -> Result<OrderPayload> {
    let wire: WirePayload =
        serde_json::from_slice(plaintext).map_err(|e| DarkswapError::MalformedOrder {
            reason: format!("payload is not a valid order object: {e}"),
        })?;

    let payload = OrderPayload {
        user: UserId::from_hex(&wire.user)?,
        give_asset: AssetId::from_hex(&wire.give)?,
        give_amount: Amount::from_dec_str(&wire.give_amount)?,
        take_asset: AssetId::from_hex(&wire.take)?,
        take_amount: Amount::from_dec_str(&wire.take_amount)?,
    };

    if payload.give_amount.is_zero() && payload.take_amount.is_zero() {
        return Err(DarkswapError::MalformedOrder {
            reason: "both amounts are zero".into(),
        });
    }
    Ok(payload)
}
