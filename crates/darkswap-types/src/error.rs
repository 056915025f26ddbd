//! Error types for the darkswap engine.
//!
//! All errors use the `DS_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Submission errors (reject that submission only)
//! - 2xx: Balance / ledger errors
//! - 3xx: Event adapter errors
//! - 9xx: General / internal errors
//!
//! No error here is fatal: every operation either fully succeeds or leaves
//! state exactly as it was before the call.

use thiserror::Error;

use crate::{Amount, EventId, UserId};

/// Central error enum for all darkswap operations.
#[derive(Debug, Error)]
pub enum DarkswapError {
    // =================================================================
    // Submission Errors (1xx)
    // =================================================================
    /// The envelope did not decrypt: tampered, truncated, or wrong key.
    #[error("DS_ERR_100: envelope decryption failed")]
    DecryptionFailed,

    /// The decrypted bytes do not parse into a valid order.
    #[error("DS_ERR_101: malformed order: {reason}")]
    MalformedOrder { reason: String },

    /// The submitting user does not match the payer inside the envelope.
    #[error("DS_ERR_102: user mismatch: submitted by {claimed}, order payer is {payer}")]
    UserMismatch { claimed: UserId, payer: UserId },

    /// The envelope exceeds the configured size cap.
    #[error("DS_ERR_103: envelope too large: {len} bytes (max {max})")]
    EnvelopeTooLarge { len: usize, max: usize },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the debit.
    #[error("DS_ERR_200: insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// A credit would overflow the balance type.
    #[error("DS_ERR_201: balance overflow")]
    BalanceOverflow,

    /// Supply conservation invariant violated — critical safety alert.
    #[error("DS_ERR_202: supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Event Adapter Errors (3xx)
    // =================================================================
    /// This external event id was already processed.
    #[error("DS_ERR_300: duplicate event: {0}")]
    DuplicateEvent(EventId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("DS_ERR_900: internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("DS_ERR_901: serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DarkswapError>;
