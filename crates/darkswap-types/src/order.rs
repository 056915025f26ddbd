//! The standing order: one user's intent to swap `give_amount` of
//! `give_asset` for `take_amount` of `take_asset`.
//!
//! `user` and both assets are immutable once the order is created; only the
//! match pass reduces amounts. An order with either amount at zero is fully
//! filled and must be removed from the book.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, AssetId, OrderId, UserId};

/// An open swap intent, decrypted from a submitted envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The payer: the account whose `give_asset` balance funds this order.
    pub user: UserId,
    pub give_asset: AssetId,
    pub give_amount: Amount,
    pub take_asset: AssetId,
    pub take_amount: Amount,
    /// Submission sequence — earlier orders match first (time priority).
    pub sequence: u64,
    pub accepted_at: DateTime<Utc>,
}

impl Order {
    /// Whether this order and `other` are a crossable bilateral pair:
    /// each side gives exactly what the other takes.
    #[must_use]
    pub fn crosses(&self, other: &Self) -> bool {
        self.give_asset == other.take_asset && self.take_asset == other.give_asset
    }

    /// Fully filled: either amount has reached zero.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.give_amount.is_zero() || self.take_amount.is_zero()
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn open(
        user: UserId,
        give_asset: AssetId,
        give_amount: u128,
        take_asset: AssetId,
        take_amount: u128,
        sequence: u64,
    ) -> Self {
        Self {
            id: OrderId::new(),
            user,
            give_asset,
            give_amount: Amount::new(give_amount),
            take_asset,
            take_amount: Amount::new(take_amount),
            sequence,
            accepted_at: Utc::now(),
        }
    }
}
