//! External chain events consumed by the event adapter.
//!
//! These mirror the three contract log shapes the upstream listener
//! extracts: Deposit, Withdraw, and Swap submission. The core does not
//! validate them beyond type and shape.

use serde::{Deserialize, Serialize};

use crate::{Amount, AssetId, Envelope, UserId};

/// One external chain event, as delivered to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainEvent {
    /// On-chain deposit credited to the venue contract.
    Deposit {
        user: UserId,
        asset: AssetId,
        amount: Amount,
    },
    /// On-chain withdrawal from the venue contract.
    Withdraw {
        user: UserId,
        asset: AssetId,
        amount: Amount,
    },
    /// A sealed order submission.
    SwapSubmitted { user: UserId, envelope: Envelope },
}
