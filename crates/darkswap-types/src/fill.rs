//! Fill records produced by the match pass.
//!
//! A [`Fill`] is the immutable record of one executed match between a
//! maker (the earlier-submitted order) and a taker. Both legs are listed:
//! `maker_amount` of `maker_asset` moved maker → taker, and `taker_amount`
//! of `taker_asset` moved taker → maker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, AssetId, FillId, OrderId, PassId, UserId};

/// One executed match, emitted for downstream auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub id: FillId,
    /// The pass that produced this fill.
    pub pass: PassId,
    /// Position of this fill within its pass (0-based).
    pub sequence: u64,
    pub maker_order: OrderId,
    pub taker_order: OrderId,
    pub maker_user: UserId,
    pub taker_user: UserId,
    /// Asset the maker paid out.
    pub maker_asset: AssetId,
    /// Asset the taker paid out.
    pub taker_asset: AssetId,
    /// Amount of `maker_asset` moved maker → taker.
    pub maker_amount: Amount,
    /// Amount of `taker_asset` moved taker → maker.
    pub taker_amount: Amount,
    pub executed_at: DateTime<Utc>,
}
