//! Overflow-checked integer amounts.
//!
//! Every amount in darkswap is a non-negative integer in the asset's
//! smallest unit. There is deliberately no `Add`/`Sub` impl: all arithmetic
//! goes through the checked methods so overflow and underflow are always
//! surfaced, never wrapped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DarkswapError, Result};

/// A non-negative amount in an asset's smallest unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Amount(pub u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Subtraction clamped at zero. For reductions already bounded by a
    /// `min` (fill amounts); never use this where underflow is an error.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Parse a plain decimal string (the envelope wire format).
    ///
    /// Strictly digits only: signs, whitespace, and separators are all
    /// rejected as [`DarkswapError::MalformedOrder`].
    pub fn from_dec_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DarkswapError::MalformedOrder {
                reason: format!("amount is not a non-negative integer: {s:?}"),
            });
        }
        let raw = s.parse::<u128>().map_err(|_| DarkswapError::MalformedOrder {
            reason: format!("amount out of range: {s:?}"),
        })?;
        Ok(Self(raw))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}
