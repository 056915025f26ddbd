//! Supply conservation invariant checker.
//!
//! Invariant enforced after every committed match pass:
//! ```text
//! ∀ asset: Σ(balances) == Σ(deposits) - Σ(withdrawals)
//! ```
//!
//! Matching only moves balances between users; only deposits and
//! withdrawals change an asset's total. If this check ever fails the
//! ledger has been corrupted and the caller must halt intake.

use std::collections::HashMap;

use darkswap_types::{Amount, AssetId, DarkswapError, Result};

/// Tracks cumulative per-asset deposits and withdrawals since genesis.
#[derive(Debug, Clone, Default)]
pub struct SupplyConservation {
    deposits: HashMap<AssetId, Amount>,
    withdrawals: HashMap<AssetId, Amount>,
}

impl SupplyConservation {
    /// Create a new supply conservation tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: HashMap::new(),
            withdrawals: HashMap::new(),
        }
    }

    /// Record a deposit.
    ///
    /// # Errors
    /// `BalanceOverflow` if cumulative deposits would exceed `u128::MAX`.
    pub fn record_deposit(&mut self, asset: AssetId, amount: Amount) -> Result<()> {
        let entry = self.deposits.entry(asset).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(DarkswapError::BalanceOverflow)?;
        Ok(())
    }

    /// Record a withdrawal.
    ///
    /// # Errors
    /// `BalanceOverflow` if cumulative withdrawals would exceed `u128::MAX`.
    pub fn record_withdrawal(&mut self, asset: AssetId, amount: Amount) -> Result<()> {
        let entry = self.withdrawals.entry(asset).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(DarkswapError::BalanceOverflow)?;
        Ok(())
    }

    /// Expected live supply: deposits − withdrawals. `None` if withdrawals
    /// exceed deposits, which is itself a conservation violation.
    #[must_use]
    pub fn expected_supply(&self, asset: AssetId) -> Option<Amount> {
        let deposited = self.deposits.get(&asset).copied().unwrap_or(Amount::ZERO);
        let withdrawn = self
            .withdrawals
            .get(&asset)
            .copied()
            .unwrap_or(Amount::ZERO);
        deposited.checked_sub(withdrawn)
    }

    /// Verify that `actual` (the ledger's live total) matches the expected
    /// supply for `asset`.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` on any mismatch — critical alert.
    pub fn verify(&self, asset: AssetId, actual: Amount) -> Result<()> {
        let Some(expected) = self.expected_supply(asset) else {
            return Err(DarkswapError::SupplyInvariantViolation {
                reason: format!("asset {asset}: withdrawals exceed deposits"),
            });
        };
        if actual != expected {
            return Err(DarkswapError::SupplyInvariantViolation {
                reason: format!("asset {asset}: expected {expected}, ledger holds {actual}"),
            });
        }
        Ok(())
    }
}
