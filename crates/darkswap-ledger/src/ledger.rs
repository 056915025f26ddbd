//! Balance bookkeeping for the darkswap engine.
//!
//! All mutations are atomic: either the full operation succeeds or the
//! balance map is unchanged. Reads of unseen (user, asset) pairs are zero,
//! never an error.

use std::collections::HashMap;

use darkswap_types::{Amount, AssetId, DarkswapError, Result, UserId};

/// The source of truth for per-(user, asset) balances.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<(UserId, AssetId), Amount>,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Credit a balance.
    ///
    /// # Errors
    /// Returns `BalanceOverflow` if the balance would exceed `u128::MAX`
    /// (unreachable for realistic token supplies, but never wraps).
    pub fn credit(&mut self, user: UserId, asset: AssetId, amount: Amount) -> Result<()> {
        let entry = self.balances.entry((user, asset)).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(DarkswapError::BalanceOverflow)?;
        Ok(())
    }

    /// Debit a balance. Check and subtraction are a single step on one
    /// `&mut` entry — there is no observable intermediate state.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the current balance is below
    /// `amount`; the ledger is unchanged in that case.
    pub fn debit(&mut self, user: UserId, asset: AssetId, amount: Amount) -> Result<()> {
        match self.balances.get_mut(&(user, asset)) {
            Some(entry) => {
                let available = *entry;
                *entry = available
                    .checked_sub(amount)
                    .ok_or(DarkswapError::InsufficientBalance {
                        needed: amount,
                        available,
                    })?;
                Ok(())
            }
            None if amount.is_zero() => Ok(()),
            None => Err(DarkswapError::InsufficientBalance {
                needed: amount,
                available: Amount::ZERO,
            }),
        }
    }

    /// Current balance, defaulting to zero for unseen pairs.
    #[must_use]
    pub fn balance_of(&self, user: UserId, asset: AssetId) -> Amount {
        self.balances
            .get(&(user, asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Move `amount` of `asset` from `from` to `to` as one operation.
    ///
    /// Both legs are validated before either is applied, so a caller can
    /// never observe a debited-but-not-credited state.
    ///
    /// # Errors
    /// `InsufficientBalance` if `from` cannot cover the amount,
    /// `BalanceOverflow` if `to` would overflow. Either way the ledger is
    /// untouched.
    pub fn transfer(
        &mut self,
        from: UserId,
        to: UserId,
        asset: AssetId,
        amount: Amount,
    ) -> Result<()> {
        let from_balance = self.balance_of(from, asset);
        let from_remaining =
            from_balance
                .checked_sub(amount)
                .ok_or(DarkswapError::InsufficientBalance {
                    needed: amount,
                    available: from_balance,
                })?;

        if from == to {
            // Self-transfer nets to zero; solvency was still enforced.
            return Ok(());
        }

        let to_balance = self.balance_of(to, asset);
        let to_new = to_balance
            .checked_add(amount)
            .ok_or(DarkswapError::BalanceOverflow)?;

        self.balances.insert((from, asset), from_remaining);
        self.balances.insert((to, asset), to_new);
        Ok(())
    }

    /// Total live supply of an asset across all users.
    ///
    /// # Errors
    /// `BalanceOverflow` if the sum exceeds `u128::MAX` — impossible while
    /// the conservation invariant holds, but summation stays checked.
    pub fn total_supply(&self, asset: AssetId) -> Result<Amount> {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .try_fold(Amount::ZERO, |acc, (_, amount)| {
                acc.checked_add(*amount)
                    .ok_or(DarkswapError::BalanceOverflow)
            })
    }

    /// Number of (user, asset) entries currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Whether the ledger holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
