//! The engine facade: the four operations the core exposes.
//!
//! Owns the ledger, the book, the conservation tracker, and the
//! pre-provisioned decryption key. Every operation either fully succeeds
//! or leaves state exactly as before the call:
//!
//! - deposits and withdrawals mutate the ledger directly (withdraw
//!   surfaces `InsufficientBalance` — an external reconciliation error,
//!   never swallowed);
//! - a submission is opened, checked against the claimed payer, and
//!   inserted; a rejected submission touches nothing;
//! - a match pass runs on snapshots, is conservation-checked, and only
//!   then committed wholesale.

use std::collections::BTreeSet;

use chrono::Utc;
use darkswap_envelope::{EnginePublic, EngineSecret, open};
use darkswap_ledger::{Ledger, SupplyConservation};
use darkswap_matchcore::{OrderBook, run_pass};
use darkswap_types::{
    Amount, AssetId, DarkswapError, EngineConfig, Envelope, Fill, Order, OrderId, PassId, Result,
    UserId,
};

/// The confidential swap engine core.
pub struct SwapEngine {
    config: EngineConfig,
    secret: EngineSecret,
    ledger: Ledger,
    book: OrderBook,
    supply: SupplyConservation,
    /// Next submission sequence (time-priority tie-break).
    next_sequence: u64,
    /// Next match pass id.
    next_pass: PassId,
}

impl SwapEngine {
    /// Create an engine around a pre-provisioned keypair.
    #[must_use]
    pub fn new(secret: EngineSecret, config: EngineConfig) -> Self {
        Self {
            config,
            secret,
            ledger: Ledger::new(),
            book: OrderBook::new(),
            supply: SupplyConservation::new(),
            next_sequence: 0,
            next_pass: PassId(0),
        }
    }

    /// The public key submitting parties seal envelopes to.
    #[must_use]
    pub fn public_key(&self) -> EnginePublic {
        self.secret.public()
    }

    /// Credit an on-chain deposit to the ledger.
    pub fn apply_deposit(&mut self, user: UserId, asset: AssetId, amount: Amount) -> Result<()> {
        self.ledger.credit(user, asset, amount)?;
        if let Err(err) = self.supply.record_deposit(asset, amount) {
            // Roll the credit back; the funds were just added, so the
            // debit cannot fail.
            self.ledger.debit(user, asset, amount)?;
            return Err(err);
        }
        tracing::info!(%user, %asset, %amount, "deposit applied");
        Ok(())
    }

    /// Debit an on-chain withdrawal from the ledger.
    ///
    /// # Errors
    /// Propagates `InsufficientBalance` when the chain allowed a
    /// withdrawal the ledger cannot honor — a reconciliation error the
    /// caller must surface.
    pub fn apply_withdraw(&mut self, user: UserId, asset: AssetId, amount: Amount) -> Result<()> {
        self.ledger.debit(user, asset, amount)?;
        if let Err(err) = self.supply.record_withdrawal(asset, amount) {
            self.ledger.credit(user, asset, amount)?;
            return Err(err);
        }
        tracing::info!(%user, %asset, %amount, "withdrawal applied");
        Ok(())
    }

    /// Open a sealed submission and insert the order into the book.
    ///
    /// # Errors
    /// `EnvelopeTooLarge`, `DecryptionFailed`, `MalformedOrder`, or
    /// `UserMismatch` — all reject this submission only; book and ledger
    /// are untouched.
    pub fn submit_order(&mut self, claimed: UserId, envelope: &Envelope) -> Result<OrderId> {
        if envelope.len() > self.config.max_envelope_bytes {
            return Err(DarkswapError::EnvelopeTooLarge {
                len: envelope.len(),
                max: self.config.max_envelope_bytes,
            });
        }

        let payload = open(envelope, &self.secret)?;
        if payload.user != claimed {
            return Err(DarkswapError::UserMismatch {
                claimed,
                payer: payload.user,
            });
        }

        let order = Order {
            id: OrderId::new(),
            user: payload.user,
            give_asset: payload.give_asset,
            give_amount: payload.give_amount,
            take_asset: payload.take_asset,
            take_amount: payload.take_amount,
            sequence: self.next_sequence,
            accepted_at: Utc::now(),
        };
        self.next_sequence += 1;

        tracing::info!(
            order = %order.id,
            user = %order.user,
            sequence = order.sequence,
            "order accepted into book"
        );
        let id = order.id;
        self.book.insert(order);
        Ok(id)
    }

    /// Run one match pass and commit the result.
    ///
    /// The pass works on snapshots; the outcome is conservation-checked
    /// for every asset the fills touched and only then committed, so a
    /// violated invariant leaves the engine on its pre-pass state.
    ///
    /// An empty fill list is a normal outcome, not an error.
    pub fn run_match_pass(&mut self) -> Result<Vec<Fill>> {
        let pass = self.next_pass;
        let outcome = run_pass(pass, &self.book, &self.ledger);

        let mut touched: BTreeSet<AssetId> = BTreeSet::new();
        for fill in &outcome.fills {
            touched.insert(fill.maker_asset);
            touched.insert(fill.taker_asset);
        }
        for asset in touched {
            let actual = outcome.ledger.total_supply(asset)?;
            self.supply.verify(asset, actual)?;
        }

        self.book = outcome.book;
        self.ledger = outcome.ledger;
        self.next_pass = pass.next();
        Ok(outcome.fills)
    }

    /// Current balance for a (user, asset) pair; zero when unseen.
    #[must_use]
    pub fn balance_of(&self, user: UserId, asset: AssetId) -> Amount {
        self.ledger.balance_of(user, asset)
    }

    /// The open orders, oldest first.
    #[must_use]
    pub fn open_orders(&self) -> &[Order] {
        self.book.orders()
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
