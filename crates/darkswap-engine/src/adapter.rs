//! The chain-event adapter: the single path from external events into the
//! core.
//!
//! One callback per chain event. Ordering between callbacks follows
//! delivery order, not issuance order, and delivery is at-least-once —
//! the duplicate-event guard turns redelivery into a rejected call before
//! anything in the core is touched.

use darkswap_types::{ChainEvent, EventId, Fill, OrderId, Result};

use crate::engine::SwapEngine;
use crate::idempotency::EventIdempotency;

/// What an accepted event did to the core.
#[derive(Debug, Clone)]
pub enum EventOutcome {
    /// A deposit or withdrawal was applied to the ledger.
    Applied,
    /// A submission was accepted and the follow-up match pass executed.
    Matched { order: OrderId, fills: Vec<Fill> },
}

/// Translates external chain events into engine calls.
pub struct EventAdapter {
    engine: SwapEngine,
    seen: EventIdempotency,
}

impl EventAdapter {
    /// Wrap an engine; the guard capacity comes from the engine config.
    #[must_use]
    pub fn new(engine: SwapEngine) -> Self {
        let capacity = engine.config().idempotency_cache_size;
        Self {
            engine,
            seen: EventIdempotency::new(capacity),
        }
    }

    /// Process one delivered event as a single indivisible step.
    ///
    /// The event id is recorded on first sight, before any core call:
    /// a redelivered event is rejected even when its first delivery
    /// failed — submission failures are deterministic rejections of that
    /// submission, not grounds for replay.
    ///
    /// # Errors
    /// `DuplicateEvent` on replay; otherwise whatever the underlying
    /// engine operation surfaces. Any error leaves book and ledger as
    /// they were.
    pub fn handle(&mut self, event_id: EventId, event: ChainEvent) -> Result<EventOutcome> {
        if let Err(err) = self.seen.observe(event_id) {
            tracing::warn!(event = %event_id, "duplicate event dropped");
            return Err(err);
        }

        match event {
            ChainEvent::Deposit {
                user,
                asset,
                amount,
            } => {
                self.engine.apply_deposit(user, asset, amount)?;
                Ok(EventOutcome::Applied)
            }
            ChainEvent::Withdraw {
                user,
                asset,
                amount,
            } => {
                self.engine.apply_withdraw(user, asset, amount)?;
                Ok(EventOutcome::Applied)
            }
            ChainEvent::SwapSubmitted { user, envelope } => {
                let order = match self.engine.submit_order(user, &envelope) {
                    Ok(order) => order,
                    Err(err) => {
                        tracing::warn!(event = %event_id, %user, %err, "submission rejected");
                        return Err(err);
                    }
                };
                let fills = self.engine.run_match_pass()?;
                Ok(EventOutcome::Matched { order, fills })
            }
        }
    }

    /// Read access to the wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &SwapEngine {
        &self.engine
    }

    /// Tear down the adapter, returning the engine.
    #[must_use]
    pub fn into_engine(self) -> SwapEngine {
        self.engine
    }
}
