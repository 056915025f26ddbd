//! # darkswap-engine
//!
//! The engine facade and the chain-event adapter — the only surface the
//! rest of the system calls.
//!
//! ## Architecture
//!
//! ```text
//! chain log → EventAdapter.handle(event_id, event)
//!               ├─ duplicate-event guard (idempotency key = event id)
//!               ├─ Deposit/Withdraw → SwapEngine → Ledger
//!               └─ SwapSubmitted    → SwapEngine: open envelope,
//!                                      insert order, run match pass
//! ```
//!
//! Every engine method takes `&mut self` and applies as one indivisible
//! step: the core is logically single-threaded, and callers that need
//! cross-thread access serialize through a mutex around the whole engine
//! (one deposit/withdraw/pass completes fully before the next begins).

pub mod adapter;
pub mod engine;
pub mod idempotency;

pub use adapter::{EventAdapter, EventOutcome};
pub use engine::SwapEngine;
pub use idempotency::EventIdempotency;
