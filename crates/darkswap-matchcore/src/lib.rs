//! # darkswap-matchcore
//!
//! **Pure deterministic matching for darkswap.**
//!
//! Matchcore is the compute plane — it takes a snapshot of the order book
//! and the ledger and produces a [`PassOutcome`]. It has:
//!
//! - **Zero side effects**: the inputs are cloned, the caller commits the
//!   outcome wholesale or not at all
//! - **Deterministic output**: same book + ledger snapshot -> same fills,
//!   including fill ids
//! - **Time priority**: earlier-submitted orders always scan first

pub mod matcher;
pub mod orderbook;

pub use matcher::{PassOutcome, run_pass};
pub use orderbook::OrderBook;
