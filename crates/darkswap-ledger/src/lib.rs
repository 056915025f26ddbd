//! # darkswap-ledger
//!
//! The balance plane: per-(user, asset) integer balances with
//! solvency-checked debits, atomic transfers, and the supply conservation
//! invariant.
//!
//! The [`Ledger`] is the single source of truth for balances. It never goes
//! negative: every debit checks and subtracts in one step, and a transfer
//! validates both legs before touching either. The ledger is `Clone` so a
//! match pass can work on an isolated snapshot and commit wholesale.

pub mod conservation;
pub mod ledger;

pub use conservation::SupplyConservation;
pub use ledger::Ledger;
