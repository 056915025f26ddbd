//! # darkswap-types
//!
//! Shared types, errors, and configuration for the **darkswap**
//! confidential swap engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`AssetId`], [`OrderId`], [`PassId`], [`FillId`], [`EventId`]
//! - **Amounts**: [`Amount`] — overflow-checked smallest-unit integers
//! - **Order model**: [`Order`]
//! - **Fill model**: [`Fill`]
//! - **Envelope**: [`Envelope`] — opaque sealed transport blob
//! - **Chain events**: [`ChainEvent`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`DarkswapError`] with `DS_ERR_` prefix codes

pub mod amount;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod event;
pub mod fill;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use darkswap_types::{Order, Fill, Amount, UserId, ...};

pub use amount::*;
pub use config::*;
pub use envelope::*;
pub use error::*;
pub use event::*;
pub use fill::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `darkswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
