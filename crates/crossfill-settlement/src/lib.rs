//! # crossfill-settlement
//!
//! **Finality Plane**: order bookkeeping and fill execution.
//!
//! ## Architecture
//!
//! The [`FillEngine`] receives a signed order and a fill request and:
//! 1. Runs the Security Envelope admission checks (signature, expiry,
//!    replay, allowed sender, feature gate)
//! 2. Resolves both legs through MatchCore (amounts, bounds, rate)
//! 3. Closes the order hash in the [`OrderRegistry`] (at most once)
//! 4. Moves both legs through the [`AssetTransfer`] capability, all or
//!    nothing, re-opening the hash if the transfer fails
//! 5. Appends a [`SettlementEvent`](crossfill_types::SettlementEvent)
//!
//! Storage and transfers are injected, so the same engine runs over the
//! in-memory implementations here or a host ledger.

pub mod engine;
pub mod registry;
pub mod transfer;

pub use engine::FillEngine;
pub use registry::{InMemoryOrderRegistry, OrderRegistry, OrderState};
pub use transfer::{AssetTransfer, InMemoryLedger, Transfer};
