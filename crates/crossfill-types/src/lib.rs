//! # crossfill-types
//!
//! Shared types, errors, and configuration for the **Crossfill** settlement
//! core.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Addresses**: [`Address`] (256-bit canonical form, EVM/native codecs)
//! - **Order model**: [`Order`], [`OrderHash`]
//! - **Traits codecs**: [`MakerTraits`], [`TakerTraits`]
//! - **Escrow identity**: [`Timelocks`], [`Stage`], [`Hashlock`], [`Immutables`], [`EscrowId`]
//! - **Results and events**: [`FillResult`], [`SettlementEvent`]
//! - **Configuration**: [`SettlementConfig`], [`EscrowConfig`]
//! - **Errors**: [`CrossfillError`] with `CF_ERR_` prefix codes
//! - **Constants**: encoding widths and defaults

pub mod address;
mod bits;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod immutables;
pub mod maker_traits;
pub mod order;
pub mod taker_traits;
pub mod timelocks;

pub use address::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use immutables::*;
pub use maker_traits::MakerTraits;
pub use order::*;
pub use taker_traits::TakerTraits;
pub use timelocks::*;

// Re-exported so downstream crates and clients share one integer type.
pub use alloy_primitives::U256;

// Constants and bit positions are accessed via their modules
// (not re-exported to avoid name collisions).
