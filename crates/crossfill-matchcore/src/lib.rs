//! # crossfill-matchcore
//!
//! **Pure fill arithmetic for Crossfill.**
//!
//! MatchCore turns a signed order and a resolver's requested amount into
//! the concrete amounts of both legs. It has:
//!
//! - **Zero side effects**: no registry access, no transfers, no signatures
//! - **Directional rounding**: maker outflow rounds down, taker payment up
//! - **Checked 256-bit arithmetic**: overflow is an error, never a wrap
//! - **Rate integrity**: the implied fill rate must match the order's rate

pub mod amount;
pub mod rate;

pub use amount::{FillAmounts, making_amount_for, resolve_fill_amounts, taking_amount_for};
pub use rate::check_rate;
