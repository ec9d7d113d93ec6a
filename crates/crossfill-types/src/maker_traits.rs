//! Maker traits: flags and sub-fields packed into one 256-bit word.
//!
//! ```text
//!  255 254 253 252 251 250 249 248 247      200      160      120       80        0
//! ┌───┬───┬───┬───┬───┬───┬───┬───┬───┬ ... ┬────────┬────────┬────────┬─────────┐
//! │NPF│AMF│ - │PRE│PST│EPC│EXT│P2 │UNW│     │ series │ nonce  │ expiry │ allowed │
//! └───┴───┴───┴───┴───┴───┴───┴───┴───┴ ... ┴────────┴────────┴────────┴─────────┘
//! ```
//!
//! Decoding is a pure function of the integer: any value is a valid (if
//! unusual) traits word and no accessor can fail.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::Address;
use crate::bits::{low_mask, read_field, write_field, write_flag};

pub const NO_PARTIAL_FILLS_FLAG: usize = 255;
pub const ALLOW_MULTIPLE_FILLS_FLAG: usize = 254;
pub const PRE_INTERACTION_CALL_FLAG: usize = 252;
pub const POST_INTERACTION_CALL_FLAG: usize = 251;
pub const NEED_CHECK_EPOCH_MANAGER_FLAG: usize = 250;
pub const HAS_EXTENSION_FLAG: usize = 249;
pub const USE_PERMIT2_FLAG: usize = 248;
pub const UNWRAP_WETH_FLAG: usize = 247;

pub const ALLOWED_SENDER_OFFSET: usize = 0;
pub const ALLOWED_SENDER_BITS: usize = 80;
pub const EXPIRATION_OFFSET: usize = 80;
pub const EXPIRATION_BITS: usize = 40;
pub const NONCE_OR_EPOCH_OFFSET: usize = 120;
pub const NONCE_OR_EPOCH_BITS: usize = 40;
pub const SERIES_OFFSET: usize = 160;
pub const SERIES_BITS: usize = 40;

/// Packed maker configuration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct MakerTraits(pub U256);

impl MakerTraits {
    #[must_use]
    pub fn new() -> Self {
        Self(U256::ZERO)
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        self.0
    }

    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    // --- flags ---

    #[must_use]
    pub fn allows_partial_fills(&self) -> bool {
        !self.0.bit(NO_PARTIAL_FILLS_FLAG)
    }

    #[must_use]
    pub fn allows_multiple_fills(&self) -> bool {
        self.0.bit(ALLOW_MULTIPLE_FILLS_FLAG)
    }

    #[must_use]
    pub fn needs_pre_interaction(&self) -> bool {
        self.0.bit(PRE_INTERACTION_CALL_FLAG)
    }

    #[must_use]
    pub fn needs_post_interaction(&self) -> bool {
        self.0.bit(POST_INTERACTION_CALL_FLAG)
    }

    #[must_use]
    pub fn needs_epoch_check(&self) -> bool {
        self.0.bit(NEED_CHECK_EPOCH_MANAGER_FLAG)
    }

    #[must_use]
    pub fn has_extension(&self) -> bool {
        self.0.bit(HAS_EXTENSION_FLAG)
    }

    #[must_use]
    pub fn uses_permit2(&self) -> bool {
        self.0.bit(USE_PERMIT2_FLAG)
    }

    #[must_use]
    pub fn unwrap_weth(&self) -> bool {
        self.0.bit(UNWRAP_WETH_FLAG)
    }

    // --- sub-fields ---

    /// Low 80 bits of the only address allowed to fill; zero means public.
    #[must_use]
    pub fn allowed_sender(&self) -> U256 {
        read_field(self.0, ALLOWED_SENDER_OFFSET, ALLOWED_SENDER_BITS)
    }

    /// Expiration timestamp in seconds; zero means the order never expires.
    #[must_use]
    pub fn expiration_time(&self) -> u64 {
        read_field(self.0, EXPIRATION_OFFSET, EXPIRATION_BITS).to::<u64>()
    }

    #[must_use]
    pub fn nonce_or_epoch(&self) -> u64 {
        read_field(self.0, NONCE_OR_EPOCH_OFFSET, NONCE_OR_EPOCH_BITS).to::<u64>()
    }

    #[must_use]
    pub fn series(&self) -> u64 {
        read_field(self.0, SERIES_OFFSET, SERIES_BITS).to::<u64>()
    }

    /// An order with expiration `e` may be filled while `now < e`.
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        let expiration = self.expiration_time();
        expiration != 0 && now >= expiration
    }

    /// Public orders accept anyone; private ones compare the low 80 bits
    /// of the candidate's address.
    #[must_use]
    pub fn is_allowed_sender(&self, candidate: &Address) -> bool {
        let allowed = self.allowed_sender();
        allowed.is_zero() || allowed == candidate.value() & low_mask(ALLOWED_SENDER_BITS)
    }

    // --- builders ---

    #[must_use]
    pub fn with_no_partial_fills(self, on: bool) -> Self {
        Self(write_flag(self.0, NO_PARTIAL_FILLS_FLAG, on))
    }

    #[must_use]
    pub fn with_multiple_fills(self, on: bool) -> Self {
        Self(write_flag(self.0, ALLOW_MULTIPLE_FILLS_FLAG, on))
    }

    #[must_use]
    pub fn with_pre_interaction(self, on: bool) -> Self {
        Self(write_flag(self.0, PRE_INTERACTION_CALL_FLAG, on))
    }

    #[must_use]
    pub fn with_post_interaction(self, on: bool) -> Self {
        Self(write_flag(self.0, POST_INTERACTION_CALL_FLAG, on))
    }

    #[must_use]
    pub fn with_epoch_check(self, on: bool) -> Self {
        Self(write_flag(self.0, NEED_CHECK_EPOCH_MANAGER_FLAG, on))
    }

    #[must_use]
    pub fn with_extension(self, on: bool) -> Self {
        Self(write_flag(self.0, HAS_EXTENSION_FLAG, on))
    }

    #[must_use]
    pub fn with_permit2(self, on: bool) -> Self {
        Self(write_flag(self.0, USE_PERMIT2_FLAG, on))
    }

    #[must_use]
    pub fn with_unwrap_weth(self, on: bool) -> Self {
        Self(write_flag(self.0, UNWRAP_WETH_FLAG, on))
    }

    /// Restrict the order to `sender` (only its low 80 bits are stored).
    #[must_use]
    pub fn with_allowed_sender(self, sender: &Address) -> Self {
        Self(write_field(
            self.0,
            ALLOWED_SENDER_OFFSET,
            ALLOWED_SENDER_BITS,
            sender.value(),
        ))
    }

    /// Values wider than 40 bits are truncated.
    #[must_use]
    pub fn with_expiration(self, expiration: u64) -> Self {
        Self(write_field(
            self.0,
            EXPIRATION_OFFSET,
            EXPIRATION_BITS,
            U256::from(expiration),
        ))
    }

    #[must_use]
    pub fn with_nonce_or_epoch(self, nonce: u64) -> Self {
        Self(write_field(
            self.0,
            NONCE_OR_EPOCH_OFFSET,
            NONCE_OR_EPOCH_BITS,
            U256::from(nonce),
        ))
    }

    #[must_use]
    pub fn with_series(self, series: u64) -> Self {
        Self(write_field(self.0, SERIES_OFFSET, SERIES_BITS, U256::from(series)))
    }
}

impl From<U256> for MakerTraits {
    fn from(value: U256) -> Self {
        Self(value)
    }
}
