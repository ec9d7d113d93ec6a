//! Taker traits: per-fill options packed into one 256-bit word.
//!
//! ```text
//!  255 254 253 252 251        248       224       200    185              0
//! ┌───┬───┬───┬───┬───┬ ... ┬─────────┬─────────┬ ... ┬──────────────────┐
//! │MAK│UNW│SKP│P2 │TGT│     │ ext len │ int len │     │ threshold amount │
//! └───┴───┴───┴───┴───┴ ... ┴─────────┴─────────┴ ... ┴──────────────────┘
//! ```

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::bits::{read_field, write_field, write_flag};

pub const MAKER_AMOUNT_FLAG: usize = 255;
pub const TAKER_UNWRAP_WETH_FLAG: usize = 254;
pub const SKIP_ORDER_PERMIT_FLAG: usize = 253;
pub const TAKER_USE_PERMIT2_FLAG: usize = 252;
pub const ARGS_HAS_TARGET_FLAG: usize = 251;

pub const ARGS_EXTENSION_LENGTH_OFFSET: usize = 224;
pub const ARGS_EXTENSION_LENGTH_BITS: usize = 24;
pub const ARGS_INTERACTION_LENGTH_OFFSET: usize = 200;
pub const ARGS_INTERACTION_LENGTH_BITS: usize = 24;
pub const AMOUNT_THRESHOLD_OFFSET: usize = 0;
pub const AMOUNT_THRESHOLD_BITS: usize = 185;

/// Packed taker configuration for a single fill.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct TakerTraits(pub U256);

impl TakerTraits {
    #[must_use]
    pub fn new() -> Self {
        Self(U256::ZERO)
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        self.0
    }

    /// When set, the requested amount is the making amount; otherwise it
    /// is the taking amount.
    #[must_use]
    pub fn wants_making_amount_specified(&self) -> bool {
        self.0.bit(MAKER_AMOUNT_FLAG)
    }

    #[must_use]
    pub fn unwrap_weth(&self) -> bool {
        self.0.bit(TAKER_UNWRAP_WETH_FLAG)
    }

    #[must_use]
    pub fn skips_maker_permit(&self) -> bool {
        self.0.bit(SKIP_ORDER_PERMIT_FLAG)
    }

    #[must_use]
    pub fn uses_permit2(&self) -> bool {
        self.0.bit(TAKER_USE_PERMIT2_FLAG)
    }

    #[must_use]
    pub fn args_have_target(&self) -> bool {
        self.0.bit(ARGS_HAS_TARGET_FLAG)
    }

    /// Maximum acceptable taking amount; zero disables the check.
    #[must_use]
    pub fn threshold_amount(&self) -> U256 {
        read_field(self.0, AMOUNT_THRESHOLD_OFFSET, AMOUNT_THRESHOLD_BITS)
    }

    #[must_use]
    pub fn extension_length(&self) -> u32 {
        read_field(
            self.0,
            ARGS_EXTENSION_LENGTH_OFFSET,
            ARGS_EXTENSION_LENGTH_BITS,
        )
        .to::<u32>()
    }

    #[must_use]
    pub fn interaction_length(&self) -> u32 {
        read_field(
            self.0,
            ARGS_INTERACTION_LENGTH_OFFSET,
            ARGS_INTERACTION_LENGTH_BITS,
        )
        .to::<u32>()
    }

    // --- builders ---

    #[must_use]
    pub fn with_making_amount_specified(self, on: bool) -> Self {
        Self(write_flag(self.0, MAKER_AMOUNT_FLAG, on))
    }

    #[must_use]
    pub fn with_unwrap_weth(self, on: bool) -> Self {
        Self(write_flag(self.0, TAKER_UNWRAP_WETH_FLAG, on))
    }

    #[must_use]
    pub fn with_skip_maker_permit(self, on: bool) -> Self {
        Self(write_flag(self.0, SKIP_ORDER_PERMIT_FLAG, on))
    }

    #[must_use]
    pub fn with_permit2(self, on: bool) -> Self {
        Self(write_flag(self.0, TAKER_USE_PERMIT2_FLAG, on))
    }

    #[must_use]
    pub fn with_target(self, on: bool) -> Self {
        Self(write_flag(self.0, ARGS_HAS_TARGET_FLAG, on))
    }

    /// Values wider than 185 bits are truncated.
    #[must_use]
    pub fn with_threshold(self, threshold: U256) -> Self {
        Self(write_field(
            self.0,
            AMOUNT_THRESHOLD_OFFSET,
            AMOUNT_THRESHOLD_BITS,
            threshold,
        ))
    }

    #[must_use]
    pub fn with_extension_length(self, len: u32) -> Self {
        Self(write_field(
            self.0,
            ARGS_EXTENSION_LENGTH_OFFSET,
            ARGS_EXTENSION_LENGTH_BITS,
            U256::from(len),
        ))
    }

    #[must_use]
    pub fn with_interaction_length(self, len: u32) -> Self {
        Self(write_field(
            self.0,
            ARGS_INTERACTION_LENGTH_OFFSET,
            ARGS_INTERACTION_LENGTH_BITS,
            U256::from(len),
        ))
    }
}

impl From<U256> for TakerTraits {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::low_mask;

    const MAX24: u32 = (1 << 24) - 1;

    #[test]
    fn zero_traits_defaults() {
        let t = TakerTraits::new();
        assert!(!t.wants_making_amount_specified());
        assert!(!t.unwrap_weth());
        assert!(!t.skips_maker_permit());
        assert!(!t.uses_permit2());
        assert!(!t.args_have_target());
        assert_eq!(t.threshold_amount(), U256::ZERO);
        assert_eq!(t.extension_length(), 0);
        assert_eq!(t.interaction_length(), 0);
    }

    #[test]
    fn max_traits() {
        let t = TakerTraits(U256::MAX);
        assert!(t.wants_making_amount_specified());
        assert!(t.unwrap_weth());
        assert!(t.skips_maker_permit());
        assert!(t.uses_permit2());
        assert!(t.args_have_target());
        assert_eq!(t.threshold_amount(), low_mask(185));
        assert_eq!(t.extension_length(), MAX24);
        assert_eq!(t.interaction_length(), MAX24);
    }

    #[test]
    fn each_flag_is_isolated() {
        type Setter = fn(TakerTraits, bool) -> TakerTraits;
        type Getter = fn(&TakerTraits) -> bool;
        let cases: [(usize, Setter, Getter); 5] = [
            (
                MAKER_AMOUNT_FLAG,
                TakerTraits::with_making_amount_specified,
                TakerTraits::wants_making_amount_specified,
            ),
            (TAKER_UNWRAP_WETH_FLAG, TakerTraits::with_unwrap_weth, TakerTraits::unwrap_weth),
            (
                SKIP_ORDER_PERMIT_FLAG,
                TakerTraits::with_skip_maker_permit,
                TakerTraits::skips_maker_permit,
            ),
            (TAKER_USE_PERMIT2_FLAG, TakerTraits::with_permit2, TakerTraits::uses_permit2),
            (ARGS_HAS_TARGET_FLAG, TakerTraits::with_target, TakerTraits::args_have_target),
        ];
        for (bit, set, get) in cases {
            let t = set(TakerTraits::new(), true);
            assert_eq!(t.value(), U256::from(1u8) << bit, "bit {bit}");
            assert!(get(&t));
            assert!(!get(&set(t, false)));
            assert_eq!(t.threshold_amount(), U256::ZERO);
            assert_eq!(t.extension_length(), 0);
        }
    }

    #[test]
    fn lengths_roundtrip_and_stay_disjoint() {
        for v in [0, 1, 0xABCD, MAX24] {
            let t = TakerTraits::new().with_extension_length(v);
            assert_eq!(t.extension_length(), v);
            assert_eq!(t.interaction_length(), 0);
            assert_eq!(t.threshold_amount(), U256::ZERO);

            let t = TakerTraits::new().with_interaction_length(v);
            assert_eq!(t.interaction_length(), v);
            assert_eq!(t.extension_length(), 0);
            assert!(!t.args_have_target());
        }
    }

    #[test]
    fn threshold_roundtrip_at_boundaries() {
        let max = low_mask(185);
        for v in [U256::ZERO, U256::from(1u8), U256::from(500_000_000u64), max] {
            let t = TakerTraits::new()
                .with_making_amount_specified(true)
                .with_threshold(v);
            assert_eq!(t.threshold_amount(), v);
            assert!(t.wants_making_amount_specified());
            assert_eq!(t.interaction_length(), 0);
        }
        // bit 185 does not leak into the threshold
        let t = TakerTraits::new().with_threshold(max + U256::from(1u8));
        assert_eq!(t.threshold_amount(), U256::ZERO);
    }
}
