//! Mask and shift helpers shared by the packed-word codecs.

use alloy_primitives::U256;

/// `(1 << bits) - 1` as a 256-bit mask.
pub(crate) fn low_mask(bits: usize) -> U256 {
    if bits >= 256 {
        U256::MAX
    } else {
        (U256::from(1u8) << bits) - U256::from(1u8)
    }
}

pub(crate) fn read_field(word: U256, offset: usize, bits: usize) -> U256 {
    (word >> offset) & low_mask(bits)
}

pub(crate) fn write_field(word: U256, offset: usize, bits: usize, value: U256) -> U256 {
    let mask = low_mask(bits) << offset;
    (word & !mask) | ((value << offset) & mask)
}

pub(crate) fn write_flag(word: U256, bit: usize, on: bool) -> U256 {
    let mut out = word;
    out.set_bit(bit, on);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_mask_edges() {
        assert_eq!(low_mask(0), U256::ZERO);
        assert_eq!(low_mask(1), U256::from(1u8));
        assert_eq!(low_mask(40), U256::from((1u64 << 40) - 1));
        assert_eq!(low_mask(256), U256::MAX);
    }

    #[test]
    fn write_field_leaves_neighbours_alone() {
        let word = U256::MAX;
        let out = write_field(word, 8, 8, U256::ZERO);
        assert_eq!(read_field(out, 8, 8), U256::ZERO);
        assert_eq!(read_field(out, 0, 8), low_mask(8));
        assert_eq!(read_field(out, 16, 8), low_mask(8));
    }

    #[test]
    fn write_field_truncates_wide_values() {
        let out = write_field(U256::ZERO, 4, 4, U256::from(0xFFu8));
        assert_eq!(out, U256::from(0xF0u8));
    }

    #[test]
    fn write_flag_sets_and_clears() {
        let on = write_flag(U256::ZERO, 255, true);
        assert!(on.bit(255));
        assert_eq!(write_flag(on, 255, false), U256::ZERO);
    }
}
