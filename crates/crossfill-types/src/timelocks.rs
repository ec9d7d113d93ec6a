//! Timelocks: the seven-stage escrow schedule packed into one 256-bit word.
//!
//! ```text
//!  256      224      192      160      128       96       64       32        0
//! ┌────────┬────────┬────────┬────────┬────────┬────────┬────────┬────────┐
//! │deployed│ DstCan │ DstPWd │ DstWd  │ SrcPCa │ SrcCan │ SrcPWd │ SrcWd  │
//! └────────┴────────┴────────┴────────┴────────┴────────┴────────┴────────┘
//! ```
//!
//! Each stage field is a 32-bit offset in seconds relative to the
//! deployment timestamp. The absolute start of a stage is
//! `deployed_at + offset(stage)`.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::bits::{read_field, write_field};
use crate::{CrossfillError, Result};

const STAGE_BITS: usize = 32;
const DEPLOYED_AT_OFFSET: usize = 224;

/// One stage of a cross-chain escrow's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Stage {
    SrcWithdrawal,
    SrcPublicWithdrawal,
    SrcCancellation,
    SrcPublicCancellation,
    DstWithdrawal,
    DstPublicWithdrawal,
    DstCancellation,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Self::SrcWithdrawal,
        Self::SrcPublicWithdrawal,
        Self::SrcCancellation,
        Self::SrcPublicCancellation,
        Self::DstWithdrawal,
        Self::DstPublicWithdrawal,
        Self::DstCancellation,
    ];

    /// Position of this stage's field, in 32-bit slots from bit 0.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    fn bit_offset(self) -> usize {
        self.index() * STAGE_BITS
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SrcWithdrawal => write!(f, "SRC_WITHDRAWAL"),
            Self::SrcPublicWithdrawal => write!(f, "SRC_PUBLIC_WITHDRAWAL"),
            Self::SrcCancellation => write!(f, "SRC_CANCELLATION"),
            Self::SrcPublicCancellation => write!(f, "SRC_PUBLIC_CANCELLATION"),
            Self::DstWithdrawal => write!(f, "DST_WITHDRAWAL"),
            Self::DstPublicWithdrawal => write!(f, "DST_PUBLIC_WITHDRAWAL"),
            Self::DstCancellation => write!(f, "DST_CANCELLATION"),
        }
    }
}

/// Per-stage delays in seconds, before packing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelockOffsets {
    pub src_withdrawal: u32,
    pub src_public_withdrawal: u32,
    pub src_cancellation: u32,
    pub src_public_cancellation: u32,
    pub dst_withdrawal: u32,
    pub dst_public_withdrawal: u32,
    pub dst_cancellation: u32,
}

impl TimelockOffsets {
    #[must_use]
    pub fn get(&self, stage: Stage) -> u32 {
        match stage {
            Stage::SrcWithdrawal => self.src_withdrawal,
            Stage::SrcPublicWithdrawal => self.src_public_withdrawal,
            Stage::SrcCancellation => self.src_cancellation,
            Stage::SrcPublicCancellation => self.src_public_cancellation,
            Stage::DstWithdrawal => self.dst_withdrawal,
            Stage::DstPublicWithdrawal => self.dst_public_withdrawal,
            Stage::DstCancellation => self.dst_cancellation,
        }
    }

    /// Check that the stages open in a usable order.
    ///
    /// - source: withdrawal ≤ public withdrawal < cancellation ≤ public cancellation
    /// - destination: withdrawal ≤ public withdrawal < cancellation
    /// - destination cancellation ≤ source cancellation, so the resolver can
    ///   always recover the destination deposit before the maker refunds
    ///   the source side
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (
                self.src_withdrawal <= self.src_public_withdrawal,
                "src: public withdrawal starts before private withdrawal",
            ),
            (
                self.src_public_withdrawal < self.src_cancellation,
                "src: cancellation starts before public withdrawal",
            ),
            (
                self.src_cancellation <= self.src_public_cancellation,
                "src: public cancellation starts before private cancellation",
            ),
            (
                self.dst_withdrawal <= self.dst_public_withdrawal,
                "dst: public withdrawal starts before private withdrawal",
            ),
            (
                self.dst_public_withdrawal < self.dst_cancellation,
                "dst: cancellation starts before public withdrawal",
            ),
            (
                self.dst_cancellation <= self.src_cancellation,
                "x-chain: dst cancellation starts after src cancellation",
            ),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(CrossfillError::InvalidTimelocks {
                reason: (*reason).to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Packed escrow schedule.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Timelocks(pub U256);

impl Timelocks {
    /// All offsets zero, deployment timestamp set.
    #[must_use]
    pub fn new(deployed_at: u32) -> Self {
        Self(write_field(
            U256::ZERO,
            DEPLOYED_AT_OFFSET,
            STAGE_BITS,
            U256::from(deployed_at),
        ))
    }

    #[must_use]
    pub fn from_offsets(deployed_at: u32, offsets: &TimelockOffsets) -> Self {
        Stage::ALL
            .iter()
            .fold(Self::new(deployed_at), |tl, stage| {
                tl.with_offset(*stage, offsets.get(*stage))
            })
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        self.0
    }

    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    #[must_use]
    pub fn deployed_at(&self) -> u32 {
        read_field(self.0, DEPLOYED_AT_OFFSET, STAGE_BITS).to::<u32>()
    }

    #[must_use]
    pub fn offset(&self, stage: Stage) -> u32 {
        read_field(self.0, stage.bit_offset(), STAGE_BITS).to::<u32>()
    }

    #[must_use]
    pub fn offsets(&self) -> TimelockOffsets {
        TimelockOffsets {
            src_withdrawal: self.offset(Stage::SrcWithdrawal),
            src_public_withdrawal: self.offset(Stage::SrcPublicWithdrawal),
            src_cancellation: self.offset(Stage::SrcCancellation),
            src_public_cancellation: self.offset(Stage::SrcPublicCancellation),
            dst_withdrawal: self.offset(Stage::DstWithdrawal),
            dst_public_withdrawal: self.offset(Stage::DstPublicWithdrawal),
            dst_cancellation: self.offset(Stage::DstCancellation),
        }
    }

    #[must_use]
    pub fn with_offset(self, stage: Stage, offset: u32) -> Self {
        Self(write_field(
            self.0,
            stage.bit_offset(),
            STAGE_BITS,
            U256::from(offset),
        ))
    }

    /// Set the deployment timestamp once. Offsets are preserved.
    ///
    /// # Errors
    /// Returns [`CrossfillError::InvalidTimelocks`] if a timestamp is
    /// already recorded.
    pub fn set_deployed_at(&mut self, deployed_at: u32) -> Result<()> {
        let current = self.deployed_at();
        if current != 0 {
            return Err(CrossfillError::InvalidTimelocks {
                reason: format!("deployment timestamp already set to {current}"),
            });
        }
        self.0 = write_field(
            self.0,
            DEPLOYED_AT_OFFSET,
            STAGE_BITS,
            U256::from(deployed_at),
        );
        Ok(())
    }

    /// Absolute start of `stage`: `deployed_at + offset(stage)`.
    #[must_use]
    pub fn stage_time(&self, stage: Stage) -> u64 {
        u64::from(self.deployed_at()) + u64::from(self.offset(stage))
    }

    /// Time after which anyone may rescue the escrowed funds, independent
    /// of stage offsets.
    ///
    /// # Errors
    /// Returns [`CrossfillError::ArithmeticError`] if the sum overflows.
    pub fn rescue_start(&self, rescue_delay: u64) -> Result<u64> {
        u64::from(self.deployed_at())
            .checked_add(rescue_delay)
            .ok_or(CrossfillError::ArithmeticError {
                op: "rescue_start",
            })
    }

    /// `true` once `now` has reached the start of `stage`.
    #[must_use]
    pub fn has_reached(&self, stage: Stage, now: u64) -> bool {
        now >= self.stage_time(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_offsets() -> TimelockOffsets {
        TimelockOffsets {
            src_withdrawal: 10,
            src_public_withdrawal: 120,
            src_cancellation: 600,
            src_public_cancellation: 900,
            dst_withdrawal: 5,
            dst_public_withdrawal: 100,
            dst_cancellation: 500,
        }
    }

    #[test]
    fn new_zeroes_offsets() {
        let tl = Timelocks::new(1_700_000_000);
        assert_eq!(tl.deployed_at(), 1_700_000_000);
        for stage in Stage::ALL {
            assert_eq!(tl.offset(stage), 0);
            assert_eq!(tl.stage_time(stage), 1_700_000_000);
        }
    }

    #[test]
    fn stage_fields_sit_at_index_times_32() {
        for stage in Stage::ALL {
            let tl = Timelocks::default().with_offset(stage, 1);
            assert_eq!(tl.value(), U256::from(1u8) << (stage.index() * 32));
        }
        let tl = Timelocks::new(1);
        assert_eq!(tl.value(), U256::from(1u8) << 224);
    }

    #[test]
    fn stage_time_adds_offset() {
        let tl = Timelocks::from_offsets(1_000, &sample_offsets());
        assert_eq!(tl.stage_time(Stage::SrcWithdrawal), 1_010);
        assert_eq!(tl.stage_time(Stage::SrcPublicCancellation), 1_900);
        assert_eq!(tl.stage_time(Stage::DstCancellation), 1_500);
        assert_eq!(tl.offsets(), sample_offsets());
    }

    #[test]
    fn max_values_do_not_overflow() {
        let mut offsets = TimelockOffsets::default();
        offsets.dst_cancellation = u32::MAX;
        let tl = Timelocks::from_offsets(u32::MAX, &offsets);
        assert_eq!(
            tl.stage_time(Stage::DstCancellation),
            u64::from(u32::MAX) * 2
        );
        assert_eq!(tl.offset(Stage::DstPublicWithdrawal), 0);
        assert_eq!(tl.deployed_at(), u32::MAX);
    }

    #[test]
    fn rescue_start_ignores_offsets() {
        let tl = Timelocks::from_offsets(1_000, &sample_offsets());
        assert_eq!(tl.rescue_start(86_400).unwrap(), 87_400);
        assert!(tl.rescue_start(u64::MAX).is_err());
    }

    #[test]
    fn set_deployed_at_only_once() {
        let mut tl = Timelocks::from_offsets(0, &sample_offsets());
        tl.set_deployed_at(5_000).unwrap();
        assert_eq!(tl.deployed_at(), 5_000);
        assert_eq!(tl.offsets(), sample_offsets());

        let err = tl.set_deployed_at(6_000).unwrap_err();
        assert!(matches!(err, CrossfillError::InvalidTimelocks { .. }));
        assert_eq!(tl.deployed_at(), 5_000);
    }

    #[test]
    fn has_reached_boundary() {
        let tl = Timelocks::from_offsets(100, &sample_offsets());
        assert!(!tl.has_reached(Stage::SrcCancellation, 699));
        assert!(tl.has_reached(Stage::SrcCancellation, 700));
    }

    #[test]
    fn validate_accepts_sane_schedule() {
        sample_offsets().validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_orderings() {
        let mut o = sample_offsets();
        o.src_public_withdrawal = 5;
        assert!(o.validate().is_err());

        let mut o = sample_offsets();
        o.src_cancellation = o.src_public_withdrawal;
        assert!(o.validate().is_err());

        let mut o = sample_offsets();
        o.dst_cancellation = 700;
        let err = o.validate().unwrap_err();
        assert!(format!("{err}").contains("x-chain"));
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::SrcPublicCancellation.to_string(), "SRC_PUBLIC_CANCELLATION");
        assert_eq!(Stage::DstWithdrawal.to_string(), "DST_WITHDRAWAL");
    }
}
