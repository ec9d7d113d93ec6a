//! Order model: the signed maker intent, its canonical encoding and hash.
//!
//! An [`Order`] has no lifecycle of its own. It is built and signed
//! off-chain, then consumed by exactly one fill or cancel. The
//! [`OrderHash`] is both the message the maker signs and the key under
//! which the registry records the order as closed.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{CANONICAL_ORDER_LEN, ORDER_HASH_LEN, WORD_LEN};
use crate::{Address, CrossfillError, MakerTraits, Result};

// ---------------------------------------------------------------------------
// OrderHash
// ---------------------------------------------------------------------------

/// SHA-256 of an order's canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderHash(pub [u8; ORDER_HASH_LEN]);

impl OrderHash {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ORDER_HASH_LEN] {
        &self.0
    }

    /// First four bytes in hex, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl TryFrom<&[u8]> for OrderHash {
    type Error = CrossfillError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; ORDER_HASH_LEN] =
            bytes
                .try_into()
                .map_err(|_| CrossfillError::DecodeError {
                    reason: format!(
                        "order hash is {} bytes, expected {ORDER_HASH_LEN}",
                        bytes.len()
                    ),
                })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for OrderHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// A maker's signed offer: give `making_amount` of `maker_asset` for
/// `taking_amount` of `taker_asset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub salt: U256,
    pub maker: Address,
    /// Recipient of the taker's asset. Zero means the maker.
    pub receiver: Address,
    pub maker_asset: Address,
    pub taker_asset: Address,
    pub making_amount: U256,
    pub taking_amount: U256,
    pub maker_traits: MakerTraits,
}

impl Order {
    /// Canonical encoding: eight 32-byte big-endian words in field order.
    ///
    /// Format: `salt || maker || receiver || maker_asset || taker_asset ||
    /// making_amount || taking_amount || maker_traits`
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let words: [[u8; WORD_LEN]; 8] = [
            self.salt.to_be_bytes::<32>(),
            self.maker.to_be_bytes(),
            self.receiver.to_be_bytes(),
            self.maker_asset.to_be_bytes(),
            self.taker_asset.to_be_bytes(),
            self.making_amount.to_be_bytes::<32>(),
            self.taking_amount.to_be_bytes::<32>(),
            self.maker_traits.to_be_bytes(),
        ];
        let mut out = Vec::with_capacity(CANONICAL_ORDER_LEN);
        for word in &words {
            out.extend_from_slice(word);
        }
        out
    }

    /// The order hash: SHA-256 of [`Order::canonical_bytes`].
    #[must_use]
    pub fn hash(&self) -> OrderHash {
        let digest = Sha256::digest(self.canonical_bytes());
        let mut out = [0u8; ORDER_HASH_LEN];
        out.copy_from_slice(&digest);
        OrderHash(out)
    }

    /// Both legs must be non-zero.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.making_amount.is_zero() && !self.taking_amount.is_zero()
    }

    /// Who receives the taker's asset.
    #[must_use]
    pub fn effective_receiver(&self) -> Address {
        if self.receiver.is_zero() {
            self.maker
        } else {
            self.receiver
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// A public, never-expiring order with a random salt.
    pub fn dummy(maker: Address, making_amount: u64, taking_amount: u64) -> Self {
        Self {
            salt: U256::from(rand::random::<u64>()),
            maker,
            receiver: Address::ZERO,
            maker_asset: Address::from(0xA11CE_u64),
            taker_asset: Address::from(0xB0B_u64),
            making_amount: U256::from(making_amount),
            taking_amount: U256::from(taking_amount),
            maker_traits: MakerTraits::default(),
        }
    }
}
