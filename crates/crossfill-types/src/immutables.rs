//! Escrow identity: the immutable parameter set of one escrow instance.
//!
//! Both chains build an [`Immutables`] for their leg of the swap. When the
//! two values hash identically, the legs provably belong to the same swap,
//! without any cross-chain message.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Address, OrderHash, Timelocks};

/// SHA-256 of the swap secret. Revealing the secret unlocks the escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Hashlock(pub [u8; 32]);

impl Hashlock {
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        Self(Sha256::digest(secret).into())
    }

    /// `true` if `secret` hashes to this lock.
    #[must_use]
    pub fn matches(&self, secret: &[u8]) -> bool {
        Self::from_secret(secret) == *self
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Hashlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Content-addressed escrow identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EscrowId(pub [u8; 32]);

impl fmt::Display for EscrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "escrow:{}", hex::encode(&self.0[..8]))
    }
}

/// All parameters that pin one escrow to one swap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Immutables {
    pub order_hash: OrderHash,
    pub hashlock: Hashlock,
    pub maker: Address,
    pub taker: Address,
    pub token: Address,
    pub amount: U256,
    pub safety_deposit: U256,
    pub timelocks: Timelocks,
}

impl Immutables {
    /// Canonical encoding: eight 32-byte words in field order.
    ///
    /// Format: `order_hash || hashlock || maker || taker || token || amount ||
    /// safety_deposit || timelocks`
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 * 8);
        out.extend_from_slice(self.order_hash.as_bytes());
        out.extend_from_slice(self.hashlock.as_bytes());
        out.extend_from_slice(&self.maker.to_be_bytes());
        out.extend_from_slice(&self.taker.to_be_bytes());
        out.extend_from_slice(&self.token.to_be_bytes());
        out.extend_from_slice(&self.amount.to_be_bytes::<32>());
        out.extend_from_slice(&self.safety_deposit.to_be_bytes::<32>());
        out.extend_from_slice(&self.timelocks.to_be_bytes());
        out
    }

    /// The escrow's identity.
    #[must_use]
    pub fn hash(&self) -> EscrowId {
        EscrowId(Sha256::digest(self.canonical_bytes()).into())
    }
}
