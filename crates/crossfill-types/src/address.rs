//! Canonical chain addresses as 256-bit integers.
//!
//! Every party and asset is carried as a single [`U256`]. The low 160 bits
//! hold an EVM-style 20-byte address; the bits above may carry
//! out-of-band flags. Two addresses are equal iff their integer values are.

use std::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::constants::{EVM_ADDRESS_LEN, NATIVE_ADDRESS_LEN};
use crate::{CrossfillError, Result};

/// Mask selecting the low 160 bits (the EVM-compatible part).
pub const LOW_160_BIT_MASK: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0xFFFF_FFFF, 0]);

/// A chain address in its canonical 256-bit integer form.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Address(pub U256);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self(U256::ZERO);

    #[must_use]
    pub const fn from_u256(value: U256) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lossless conversion from a big-endian native chain address.
    ///
    /// # Errors
    /// Returns [`CrossfillError::DecodeError`] if `bytes` is longer than
    /// [`NATIVE_ADDRESS_LEN`].
    pub fn from_native_address(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > NATIVE_ADDRESS_LEN {
            return Err(CrossfillError::DecodeError {
                reason: format!(
                    "native address is {} bytes, max {NATIVE_ADDRESS_LEN}",
                    bytes.len()
                ),
            });
        }
        Ok(Self(U256::from_be_slice(bytes)))
    }

    /// Render as a native address `N` bytes wide (big-endian).
    ///
    /// # Errors
    /// Returns [`CrossfillError::DecodeError`] if the value needs more than
    /// `N` bytes.
    pub fn to_native_address<const N: usize>(&self) -> Result<[u8; N]> {
        let needed = self.0.byte_len();
        if needed > N {
            return Err(CrossfillError::DecodeError {
                reason: format!("address needs {needed} bytes, native width is {N}"),
            });
        }
        let full = self.0.to_be_bytes::<32>();
        let mut out = [0u8; N];
        out[N - needed..].copy_from_slice(&full[32 - needed..]);
        Ok(out)
    }

    /// Build from a 20-byte EVM address.
    #[must_use]
    pub fn from_evm_bytes(bytes: [u8; EVM_ADDRESS_LEN]) -> Self {
        Self(U256::from_be_slice(&bytes))
    }

    /// Low 160 bits as a 20-byte EVM address. Flag bits are dropped.
    #[must_use]
    pub fn to_evm_bytes(&self) -> [u8; EVM_ADDRESS_LEN] {
        let masked = (self.0 & LOW_160_BIT_MASK).to_be_bytes::<32>();
        let mut out = [0u8; EVM_ADDRESS_LEN];
        out.copy_from_slice(&masked[32 - EVM_ADDRESS_LEN..]);
        out
    }

    #[must_use]
    pub fn to_evm_address(&self) -> alloy_primitives::Address {
        alloy_primitives::Address::from(self.to_evm_bytes())
    }

    /// `true` if any bit of `flag_mask` is set on this address.
    #[must_use]
    pub fn has_flag(&self, flag_mask: U256) -> bool {
        !(self.0 & flag_mask).is_zero()
    }

    /// Canonical 32-byte big-endian encoding.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }
}

impl From<U256> for Address {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_be_bytes()))
    }
}
