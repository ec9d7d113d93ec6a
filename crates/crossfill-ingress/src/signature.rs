//! Signature verification for maker orders.
//!
//! A maker authorizes an order by signing its 32-byte [`OrderHash`]. The
//! signature travels in a [`SignatureEnvelope`] that names its scheme, so
//! further schemes can be added without changing the fill API.
//!
//! The signer's on-chain identity is derived from the public key
//! ([`derive_address`]); an envelope only authorizes an order whose `maker`
//! equals that derived address.

use alloy_primitives::U256;
use crossfill_types::constants::{ED25519_PUBLIC_KEY_LEN, ED25519_SIGNATURE_LEN, SCHEME_ED25519};
use crossfill_types::{Address, OrderHash};
use ed25519_dalek::{Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A signature plus the material needed to check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEnvelope {
    /// Scheme tag. Only [`SCHEME_ED25519`] is accepted.
    pub scheme: u8,
    pub signature: Vec<u8>,
    pub public_key: Vec<u8>,
}

impl SignatureEnvelope {
    #[must_use]
    pub fn ed25519(
        signature: [u8; ED25519_SIGNATURE_LEN],
        public_key: [u8; ED25519_PUBLIC_KEY_LEN],
    ) -> Self {
        Self {
            scheme: SCHEME_ED25519,
            signature: signature.to_vec(),
            public_key: public_key.to_vec(),
        }
    }

    /// Address of the key carried in this envelope.
    #[must_use]
    pub fn signer(&self) -> Address {
        derive_address(self.scheme, &self.public_key)
    }
}

/// Strict ed25519 verification of `signature` over `message`.
///
/// Returns `false` for wrong-length inputs, malformed keys, and
/// non-canonical or small-order signatures. Never panics.
#[must_use]
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(sig_bytes) = <[u8; ED25519_SIGNATURE_LEN]>::try_from(signature) else {
        return false;
    };
    let Ok(pk_bytes) = <[u8; ED25519_PUBLIC_KEY_LEN]>::try_from(public_key) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&pk_bytes) else {
        return false;
    };
    let sig = Signature::from_bytes(&sig_bytes);
    key.verify_strict(message, &sig).is_ok()
}

/// `SHA-256(scheme || public_key)` read as a big-endian 256-bit address.
#[must_use]
pub fn derive_address(scheme: u8, public_key: &[u8]) -> Address {
    let mut hasher = Sha256::new();
    hasher.update([scheme]);
    hasher.update(public_key);
    let digest: [u8; 32] = hasher.finalize().into();
    Address(U256::from_be_bytes(digest))
}

/// `true` iff the envelope is a valid signature over `order_hash` by the key
/// whose derived address is `expected_signer`.
#[must_use]
pub fn verify_order_signature(
    order_hash: &OrderHash,
    envelope: &SignatureEnvelope,
    expected_signer: &Address,
) -> bool {
    if envelope.scheme != SCHEME_ED25519 {
        tracing::debug!(scheme = envelope.scheme, "Unknown signature scheme");
        return false;
    }
    if envelope.signer() != *expected_signer {
        tracing::debug!(
            order_hash = %order_hash.short(),
            signer = %envelope.signer(),
            expected = %expected_signer,
            "Signer does not match order maker"
        );
        return false;
    }
    verify(order_hash.as_bytes(), &envelope.signature, &envelope.public_key)
}

/// Sign `order_hash` with `key` and wrap the result in an ed25519 envelope.
#[cfg(any(test, feature = "test-helpers"))]
#[must_use]
pub fn sign_order_hash(
    key: &ed25519_dalek::SigningKey,
    order_hash: &OrderHash,
) -> SignatureEnvelope {
    use ed25519_dalek::Signer;
    let sig = key.sign(order_hash.as_bytes());
    SignatureEnvelope::ed25519(sig.to_bytes(), key.verifying_key().to_bytes())
}

/// Address that [`sign_order_hash`] with `key` authorizes as maker.
#[cfg(any(test, feature = "test-helpers"))]
#[must_use]
pub fn address_of(key: &ed25519_dalek::SigningKey) -> Address {
    derive_address(SCHEME_ED25519, key.verifying_key().as_bytes())
}
