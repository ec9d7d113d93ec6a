//! # crossfill-ingress
//!
//! **Security Envelope**: everything that decides whether a fill attempt
//! may proceed, before any amount is computed or state touched.
//!
//! ## Components
//!
//! 1. **Signature**: scheme envelope, strict ed25519 verification, and
//!    derivation of the signer's address from its public key
//! 2. **Admission**: order validity, expiry, allowed sender, and gating of
//!    trait flags this chain does not execute
//!
//! ## Order Flow
//!
//! ```text
//! fill request → check_signature() → check_validity() → check_expiry()
//!     → [registry replay check] → check_allowed_sender()
//!     → check_supported_features() → MatchCore
//! ```

pub mod admission;
pub mod signature;

pub use admission::{
    check_allowed_sender, check_expiry, check_signature, check_supported_features, check_validity,
};
pub use signature::{SignatureEnvelope, derive_address, verify, verify_order_signature};
#[cfg(any(test, feature = "test-helpers"))]
pub use signature::{address_of, sign_order_hash};
