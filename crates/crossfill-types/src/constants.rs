//! System-wide constants for the Crossfill settlement core.

/// Width in bytes of a native chain address (the widest form an
/// [`Address`](crate::Address) can be built from).
pub const NATIVE_ADDRESS_LEN: usize = 32;

/// Width in bytes of an EVM-style address.
pub const EVM_ADDRESS_LEN: usize = 20;

/// Width in bytes of an order hash.
pub const ORDER_HASH_LEN: usize = 32;

/// Width in bytes of one canonical field word.
pub const WORD_LEN: usize = 32;

/// Number of fields in the canonical order encoding.
pub const ORDER_FIELD_COUNT: usize = 8;

/// Total length of the canonical order encoding.
pub const CANONICAL_ORDER_LEN: usize = WORD_LEN * ORDER_FIELD_COUNT;

/// Signature scheme flag for Ed25519 (the only supported scheme).
pub const SCHEME_ED25519: u8 = 0x00;

/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Default rate tolerance, in thousandths (1 = 0.1%).
pub const DEFAULT_RATE_TOLERANCE_PER_MILLE: i64 = 1;

/// Default escrow rescue delay in seconds (7 days).
pub const DEFAULT_RESCUE_DELAY_SECS: u64 = 7 * 24 * 60 * 60;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Crossfill";

/// `ENGINE_NAME/VERSION`, as reported in logs.
#[must_use]
pub fn engine_id() -> String {
    format!("{ENGINE_NAME}/{VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_id_carries_name_and_version() {
        let id = engine_id();
        assert!(id.starts_with("Crossfill/"), "Got: {id}");
        assert!(id.ends_with(VERSION));
        assert!(!VERSION.is_empty());
    }
}
