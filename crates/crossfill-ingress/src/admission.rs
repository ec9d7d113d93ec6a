//! Fill admission gate.
//!
//! Stateless checks that run before any amount is computed. Each returns
//! the specific error for the rule it enforces and logs its decision at
//! `debug`. Registry state (replay) is checked by the settlement engine,
//! not here.
//!
//! ## Principles
//!
//! - **Fail-closed**: a flag this chain cannot honour rejects the fill
//! - **No partial effects**: checks never mutate anything

use crossfill_types::{Address, CrossfillError, Order, OrderHash, Result, TakerTraits};

use crate::signature::{SignatureEnvelope, verify_order_signature};

/// The envelope must be the maker's signature over `order_hash`.
///
/// # Errors
/// [`CrossfillError::BadSignature`]
pub fn check_signature(
    order: &Order,
    order_hash: &OrderHash,
    envelope: &SignatureEnvelope,
) -> Result<()> {
    if verify_order_signature(order_hash, envelope, &order.maker) {
        Ok(())
    } else {
        tracing::debug!(order_hash = %order_hash.short(), "Rejected: bad signature");
        Err(CrossfillError::BadSignature)
    }
}

/// Both legs of the order must be non-zero.
///
/// # Errors
/// [`CrossfillError::InvalidOrder`]
pub fn check_validity(order: &Order) -> Result<()> {
    if order.is_valid() {
        return Ok(());
    }
    Err(CrossfillError::InvalidOrder {
        reason: format!(
            "making {} and taking {} must both be positive",
            order.making_amount, order.taking_amount
        ),
    })
}

/// # Errors
/// [`CrossfillError::OrderExpired`] once `now` reaches the expiration.
pub fn check_expiry(order: &Order, now: u64) -> Result<()> {
    let traits = order.maker_traits;
    if traits.is_expired(now) {
        tracing::debug!(expiration = traits.expiration_time(), now, "Rejected: expired");
        return Err(CrossfillError::OrderExpired {
            expiration: traits.expiration_time(),
            now,
        });
    }
    Ok(())
}

/// Private orders may only be filled by their allowed sender.
///
/// # Errors
/// [`CrossfillError::PrivateOrder`]
pub fn check_allowed_sender(order: &Order, caller: &Address) -> Result<()> {
    if order.maker_traits.is_allowed_sender(caller) {
        Ok(())
    } else {
        tracing::debug!(%caller, "Rejected: caller is not the allowed sender");
        Err(CrossfillError::PrivateOrder)
    }
}

/// Reject trait flags with no execution path on this chain.
///
/// WETH unwrapping and Permit2 have no analogue here and fail with
/// [`CrossfillError::UnsupportedFeature`]. Interactions, extensions, epoch
/// management and taker call arguments are meaningful but not executed yet,
/// and fail with [`CrossfillError::NotImplemented`].
///
/// # Errors
/// See above.
pub fn check_supported_features(order: &Order, taker_traits: &TakerTraits) -> Result<()> {
    let maker = order.maker_traits;

    let unsupported = [
        (maker.unwrap_weth(), "maker unwrap WETH"),
        (maker.uses_permit2(), "maker Permit2"),
        (taker_traits.unwrap_weth(), "taker unwrap WETH"),
        (taker_traits.uses_permit2(), "taker Permit2"),
    ];
    if let Some((_, feature)) = unsupported.into_iter().find(|(set, _)| *set) {
        tracing::debug!(feature, "Rejected: unsupported feature");
        return Err(CrossfillError::UnsupportedFeature { feature });
    }

    let pending = [
        (maker.needs_pre_interaction(), "maker pre-interaction"),
        (maker.needs_post_interaction(), "maker post-interaction"),
        (maker.has_extension(), "maker extension"),
        (maker.needs_epoch_check(), "epoch manager"),
        (taker_traits.args_have_target(), "taker target"),
        (taker_traits.extension_length() != 0, "taker extension"),
        (taker_traits.interaction_length() != 0, "taker interaction"),
    ];
    if let Some((_, feature)) = pending.into_iter().find(|(set, _)| *set) {
        tracing::debug!(feature, "Rejected: not implemented");
        return Err(CrossfillError::NotImplemented { feature });
    }
    Ok(())
}
