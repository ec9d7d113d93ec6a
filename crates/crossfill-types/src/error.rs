//! Error types for the Crossfill settlement core.
//!
//! All errors use the `CF_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Authorization errors
//! - 3xx: Amount errors
//! - 4xx: Escrow errors
//! - 9xx: General / internal errors
//!
//! Every error is fatal to the fill or cancel attempt that raised it. No
//! variant is retried internally and none leaves a partial commit behind.

use alloy_primitives::U256;
use thiserror::Error;

use crate::OrderHash;

/// Central error enum for all Crossfill operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossfillError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order failed validation (zero amounts).
    #[error("CF_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The order's expiration has passed.
    #[error("CF_ERR_101: Order expired at {expiration}, now {now}")]
    OrderExpired { expiration: u64, now: u64 },

    /// The order hash is already closed in the registry.
    #[error("CF_ERR_102: Order already filled or cancelled: {0}")]
    AlreadyFilledOrCancelled(OrderHash),

    /// A trait flag requests behaviour this chain cannot honour.
    #[error("CF_ERR_103: Unsupported feature: {feature}")]
    UnsupportedFeature { feature: &'static str },

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// The maker signature over the order hash did not verify.
    #[error("CF_ERR_200: Bad signature")]
    BadSignature,

    /// The order restricts its takers and the caller is not one of them.
    #[error("CF_ERR_201: Private order: caller is not the allowed sender")]
    PrivateOrder,

    /// Only the order's maker may cancel it.
    #[error("CF_ERR_202: Caller is not the order maker")]
    NotOrderMaker,

    // =================================================================
    // Amount Errors (3xx)
    // =================================================================
    /// One leg of the computed fill is zero.
    #[error("CF_ERR_300: Zero amount swap: making {making}, taking {taking}")]
    ZeroAmountSwap { making: U256, taking: U256 },

    /// The computed taking amount is above the taker's threshold.
    #[error("CF_ERR_301: Taking amount too high: {taking} > threshold {threshold}")]
    TakingAmountTooHigh { taking: U256, threshold: U256 },

    /// The computed amounts exceed the order's declared amounts.
    #[error("CF_ERR_302: Amount exceeded: making {making}/{order_making}, taking {taking}/{order_taking}")]
    AmountExceeded {
        making: U256,
        taking: U256,
        order_making: U256,
        order_taking: U256,
    },

    /// The order forbids partial fills and the fill is short of the full amounts.
    #[error("CF_ERR_303: Partial fill not allowed for this order")]
    PartialFillNotAllowed,

    /// The implied fill rate drifted past the configured tolerance.
    #[error("CF_ERR_304: Fill rate deviates from order rate: {reason}")]
    RateDeviation { reason: String },

    /// A 256-bit intermediate overflowed, or a division by zero was attempted.
    #[error("CF_ERR_305: Arithmetic error: {op}")]
    ArithmeticError { op: &'static str },

    /// The injected asset-transfer capability rejected the fill's transfers.
    #[error("CF_ERR_306: Asset transfer failed: {reason}")]
    TransferFailed { reason: String },

    // =================================================================
    // Escrow Errors (4xx)
    // =================================================================
    /// Timelock schedule is internally inconsistent or already deployed.
    #[error("CF_ERR_400: Invalid timelocks: {reason}")]
    InvalidTimelocks { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// The feature exists in the traits layout but has no execution path yet.
    #[error("CF_ERR_900: Not implemented: {feature}")]
    NotImplemented { feature: &'static str },

    /// Byte-length or width mismatch while decoding an address or hash.
    #[error("CF_ERR_901: Decode error: {reason}")]
    DecodeError { reason: String },

    /// Configuration error (invalid JSON, out-of-range values).
    #[error("CF_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("CF_ERR_903: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CrossfillError>;

impl From<serde_json::Error> for CrossfillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
