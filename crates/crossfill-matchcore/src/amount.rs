//! Proportional conversion between the two legs of a fill.
//!
//! Rounding is fixed and asymmetric: the maker's outflow
//! ([`making_amount_for`]) rounds down and the taker's payment
//! ([`taking_amount_for`]) rounds up. The protocol therefore never pays out
//! more maker asset, nor accepts less taker asset, than the order's rate.

use alloy_primitives::U256;
use crossfill_types::{CrossfillError, Order, Result, TakerTraits};

/// Concrete amounts for both legs of one fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillAmounts {
    pub making: U256,
    pub taking: U256,
}

impl FillAmounts {
    /// `true` if either leg is zero.
    #[must_use]
    pub fn has_zero_leg(&self) -> bool {
        self.making.is_zero() || self.taking.is_zero()
    }
}

/// `floor(taking * order_making / order_taking)`.
///
/// # Errors
/// [`CrossfillError::ArithmeticError`] on overflow or a zero `order_taking`.
pub fn making_amount_for(order_making: U256, order_taking: U256, taking: U256) -> Result<U256> {
    if order_taking.is_zero() {
        return Err(CrossfillError::ArithmeticError {
            op: "making_amount_for: division by zero",
        });
    }
    let product = taking
        .checked_mul(order_making)
        .ok_or(CrossfillError::ArithmeticError {
            op: "making_amount_for: mul overflow",
        })?;
    Ok(product / order_taking)
}

/// `ceil(making * order_taking / order_making)`.
///
/// # Errors
/// [`CrossfillError::ArithmeticError`] on overflow or a zero `order_making`.
pub fn taking_amount_for(order_making: U256, order_taking: U256, making: U256) -> Result<U256> {
    if order_making.is_zero() {
        return Err(CrossfillError::ArithmeticError {
            op: "taking_amount_for: division by zero",
        });
    }
    let product = making
        .checked_mul(order_taking)
        .ok_or(CrossfillError::ArithmeticError {
            op: "taking_amount_for: mul overflow",
        })?;
    let quotient = product / order_making;
    if (product % order_making).is_zero() {
        Ok(quotient)
    } else {
        // quotient < product <= U256::MAX, so +1 cannot overflow
        Ok(quotient + U256::from(1u8))
    }
}

/// Pick the fill amounts for `requested` against `order`.
///
/// With the maker-amount flag set, `requested` is the making amount and the
/// taking amount is derived (rounded up). Otherwise `requested` is the
/// taking amount and the making amount is derived (rounded down). Either
/// way, a making amount above the order's is clamped to the order's and the
/// taking amount re-derived from it.
pub fn resolve_fill_amounts(
    order: &Order,
    requested: U256,
    taker_traits: &TakerTraits,
) -> Result<FillAmounts> {
    let (m, t) = (order.making_amount, order.taking_amount);

    let amounts = if taker_traits.wants_making_amount_specified() {
        let making = requested.min(m);
        FillAmounts {
            making,
            taking: taking_amount_for(m, t, making)?,
        }
    } else {
        let making = making_amount_for(m, t, requested)?;
        if making > m {
            FillAmounts {
                making: m,
                taking: taking_amount_for(m, t, m)?,
            }
        } else {
            FillAmounts {
                making,
                taking: requested,
            }
        }
    };

    tracing::debug!(
        requested = %requested,
        making = %amounts.making,
        taking = %amounts.taking,
        making_specified = taker_traits.wants_making_amount_specified(),
        "Fill amounts resolved"
    );
    Ok(amounts)
}
