//! Rate-integrity check.
//!
//! The fill's implied rate `making / taking` must stay within a relative
//! tolerance of the order's rate `M / T`. Compared without division:
//!
//! ```text
//! |making·T − taking·M| · den  ≤  taking·M · num      (tolerance = num / den)
//! ```

use alloy_primitives::U256;
use crossfill_types::{CrossfillError, Order, Result};
use rust_decimal::Decimal;

use crate::FillAmounts;

fn overflow(op: &'static str) -> CrossfillError {
    CrossfillError::ArithmeticError { op }
}

/// Split a non-negative decimal tolerance into `(numerator, denominator)`.
fn tolerance_ratio(tolerance: Decimal) -> Result<(U256, U256)> {
    let mantissa = u128::try_from(tolerance.mantissa()).map_err(|_| {
        CrossfillError::Configuration(format!("negative rate tolerance {tolerance}"))
    })?;
    let den = U256::from(10u8)
        .checked_pow(U256::from(tolerance.scale()))
        .ok_or_else(|| overflow("tolerance scale"))?;
    Ok((U256::from(mantissa), den))
}

/// Reject fills whose implied rate drifts more than `tolerance` from the
/// order's declared rate.
///
/// # Errors
/// - [`CrossfillError::RateDeviation`] when outside tolerance
/// - [`CrossfillError::ArithmeticError`] if a cross product overflows
pub fn check_rate(order: &Order, amounts: &FillAmounts, tolerance: Decimal) -> Result<()> {
    let (num, den) = tolerance_ratio(tolerance)?;

    let fill_side = amounts
        .making
        .checked_mul(order.taking_amount)
        .ok_or_else(|| overflow("rate: making * T"))?;
    let order_side = amounts
        .taking
        .checked_mul(order.making_amount)
        .ok_or_else(|| overflow("rate: taking * M"))?;

    let diff = if fill_side > order_side {
        fill_side - order_side
    } else {
        order_side - fill_side
    };
    let lhs = diff
        .checked_mul(den)
        .ok_or_else(|| overflow("rate: diff * den"))?;
    let rhs = order_side
        .checked_mul(num)
        .ok_or_else(|| overflow("rate: bound * num"))?;

    if lhs > rhs {
        tracing::warn!(
            making = %amounts.making,
            taking = %amounts.taking,
            order_making = %order.making_amount,
            order_taking = %order.taking_amount,
            %tolerance,
            "Fill rate outside tolerance"
        );
        return Err(CrossfillError::RateDeviation {
            reason: format!(
                "{}/{} vs order {}/{} exceeds {tolerance}",
                amounts.making, amounts.taking, order.making_amount, order.taking_amount
            ),
        });
    }
    Ok(())
}
