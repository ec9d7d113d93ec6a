//! Fill engine: the only writer of order state.
//!
//! `fill_order` runs the admission checks, resolves the amounts, closes the
//! order hash and moves both legs through the injected [`AssetTransfer`].
//! Every check precedes the first state change, and a failed transfer
//! re-opens the hash, so a rejected fill leaves no trace.
//!
//! ## Fill pipeline
//!
//! ```text
//! hash → signature → validity → expiry → replay → allowed sender
//!      → feature gate → amounts → zero/threshold/bounds → fill mode
//!      → rate → close hash → transfers → OrderFilled
//! ```

use crossfill_ingress::{
    SignatureEnvelope, check_allowed_sender, check_expiry, check_signature,
    check_supported_features, check_validity,
};
use crossfill_matchcore::{FillAmounts, check_rate, resolve_fill_amounts};
use crossfill_types::constants;
use crossfill_types::{
    Address, CrossfillError, FillResult, Order, OrderHash, Result, SettlementConfig,
    SettlementEvent, TakerTraits, U256,
};

use crate::registry::{OrderRegistry, OrderState};
use crate::transfer::{AssetTransfer, Transfer};

/// Settlement engine over a registry `R` and a transfer capability `T`.
///
/// Takes `&mut self` for every state change; share it behind a `Mutex` to
/// serialize concurrent fills.
#[derive(Debug)]
pub struct FillEngine<R, T> {
    config: SettlementConfig,
    registry: R,
    transfers: T,
    events: Vec<SettlementEvent>,
}

impl<R: OrderRegistry, T: AssetTransfer> FillEngine<R, T> {
    /// # Errors
    /// [`CrossfillError::Configuration`] if `config` is out of range.
    pub fn new(config: SettlementConfig, registry: R, transfers: T) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            engine = %constants::engine_id(),
            rate_tolerance = %config.rate_tolerance,
            "Fill engine created"
        );
        Ok(Self {
            config,
            registry,
            transfers,
            events: Vec::new(),
        })
    }

    /// Fill `order` on behalf of `caller` at time `now` (seconds).
    ///
    /// `requested` is the making amount when `taker_traits` has the
    /// maker-amount flag, and the taking amount otherwise.
    ///
    /// # Errors
    /// The first failing check, in pipeline order. Nothing is committed.
    pub fn fill_order(
        &mut self,
        order: &Order,
        envelope: &SignatureEnvelope,
        requested: U256,
        taker_traits: &TakerTraits,
        caller: &Address,
        now: u64,
    ) -> Result<FillResult> {
        let order_hash = order.hash();

        check_signature(order, &order_hash, envelope)?;
        check_validity(order)?;
        check_expiry(order, now)?;
        if self.registry.is_closed(&order_hash) {
            return Err(CrossfillError::AlreadyFilledOrCancelled(order_hash));
        }
        check_allowed_sender(order, caller)?;
        check_supported_features(order, taker_traits)?;

        let amounts = resolve_fill_amounts(order, requested, taker_traits)?;
        Self::check_amounts(order, &amounts, taker_traits)?;
        Self::check_fill_mode(order, &amounts)?;
        check_rate(order, &amounts, self.config.rate_tolerance)?;

        self.registry.close_if_open(order_hash, OrderState::Filled)?;

        let legs = [
            Transfer {
                asset: order.maker_asset,
                from: order.maker,
                to: *caller,
                amount: amounts.making,
            },
            Transfer {
                asset: order.taker_asset,
                from: *caller,
                to: order.effective_receiver(),
                amount: amounts.taking,
            },
        ];
        if let Err(err) = self.transfers.execute(&legs) {
            self.registry.revert_close(&order_hash);
            tracing::warn!(
                order_hash = %order_hash.short(),
                error = %err,
                "Fill rolled back: transfer failed"
            );
            return Err(match err {
                e @ CrossfillError::TransferFailed { .. } => e,
                other => CrossfillError::TransferFailed {
                    reason: other.to_string(),
                },
            });
        }

        let result = FillResult {
            making_amount: amounts.making,
            taking_amount: amounts.taking,
            order_hash,
        };
        self.events.push(result.into());
        tracing::info!(
            order_hash = %order_hash.short(),
            maker = %order.maker,
            taker = %caller,
            making = %amounts.making,
            taking = %amounts.taking,
            "Order filled"
        );
        Ok(result)
    }

    /// Cancel `order`. Only its maker may do so.
    ///
    /// # Errors
    /// - [`CrossfillError::NotOrderMaker`] if `caller` is not the maker
    /// - [`CrossfillError::AlreadyFilledOrCancelled`] if already closed
    pub fn cancel_order(&mut self, order: &Order, caller: &Address) -> Result<OrderHash> {
        let order_hash = order.hash();
        if *caller != order.maker {
            tracing::debug!(
                order_hash = %order_hash.short(),
                %caller,
                "Cancel rejected: not maker"
            );
            return Err(CrossfillError::NotOrderMaker);
        }
        self.registry.close_if_open(order_hash, OrderState::Cancelled)?;

        self.events.push(SettlementEvent::OrderCancelled { order_hash });
        tracing::info!(order_hash = %order_hash.short(), maker = %caller, "Order cancelled");
        Ok(order_hash)
    }

    /// `true` once the hash is closed, by a fill or a cancellation.
    #[must_use]
    pub fn is_filled(&self, order_hash: &OrderHash) -> bool {
        self.registry.is_closed(order_hash)
    }

    #[must_use]
    pub fn order_state(&self, order_hash: &OrderHash) -> Option<OrderState> {
        self.registry.state(order_hash)
    }

    /// Events committed so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }

    /// Take the event log, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<SettlementEvent> {
        std::mem::take(&mut self.events)
    }

    /// The event log as a JSON array.
    ///
    /// # Errors
    /// [`CrossfillError::Serialization`] if encoding fails.
    pub fn events_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    #[must_use]
    pub fn transfers(&self) -> &T {
        &self.transfers
    }

    pub fn transfers_mut(&mut self) -> &mut T {
        &mut self.transfers
    }

    fn check_amounts(
        order: &Order,
        amounts: &FillAmounts,
        taker_traits: &TakerTraits,
    ) -> Result<()> {
        if amounts.has_zero_leg() {
            return Err(CrossfillError::ZeroAmountSwap {
                making: amounts.making,
                taking: amounts.taking,
            });
        }

        let threshold = taker_traits.threshold_amount();
        if !threshold.is_zero() && amounts.taking > threshold {
            return Err(CrossfillError::TakingAmountTooHigh {
                taking: amounts.taking,
                threshold,
            });
        }

        if amounts.making > order.making_amount || amounts.taking > order.taking_amount {
            return Err(CrossfillError::AmountExceeded {
                making: amounts.making,
                taking: amounts.taking,
                order_making: order.making_amount,
                order_taking: order.taking_amount,
            });
        }
        Ok(())
    }

    /// Only single, complete fills have an execution path.
    fn check_fill_mode(order: &Order, amounts: &FillAmounts) -> Result<()> {
        let traits = order.maker_traits;
        if traits.allows_multiple_fills() {
            return Err(CrossfillError::NotImplemented {
                feature: "multiple fills",
            });
        }

        let complete =
            amounts.making == order.making_amount && amounts.taking == order.taking_amount;
        if complete {
            Ok(())
        } else if traits.allows_partial_fills() {
            Err(CrossfillError::NotImplemented {
                feature: "partial fills",
            })
        } else {
            Err(CrossfillError::PartialFillNotAllowed)
        }
    }
}
