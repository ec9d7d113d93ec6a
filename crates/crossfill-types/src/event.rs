//! Fill results and the events emitted by the settlement engine.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::OrderHash;

/// Outcome of a successful fill. Returned to the caller and mirrored into
/// [`SettlementEvent::OrderFilled`]; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillResult {
    pub making_amount: U256,
    pub taking_amount: U256,
    pub order_hash: OrderHash,
}

/// Append-only record of committed state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SettlementEvent {
    OrderFilled {
        order_hash: OrderHash,
        making_amount: U256,
        taking_amount: U256,
    },
    OrderCancelled {
        order_hash: OrderHash,
    },
}

impl SettlementEvent {
    #[must_use]
    pub fn order_hash(&self) -> OrderHash {
        match self {
            Self::OrderFilled { order_hash, .. } | Self::OrderCancelled { order_hash } => {
                *order_hash
            }
        }
    }
}

impl From<FillResult> for SettlementEvent {
    fn from(result: FillResult) -> Self {
        Self::OrderFilled {
            order_hash: result.order_hash,
            making_amount: result.making_amount,
            taking_amount: result.taking_amount,
        }
    }
}

impl std::fmt::Display for SettlementEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderFilled { .. } => write!(f, "ORDER_FILLED"),
            Self::OrderCancelled { .. } => write!(f, "ORDER_CANCELLED"),
        }
    }
}
