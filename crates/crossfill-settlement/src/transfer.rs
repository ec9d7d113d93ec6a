//! Asset-transfer capability.
//!
//! The engine never touches balances itself. It hands the two legs of a fill
//! to an [`AssetTransfer`] implementation as one batch, which must apply all
//! of them or none.

use std::collections::HashMap;
use std::fmt;

use crossfill_types::{Address, CrossfillError, Result, U256};
use serde::{Deserialize, Serialize};

/// Move `amount` of `asset` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub asset: Address,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} from {} to {}", self.amount, self.asset, self.from, self.to)
    }
}

/// Host-ledger seam.
pub trait AssetTransfer {
    /// Apply every transfer in order, or none of them.
    ///
    /// # Errors
    /// [`CrossfillError::TransferFailed`] with nothing applied.
    fn execute(&mut self, transfers: &[Transfer]) -> Result<()>;
}

/// In-memory `(asset, holder) → balance` ledger.
///
/// A batch is staged against a scratch copy of the touched balances and
/// only written back when every transfer succeeded.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(Address, Address), U256>,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `holder`, creating the entry if needed.
    ///
    /// # Errors
    /// [`CrossfillError::ArithmeticError`] if the balance would overflow.
    pub fn deposit(&mut self, holder: Address, asset: Address, amount: U256) -> Result<()> {
        let entry = self.balances.entry((asset, holder)).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(CrossfillError::ArithmeticError {
                op: "ledger deposit",
            })?;
        Ok(())
    }

    #[must_use]
    pub fn balance(&self, holder: Address, asset: Address) -> U256 {
        self.balances
            .get(&(asset, holder))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all balances of `asset`.
    #[must_use]
    pub fn total_supply(&self, asset: Address) -> U256 {
        self.balances
            .iter()
            .filter(|((a, _), _)| *a == asset)
            .fold(U256::ZERO, |acc, (_, v)| acc.saturating_add(*v))
    }
}

impl AssetTransfer for InMemoryLedger {
    fn execute(&mut self, transfers: &[Transfer]) -> Result<()> {
        let mut staged: HashMap<(Address, Address), U256> = HashMap::new();

        for t in transfers {
            let from_key = (t.asset, t.from);
            let from_balance = *staged
                .entry(from_key)
                .or_insert_with(|| self.balance(t.from, t.asset));
            let debited = from_balance.checked_sub(t.amount).ok_or_else(|| {
                CrossfillError::TransferFailed {
                    reason: format!("insufficient balance {from_balance} for {t}"),
                }
            })?;
            staged.insert(from_key, debited);

            let to_key = (t.asset, t.to);
            let to_balance = *staged
                .entry(to_key)
                .or_insert_with(|| self.balance(t.to, t.asset));
            let credited = to_balance.checked_add(t.amount).ok_or_else(|| {
                CrossfillError::TransferFailed {
                    reason: format!("balance overflow for {t}"),
                }
            })?;
            staged.insert(to_key, credited);
        }

        self.balances.extend(staged);
        Ok(())
    }
}
