//! Order registry: the at-most-once guard for order hashes.
//!
//! Each order hash moves from open to closed exactly once, either by a fill
//! or by a cancellation. A closed hash can never be filled again. Closing
//! is a compare-and-set so concurrent attempts on one hash cannot both
//! win.
//!
//! Unlike a settlement cache, the registry never evicts. Forgetting a
//! closed hash would reopen it to replay.

use std::collections::HashMap;
use std::fmt;

use crossfill_types::{CrossfillError, OrderHash, Result};
use serde::{Deserialize, Serialize};

/// Why a hash is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Filled,
    Cancelled,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filled => write!(f, "FILLED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Storage seam for closed order hashes.
pub trait OrderRegistry {
    /// Current state; `None` means the hash is open.
    fn state(&self, hash: &OrderHash) -> Option<OrderState>;

    /// Close `hash` if it is open.
    ///
    /// # Errors
    /// [`CrossfillError::AlreadyFilledOrCancelled`] if it is already closed.
    fn close_if_open(&mut self, hash: OrderHash, state: OrderState) -> Result<()>;

    /// Undo a close made within the same, failed, operation.
    fn revert_close(&mut self, hash: &OrderHash);

    fn is_closed(&self, hash: &OrderHash) -> bool {
        self.state(hash).is_some()
    }
}

/// Process-local registry backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryOrderRegistry {
    closed: HashMap<OrderHash, OrderState>,
}

impl InMemoryOrderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of closed hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.closed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty()
    }
}

impl OrderRegistry for InMemoryOrderRegistry {
    fn state(&self, hash: &OrderHash) -> Option<OrderState> {
        self.closed.get(hash).copied()
    }

    fn close_if_open(&mut self, hash: OrderHash, state: OrderState) -> Result<()> {
        if self.closed.contains_key(&hash) {
            return Err(CrossfillError::AlreadyFilledOrCancelled(hash));
        }
        self.closed.insert(hash, state);
        Ok(())
    }

    fn revert_close(&mut self, hash: &OrderHash) {
        self.closed.remove(hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(byte: u8) -> OrderHash {
        OrderHash([byte; 32])
    }

    #[test]
    fn first_close_ok() {
        let mut reg = InMemoryOrderRegistry::new();
        assert!(!reg.is_closed(&h(1)));
        reg.close_if_open(h(1), OrderState::Filled).unwrap();
        assert!(reg.is_closed(&h(1)));
        assert_eq!(reg.state(&h(1)), Some(OrderState::Filled));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn double_close_blocked() {
        let mut reg = InMemoryOrderRegistry::new();
        reg.close_if_open(h(1), OrderState::Cancelled).unwrap();

        let err = reg.close_if_open(h(1), OrderState::Filled).unwrap_err();
        assert!(
            matches!(err, CrossfillError::AlreadyFilledOrCancelled(hash) if hash == h(1)),
            "Expected AlreadyFilledOrCancelled, got: {err:?}"
        );
        // first state wins
        assert_eq!(reg.state(&h(1)), Some(OrderState::Cancelled));
    }

    #[test]
    fn revert_reopens() {
        let mut reg = InMemoryOrderRegistry::new();
        reg.close_if_open(h(1), OrderState::Filled).unwrap();
        reg.revert_close(&h(1));
        assert!(!reg.is_closed(&h(1)));
        assert!(reg.is_empty());
        reg.close_if_open(h(1), OrderState::Filled).unwrap();
    }

    #[test]
    fn hashes_are_independent() {
        let mut reg = InMemoryOrderRegistry::new();
        reg.close_if_open(h(1), OrderState::Filled).unwrap();
        reg.close_if_open(h(2), OrderState::Filled).unwrap();
        reg.revert_close(&h(1));
        assert!(!reg.is_closed(&h(1)));
        assert!(reg.is_closed(&h(2)));
    }
}
