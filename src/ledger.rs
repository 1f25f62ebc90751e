//! The balance store a table settles bets against.

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use core::fmt;

use crate::sync::Mutex;

/// Identifier of a user in the host chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Why a balance changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerReason {
    /// Stake taken when joining a round.
    Bet,
    /// Matching stake taken on a double down.
    DoubleDown,
    /// Winnings or returned stake at the end of a round.
    Payout,
    /// Stake returned from an aborted round.
    Refund,
}

/// External balance storage.
///
/// Implementations serialize updates per user; the table never holds a
/// balance of its own.
pub trait Ledger: Send + Sync {
    /// Returns the current balance of `user`.
    fn balance(&self, user: UserId) -> i64;

    /// Applies `delta` (positive or negative) to the balance of `user`.
    fn adjust(&self, user: UserId, delta: i64, reason: LedgerReason);
}

/// An in-memory [`Ledger`].
pub struct MemoryLedger {
    balances: Mutex<HashMap<UserId, i64>>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the balance of `user`, replacing any previous value.
    pub fn deposit(&self, user: UserId, amount: i64) {
        self.balances.lock().insert(user, amount);
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for MemoryLedger {
    fn balance(&self, user: UserId) -> i64 {
        self.balances.lock().get(&user).copied().unwrap_or(0)
    }

    fn adjust(&self, user: UserId, delta: i64, _reason: LedgerReason) {
        *self.balances.lock().entry(user).or_insert(0) += delta;
    }
}
