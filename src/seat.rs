//! Seats at the table: the dealer and the betting participants.

extern crate alloc;

use alloc::string::String;

use crate::card::Card;
use crate::hand::{Hand, HandState};
use crate::ledger::{Ledger, LedgerReason, UserId};

#[cfg(feature = "std")]
fn floor(amount: f64) -> f64 {
    amount.floor()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn floor(amount: f64) -> f64 {
    libm::floor(amount)
}

/// Returns `bet × multiplier`, rounded down to a whole amount.
///
/// The product is computed in `f64`, which is exact for bets up to 2^53.
/// Larger bets may be off by the spacing of `f64` at that magnitude.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "bets above 2^53 lose precision, far beyond any real balance"
)]
pub fn payout_amount(bet: u64, multiplier: f64) -> u64 {
    if multiplier <= 0.0 {
        return 0;
    }
    floor(bet as f64 * multiplier) as u64
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Who occupies a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    /// The house. Never bets and is never paid.
    Dealer,
    /// A betting user.
    Participant {
        /// The user in this seat.
        user: UserId,
        /// Current stake, doubled by a double down.
        bet: u64,
    },
}

/// One hand holder in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    kind: SeatKind,
    name: String,
    hand: Hand,
    acted: bool,
}

impl Seat {
    /// Creates the dealer seat.
    #[must_use]
    pub fn dealer(name: impl Into<String>) -> Self {
        Self {
            kind: SeatKind::Dealer,
            name: name.into(),
            hand: Hand::new(),
            acted: false,
        }
    }

    /// Creates a participant seat with the given stake.
    #[must_use]
    pub fn participant(user: UserId, name: impl Into<String>, bet: u64) -> Self {
        Self {
            kind: SeatKind::Participant { user, bet },
            name: name.into(),
            hand: Hand::new(),
            acted: false,
        }
    }

    /// Returns who occupies the seat.
    #[must_use]
    pub const fn kind(&self) -> SeatKind {
        self.kind
    }

    /// Returns the user in this seat, or `None` for the dealer.
    #[must_use]
    pub const fn user(&self) -> Option<UserId> {
        match self.kind {
            SeatKind::Dealer => None,
            SeatKind::Participant { user, .. } => Some(user),
        }
    }

    /// Returns whether this is the dealer seat.
    #[must_use]
    pub const fn is_dealer(&self) -> bool {
        matches!(self.kind, SeatKind::Dealer)
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current stake (zero for the dealer).
    #[must_use]
    pub const fn bet(&self) -> u64 {
        match self.kind {
            SeatKind::Dealer => 0,
            SeatKind::Participant { bet, .. } => bet,
        }
    }

    /// Returns the hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the hand state.
    #[must_use]
    pub const fn state(&self) -> HandState {
        self.hand.state()
    }

    /// Whether the seat may draw another card.
    #[must_use]
    pub const fn may_draw(&self) -> bool {
        self.hand.may_draw()
    }

    /// Whether the seat has already taken an action this round.
    #[must_use]
    pub const fn has_acted(&self) -> bool {
        self.acted
    }

    pub(crate) const fn mark_acted(&mut self) {
        self.acted = true;
    }

    /// Gives one card to the seat.
    pub fn give_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// Gives several cards to the seat, in order.
    pub fn give_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.hand.add_card(card);
        }
    }

    /// Forces the hand to [`HandState::Surrendered`].
    pub const fn set_surrendered(&mut self) {
        self.hand.surrender();
    }

    /// Debits the stake from `ledger`. Does nothing for the dealer.
    pub fn confiscate_bet(&self, ledger: &dyn Ledger) {
        if let SeatKind::Participant { user, bet } = self.kind {
            ledger.adjust(user, -signed(bet), LedgerReason::Bet);
        }
    }

    /// Debits a matching stake from `ledger` and doubles the bet.
    pub(crate) fn double_bet(&mut self, ledger: &dyn Ledger) {
        if let SeatKind::Participant { user, bet } = &mut self.kind {
            ledger.adjust(*user, -signed(*bet), LedgerReason::DoubleDown);
            *bet = bet.saturating_mul(2);
        }
    }

    /// Credits `floor(bet × multiplier)` through `ledger` and returns it.
    ///
    /// The dealer is never paid and always yields zero.
    pub fn reward(&self, multiplier: f64, ledger: &dyn Ledger) -> u64 {
        let SeatKind::Participant { user, bet } = self.kind else {
            return 0;
        };

        let amount = payout_amount(bet, multiplier);
        if amount > 0 {
            ledger.adjust(user, signed(amount), LedgerReason::Payout);
        }
        amount
    }

    /// Returns the stake through `ledger` after an aborted round.
    pub(crate) fn refund(&self, ledger: &dyn Ledger) -> u64 {
        let SeatKind::Participant { user, bet } = self.kind else {
            return 0;
        };

        if bet > 0 {
            ledger.adjust(user, signed(bet), LedgerReason::Refund);
        }
        bet
    }
}
