//! Round conclusion: outcome buckets and payouts.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::hand::{Hand, HandState, TWENTY_ONE};
use crate::ledger::Ledger;
use crate::options::{BlackjackPush, GameOptions, PayoutRules};
use crate::seat::Seat;

/// The bucket a finished seat falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Seat busted; the stake is lost.
    Busted,
    /// Seat finished below the dealer.
    Lower,
    /// Seat tied the dealer (push).
    Equal,
    /// Seat beat the dealer, or the dealer busted.
    Higher,
    /// Seat holds a natural blackjack.
    Blackjack,
    /// Seat surrendered.
    Surrendered,
}

impl Outcome {
    /// Returns the payout multiplier for this bucket.
    #[must_use]
    pub const fn multiplier(self, rules: &PayoutRules) -> f64 {
        match self {
            Self::Busted | Self::Lower => 0.0,
            Self::Equal => rules.equal,
            Self::Higher => rules.higher,
            Self::Blackjack => rules.blackjack,
            Self::Surrendered => rules.surrender,
        }
    }
}

fn dealer_pushes_naturals(dealer: &Hand, rule: BlackjackPush) -> bool {
    match rule {
        BlackjackPush::Never => false,
        BlackjackPush::DealerNatural => dealer.evaluation().is_blackjack(),
        BlackjackPush::DealerTwentyOne => dealer.best() == Some(TWENTY_ONE),
    }
}

/// Classifies one finished hand against the dealer's final hand.
#[must_use]
pub fn classify(hand: &Hand, dealer: &Hand, rule: BlackjackPush) -> Outcome {
    match hand.state() {
        HandState::Busted => Outcome::Busted,
        HandState::Surrendered => Outcome::Surrendered,
        HandState::Blackjack if dealer_pushes_naturals(dealer, rule) => Outcome::Equal,
        HandState::Blackjack => Outcome::Blackjack,
        HandState::Normal => {
            let Some(dealer_total) = dealer.best() else {
                return Outcome::Higher;
            };
            let total = hand.best().unwrap_or(0);
            match total.cmp(&dealer_total) {
                Ordering::Greater => Outcome::Higher,
                Ordering::Equal => Outcome::Equal,
                Ordering::Less => Outcome::Lower,
            }
        }
    }
}

/// Result for a single seat.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatResult {
    /// The seat as it finished the round.
    pub seat: Seat,
    /// The bucket it landed in.
    pub outcome: Outcome,
    /// Amount credited back through the ledger.
    pub payout: u64,
}

/// Immutable snapshot of a finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct Conclusion {
    dealer: Seat,
    results: Vec<SeatResult>,
}

impl Conclusion {
    /// Classifies every seat, credits payouts through `ledger`, and
    /// freezes the result.
    ///
    /// Must run exactly once per round.
    pub fn settle(
        dealer: Seat,
        seats: &[Seat],
        options: &GameOptions,
        ledger: &dyn Ledger,
    ) -> Self {
        let results = seats
            .iter()
            .map(|seat| {
                let outcome = classify(seat.hand(), dealer.hand(), options.blackjack_push);
                let payout = seat.reward(outcome.multiplier(&options.payouts), ledger);
                SeatResult {
                    seat: seat.clone(),
                    outcome,
                    payout,
                }
            })
            .collect();

        Self { dealer, results }
    }

    /// Returns the dealer seat.
    #[must_use]
    pub const fn dealer(&self) -> &Seat {
        &self.dealer
    }

    /// Whether the dealer busted.
    #[must_use]
    pub fn dealer_busted(&self) -> bool {
        self.dealer.hand().evaluation().is_bust()
    }

    /// The dealer's best total, or `None` if bust.
    #[must_use]
    pub fn dealer_total(&self) -> Option<u8> {
        self.dealer.hand().best()
    }

    /// Returns the result of every seat, in join order.
    #[must_use]
    pub fn results(&self) -> &[SeatResult] {
        &self.results
    }

    /// Returns the seats that landed in `outcome`.
    pub fn bucket(&self, outcome: Outcome) -> impl Iterator<Item = &SeatResult> {
        self.results
            .iter()
            .filter(move |result| result.outcome == outcome)
    }

    /// Sum of all final stakes.
    #[must_use]
    pub fn total_wagered(&self) -> u64 {
        self.results.iter().map(|result| result.seat.bet()).sum()
    }

    /// Sum of all payouts.
    #[must_use]
    pub fn total_paid(&self) -> u64 {
        self.results.iter().map(|result| result.payout).sum()
    }

    /// What the house kept: stakes minus payouts.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "round totals fit in i64")]
    pub fn house_net(&self) -> i64 {
        self.total_wagered() as i64 - self.total_paid() as i64
    }
}
