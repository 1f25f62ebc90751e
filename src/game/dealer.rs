use alloc::vec::Vec;

use tracing::{debug, error, info};

use crate::conclusion::Conclusion;
use crate::hand::HandState;

use super::event::{AbortReason, GameEvent};
use super::timer::Timer;
use super::{Game, GameState, Round};

impl Round {
    /// Checks if any seat still needs to be compared against the dealer.
    fn any_contending(&self) -> bool {
        self.seats
            .iter()
            .any(|seat| seat.state() == HandState::Normal)
    }
}

impl Game {
    /// Runs one dealer action.
    ///
    /// The dealer draws one card per step until bust or a total of at least
    /// the dealer minimum, then the round concludes. If no seat is left to
    /// compare against, the dealer keeps the up card and the round
    /// concludes at once.
    pub(super) fn dealer_step(&self, round: &mut Round, events: &mut Vec<GameEvent>) {
        if !round.any_contending() {
            debug!("no contending seats, dealer stands on the up card");
            self.conclude(round, events);
            return;
        }

        let evaluation = round.dealer.hand().evaluation();
        if evaluation.is_bust() || evaluation.reached(self.shared.options.dealer_minimum) {
            self.conclude(round, events);
            return;
        }

        let Ok(card) = round.shoe.draw() else {
            self.abort(round, AbortReason::ShoeExhausted, events);
            return;
        };

        round.dealer.give_card(card);
        debug!(%card, total = ?round.dealer.hand().best(), "dealer drew");
        events.push(GameEvent::DealerDrew {
            card,
            dealer: round.dealer.clone(),
        });

        let delay = self.shared.options.dealer_delay;
        self.schedule(round, Timer::DealerStep, delay);
    }

    /// Settles every seat and ends the round.
    fn conclude(&self, round: &mut Round, events: &mut Vec<GameEvent>) {
        Self::cancel_timer(round);

        let conclusion = Conclusion::settle(
            round.dealer.clone(),
            &round.seats,
            &self.shared.options,
            self.ledger(),
        );
        round.state = GameState::Ended;

        info!(
            dealer = ?conclusion.dealer_total(),
            wagered = conclusion.total_wagered(),
            paid = conclusion.total_paid(),
            "round concluded"
        );
        events.push(GameEvent::GameEnded(conclusion));
    }

    /// Refunds every stake and ends the round without a conclusion.
    pub(super) fn abort(&self, round: &mut Round, reason: AbortReason, events: &mut Vec<GameEvent>) {
        Self::cancel_timer(round);

        let refunded: u64 = round
            .seats
            .iter()
            .map(|seat| seat.refund(self.ledger()))
            .sum();
        round.state = GameState::Ended;

        error!(?reason, refunded, "round aborted");
        events.push(GameEvent::Aborted(reason));
    }
}
