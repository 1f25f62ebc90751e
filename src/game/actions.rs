use alloc::vec::Vec;
use std::sync::MutexGuard;

use tracing::{debug, info};

use crate::card::Card;
use crate::error::ActionError;
use crate::ledger::UserId;
use crate::seat::Seat;

use super::event::{AbortReason, GameEvent};
use super::timer::Timer;
use super::{Game, GameState, Round};

/// Result of an accepted seat action.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnUpdate {
    /// The acting seat after the action.
    pub seat: Seat,
    /// The card drawn, for hit and double down.
    pub card: Option<Card>,
    /// Whoever holds the turn now (the acting seat, another seat, or the
    /// dealer).
    pub next: Seat,
}

impl Round {
    /// Returns the index of `user`'s seat if it holds the turn.
    fn turn_of(&self, user: UserId) -> Result<usize, ActionError> {
        if self.state != GameState::PlayerTurns {
            return Err(ActionError::InvalidState);
        }

        self.turn
            .filter(|&index| self.seats.get(index).and_then(Seat::user) == Some(user))
            .ok_or(ActionError::NotYourTurn)
    }
}

impl Game {
    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turns or it is not the
    /// user's turn.
    pub fn stand(&self, user: UserId) -> Result<TurnUpdate, ActionError> {
        let mut round = self.shared.round.lock();
        let index = round.turn_of(user)?;

        Self::cancel_timer(&mut round);
        round.seats[index].mark_acted();
        let next = self.advance_turn(&mut round);
        let seat = round.seats[index].clone();
        drop(round);

        info!(%user, next = next.name(), "stand");
        Ok(TurnUpdate {
            seat,
            card: None,
            next,
        })
    }

    /// Player action: Hit (draw a card).
    ///
    /// The seat keeps the turn with a fresh timeout unless it busted.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turns, it is not the
    /// user's turn, or the shoe is empty (which aborts the round).
    pub fn hit(&self, user: UserId) -> Result<TurnUpdate, ActionError> {
        let mut round = self.shared.round.lock();
        let index = round.turn_of(user)?;

        let Ok(card) = round.shoe.draw() else {
            return Err(self.abort_exhausted(round));
        };

        Self::cancel_timer(&mut round);
        let seat = &mut round.seats[index];
        seat.give_card(card);
        seat.mark_acted();
        let may_draw = seat.may_draw();

        let next = if may_draw {
            let timeout = self.shared.options.turn_timeout;
            self.schedule(&mut round, Timer::TurnTimeout { seat: index }, timeout);
            round.seats[index].clone()
        } else {
            self.advance_turn(&mut round)
        };
        let seat = round.seats[index].clone();
        drop(round);

        info!(%user, %card, total = ?seat.hand().best(), "hit");
        Ok(TurnUpdate {
            seat,
            card: Some(card),
            next,
        })
    }

    /// Player action: Surrender (give up half the bet).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turns, it is not the
    /// user's turn, surrender is disabled, or the seat already acted.
    pub fn surrender(&self, user: UserId) -> Result<TurnUpdate, ActionError> {
        let mut round = self.shared.round.lock();
        let index = round.turn_of(user)?;

        if !self.shared.options.surrender || round.seats[index].has_acted() {
            return Err(ActionError::CannotSurrender);
        }

        Self::cancel_timer(&mut round);
        let seat = &mut round.seats[index];
        seat.set_surrendered();
        seat.mark_acted();
        let next = self.advance_turn(&mut round);
        let seat = round.seats[index].clone();
        drop(round);

        info!(%user, "surrender");
        Ok(TurnUpdate {
            seat,
            card: None,
            next,
        })
    }

    /// Player action: Double down (match the bet, receive one card, then
    /// give up the turn).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turns, it is not the
    /// user's turn, doubling is disabled, the seat already acted, the user
    /// cannot cover a matching stake, or the shoe is empty (which aborts the
    /// round).
    pub fn double_down(&self, user: UserId) -> Result<TurnUpdate, ActionError> {
        let mut round = self.shared.round.lock();
        let index = round.turn_of(user)?;

        if !self.shared.options.double_down || round.seats[index].has_acted() {
            return Err(ActionError::CannotDouble);
        }

        let bet = round.seats[index].bet();
        let balance = self.ledger().balance(user);
        if !u64::try_from(balance).is_ok_and(|balance| balance >= bet) {
            return Err(ActionError::InsufficientFunds);
        }

        let Ok(card) = round.shoe.draw() else {
            return Err(self.abort_exhausted(round));
        };

        Self::cancel_timer(&mut round);
        let seat = &mut round.seats[index];
        seat.double_bet(self.shared.ledger.as_ref());
        seat.give_card(card);
        seat.mark_acted();
        let next = self.advance_turn(&mut round);
        let seat = round.seats[index].clone();
        drop(round);

        info!(%user, %card, bet = seat.bet(), "double down");
        Ok(TurnUpdate {
            seat,
            card: Some(card),
            next,
        })
    }

    /// Moves the turn to the next seat that can draw, or to the dealer.
    ///
    /// The turn index only ever increases. Schedules the matching timer and
    /// returns a snapshot of the new turn holder.
    pub(super) fn advance_turn(&self, round: &mut Round) -> Seat {
        let start = round.turn.map_or(0, |index| index + 1);
        let next = (start..round.seats.len()).find(|&index| round.seats[index].may_draw());

        if let Some(index) = next {
            round.turn = Some(index);
            let timeout = self.shared.options.turn_timeout;
            self.schedule(round, Timer::TurnTimeout { seat: index }, timeout);
            debug!(seat = index, "turn passed to seat");
            return round.seats[index].clone();
        }

        round.turn = Some(round.seats.len());
        round.state = GameState::DealerTurn;
        let delay = self.shared.options.dealer_delay;
        self.schedule(round, Timer::DealerStep, delay);
        debug!("turn passed to dealer");
        round.dealer.clone()
    }

    /// Forces the seat at `index` to stand after its timeout elapsed.
    pub(super) fn time_out(&self, round: &mut Round, index: usize, events: &mut Vec<GameEvent>) {
        let seat = round.seats[index].clone();
        let next = self.advance_turn(round);

        info!(user = ?seat.user(), next = next.name(), "turn timed out");
        events.push(GameEvent::TurnTimedOut { seat, next });
    }

    fn abort_exhausted(&self, mut round: MutexGuard<'_, Round>) -> ActionError {
        let mut events = Vec::new();
        self.abort(&mut round, AbortReason::ShoeExhausted, &mut events);
        self.publish(events);
        drop(round);

        ActionError::NoCards
    }
}
