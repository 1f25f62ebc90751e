use alloc::string::String;
use alloc::vec::Vec;

use tracing::{info, warn};

use crate::error::{JoinError, ShoeError, UsageError};
use crate::ledger::UserId;
use crate::seat::Seat;

use super::event::{AbortReason, GameEvent};
use super::timer::Timer;
use super::{Game, GameState, Round};

impl Round {
    fn deal_round_of_cards(&mut self) -> Result<(), ShoeError> {
        for seat in &mut self.seats {
            seat.give_card(self.shoe.draw()?);
        }
        Ok(())
    }

    /// One card to each seat, the dealer's up card, then a second card to
    /// each seat.
    fn deal_initial(&mut self) -> Result<(), ShoeError> {
        self.deal_round_of_cards()?;
        let up_card = self.shoe.draw()?;
        self.dealer.give_card(up_card);
        self.deal_round_of_cards()
    }
}

impl Game {
    /// Opens the join window.
    ///
    /// When the window closes the cards are dealt to whoever has joined.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::AlreadyInitialized`] if called more than once.
    pub fn initialize(&self) -> Result<(), UsageError> {
        let mut round = self.shared.round.lock();
        if round.state != GameState::Initializing {
            return Err(UsageError::AlreadyInitialized);
        }

        round.state = GameState::AwaitingPlayers;
        if let Some(inbox) = round.inbox.take() {
            self.spawn_forwarder(inbox);
        }
        let window = self.shared.options.join_window;
        self.schedule(&mut round, Timer::JoinWindow, window);
        drop(round);

        info!(?window, "join window opened");
        Ok(())
    }

    /// Seats `user` with the given bet and debits it from the ledger.
    ///
    /// Returns a snapshot of the new seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the join window is closed, the user is already
    /// seated, the table is full, the bet is outside the table limits, or
    /// the user's balance cannot cover it.
    pub fn join(&self, user: UserId, name: impl Into<String>, bet: u64) -> Result<Seat, JoinError> {
        let options = &self.shared.options;
        let mut round = self.shared.round.lock();

        if round.state != GameState::AwaitingPlayers {
            return Err(JoinError::InvalidState);
        }

        if round.seats.iter().any(|seat| seat.user() == Some(user)) {
            return Err(JoinError::AlreadyJoined);
        }

        if round.seats.len() >= options.max_seats {
            return Err(JoinError::TableFull);
        }

        if bet == 0 {
            return Err(JoinError::InvalidBet);
        }

        if bet < options.min_bet {
            return Err(JoinError::BetTooLow);
        }

        if options.max_bet.is_some_and(|max| bet > max) {
            return Err(JoinError::BetTooHigh);
        }

        let balance = self.ledger().balance(user);
        if !u64::try_from(balance).is_ok_and(|balance| balance >= bet) {
            return Err(JoinError::InsufficientFunds);
        }

        let seat = Seat::participant(user, name, bet);
        seat.confiscate_bet(self.ledger());
        round.seats.push(seat.clone());
        let seated = round.seats.len();
        drop(round);

        info!(%user, bet, seated, "player joined");
        Ok(seat)
    }

    /// Closes the join window early and deals to everyone seated.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotAwaitingPlayers`] outside the join window,
    /// or [`UsageError::NoPlayers`] if nobody has joined yet (the window
    /// stays open).
    pub fn deal_now(&self) -> Result<(), UsageError> {
        let mut round = self.shared.round.lock();
        if round.state != GameState::AwaitingPlayers {
            return Err(UsageError::NotAwaitingPlayers);
        }

        if round.seats.is_empty() {
            return Err(UsageError::NoPlayers);
        }

        Self::cancel_timer(&mut round);
        let mut events = Vec::new();
        self.deal_cards(&mut round, &mut events);
        self.publish(events);
        drop(round);

        Ok(())
    }

    /// Shuffles, deals two cards to every seat and one to the dealer, then
    /// hands the turn to the first seat that can act.
    pub(super) fn deal_cards(&self, round: &mut Round, events: &mut Vec<GameEvent>) {
        round.state = GameState::DealingCards;

        if round.seats.is_empty() {
            warn!("join window closed with no players");
            self.abort(round, AbortReason::NoPlayers, events);
            return;
        }

        round.shoe.shuffle(self.shared.shuffler.as_ref());

        if round.deal_initial().is_err() {
            self.abort(round, AbortReason::ShoeExhausted, events);
            return;
        }

        round.state = GameState::PlayerTurns;
        round.turn = None;
        let first = self.advance_turn(round);

        info!(
            seats = round.seats.len(),
            first = first.name(),
            "cards dealt"
        );
        events.push(GameEvent::CardsDealt {
            seats: round.seats.clone(),
            dealer: round.dealer.clone(),
            first,
        });
    }
}
