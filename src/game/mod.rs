//! Timed round engine and state management.

use alloc::sync::Arc;
use alloc::vec::Vec;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

use crate::error::UsageError;
use crate::ledger::{Ledger, UserId};
use crate::options::GameOptions;
use crate::seat::Seat;
use crate::shoe::{Shoe, Shuffler};
use crate::sync::Mutex;

mod actions;
mod dealer;
pub mod event;
mod join;
pub mod state;
mod timer;

pub use actions::TurnUpdate;
pub use event::{AbortReason, GameEvent, GameListener};
pub use state::{GameState, Turn};

use timer::Pending;

/// Display name of the dealer seat.
pub const DEALER_NAME: &str = "Dealer";

/// Mutable state of one round. Only touched under the round lock.
struct Round {
    state: GameState,
    /// Participant seats in join order.
    seats: Vec<Seat>,
    dealer: Seat,
    /// Index of the seat holding the turn; `seats.len()` means the dealer.
    turn: Option<usize>,
    shoe: Shoe,
    /// Bumped for every scheduled timer.
    generation: u64,
    pending: Option<Pending>,
    /// Receiving end of the outbox until the forwarder takes it.
    inbox: Option<UnboundedReceiver<GameEvent>>,
}

impl Drop for Round {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

struct Shared {
    options: GameOptions,
    ledger: Arc<dyn Ledger>,
    shuffler: Arc<dyn Shuffler>,
    listener: Arc<dyn GameListener>,
    /// Events queued in the order the round produced them.
    outbox: UnboundedSender<GameEvent>,
    round: Mutex<Round>,
}

/// A single blackjack round driven by player actions and timers.
///
/// `Game` is a cheap handle; clones share the same round. Timers only keep
/// a weak reference, so dropping the last handle cancels the round's
/// pending timer. Every operation that schedules a timer must run inside a
/// tokio runtime.
///
/// Events reach the listener in the order they happened, from a single
/// forwarding task started by [`Game::initialize`].
#[derive(Clone)]
pub struct Game {
    shared: Arc<Shared>,
}

impl Game {
    /// Creates a round in the [`GameState::Initializing`] state.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NoDecks`] if the options ask for an empty shoe.
    pub fn new(
        options: GameOptions,
        ledger: Arc<dyn Ledger>,
        shuffler: Arc<dyn Shuffler>,
        listener: Arc<dyn GameListener>,
    ) -> Result<Self, UsageError> {
        if options.decks == 0 {
            return Err(UsageError::NoDecks);
        }

        let (outbox, inbox) = unbounded_channel();
        let round = Round {
            state: GameState::Initializing,
            seats: Vec::new(),
            dealer: Seat::dealer(DEALER_NAME),
            turn: None,
            shoe: Shoe::standard(options.decks),
            generation: 0,
            pending: None,
            inbox: Some(inbox),
        };

        Ok(Self {
            shared: Arc::new(Shared {
                options,
                ledger,
                shuffler,
                listener,
                outbox,
                round: Mutex::new(round),
            }),
        })
    }

    /// Returns the table options.
    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.shared.options
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        self.shared.round.lock().state
    }

    /// Returns who holds the turn.
    pub fn turn(&self) -> Turn {
        let round = self.shared.round.lock();
        match round.turn {
            None => Turn::NotStarted,
            Some(index) if index < round.seats.len() => Turn::Seat(index),
            Some(_) => Turn::Dealer,
        }
    }

    /// Returns the user whose turn it is.
    ///
    /// Returns `None` before dealing and once the dealer holds the turn.
    pub fn current_player(&self) -> Option<UserId> {
        let round = self.shared.round.lock();
        round
            .turn
            .and_then(|index| round.seats.get(index))
            .and_then(Seat::user)
    }

    /// Returns a snapshot of every participant seat, in join order.
    pub fn seats(&self) -> Vec<Seat> {
        self.shared.round.lock().seats.clone()
    }

    /// Returns a snapshot of the seat held by `user`.
    pub fn seat(&self, user: UserId) -> Option<Seat> {
        self.shared
            .round
            .lock()
            .seats
            .iter()
            .find(|seat| seat.user() == Some(user))
            .cloned()
    }

    /// Returns a snapshot of the dealer seat.
    pub fn dealer(&self) -> Seat {
        self.shared.round.lock().dealer.clone()
    }

    /// Returns the number of cards left in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shared.round.lock().shoe.len()
    }

    fn ledger(&self) -> &dyn Ledger {
        self.shared.ledger.as_ref()
    }

    /// Queues events for the listener. Must be called with the round lock
    /// held, so the queue order matches the order of state changes.
    fn publish(&self, events: Vec<GameEvent>) {
        for event in events {
            if self.shared.outbox.send(event).is_err() {
                debug!("event forwarder stopped, dropping event");
            }
        }
    }

    /// Drains the outbox into the listener until every handle is gone.
    fn spawn_forwarder(&self, mut inbox: UnboundedReceiver<GameEvent>) {
        let listener = Arc::clone(&self.shared.listener);
        tokio::spawn(async move {
            while let Some(event) = inbox.recv().await {
                listener.notify(event);
            }
        });
    }
}
