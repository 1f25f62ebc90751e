//! One table per chat channel: round lifecycle and running statistics.

use alloc::string::String;
use alloc::sync::{Arc, Weak};

use tracing::{debug, info};

use crate::conclusion::Conclusion;
use crate::error::SessionError;
use crate::game::{Game, GameEvent, GameListener, GameState, TurnUpdate};
use crate::ledger::{Ledger, UserId};
use crate::options::GameOptions;
use crate::seat::Seat;
use crate::shoe::Shuffler;
use crate::sync::Mutex;

/// A user of the host chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Name shown at the table.
    pub name: String,
}

impl User {
    /// Creates a user.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Running totals across every round played at a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Rounds that reached a conclusion.
    pub rounds_completed: u64,
    /// Rounds abandoned without a conclusion.
    pub rounds_aborted: u64,
    /// Sum of final stakes over concluded rounds.
    pub total_wagered: u64,
    /// Sum of payouts over concluded rounds.
    pub total_paid_out: u64,
    /// What the house has kept (negative when it is down).
    pub house_balance: i64,
}

impl Statistics {
    fn record(&mut self, conclusion: &Conclusion) {
        self.rounds_completed += 1;
        self.total_wagered += conclusion.total_wagered();
        self.total_paid_out += conclusion.total_paid();
        self.house_balance += conclusion.house_net();
    }
}

struct ActiveRound {
    number: u64,
    game: Game,
}

struct Table {
    active: Option<ActiveRound>,
    rounds_started: u64,
    stats: Statistics,
}

impl Table {
    /// Clears the active slot if it still holds round `number`.
    fn release(&mut self, number: u64) {
        if self.active.as_ref().is_some_and(|active| active.number == number) {
            self.active = None;
        }
    }

    fn running(&self) -> Option<&Game> {
        self.active
            .as_ref()
            .map(|active| &active.game)
            .filter(|game| game.state() != GameState::Ended)
    }
}

struct Shared {
    options: GameOptions,
    ledger: Arc<dyn Ledger>,
    shuffler: Arc<dyn Shuffler>,
    listener: Arc<dyn GameListener>,
    table: Mutex<Table>,
}

/// Records round results in the session, then forwards every event.
struct Relay {
    session: Weak<Shared>,
    round: u64,
}

impl GameListener for Relay {
    fn notify(&self, event: GameEvent) {
        let Some(session) = self.session.upgrade() else {
            return;
        };

        match &event {
            GameEvent::GameEnded(conclusion) => {
                let mut table = session.table.lock();
                table.stats.record(conclusion);
                table.release(self.round);
                drop(table);
                debug!(round = self.round, "round recorded");
            }
            GameEvent::Aborted(_) => {
                let mut table = session.table.lock();
                table.stats.rounds_aborted += 1;
                table.release(self.round);
            }
            _ => {}
        }

        session.listener.notify(event);
    }
}

/// The table of one chat channel.
///
/// Runs at most one [`Game`] at a time and keeps statistics across rounds.
/// `Session` is a cheap handle; clones share the same table.
#[derive(Clone)]
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    /// Creates a table. `listener` receives the events of every round.
    #[must_use]
    pub fn new(
        options: GameOptions,
        ledger: Arc<dyn Ledger>,
        shuffler: Arc<dyn Shuffler>,
        listener: Arc<dyn GameListener>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                options,
                ledger,
                shuffler,
                listener,
                table: Mutex::new(Table {
                    active: None,
                    rounds_started: 0,
                    stats: Statistics::default(),
                }),
            }),
        }
    }

    /// Opens a new round and seats `user` in it.
    ///
    /// Without a `bet` the table minimum is staked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GameInProgress`] while another round runs, or
    /// the join error if `user` cannot take a seat (no round is opened).
    pub fn start_new_game(&self, user: &User, bet: Option<u64>) -> Result<Seat, SessionError> {
        let mut table = self.shared.table.lock();
        if table.running().is_some() {
            return Err(SessionError::GameInProgress);
        }

        let number = table.rounds_started + 1;
        let relay = Relay {
            session: Arc::downgrade(&self.shared),
            round: number,
        };
        let game = Game::new(
            self.shared.options.clone(),
            Arc::clone(&self.shared.ledger),
            Arc::clone(&self.shared.shuffler),
            Arc::new(relay),
        )?;

        game.initialize()?;
        let seat = game.join(user.id, user.name.clone(), self.stake(bet))?;

        table.rounds_started = number;
        table.active = Some(ActiveRound { number, game });
        drop(table);

        info!(round = number, user = %user.id, "new round started");
        Ok(seat)
    }

    /// Seats `user` in the running round.
    ///
    /// Without a `bet` the table minimum is staked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveGame`] if no round runs, or the join
    /// error.
    pub fn join(&self, user: &User, bet: Option<u64>) -> Result<Seat, SessionError> {
        let game = self.running()?;
        Ok(game.join(user.id, user.name.clone(), self.stake(bet))?)
    }

    /// Closes the join window of the running round and deals.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveGame`] if no round runs, or the usage
    /// error if the round already dealt.
    pub fn deal_now(&self) -> Result<(), SessionError> {
        Ok(self.running()?.deal_now()?)
    }

    /// Stands on behalf of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveGame`] if no round runs, or the action
    /// error.
    pub fn stand(&self, user: UserId) -> Result<TurnUpdate, SessionError> {
        Ok(self.running()?.stand(user)?)
    }

    /// Hits on behalf of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveGame`] if no round runs, or the action
    /// error.
    pub fn hit(&self, user: UserId) -> Result<TurnUpdate, SessionError> {
        Ok(self.running()?.hit(user)?)
    }

    /// Surrenders on behalf of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveGame`] if no round runs, or the action
    /// error.
    pub fn surrender(&self, user: UserId) -> Result<TurnUpdate, SessionError> {
        Ok(self.running()?.surrender(user)?)
    }

    /// Doubles down on behalf of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveGame`] if no round runs, or the action
    /// error.
    pub fn double_down(&self, user: UserId) -> Result<TurnUpdate, SessionError> {
        Ok(self.running()?.double_down(user)?)
    }

    /// Returns the running statistics.
    pub fn statistics(&self) -> Statistics {
        self.shared.table.lock().stats
    }

    /// Returns the running round, if any.
    pub fn game(&self) -> Option<Game> {
        self.shared.table.lock().running().cloned()
    }

    /// Returns the table options.
    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.shared.options
    }

    fn stake(&self, bet: Option<u64>) -> u64 {
        bet.unwrap_or(self.shared.options.min_bet)
    }

    fn running(&self) -> Result<Game, SessionError> {
        self.game().ok_or(SessionError::NoActiveGame)
    }
}
