//! Shared fixtures for the integration tests.

use std::sync::Arc;

use bjtable::{
    Card, Game, GameEvent, GameOptions, MemoryLedger, Rank, Session, Shuffler, Suit, User, UserId,
};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

pub const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(suit, rank)
}

/// Stacks `draws` on top of the shoe so they come out in that order.
///
/// Every card in `draws` must be distinct.
pub struct Preset {
    draws: Vec<Card>,
}

impl Preset {
    pub fn new(draws: &[Card]) -> Self {
        Self {
            draws: draws.to_vec(),
        }
    }
}

impl Shuffler for Preset {
    fn shuffle(&self, cards: &mut [Card]) {
        let count = self.draws.len();
        // The shoe draws from the end, so the first draw sorts last.
        cards.sort_by_key(|card| {
            self.draws
                .iter()
                .position(|draw| draw == card)
                .map_or(0, |index| count - index)
        });
    }
}

pub fn user(id: u64, name: &str) -> User {
    User::new(UserId(id), name)
}

pub fn ledger(balances: &[(u64, i64)]) -> Arc<MemoryLedger> {
    let ledger = Arc::new(MemoryLedger::new());
    for &(id, amount) in balances {
        ledger.deposit(UserId(id), amount);
    }
    ledger
}

pub fn game(
    options: GameOptions,
    ledger: &Arc<MemoryLedger>,
    draws: &[Card],
) -> (Game, UnboundedReceiver<GameEvent>) {
    let (sender, receiver) = unbounded_channel();
    let game = Game::new(
        options,
        ledger.clone(),
        Arc::new(Preset::new(draws)),
        Arc::new(sender),
    )
    .unwrap();
    (game, receiver)
}

pub fn session(
    options: GameOptions,
    ledger: &Arc<MemoryLedger>,
    draws: &[Card],
) -> (Session, UnboundedReceiver<GameEvent>) {
    let (sender, receiver) = unbounded_channel();
    let session = Session::new(
        options,
        ledger.clone(),
        Arc::new(Preset::new(draws)),
        Arc::new(sender),
    );
    (session, receiver)
}

pub async fn next_event(events: &mut UnboundedReceiver<GameEvent>) -> GameEvent {
    events.recv().await.expect("event channel closed")
}

/// Drains events until the round ends and returns them all.
pub async fn until_end(events: &mut UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    loop {
        let event = next_event(events).await;
        let done = matches!(event, GameEvent::GameEnded(_) | GameEvent::Aborted(_));
        seen.push(event);
        if done {
            return seen;
        }
    }
}
