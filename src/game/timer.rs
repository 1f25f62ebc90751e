use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::{Game, GameState, Round};

/// What a pending timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Timer {
    /// Close the join window and deal.
    JoinWindow,
    /// Force the seat at this index to stand.
    TurnTimeout { seat: usize },
    /// Let the dealer take one step.
    DealerStep,
}

/// The single outstanding timer of a round.
pub(super) struct Pending {
    generation: u64,
    timer: Timer,
    handle: JoinHandle<()>,
}

impl Pending {
    pub(super) fn cancel(self) {
        self.handle.abort();
    }
}

impl Game {
    /// Replaces any pending timer with `timer`, due after `delay`.
    pub(super) fn schedule(&self, round: &mut Round, timer: Timer, delay: Duration) {
        round.generation += 1;
        let generation = round.generation;
        let weak = Arc::downgrade(&self.shared);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                Game { shared }.fire(generation);
            }
        });

        let replaced = round.pending.replace(Pending {
            generation,
            timer,
            handle,
        });
        if let Some(previous) = replaced {
            previous.cancel();
        }
    }

    /// Cancels the pending timer, if any.
    pub(super) fn cancel_timer(round: &mut Round) {
        if let Some(pending) = round.pending.take() {
            pending.cancel();
        }
    }

    fn fire(&self, generation: u64) {
        let mut round = self.shared.round.lock();

        // Only the most recently scheduled timer may act
        let Some(pending) = round
            .pending
            .take_if(|pending| pending.generation == generation)
        else {
            debug!(generation, "discarding stale timer");
            return;
        };

        let mut events = Vec::new();
        match pending.timer {
            Timer::JoinWindow => {
                if round.state == GameState::AwaitingPlayers {
                    self.deal_cards(&mut round, &mut events);
                }
            }
            Timer::TurnTimeout { seat } => {
                if round.state == GameState::PlayerTurns && round.turn == Some(seat) {
                    self.time_out(&mut round, seat, &mut events);
                } else {
                    debug!(seat, "turn already moved on, ignoring timeout");
                }
            }
            Timer::DealerStep => {
                if round.state == GameState::DealerTurn {
                    self.dealer_step(&mut round, &mut events);
                }
            }
        }
        self.publish(events);
    }
}
