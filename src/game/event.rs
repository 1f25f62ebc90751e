//! Notifications a round emits while it runs.

use alloc::vec::Vec;

use tokio::sync::mpsc::UnboundedSender;

use crate::card::Card;
use crate::conclusion::Conclusion;
use crate::seat::Seat;

/// Why a round ended without a conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The join window closed with nobody seated.
    NoPlayers,
    /// The shoe ran out of cards.
    ShoeExhausted,
}

/// Something that happened in a round.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Initial cards are out.
    CardsDealt {
        /// Every participant seat, in join order.
        seats: Vec<Seat>,
        /// The dealer, holding the up card.
        dealer: Seat,
        /// Whoever acts first (possibly the dealer).
        first: Seat,
    },
    /// A seat did not act in time and was made to stand.
    TurnTimedOut {
        /// The seat that timed out.
        seat: Seat,
        /// Whoever holds the turn now.
        next: Seat,
    },
    /// The dealer drew a card.
    DealerDrew {
        /// The card drawn.
        card: Card,
        /// The dealer after the draw.
        dealer: Seat,
    },
    /// The round concluded and payouts were applied.
    GameEnded(Conclusion),
    /// The round was abandoned and every stake refunded.
    Aborted(AbortReason),
}

/// Receives round events.
///
/// Calls arrive in order from one task per round and never hold the round
/// lock; an implementation must not block.
pub trait GameListener: Send + Sync {
    /// Handles one event.
    fn notify(&self, event: GameEvent);
}

impl GameListener for UnboundedSender<GameEvent> {
    fn notify(&self, event: GameEvent) {
        if self.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}
