//! Game state types.

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Created, not yet open for players.
    Initializing,
    /// Join window is open.
    AwaitingPlayers,
    /// Initial cards are being dealt.
    DealingCards,
    /// Seats act one after another.
    PlayerTurns,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round has concluded or was aborted.
    Ended,
}

/// Who holds the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// No cards dealt yet.
    NotStarted,
    /// The seat at this join-order index.
    Seat(usize),
    /// Every seat is done; the dealer acts.
    Dealer,
}
