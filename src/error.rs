//! Error types for table operations.

use thiserror::Error;

/// Errors from drawing out of a shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No cards left.
    #[error("the shoe is empty")]
    Empty,
}

/// Misuse of the round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    /// The round was already initialized.
    #[error("the game was already initialized")]
    AlreadyInitialized,
    /// The join window is not open.
    #[error("the round is not accepting players")]
    NotAwaitingPlayers,
    /// Dealing was attempted with nobody seated.
    #[error("no players have joined")]
    NoPlayers,
    /// The options request a shoe without any cards.
    #[error("the shoe must hold at least one deck")]
    NoDecks,
}

/// Errors that can occur when joining a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JoinError {
    /// The round is not accepting players.
    #[error("this game is not accepting players")]
    InvalidState,
    /// The user already holds a seat.
    #[error("you already joined this game")]
    AlreadyJoined,
    /// Every seat is taken.
    #[error("the table is full")]
    TableFull,
    /// The bet is zero.
    #[error("the bet must be a positive amount")]
    InvalidBet,
    /// The bet is below the table minimum.
    #[error("the bet is below the table minimum")]
    BetTooLow,
    /// The bet is above the table maximum.
    #[error("the bet is above the table maximum")]
    BetTooHigh,
    /// The user cannot cover the bet.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Errors that can occur during seat actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("the game is not waiting for player actions")]
    InvalidState,
    /// Not this user's turn.
    #[error("it is not your turn")]
    NotYourTurn,
    /// Surrender is disabled or the seat already acted.
    #[error("you can only surrender as your first action")]
    CannotSurrender,
    /// Double down is disabled or the seat already acted.
    #[error("you can only double down as your first action")]
    CannotDouble,
    /// The user cannot cover a matching stake.
    #[error("insufficient funds to double down")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

impl From<ShoeError> for ActionError {
    fn from(_: ShoeError) -> Self {
        Self::NoCards
    }
}

/// Errors from a table session.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A round is already running.
    #[error("a game is already running at this table")]
    GameInProgress,
    /// No round is running.
    #[error("there is no game running at this table")]
    NoActiveGame,
    /// Lifecycle misuse.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// Join rejected.
    #[error(transparent)]
    Join(#[from] JoinError),
    /// Action rejected.
    #[error(transparent)]
    Action(#[from] ActionError),
}
