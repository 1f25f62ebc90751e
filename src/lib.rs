//! A timed multiplayer blackjack round engine for chat services.
//!
//! A [`Session`] owns the table of one chat channel. Each round is a
//! [`Game`]: players join during a join window, cards are dealt, every seat
//! acts in turn under a timeout, the dealer draws to its minimum and the
//! round settles through an external [`Ledger`].
//!
//! The card, hand, seat and payout types also build without `std` (enable
//! the `alloc` feature); the timed engine needs `std` and a tokio runtime.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bjtable::{GameOptions, MemoryLedger, SeededShuffler, Session, User, UserId};
//!
//! # async fn run() -> Result<(), bjtable::SessionError> {
//! let (events, _receiver) = tokio::sync::mpsc::unbounded_channel();
//! let ledger = Arc::new(MemoryLedger::new());
//! ledger.deposit(UserId(1), 100);
//!
//! let session = Session::new(
//!     GameOptions::default(),
//!     ledger,
//!     Arc::new(SeededShuffler::new(42)),
//!     Arc::new(events),
//! );
//! session.start_new_game(&User::new(UserId(1), "alice"), Some(10))?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod conclusion;
pub mod error;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod game;
pub mod hand;
pub mod ledger;
pub mod options;
pub mod seat;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod session;
pub mod shoe;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use conclusion::{Conclusion, Outcome, SeatResult};
#[cfg(feature = "std")]
pub use error::SessionError;
pub use error::{ActionError, JoinError, ShoeError, UsageError};
#[cfg(feature = "std")]
pub use game::{AbortReason, Game, GameEvent, GameListener, GameState, Turn, TurnUpdate};
pub use hand::{Evaluation, Hand, HandState};
pub use ledger::{Ledger, LedgerReason, MemoryLedger, UserId};
pub use options::{BlackjackPush, GameOptions, PayoutRules};
pub use seat::{Seat, SeatKind};
#[cfg(feature = "std")]
pub use session::{Session, Statistics, User};
pub use shoe::{SeededShuffler, Shoe, Shuffler};
