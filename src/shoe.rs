//! The shoe a round draws from, and the shuffle primitive behind it.

extern crate alloc;

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::ShoeError;
use crate::sync::Mutex;

/// A uniform random permutation of a card sequence.
pub trait Shuffler: Send + Sync {
    /// Permutes `cards` in place.
    fn shuffle(&self, cards: &mut [Card]);
}

/// A [`Shuffler`] driven by a seeded `ChaCha8` generator.
pub struct SeededShuffler {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededShuffler {
    /// Creates a shuffler from the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&self, cards: &mut [Card]) {
        cards.shuffle(&mut *self.rng.lock());
    }
}

/// An ordered, drawable sequence of cards.
///
/// Cards are drawn from the end of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Builds an unshuffled shoe of `sets` full decks.
    #[must_use]
    pub fn standard(sets: u8) -> Self {
        let mut cards = Vec::with_capacity(sets as usize * DECK_SIZE);

        for _ in 0..sets {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        Self { cards }
    }

    /// Shuffles the remaining cards.
    pub fn shuffle(&mut self, shuffler: &dyn Shuffler) {
        shuffler.shuffle(&mut self.cards);
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Empty)
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards, top card last.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
