//! Hand evaluation and hand state.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// The highest total that does not bust.
pub const TWENTY_ONE: u8 = 21;

/// Totals a hand can reach, ignoring those past 21.
///
/// Every ace is independently counted as 1 or 11. Duplicate sums collapse
/// after each card, so the set never holds more than 22 entries.
fn achievable_totals(cards: &[Card]) -> Vec<u8> {
    let mut sums: Vec<u8> = alloc::vec![0];

    for card in cards {
        let values = card.rank.values();
        let mut next = Vec::with_capacity(sums.len() * values.len());
        for &sum in &sums {
            for &value in values {
                let total = sum.saturating_add(value);
                if total <= TWENTY_ONE {
                    next.push(total);
                }
            }
        }
        next.sort_unstable_by(|a, b| b.cmp(a));
        next.dedup();
        sums = next;
    }

    sums
}

/// The evaluated value of a sequence of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    totals: Vec<u8>,
    blackjack: bool,
}

impl Evaluation {
    /// Evaluates `cards` from scratch.
    #[must_use]
    pub fn of(cards: &[Card]) -> Self {
        let totals = achievable_totals(cards);
        let blackjack = cards.len() == 2
            && totals.first() == Some(&TWENTY_ONE)
            && cards.iter().any(Card::is_ace);

        Self { totals, blackjack }
    }

    /// Non-bust totals, highest first.
    #[must_use]
    pub fn totals(&self) -> &[u8] {
        &self.totals
    }

    /// The highest non-bust total, or `None` if the hand is bust.
    #[must_use]
    pub fn best(&self) -> Option<u8> {
        self.totals.first().copied()
    }

    /// Whether every achievable total exceeds 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.totals.is_empty()
    }

    /// Whether any total lies in `minimum..=21`.
    #[must_use]
    pub fn reached(&self, minimum: u8) -> bool {
        self.totals
            .iter()
            .any(|total| (minimum..=TWENTY_ONE).contains(total))
    }

    /// Whether this is a two-card 21 containing an ace.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.blackjack
    }
}

/// Hand state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandState {
    /// Hand may still draw.
    Normal,
    /// Natural 21 on the first two cards.
    Blackjack,
    /// Every total exceeds 21.
    Busted,
    /// Seat gave up half its bet.
    Surrendered,
}

/// Cards held by a seat together with their derived state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    evaluation: Evaluation,
    state: HandState,
}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            evaluation: Evaluation::of(&[]),
            state: HandState::Normal,
        }
    }

    /// Adds a card and re-derives the hand state.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.evaluation = Evaluation::of(&self.cards);

        // Terminal states never revert
        if self.state != HandState::Normal {
            return;
        }

        if self.evaluation.is_bust() {
            self.state = HandState::Busted;
        } else if self.evaluation.is_blackjack() {
            self.state = HandState::Blackjack;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current evaluation.
    #[must_use]
    pub const fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Returns the highest non-bust total.
    #[must_use]
    pub fn best(&self) -> Option<u8> {
        self.evaluation.best()
    }

    /// Returns the current state of the hand.
    #[must_use]
    pub const fn state(&self) -> HandState {
        self.state
    }

    /// Marks the hand as surrendered.
    pub const fn surrender(&mut self) {
        self.state = HandState::Surrendered;
    }

    /// Whether another card may be drawn.
    #[must_use]
    pub const fn may_draw(&self) -> bool {
        matches!(self.state, HandState::Normal)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
