//! Table configuration options.

use core::time::Duration;

/// When a natural blackjack is paid as a push instead of a blackjack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum BlackjackPush {
    /// A natural always pays the blackjack multiplier.
    Never,
    /// A natural pushes against a dealer natural.
    #[default]
    DealerNatural,
    /// A natural pushes against any dealer 21.
    DealerTwentyOne,
}

/// Payout multipliers applied to the stake at the end of a round.
///
/// A multiplier includes the returned stake: 2.0 doubles the bet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutRules {
    /// Natural blackjack.
    pub blackjack: f64,
    /// Beat the dealer or the dealer busted.
    pub higher: f64,
    /// Tied with the dealer.
    pub equal: f64,
    /// Surrendered on the first action.
    pub surrender: f64,
}

impl Default for PayoutRules {
    fn default() -> Self {
        Self {
            blackjack: 2.5,
            higher: 2.0,
            equal: 1.0,
            surrender: 0.5,
        }
    }
}

/// Configuration options for a table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_max_seats(5)
///     .with_turn_timeout(Duration::from_secs(20))
///     .with_min_bet(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of 52-card decks in the shoe.
    pub decks: u8,
    /// Maximum number of seats per round.
    pub max_seats: usize,
    /// How long a round accepts players before dealing.
    pub join_window: Duration,
    /// How long a seat may take to act before it is forced to stand.
    pub turn_timeout: Duration,
    /// Pause before each dealer action.
    pub dealer_delay: Duration,
    /// Total at which the dealer stops drawing.
    pub dealer_minimum: u8,
    /// Smallest accepted bet.
    pub min_bet: u64,
    /// Largest accepted bet, if any.
    pub max_bet: Option<u64>,
    /// Whether surrender is allowed.
    pub surrender: bool,
    /// Whether double down is allowed.
    pub double_down: bool,
    /// Payout multipliers.
    pub payouts: PayoutRules,
    /// How a natural is settled against a dealer 21.
    pub blackjack_push: BlackjackPush,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            max_seats: 3,
            join_window: Duration::from_secs(15),
            turn_timeout: Duration::from_secs(30),
            dealer_delay: Duration::from_millis(1_500),
            dealer_minimum: 17,
            min_bet: 1,
            max_bet: None,
            surrender: true,
            double_down: true,
            payouts: PayoutRules::default(),
            blackjack_push: BlackjackPush::DealerNatural,
        }
    }
}

#[cfg(feature = "std")]
fn read_env<T: core::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.parse::<T>().ok())
}

#[cfg(feature = "std")]
fn read_ms(key: &str) -> Option<Duration> {
    read_env::<u64>(key).map(Duration::from_millis)
}

impl GameOptions {
    /// Builds options from `BJTABLE_*` environment variables.
    ///
    /// Missing or unparsable variables keep their default value.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            decks: read_env("BJTABLE_DECKS").unwrap_or(defaults.decks),
            max_seats: read_env("BJTABLE_MAX_SEATS").unwrap_or(defaults.max_seats),
            join_window: read_ms("BJTABLE_JOIN_WINDOW_MS").unwrap_or(defaults.join_window),
            turn_timeout: read_ms("BJTABLE_TURN_TIMEOUT_MS").unwrap_or(defaults.turn_timeout),
            dealer_delay: read_ms("BJTABLE_DEALER_DELAY_MS").unwrap_or(defaults.dealer_delay),
            dealer_minimum: read_env("BJTABLE_DEALER_MINIMUM").unwrap_or(defaults.dealer_minimum),
            min_bet: read_env("BJTABLE_MIN_BET").unwrap_or(defaults.min_bet),
            max_bet: read_env("BJTABLE_MAX_BET").or(defaults.max_bet),
            ..defaults
        }
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the maximum number of seats.
    #[must_use]
    pub const fn with_max_seats(mut self, seats: usize) -> Self {
        self.max_seats = seats;
        self
    }

    /// Sets the join window.
    #[must_use]
    pub const fn with_join_window(mut self, window: Duration) -> Self {
        self.join_window = window;
        self
    }

    /// Sets the per-turn timeout.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_turn_timeout(Duration::from_secs(5));
    /// assert_eq!(options.turn_timeout, Duration::from_secs(5));
    /// ```
    #[must_use]
    pub const fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Sets the pause before each dealer action.
    #[must_use]
    pub const fn with_dealer_delay(mut self, delay: Duration) -> Self {
        self.dealer_delay = delay;
        self
    }

    /// Sets the total at which the dealer stops drawing.
    #[must_use]
    pub const fn with_dealer_minimum(mut self, minimum: u8) -> Self {
        self.dealer_minimum = minimum;
        self
    }

    /// Sets the minimum bet.
    #[must_use]
    pub const fn with_min_bet(mut self, bet: u64) -> Self {
        self.min_bet = bet;
        self
    }

    /// Sets the maximum bet.
    #[must_use]
    pub const fn with_max_bet(mut self, bet: Option<u64>) -> Self {
        self.max_bet = bet;
        self
    }

    /// Sets whether surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether double down is allowed.
    #[must_use]
    pub const fn with_double_down(mut self, allowed: bool) -> Self {
        self.double_down = allowed;
        self
    }

    /// Sets the payout multipliers.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, PayoutRules};
    ///
    /// let rules = PayoutRules { blackjack: 2.2, ..PayoutRules::default() };
    /// let options = GameOptions::default().with_payouts(rules);
    /// assert_eq!(options.payouts.blackjack, 2.2);
    /// ```
    #[must_use]
    pub const fn with_payouts(mut self, payouts: PayoutRules) -> Self {
        self.payouts = payouts;
        self
    }

    /// Sets how a natural is settled against a dealer 21.
    #[must_use]
    pub const fn with_blackjack_push(mut self, rule: BlackjackPush) -> Self {
        self.blackjack_push = rule;
        self
    }
}
