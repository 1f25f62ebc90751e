//! Card, hand, seat and payout tests.

#![allow(clippy::float_cmp)]

mod common;

use bjtable::conclusion::classify;
use bjtable::seat::payout_amount;
use bjtable::{
    BlackjackPush, Card, Conclusion, DECK_SIZE, Evaluation, GameOptions, Hand, HandState, Ledger,
    MemoryLedger, Outcome, PayoutRules, Rank, Seat, SeededShuffler, Shoe, ShoeError, Suit, UserId,
};
use common::card;

fn hand(cards: &[Card]) -> Hand {
    let mut hand = Hand::new();
    for &card in cards {
        hand.add_card(card);
    }
    hand
}

/// Every sum reachable by picking one value per card, at most 21, highest first.
fn brute_force_totals(cards: &[Card]) -> Vec<u8> {
    let mut sums = vec![0u16];
    for card in cards {
        sums = sums
            .iter()
            .flat_map(|&sum| card.rank.values().iter().map(move |&v| sum + u16::from(v)))
            .collect();
    }
    let mut totals: Vec<u8> = sums
        .into_iter()
        .filter(|&sum| sum <= 21)
        .map(|sum| sum as u8)
        .collect();
    totals.sort_unstable_by(|a, b| b.cmp(a));
    totals.dedup();
    totals
}

#[test]
fn rank_value_table() {
    assert_eq!(Rank::Ace.values(), &[1, 11]);
    assert_eq!(Rank::Seven.values(), &[7]);
    assert_eq!(Rank::Ten.values(), &[10]);
    assert_eq!(Rank::King.values(), &[10]);
    assert_eq!(card(Rank::Ten, Suit::Hearts).to_string(), "10♥");
    assert_eq!(card(Rank::Ace, Suit::Spades).to_string(), "A♠");
}

#[test]
fn two_aces_and_a_nine() {
    let cards = [
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Ace, Suit::Spades),
        card(Rank::Nine, Suit::Clubs),
    ];
    let evaluation = Evaluation::of(&cards);

    assert_eq!(evaluation.totals(), &[21, 11]);
    assert_eq!(evaluation.best(), Some(21));
    assert!(!evaluation.is_blackjack());
}

#[test]
fn totals_match_every_value_choice() {
    let hands: [&[Card]; 5] = [
        &[card(Rank::Ace, Suit::Hearts), card(Rank::Six, Suit::Clubs)],
        &[
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Ace, Suit::Spades),
            card(Rank::Ace, Suit::Diamonds),
        ],
        &[
            card(Rank::Five, Suit::Hearts),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Four, Suit::Spades),
            card(Rank::Ace, Suit::Diamonds),
        ],
        &[card(Rank::King, Suit::Hearts), card(Rank::Queen, Suit::Clubs)],
        &[
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Two, Suit::Spades),
        ],
    ];

    for cards in hands {
        assert_eq!(Evaluation::of(cards).totals(), brute_force_totals(cards));
    }
}

#[test]
fn incremental_evaluation_matches_from_scratch() {
    let cards = [
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Three, Suit::Clubs),
        card(Rank::Ace, Suit::Spades),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Five, Suit::Hearts),
    ];

    let mut hand = Hand::new();
    for (count, &card) in cards.iter().enumerate() {
        hand.add_card(card);
        assert_eq!(hand.evaluation(), &Evaluation::of(&cards[..=count]));
    }
}

#[test]
fn natural_blackjack_needs_two_cards_and_an_ace() {
    let natural = hand(&[card(Rank::Ace, Suit::Hearts), card(Rank::King, Suit::Spades)]);
    assert_eq!(natural.state(), HandState::Blackjack);
    assert!(!natural.may_draw());

    let sevens = hand(&[
        card(Rank::Seven, Suit::Hearts),
        card(Rank::Seven, Suit::Spades),
        card(Rank::Seven, Suit::Clubs),
    ]);
    assert_eq!(sevens.best(), Some(21));
    assert_eq!(sevens.state(), HandState::Normal);
    assert!(!sevens.evaluation().is_blackjack());
}

#[test]
fn bust_hand_has_no_totals() {
    let busted = hand(&[
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Ten, Suit::Spades),
        card(Rank::Five, Suit::Clubs),
    ]);

    assert_eq!(busted.state(), HandState::Busted);
    assert!(busted.evaluation().totals().is_empty());
    assert_eq!(busted.best(), None);
    assert!(!busted.may_draw());
}

#[test]
fn dealer_minimum_counts_soft_totals() {
    let soft_17 = Evaluation::of(&[card(Rank::Ace, Suit::Hearts), card(Rank::Six, Suit::Spades)]);
    assert!(soft_17.reached(17));

    let hard_16 = Evaluation::of(&[card(Rank::Ten, Suit::Hearts), card(Rank::Six, Suit::Spades)]);
    assert!(!hard_16.reached(17));
}

#[test]
fn surrender_is_terminal() {
    let mut hand = hand(&[card(Rank::Ten, Suit::Hearts), card(Rank::Six, Suit::Spades)]);
    hand.surrender();
    hand.add_card(card(Rank::Two, Suit::Clubs));

    assert_eq!(hand.state(), HandState::Surrendered);
    assert!(!hand.may_draw());
}

#[test]
fn standard_shoe_holds_unique_cards() {
    let mut shoe = Shoe::standard(1);
    assert_eq!(shoe.len(), DECK_SIZE);

    let mut seen = shoe.cards().to_vec();
    seen.sort_by_key(|card| (card.suit as u8, card.rank));
    seen.dedup();
    assert_eq!(seen.len(), DECK_SIZE);

    for _ in 0..DECK_SIZE {
        shoe.draw().unwrap();
    }
    assert!(shoe.is_empty());
    assert_eq!(shoe.draw().unwrap_err(), ShoeError::Empty);
}

#[test]
fn seeded_shuffle_is_a_reproducible_permutation() {
    let mut first = Shoe::standard(2);
    let mut second = Shoe::standard(2);
    first.shuffle(&SeededShuffler::new(7));
    second.shuffle(&SeededShuffler::new(7));

    assert_eq!(first, second);
    assert_ne!(first, Shoe::standard(2));
    assert_eq!(first.len(), 2 * DECK_SIZE);
}

#[test]
fn payouts_round_down() {
    assert_eq!(payout_amount(3, 2.5), 7);
    assert_eq!(payout_amount(5, 0.5), 2);
    assert_eq!(payout_amount(10, 2.0), 20);
    assert_eq!(payout_amount(10, 0.0), 0);
    assert_eq!(payout_amount(1 << 52, 2.0), 1 << 53);
    assert_eq!(payout_amount((1 << 53) - 1, 1.0), (1 << 53) - 1);
}

#[test]
fn dealer_seat_never_touches_the_ledger() {
    let ledger = MemoryLedger::new();
    let dealer = Seat::dealer("Dealer");

    dealer.confiscate_bet(&ledger);
    assert_eq!(dealer.reward(2.5, &ledger), 0);
    assert_eq!(dealer.bet(), 0);
    assert_eq!(dealer.user(), None);
}

#[test]
fn participant_bet_and_reward_go_through_the_ledger() {
    let ledger = MemoryLedger::new();
    let user = UserId(9);
    ledger.deposit(user, 50);

    let seat = Seat::participant(user, "nina", 3);
    seat.confiscate_bet(&ledger);
    assert_eq!(ledger.balance(user), 47);

    assert_eq!(seat.reward(2.5, &ledger), 7);
    assert_eq!(ledger.balance(user), 54);

    assert_eq!(seat.reward(0.0, &ledger), 0);
    assert_eq!(ledger.balance(user), 54);
}

#[test]
fn classification_against_the_dealer() {
    let dealer_20 = hand(&[card(Rank::Ten, Suit::Hearts), card(Rank::Queen, Suit::Hearts)]);
    let dealer_bust = hand(&[
        card(Rank::Ten, Suit::Clubs),
        card(Rank::Six, Suit::Clubs),
        card(Rank::Nine, Suit::Clubs),
    ]);
    let rule = BlackjackPush::DealerNatural;

    let nineteen = hand(&[card(Rank::Ten, Suit::Spades), card(Rank::Nine, Suit::Spades)]);
    let twenty = hand(&[card(Rank::King, Suit::Spades), card(Rank::Jack, Suit::Spades)]);
    let soft_21 = hand(&[
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::Five, Suit::Diamonds),
        card(Rank::Five, Suit::Spades),
    ]);

    assert_eq!(classify(&nineteen, &dealer_20, rule), Outcome::Lower);
    assert_eq!(classify(&twenty, &dealer_20, rule), Outcome::Equal);
    assert_eq!(classify(&soft_21, &dealer_20, rule), Outcome::Higher);
    assert_eq!(classify(&nineteen, &dealer_bust, rule), Outcome::Higher);

    let mut surrendered = nineteen.clone();
    surrendered.surrender();
    assert_eq!(classify(&surrendered, &dealer_20, rule), Outcome::Surrendered);

    let busted = hand(&[
        card(Rank::Ten, Suit::Diamonds),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Eight, Suit::Diamonds),
    ]);
    assert_eq!(classify(&busted, &dealer_bust, rule), Outcome::Busted);
}

#[test]
fn natural_against_dealer_twenty_one() {
    let natural = hand(&[card(Rank::Ace, Suit::Hearts), card(Rank::King, Suit::Hearts)]);
    let dealer_natural = hand(&[card(Rank::Ace, Suit::Clubs), card(Rank::Queen, Suit::Clubs)]);
    let dealer_three_card_21 = hand(&[
        card(Rank::Seven, Suit::Clubs),
        card(Rank::Seven, Suit::Spades),
        card(Rank::Seven, Suit::Diamonds),
    ]);

    assert_eq!(
        classify(&natural, &dealer_natural, BlackjackPush::Never),
        Outcome::Blackjack
    );
    assert_eq!(
        classify(&natural, &dealer_natural, BlackjackPush::DealerNatural),
        Outcome::Equal
    );
    assert_eq!(
        classify(&natural, &dealer_three_card_21, BlackjackPush::DealerNatural),
        Outcome::Blackjack
    );
    assert_eq!(
        classify(&natural, &dealer_three_card_21, BlackjackPush::DealerTwentyOne),
        Outcome::Equal
    );
}

#[test]
fn conclusion_buckets_and_house_net() {
    let ledger = MemoryLedger::new();
    let options = GameOptions::default();

    let mut dealer = Seat::dealer("Dealer");
    dealer.give_cards([card(Rank::Ten, Suit::Hearts), card(Rank::Eight, Suit::Hearts)]);

    let mut winner = Seat::participant(UserId(1), "ann", 10);
    winner.give_cards([card(Rank::Ten, Suit::Spades), card(Rank::Nine, Suit::Spades)]);
    let mut natural = Seat::participant(UserId(2), "bo", 3);
    natural.give_cards([card(Rank::Ace, Suit::Clubs), card(Rank::Jack, Suit::Clubs)]);
    let mut loser = Seat::participant(UserId(3), "cy", 4);
    loser.give_cards([card(Rank::Ten, Suit::Clubs), card(Rank::Seven, Suit::Clubs)]);

    let conclusion = Conclusion::settle(dealer, &[winner, natural, loser], &options, &ledger);

    assert!(!conclusion.dealer_busted());
    assert_eq!(conclusion.dealer_total(), Some(18));
    assert_eq!(conclusion.bucket(Outcome::Higher).count(), 1);
    assert_eq!(conclusion.bucket(Outcome::Blackjack).count(), 1);
    assert_eq!(conclusion.bucket(Outcome::Lower).count(), 1);
    assert_eq!(conclusion.bucket(Outcome::Equal).count(), 0);

    let payouts: Vec<u64> = conclusion.results().iter().map(|r| r.payout).collect();
    assert_eq!(payouts, vec![20, 7, 0]);
    assert_eq!(conclusion.total_wagered(), 17);
    assert_eq!(conclusion.total_paid(), 27);
    assert_eq!(conclusion.house_net(), -10);

    assert_eq!(ledger.balance(UserId(1)), 20);
    assert_eq!(ledger.balance(UserId(2)), 7);
    assert_eq!(ledger.balance(UserId(3)), 0);
}

#[test]
fn multipliers_come_from_payout_rules() {
    let rules = PayoutRules {
        blackjack: 2.2,
        surrender: 0.0,
        ..PayoutRules::default()
    };

    assert_eq!(Outcome::Blackjack.multiplier(&rules), 2.2);
    assert_eq!(Outcome::Surrendered.multiplier(&rules), 0.0);
    assert_eq!(Outcome::Higher.multiplier(&rules), 2.0);
    assert_eq!(Outcome::Equal.multiplier(&rules), 1.0);
    assert_eq!(Outcome::Lower.multiplier(&rules), 0.0);
    assert_eq!(Outcome::Busted.multiplier(&rules), 0.0);
}
