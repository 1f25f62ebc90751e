//! Session (table) integration tests.

mod common;

use bjtable::{
    AbortReason, GameEvent, GameOptions, GameState, JoinError, Ledger, Rank, SessionError,
    Statistics, Suit, UsageError, UserId,
};
use common::{card, ledger, next_event, session, until_end, user};

#[tokio::test(start_paused = true)]
async fn one_round_at_a_time() {
    let ledger = ledger(&[(1, 100), (2, 100)]);
    let (session, mut events) = session(GameOptions::default(), &ledger, &[]);
    let alice = user(1, "alice");
    let bob = user(2, "bob");

    let seat = session.start_new_game(&alice, Some(10)).unwrap();
    assert_eq!(seat.user(), Some(alice.id));
    assert_eq!(
        session.start_new_game(&bob, Some(10)),
        Err(SessionError::GameInProgress)
    );

    session.join(&bob, Some(10)).unwrap();
    assert_eq!(session.game().unwrap().seats().len(), 2);

    // Nobody acts, so every seat times out and the round still ends.
    until_end(&mut events).await;
    assert!(session.game().is_none());

    session.start_new_game(&bob, Some(10)).unwrap();
    let game = session.game().unwrap();
    assert_eq!(game.state(), GameState::AwaitingPlayers);
    assert_eq!(game.seats()[0].user(), Some(bob.id));
}

#[tokio::test(start_paused = true)]
async fn commands_need_a_running_round() {
    let ledger = ledger(&[(1, 100)]);
    let (session, _events) = session(GameOptions::default(), &ledger, &[]);
    let alice = user(1, "alice");

    assert_eq!(session.join(&alice, None), Err(SessionError::NoActiveGame));
    assert_eq!(session.stand(alice.id), Err(SessionError::NoActiveGame));
    assert_eq!(session.hit(alice.id), Err(SessionError::NoActiveGame));
    assert_eq!(session.surrender(alice.id), Err(SessionError::NoActiveGame));
    assert_eq!(session.double_down(alice.id), Err(SessionError::NoActiveGame));
    assert_eq!(session.deal_now(), Err(SessionError::NoActiveGame));
    assert!(session.game().is_none());
}

#[tokio::test(start_paused = true)]
async fn failed_opening_join_leaves_the_table_free() {
    let ledger = ledger(&[(2, 100)]);
    let (session, _events) = session(GameOptions::default(), &ledger, &[]);

    assert_eq!(
        session.start_new_game(&user(1, "broke"), Some(10)),
        Err(SessionError::Join(JoinError::InsufficientFunds))
    );
    assert!(session.game().is_none());

    session.start_new_game(&user(2, "bob"), Some(10)).unwrap();
    assert!(session.game().is_some());
}

#[tokio::test(start_paused = true)]
async fn missing_bet_stakes_the_table_minimum() {
    let ledger = ledger(&[(1, 100), (2, 100)]);
    let options = GameOptions::default().with_min_bet(5);
    let (session, _events) = session(options, &ledger, &[]);

    let seat = session.start_new_game(&user(1, "alice"), None).unwrap();
    assert_eq!(seat.bet(), 5);
    let seat = session.join(&user(2, "bob"), None).unwrap();
    assert_eq!(seat.bet(), 5);
    assert_eq!(ledger.balance(UserId(1)), 95);
    assert_eq!(session.options().min_bet, 5);

    session.deal_now().unwrap();
    assert_eq!(
        session.deal_now(),
        Err(SessionError::Usage(UsageError::NotAwaitingPlayers))
    );
    assert_eq!(
        session.join(&user(3, "cy"), None),
        Err(SessionError::Join(JoinError::InvalidState))
    );
}

#[tokio::test(start_paused = true)]
async fn statistics_follow_concluded_rounds() {
    let ledger = ledger(&[(1, 100)]);
    let draws = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Six, Suit::Hearts),
        card(Rank::Nine, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Nine, Suit::Clubs),
    ];
    let (session, mut events) = session(GameOptions::default(), &ledger, &draws);
    let alice = user(1, "alice");

    session.start_new_game(&alice, Some(10)).unwrap();
    assert!(matches!(
        next_event(&mut events).await,
        GameEvent::CardsDealt { .. }
    ));
    let update = session.stand(alice.id).unwrap();
    assert!(update.next.is_dealer());

    let events = until_end(&mut events).await;
    assert!(matches!(events.last(), Some(GameEvent::GameEnded(_))));
    assert_eq!(
        session.statistics(),
        Statistics {
            rounds_completed: 1,
            rounds_aborted: 0,
            total_wagered: 10,
            total_paid_out: 20,
            house_balance: -10,
        }
    );
    assert_eq!(ledger.balance(alice.id), 110);
}

#[tokio::test(start_paused = true)]
async fn aborted_rounds_are_counted_and_free_the_table() {
    let balances: Vec<(u64, i64)> = (1..=26).map(|id| (id, 5)).collect();
    let ledger = ledger(&balances);
    let options = GameOptions::default().with_max_seats(26);
    let (session, mut events) = session(options, &ledger, &[]);

    session.start_new_game(&user(1, "player1"), Some(1)).unwrap();
    for id in 2..=26 {
        session.join(&user(id, "player"), Some(1)).unwrap();
    }

    let events = until_end(&mut events).await;
    assert_eq!(events, vec![GameEvent::Aborted(AbortReason::ShoeExhausted)]);

    let stats = session.statistics();
    assert_eq!(stats.rounds_aborted, 1);
    assert_eq!(stats.rounds_completed, 0);
    assert!(session.game().is_none());
    assert!((1..=26).all(|id| ledger.balance(UserId(id)) == 5));
}
