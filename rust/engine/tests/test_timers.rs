use felt_engine::config::GameConfig;
use felt_engine::engine::{Hand, STAGE_PAUSE_MS};
use felt_engine::player::{PlayerAction, Seat};
use felt_engine::round::Stage;

fn started_hand(stacks: &[(&str, u32)], time_limit: u32) -> Hand {
    let seats = stacks.iter().map(|&(id, s)| Seat::new(id, s)).collect();
    let mut hand = Hand::new(seats, GameConfig::new(10, 20, 0, time_limit));
    hand.start().unwrap();
    hand.advance_time(STAGE_PAUSE_MS);
    hand
}

#[test]
fn timeout_folds_a_player_facing_a_bet() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)], 2);

    // a owes the big blind and never acts
    assert_eq!(hand.active_player(), Some("a"));
    hand.advance_time(2000);

    assert!(!hand.get_state().hole_cards.contains_key("a"));
    assert_eq!(hand.active_player(), Some("b"));
    let last = hand.action_history().last().unwrap();
    assert_eq!(last.player_id, "a");
    assert_eq!(last.action, PlayerAction::Fold);
}

#[test]
fn timeout_checks_when_checking_is_free() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)], 2);

    hand.act("a", PlayerAction::Bet(20)).unwrap();
    hand.act("b", PlayerAction::Bet(10)).unwrap();

    // c already has the big blind in and may check; let the clock run
    assert_eq!(hand.active_player(), Some("c"));
    hand.advance_time(2000);

    assert!(hand.get_state().hole_cards.contains_key("c"));
    assert_eq!(hand.stage(), Stage::Flop);
    let last = hand.action_history().last().unwrap();
    assert_eq!(last.player_id, "c");
    assert_eq!(last.action, PlayerAction::Bet(0));
}

#[test]
fn acting_cancels_the_countdown() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)], 2);

    // a acts one second in; a's pending expiry must not fire later
    hand.advance_time(1000);
    hand.act("a", PlayerAction::Bet(20)).unwrap();

    // b's own countdown started when a acted and has not expired yet
    hand.advance_time(1500);
    assert_eq!(hand.active_player(), Some("b"));
    assert!(hand.get_state().hole_cards.contains_key("a"));
    assert!(hand.get_state().hole_cards.contains_key("b"));

    // ...and expires on schedule, folding b who owes 10
    hand.advance_time(500);
    assert!(!hand.get_state().hole_cards.contains_key("b"));
}

#[test]
fn zero_time_limit_disables_the_timer() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000)], 0);

    hand.advance_time(60_000);
    assert_eq!(hand.active_player(), Some("a"));
    assert!(hand.get_state().hole_cards.contains_key("a"));
}

#[test]
fn destroy_suppresses_pending_work() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)], 2);
    let before = serde_json::to_value(hand.get_state()).unwrap();

    hand.destroy();
    hand.advance_time(60_000);

    // no timeout fold, no street advance, no mutation of any kind
    assert_eq!(serde_json::to_value(hand.get_state()).unwrap(), before);
    assert_eq!(hand.stage(), Stage::Preflop);
    assert!(hand.act("a", PlayerAction::Bet(20)).is_ok());
    assert_eq!(serde_json::to_value(hand.get_state()).unwrap(), before);
}

#[test]
fn destroyed_hand_never_starts() {
    let seats = vec![Seat::new("a", 1000), Seat::new("b", 1000)];
    let mut hand = Hand::new(seats, GameConfig::default());
    hand.destroy();
    assert!(hand.start().is_ok());
    assert_eq!(hand.stage(), Stage::Start);
}
