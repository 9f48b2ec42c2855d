use std::collections::BTreeMap;

use felt_engine::config::GameConfig;
use felt_engine::engine::{Hand, STAGE_PAUSE_MS};
use felt_engine::errors::HandError;
use felt_engine::player::Seat;

fn hand_with(stacks: &[(&str, u32)], config: GameConfig) -> Hand {
    let seats = stacks.iter().map(|&(id, s)| Seat::new(id, s)).collect();
    Hand::new(seats, config)
}

#[test]
fn three_players_post_blinds_after_button() {
    let mut hand = hand_with(
        &[("a", 1000), ("b", 1000), ("c", 1000)],
        GameConfig::new(10, 20, 0, 30),
    );
    hand.start().unwrap();

    let state = hand.get_state();
    let expected: BTreeMap<String, u32> =
        BTreeMap::from([("b".to_string(), 10), ("c".to_string(), 20)]);
    assert_eq!(state.bets, expected);
    assert_eq!(state.min_raise, 20);

    // action opens after the post-deal pause, on the seat after the big blind
    hand.advance_time(STAGE_PAUSE_MS);
    assert_eq!(hand.active_player(), Some("a"));
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let mut hand = hand_with(&[("a", 1000), ("b", 1000)], GameConfig::new(10, 20, 0, 30));
    hand.start().unwrap();

    let state = hand.get_state();
    let expected: BTreeMap<String, u32> =
        BTreeMap::from([("a".to_string(), 10), ("b".to_string(), 20)]);
    assert_eq!(state.bets, expected);

    hand.advance_time(STAGE_PAUSE_MS);
    assert_eq!(hand.active_player(), Some("a"));
}

#[test]
fn antes_come_from_every_non_blind_seat() {
    let mut hand = hand_with(
        &[("a", 1000), ("b", 1000), ("c", 1000), ("d", 1000)],
        GameConfig::new(10, 20, 5, 30),
    );
    hand.start().unwrap();

    let state = hand.get_state();
    let expected: BTreeMap<String, u32> = BTreeMap::from([
        ("a".to_string(), 5),
        ("b".to_string(), 10),
        ("c".to_string(), 20),
        ("d".to_string(), 5),
    ]);
    assert_eq!(state.bets, expected);
}

#[test]
fn stack_short_blind_posts_entire_stack() {
    let mut hand = hand_with(
        &[("a", 1000), ("b", 4), ("c", 1000)],
        GameConfig::new(10, 20, 0, 30),
    );
    hand.start().unwrap();

    assert_eq!(hand.get_state().bets.get("b"), Some(&4));
    assert_eq!(hand.get_seat_by_player_id("b").unwrap().stack(), 0);
}

#[test]
fn start_requires_two_seats() {
    let mut hand = hand_with(&[("a", 1000)], GameConfig::default());
    assert_eq!(
        hand.start().unwrap_err(),
        HandError::NotEnoughSeats { count: 1 }
    );
}

#[test]
fn start_twice_fails() {
    let mut hand = hand_with(&[("a", 1000), ("b", 1000)], GameConfig::default());
    hand.start().unwrap();
    assert_eq!(hand.start().unwrap_err(), HandError::AlreadyStarted);
}

#[test]
fn every_seat_is_dealt_two_cards() {
    let mut hand = hand_with(
        &[("a", 1000), ("b", 1000), ("c", 1000)],
        GameConfig::default(),
    );
    hand.start().unwrap();
    let state = hand.get_state();
    assert_eq!(state.hole_cards.len(), 3);
    assert!(state.community_cards.is_empty());
}
