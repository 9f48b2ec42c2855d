use std::cell::RefCell;
use std::rc::Rc;

use felt_engine::config::GameConfig;
use felt_engine::engine::{Hand, PotAward, STAGE_PAUSE_MS};
use felt_engine::errors::HandError;
use felt_engine::player::{PlayerAction, Seat};
use felt_engine::round::Stage;

fn started_hand(stacks: &[(&str, u32)]) -> Hand {
    let seats = stacks.iter().map(|&(id, s)| Seat::new(id, s)).collect();
    let mut hand = Hand::new(seats, GameConfig::new(10, 20, 0, 30));
    hand.start().unwrap();
    hand.advance_time(STAGE_PAUSE_MS);
    hand
}

fn total_chips(hand: &Hand) -> u32 {
    let stacks: u32 = hand.seats().iter().map(|s| s.stack()).sum();
    let pots: u32 = hand.pots().iter().map(|p| p.amount()).sum();
    let bets: u32 = hand.get_state().bets.values().sum();
    stacks + pots + bets
}

#[test]
fn checks_through_to_flop() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)]);

    hand.act("a", PlayerAction::Bet(20)).unwrap();
    hand.act("b", PlayerAction::Bet(10)).unwrap();
    hand.act("c", PlayerAction::Bet(0)).unwrap();

    // the street close is staged; it runs when the scheduler is invoked
    assert_eq!(hand.stage(), Stage::Preflop);
    hand.advance_time(0);

    assert_eq!(hand.get_state().community_cards.len(), 3);
    assert_eq!(hand.stage(), Stage::Flop);
}

#[test]
fn checked_down_hand_reaches_showdown_and_conserves_chips() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)]);
    assert_eq!(total_chips(&hand), 3000);

    hand.act("a", PlayerAction::Bet(20)).unwrap();
    hand.act("b", PlayerAction::Bet(10)).unwrap();
    hand.act("c", PlayerAction::Bet(0)).unwrap();
    assert_eq!(total_chips(&hand), 3000);

    // postflop action starts on the seat after the button
    for _ in 0..3 {
        hand.advance_time(STAGE_PAUSE_MS);
        hand.act("b", PlayerAction::Bet(0)).unwrap();
        hand.act("c", PlayerAction::Bet(0)).unwrap();
        hand.act("a", PlayerAction::Bet(0)).unwrap();
        assert_eq!(total_chips(&hand), 3000);
    }

    // run the staged river close and showdown
    hand.advance_time(0);
    assert_eq!(hand.stage(), Stage::Showdown);
    assert!(hand.is_complete());
    assert_eq!(hand.get_state().community_cards.len(), 5);
    // the pot has been paid out in full
    assert_eq!(hand.pots().iter().map(|p| p.amount()).sum::<u32>(), 0);
    let stacks: u32 = hand.seats().iter().map(|s| s.stack()).sum();
    assert_eq!(stacks, 3000);
}

#[test]
fn acting_out_of_turn_is_an_error() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)]);
    let err = hand.act("b", PlayerAction::Bet(10)).unwrap_err();
    assert_eq!(
        err,
        HandError::OutOfTurn {
            expected: "a".to_string(),
            actual: "b".to_string()
        }
    );
    assert_eq!(hand.active_player(), Some("a"));
}

#[test]
fn acting_between_streets_is_an_error() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)]);
    hand.act("a", PlayerAction::Bet(20)).unwrap();
    hand.act("b", PlayerAction::Bet(10)).unwrap();
    hand.act("c", PlayerAction::Bet(0)).unwrap();
    hand.advance_time(0);

    // flop is dealt but action has not opened yet
    assert_eq!(hand.stage(), Stage::Flop);
    let err = hand.act("b", PlayerAction::Bet(0)).unwrap_err();
    assert_eq!(
        err,
        HandError::OutOfTurn {
            expected: "nobody".to_string(),
            actual: "b".to_string()
        }
    );
}

#[test]
fn act_before_start_is_an_error() {
    let seats = vec![Seat::new("a", 1000), Seat::new("b", 1000)];
    let mut hand = Hand::new(seats, GameConfig::default());
    assert_eq!(
        hand.act("a", PlayerAction::Bet(20)).unwrap_err(),
        HandError::NotStarted
    );
}

#[test]
fn unknown_player_is_an_error() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000)]);
    assert_eq!(
        hand.act("zz", PlayerAction::Fold).unwrap_err(),
        HandError::UnknownPlayer("zz".to_string())
    );
}

#[test]
fn fold_removes_hole_cards_from_snapshot() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)]);
    assert!(hand.get_state().hole_cards.contains_key("a"));
    hand.act("a", PlayerAction::Fold).unwrap();
    assert!(!hand.get_state().hole_cards.contains_key("a"));
    assert_eq!(hand.active_player(), Some("b"));
}

#[test]
fn heads_up_fold_awards_the_pot_uncontested() {
    let awards: Rc<RefCell<Vec<PotAward>>> = Rc::new(RefCell::new(Vec::new()));
    let seats = vec![Seat::new("a", 1000), Seat::new("b", 1000)];
    let mut hand = Hand::new(seats, GameConfig::new(10, 20, 0, 30));
    let sink = Rc::clone(&awards);
    hand.on_pots_awarded(move |award| sink.borrow_mut().push(award.clone()));
    hand.start().unwrap();
    hand.advance_time(STAGE_PAUSE_MS);

    hand.act("a", PlayerAction::Fold).unwrap();

    // nothing is awarded until the scheduler runs the staged close
    assert!(awards.borrow().is_empty());
    hand.advance_time(0);

    assert!(hand.is_complete());
    let awards = awards.borrow();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].player_ids, vec!["b".to_string()]);
    assert!(awards[0].winning_cards.is_empty());
    assert_eq!(hand.get_seat_by_player_id("b").unwrap().stack(), 1010);
    assert_eq!(hand.get_seat_by_player_id("a").unwrap().stack(), 990);
}

#[test]
fn act_after_showdown_is_a_noop() {
    let mut hand = started_hand(&[("a", 1000), ("b", 1000)]);
    hand.act("a", PlayerAction::Fold).unwrap();
    hand.advance_time(0);
    assert_eq!(hand.stage(), Stage::Showdown);

    let before = hand.get_seat_by_player_id("b").unwrap().stack();
    assert!(hand.act("b", PlayerAction::Bet(100)).is_ok());
    assert_eq!(hand.get_seat_by_player_id("b").unwrap().stack(), before);
}

#[test]
fn snapshot_serializes() {
    let hand = started_hand(&[("a", 1000), ("b", 1000), ("c", 1000)]);
    let value = serde_json::to_value(hand.get_state()).unwrap();
    assert_eq!(value["min_raise"], 20);
    assert_eq!(value["bets"]["b"], 10);
    assert_eq!(value["bets"]["c"], 20);
}
