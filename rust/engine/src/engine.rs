use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::cards::Card;
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::errors::HandError;
use crate::eval::{Evaluator, HighHandEvaluator, WinnerEntry};
use crate::player::{PlayerAction, Seat};
use crate::pot::{Pot, PotManager};
use crate::round::{ActionRecord, RoundState, Stage};
use crate::rules::is_valid_bet;
use crate::sched::DelayQueue;

/// Pause after dealing (hole cards and each community-card deal) before
/// action opens, and between consecutive pot awards.
pub const STAGE_PAUSE_MS: u64 = 1000;

/// Events on the hand's delay queue. Every suspension point of the
/// state machine is one of these.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum HandEvent {
    /// Open betting on the current street
    BeginStreet,
    /// Close the street: move bets into pots, then deal or show down
    EndStreet,
    /// Award the next pot in creation order
    AwardNext,
    /// Per-second countdown for the active player; stale epochs are
    /// cancelled ticks
    TimerTick { epoch: u64 },
}

/// Notification fired once per pot, in creation order, before the chips
/// move. `winning_cards` is the sorted, de-duplicated union of the five
/// cards of every tied winner; empty when the pot goes uncontested to
/// the last live player.
#[derive(Debug, Clone, Serialize)]
pub struct PotAward {
    pub pot_id: u64,
    pub player_ids: Vec<String>,
    pub winning_cards: Vec<Card>,
}

/// Observable snapshot of a hand. Hole cards of folded players are
/// absent; zero street contributions are omitted from `bets`.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub community_cards: Vec<Card>,
    pub hole_cards: BTreeMap<String, [Card; 2]>,
    pub pots: Vec<PotSnapshot>,
    pub bets: BTreeMap<String, u32>,
    pub min_raise: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PotSnapshot {
    pub pot_id: u64,
    pub amount: u32,
}

type PotCallback = Box<dyn FnMut(&PotAward)>;

/// A single hand of No-Limit Texas Hold'em: one deal, the four betting
/// streets, pot construction, and showdown.
///
/// The hand is a deterministic, single-threaded state machine. Player
/// actions arrive through [`Hand::act`] and are processed synchronously;
/// everything time-driven (street pauses, the per-actor countdown,
/// staged street transitions) sits on an internal delay queue and fires
/// from [`Hand::advance_time`]. With an injected deck the whole trace is
/// a pure function of seats, configuration, and the action sequence.
///
/// ```ignore
/// let seats = vec![Seat::new("a", 1000), Seat::new("b", 1000), Seat::new("c", 1000)];
/// let mut hand = Hand::new(seats, GameConfig::new(10, 20, 0, 30));
/// hand.start()?;
/// hand.advance_time(STAGE_PAUSE_MS); // post-deal pause; preflop action opens
/// hand.act("a", PlayerAction::Bet(20))?;
/// ```
pub struct Hand {
    seats: Vec<Seat>,
    deck: Deck,
    board: Vec<Card>,
    round: RoundState,
    pots: PotManager,
    config: GameConfig,
    history: Vec<ActionRecord>,
    sched: DelayQueue<HandEvent>,
    evaluator: Box<dyn Evaluator>,
    on_pots_awarded: Option<PotCallback>,
    timer_epoch: u64,
    timer_remaining: u32,
    award_cursor: usize,
    destroyed: bool,
}

impl Hand {
    pub fn new(seats: Vec<Seat>, config: GameConfig) -> Self {
        let seed: u64 = rand::rng().random();
        let seat_count = seats.len();
        Self {
            seats,
            deck: Deck::new_with_seed(seed),
            board: Vec::with_capacity(5),
            round: RoundState::new(seat_count),
            pots: PotManager::new(),
            config,
            history: Vec::new(),
            sched: DelayQueue::new(),
            evaluator: Box::new(HighHandEvaluator),
            on_pots_awarded: None,
            timer_epoch: 0,
            timer_remaining: 0,
            award_cursor: 0,
            destroyed: false,
        }
    }

    /// Replace the deck before `start`, e.g. with a fixed ordering.
    pub fn set_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }

    /// Replace the showdown oracle.
    pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluator = evaluator;
    }

    /// Register the pot-award callback, fired once per pot before its
    /// chips move.
    pub fn on_pots_awarded(&mut self, callback: impl FnMut(&PotAward) + 'static) {
        self.on_pots_awarded = Some(Box::new(callback));
    }

    /// Deal hole cards, post blinds and antes, and schedule the first
    /// round of action.
    pub fn start(&mut self) -> Result<(), HandError> {
        if self.destroyed {
            return Ok(());
        }
        if self.seats.len() < 2 {
            return Err(HandError::NotEnoughSeats {
                count: self.seats.len(),
            });
        }
        if self.round.stage != Stage::Start {
            return Err(HandError::AlreadyStarted);
        }
        let n = self.seats.len();
        if self.deck.remaining() < n * 2 + 5 {
            return Err(HandError::DeckExhausted);
        }
        self.round.stage = Stage::Preflop;

        // two passes around the ring, one card each
        let mut first_pass = Vec::with_capacity(n);
        for _ in 0..n {
            first_pass.push(self.deck.deal_card().ok_or(HandError::DeckExhausted)?);
        }
        for (i, first) in first_pass.into_iter().enumerate() {
            let second = self.deck.deal_card().ok_or(HandError::DeckExhausted)?;
            self.seats[i].give_cards([first, second]);
        }

        // heads-up: the button posts the small blind
        let (sb_seat, bb_seat) = if n == 2 { (0, 1) } else { (1, 2) };
        self.post(sb_seat, self.config.small_blind);
        self.post(bb_seat, self.config.big_blind);
        if self.config.antes > 0 {
            for i in 0..n {
                if i != sb_seat && i != bb_seat {
                    self.post(i, self.config.antes);
                }
            }
        }

        self.round.min_raise = self.config.big_blind;
        self.round.last_raiser = None;
        self.round.first_to_act = self
            .round
            .next_can_act(&self.seats, bb_seat)
            .unwrap_or(bb_seat);

        self.sched.schedule_in(STAGE_PAUSE_MS, HandEvent::BeginStreet);
        Ok(())
    }

    /// Process an action from `player_id`.
    ///
    /// A no-op when the hand is destroyed, at showdown, or the player no
    /// longer holds cards. Errors when the hand has not started, the
    /// player is not the active actor, or a bet amount fails
    /// [`Hand::is_valid_bet`]; state is untouched on error.
    pub fn act(&mut self, player_id: &str, action: PlayerAction) -> Result<(), HandError> {
        if self.destroyed || self.round.stage == Stage::Showdown {
            return Ok(());
        }
        let seat = self
            .seat_index(player_id)
            .ok_or_else(|| HandError::UnknownPlayer(player_id.to_string()))?;
        if self.round.stage == Stage::Start {
            return Err(HandError::NotStarted);
        }
        if !self.seats[seat].is_live() {
            return Ok(());
        }
        match self.round.active_player {
            Some(active) if active == seat => {}
            other => {
                return Err(HandError::OutOfTurn {
                    expected: other
                        .map(|i| self.seats[i].player_id().to_string())
                        .unwrap_or_else(|| "nobody".to_string()),
                    actual: player_id.to_string(),
                });
            }
        }
        if let PlayerAction::Bet(amount) = action {
            if !is_valid_bet(&self.seats, &self.round.bets, self.round.min_raise, seat, amount) {
                return Err(HandError::InvalidBet {
                    player: player_id.to_string(),
                    amount,
                });
            }
        }
        self.cancel_timer();
        self.apply(seat, action);
        Ok(())
    }

    /// Pure query: would `amount` be a legal `Bet` for this player right
    /// now? See [`crate::rules::is_valid_bet`].
    pub fn is_valid_bet(&self, player_id: &str, amount: u32) -> bool {
        match self.seat_index(player_id) {
            Some(seat) => is_valid_bet(
                &self.seats,
                &self.round.bets,
                self.round.min_raise,
                seat,
                amount,
            ),
            None => false,
        }
    }

    pub fn get_seat_by_player_id(&self, player_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player_id() == player_id)
    }

    /// Observable snapshot of the hand.
    pub fn get_state(&self) -> StateSnapshot {
        StateSnapshot {
            community_cards: self.board.clone(),
            hole_cards: self
                .seats
                .iter()
                .filter_map(|s| s.hole_cards().map(|hc| (s.player_id().to_string(), hc)))
                .collect(),
            pots: self
                .pots
                .pots()
                .iter()
                .map(|p| PotSnapshot {
                    pot_id: p.id(),
                    amount: p.amount(),
                })
                .collect(),
            bets: self
                .seats
                .iter()
                .zip(&self.round.bets)
                .filter(|(_, &b)| b > 0)
                .map(|(s, &b)| (s.player_id().to_string(), b))
                .collect(),
            min_raise: self.round.min_raise,
        }
    }

    /// Terminate the hand. Pending timers and staged transitions are
    /// dropped; later calls and callbacks are no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.cancel_timer();
        self.sched.clear();
    }

    /// Advance the logical clock, firing due street pauses, staged
    /// transitions, and timer ticks in order.
    ///
    /// This is the only place queued events run. A transition staged
    /// during [`Hand::act`] (street close, showdown entry, a pot
    /// award) sits on the queue until the embedder calls this, even
    /// with `ms = 0`; it never runs re-entrantly within `act`.
    pub fn advance_time(&mut self, ms: u64) {
        let target = self.sched.now().saturating_add(ms);
        while let Some(event) = self.sched.pop_due(target) {
            if self.destroyed {
                self.sched.clear();
                return;
            }
            self.on_event(event);
        }
        self.sched.advance_to(target);
    }

    pub fn stage(&self) -> Stage {
        self.round.stage
    }

    /// The player whose action the hand is waiting on, if any.
    pub fn active_player(&self) -> Option<&str> {
        self.round
            .active_player
            .map(|i| self.seats[i].player_id())
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn pots(&self) -> &[Pot] {
        self.pots.pots()
    }

    pub fn min_raise(&self) -> u32 {
        self.round.min_raise
    }

    pub fn action_history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Whether every pot has been awarded.
    pub fn is_complete(&self) -> bool {
        self.round.stage == Stage::Showdown && self.award_cursor >= self.pots.pots().len()
    }

    // ---- internals ----

    fn seat_index(&self, player_id: &str) -> Option<usize> {
        self.seats.iter().position(|s| s.player_id() == player_id)
    }

    fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_live()).count()
    }

    /// Seats that still have chips AND hole cards, i.e. can act.
    fn players_in_game(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.is_live() && s.stack() > 0)
            .count()
    }

    /// Forced contribution, capped at the stack.
    fn post(&mut self, seat: usize, amount: u32) {
        let taken = self.seats[seat].take_chips(amount);
        self.round.bets[seat] += taken;
    }

    fn on_event(&mut self, event: HandEvent) {
        match event {
            HandEvent::BeginStreet => self.begin_street(),
            HandEvent::EndStreet => self.end_street(),
            HandEvent::AwardNext => self.award_next(),
            HandEvent::TimerTick { epoch } => self.timer_tick(epoch),
        }
    }

    /// Apply a validated action and decide what happens next.
    fn apply(&mut self, seat: usize, action: PlayerAction) {
        let stage = self.round.stage;
        match action {
            PlayerAction::Fold => {
                self.seats[seat].clear_cards();
                self.pots.remove_player(seat);
            }
            PlayerAction::Bet(amount) => {
                let prev_max = self.round.max_bet();
                let taken = self.seats[seat].take_chips(amount);
                self.round.bets[seat] += taken;
                let total = self.round.bets[seat];
                // a short all-in below a full raise completes the action
                // but does not reset the increment or reopen the betting
                if total >= prev_max + self.round.min_raise {
                    self.round.min_raise = total - prev_max;
                    self.round.last_raiser = Some(seat);
                }
            }
        }
        self.history.push(ActionRecord {
            seat,
            player_id: self.seats[seat].player_id().to_string(),
            stage,
            action,
        });

        // keep the end-of-round anchor meaningful if the opener can no
        // longer act
        if seat == self.round.first_to_act
            && (!self.seats[seat].is_live() || self.seats[seat].stack() == 0)
        {
            if let Some(next) = self.round.next_can_act(&self.seats, seat) {
                self.round.first_to_act = next;
            }
        }

        if self.live_count() <= 1 {
            // everyone else folded; collect and award without dealing on
            self.round.active_player = None;
            self.cancel_timer();
            self.sched.schedule_in(0, HandEvent::EndStreet);
            return;
        }

        if self.round_ended(seat) {
            self.round.active_player = None;
            self.sched.schedule_in(0, HandEvent::EndStreet);
        } else if let Some(next) = self.round.next_can_act(&self.seats, seat) {
            self.round.active_player = Some(next);
            self.start_timer();
        }
    }

    /// End-of-street predicate, evaluated after each action.
    fn round_ended(&self, current: usize) -> bool {
        let next = match self.round.next_can_act(&self.seats, current) {
            None => return true,
            Some(n) => n,
        };
        if next == current {
            return true;
        }
        if self.round.last_raiser == Some(next) {
            return true;
        }
        if self.players_in_game() <= 1 && self.round.to_call(next) == 0 {
            return true;
        }
        self.round.all_matched_or_all_in(&self.seats) && next == self.round.first_to_act
    }

    /// Open betting on the current street, or run the board out when no
    /// further action is possible.
    fn begin_street(&mut self) {
        if self.players_in_game() <= 1 {
            self.sched.schedule_in(0, HandEvent::EndStreet);
            return;
        }
        if self.round.stage != Stage::Preflop {
            self.round.min_raise = self.config.big_blind;
            self.round.last_raiser = None;
            self.round.first_to_act = self.round.next_can_act(&self.seats, 0).unwrap_or(0);
        }
        self.round.active_player = Some(self.round.first_to_act);
        self.start_timer();
    }

    /// Move the street's bets into pots, then deal the next street or
    /// enter showdown.
    fn end_street(&mut self) {
        self.round.active_player = None;
        let mut bets = std::mem::take(&mut self.round.bets);
        self.pots.collect(&mut bets, &self.seats);
        self.round.bets = bets;

        if self.live_count() <= 1 {
            self.enter_showdown();
            return;
        }
        match self.round.stage {
            Stage::Preflop => {
                self.deal_board(3);
                self.round.stage = Stage::Flop;
                self.sched.schedule_in(STAGE_PAUSE_MS, HandEvent::BeginStreet);
            }
            Stage::Flop => {
                self.deal_board(1);
                self.round.stage = Stage::Turn;
                self.sched.schedule_in(STAGE_PAUSE_MS, HandEvent::BeginStreet);
            }
            Stage::Turn => {
                self.deal_board(1);
                self.round.stage = Stage::River;
                self.sched.schedule_in(STAGE_PAUSE_MS, HandEvent::BeginStreet);
            }
            Stage::River => self.enter_showdown(),
            Stage::Start | Stage::Showdown => {}
        }
    }

    fn enter_showdown(&mut self) {
        self.round.stage = Stage::Showdown;
        self.award_cursor = 0;
        self.sched.schedule_in(0, HandEvent::AwardNext);
    }

    fn deal_board(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(card) = self.deck.deal_card() {
                self.board.push(card);
            }
        }
    }

    /// Award one pot per event, pacing consecutive awards.
    fn award_next(&mut self) {
        if self.award_cursor >= self.pots.pots().len() {
            return;
        }
        let idx = self.award_cursor;
        self.award_cursor += 1;
        self.award_pot(idx);
        if self.award_cursor < self.pots.pots().len() {
            self.sched.schedule_in(STAGE_PAUSE_MS, HandEvent::AwardNext);
        }
    }

    fn award_pot(&mut self, idx: usize) {
        let pot = &self.pots.pots()[idx];
        let pot_id = pot.id();
        // contenders iterate in seat order; the first one receives the
        // odd chip on a split
        let contenders: Vec<usize> = pot
            .eligible()
            .iter()
            .copied()
            .filter(|&i| self.seats[i].is_live())
            .collect();
        let live: Vec<usize> = (0..self.seats.len())
            .filter(|&i| self.seats[i].is_live())
            .collect();

        let (winners, winning_cards) = if live.len() <= 1 || contenders.is_empty() {
            match live.first() {
                Some(&survivor) => (vec![survivor], Vec::new()),
                None => return,
            }
        } else {
            let mut hands = Vec::with_capacity(contenders.len());
            let mut owners = Vec::with_capacity(contenders.len());
            for &i in &contenders {
                if let Some(hole) = self.seats[i].hole_cards() {
                    hands.push(hole);
                    owners.push(i);
                }
            }
            let entries: Vec<WinnerEntry> = match <&[Card; 5]>::try_from(&self.board[..]) {
                Ok(board) => self.evaluator.winners(&hands, board),
                Err(_) => (0..hands.len())
                    .map(|index| WinnerEntry {
                        index,
                        cards: Vec::new(),
                    })
                    .collect(),
            };
            let winners: Vec<usize> = entries.iter().map(|e| owners[e.index]).collect();
            let mut cards: Vec<Card> = entries
                .iter()
                .flat_map(|e| e.cards.iter().copied())
                .collect();
            cards.sort_unstable();
            cards.dedup();
            (winners, cards)
        };

        if winners.is_empty() {
            return;
        }
        let award = PotAward {
            pot_id,
            player_ids: winners
                .iter()
                .map(|&i| self.seats[i].player_id().to_string())
                .collect(),
            winning_cards,
        };
        if let Some(callback) = &mut self.on_pots_awarded {
            callback(&award);
        }

        let amount = self.pots.drain(idx);
        let count = winners.len() as u32;
        let share = amount / count;
        let remainder = amount % count;
        for (k, &winner) in winners.iter().enumerate() {
            let chips = if k == 0 { share + remainder } else { share };
            self.seats[winner].add_chips(chips);
        }
    }

    // ---- act timer ----

    fn start_timer(&mut self) {
        self.timer_epoch += 1;
        if self.config.time_limit == 0 {
            return;
        }
        self.timer_remaining = self.config.time_limit;
        self.sched.schedule_in(
            1000,
            HandEvent::TimerTick {
                epoch: self.timer_epoch,
            },
        );
    }

    fn cancel_timer(&mut self) {
        self.timer_epoch += 1;
    }

    fn timer_tick(&mut self, epoch: u64) {
        if epoch != self.timer_epoch {
            return;
        }
        let actor = match self.round.active_player {
            Some(actor) => actor,
            None => return,
        };
        self.timer_remaining = self.timer_remaining.saturating_sub(1);
        if self.timer_remaining > 0 {
            self.sched
                .schedule_in(1000, HandEvent::TimerTick { epoch });
            return;
        }
        // the free action: check when it costs nothing, otherwise fold
        let action = if is_valid_bet(&self.seats, &self.round.bets, self.round.min_raise, actor, 0)
        {
            PlayerAction::Bet(0)
        } else {
            PlayerAction::Fold
        };
        self.cancel_timer();
        self.apply(actor, action);
    }
}
