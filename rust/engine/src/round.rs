use serde::{Deserialize, Serialize};

use crate::player::{PlayerAction, Seat};

/// Stage of a hand, from construction through showdown.
/// Betting happens on the four streets in the middle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Stage {
    /// Constructed, not yet started
    Start,
    /// Hole cards dealt, blinds posted
    Preflop,
    /// 3 community cards
    Flop,
    /// 4th community card
    Turn,
    /// 5th community card
    River,
    /// Terminal stage; pots are evaluated and awarded
    Showdown,
}

/// Records a single processed action.
/// Associates the action with the seat and the stage when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index in the ring
    pub seat: usize,
    /// The acting player's identity
    pub player_id: String,
    /// The stage when this action occurred
    pub stage: Stage,
    /// The action taken
    pub action: PlayerAction,
}

/// Per-street betting state: whose turn it is, who opened the street,
/// who last fully raised, the current raise increment, and what each
/// seat has contributed this street.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub stage: Stage,
    pub active_player: Option<usize>,
    pub first_to_act: usize,
    pub last_raiser: Option<usize>,
    pub min_raise: u32,
    /// Chips each seat has put in during the current street only
    pub bets: Vec<u32>,
}

impl RoundState {
    pub fn new(seat_count: usize) -> Self {
        Self {
            stage: Stage::Start,
            active_player: None,
            first_to_act: 0,
            last_raiser: None,
            min_raise: 0,
            bets: vec![0; seat_count],
        }
    }

    /// Largest contribution this street across all seats.
    pub fn max_bet(&self) -> u32 {
        self.bets.iter().copied().max().unwrap_or(0)
    }

    /// Chips the seat still owes to match the street maximum.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.max_bet().saturating_sub(self.bets[seat])
    }

    /// Next seat after `from` that can still act: live and not all-in.
    /// Wraps the ring; `from` itself is considered last, so the result
    /// equals `from` exactly when no one else can act.
    pub fn next_can_act(&self, seats: &[Seat], from: usize) -> Option<usize> {
        let n = seats.len();
        (1..=n)
            .map(|i| (from + i) % n)
            .find(|&idx| seats[idx].is_live() && seats[idx].stack() > 0)
    }

    /// Whether every live seat has matched the street maximum or is all-in.
    pub fn all_matched_or_all_in(&self, seats: &[Seat]) -> bool {
        let max = self.max_bet();
        seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_live())
            .all(|(i, s)| self.bets[i] == max || s.stack() == 0)
    }
}
