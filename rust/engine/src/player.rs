use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Represents a player action during a betting round.
///
/// `Bet(0)` is a check when nothing is owed, `Bet(to_call)` a call,
/// `Bet(stack)` an all-in. Every amount is chips added this action, on
/// top of what the player already put in during the current street.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Put the given number of chips in
    Bet(u32),
}

/// An ordered position in the seating ring.
///
/// Seat 0 is the button. A seat is *live* (still contesting pots) while
/// it holds hole cards; folding clears them.
#[derive(Debug, Clone)]
pub struct Seat {
    player_id: String,
    stack: u32,
    hole: Option<[Card; 2]>,
}

impl Seat {
    pub fn new(player_id: impl Into<String>, stack: u32) -> Self {
        Self {
            player_id: player_id.into(),
            stack,
            hole: None,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }

    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// Whether the seat still holds hole cards.
    pub fn is_live(&self) -> bool {
        self.hole.is_some()
    }

    pub(crate) fn give_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    pub(crate) fn clear_cards(&mut self) {
        self.hole = None;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Remove up to `amount` chips from the stack and return what was
    /// actually taken. Stack-short forced bets simply commit everything.
    pub(crate) fn take_chips(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.stack);
        self.stack -= taken;
        taken
    }
}
