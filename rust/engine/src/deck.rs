use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// An ordered sequence of cards consumed front-to-back.
///
/// The default provider is a full 52-card deck shuffled with a seeded
/// ChaCha20 RNG, so a hand's entire trace is reproducible from its seed.
/// A fixed ordering can be injected with [`Deck::from_cards`] for tests
/// and replays.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Full deck shuffled with the given seed.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self { cards, position: 0 }
    }

    /// Deck with a fixed, caller-supplied ordering.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards, position: 0 }
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
