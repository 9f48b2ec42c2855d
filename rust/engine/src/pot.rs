use std::collections::BTreeSet;

use crate::player::Seat;

/// A pot with its eligibility set: the seats that may win it at
/// showdown. Side pots arise when players commit unequal amounts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Pot {
    id: u64,
    amount: u32,
    eligible: BTreeSet<usize>,
}

impl Pot {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn eligible(&self) -> &BTreeSet<usize> {
        &self.eligible
    }
}

/// Owns the persistent pot list of a hand. Pots are appended in
/// contribution-tier order and never removed; two tiers merge when
/// their eligibility sets match exactly.
#[derive(Debug, Default)]
pub struct PotManager {
    pots: Vec<Pot>,
    next_id: u64,
}

impl PotManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    /// Drop a folded seat from every pot's eligibility set. Its chips
    /// stay in the pots.
    pub fn remove_player(&mut self, seat: usize) {
        for pot in &mut self.pots {
            pot.eligible.remove(&seat);
        }
    }

    /// Move a street's accumulated contributions into the pot list.
    ///
    /// Contributions are peeled smallest-first: each tier forms a pot
    /// whose eligibility set is the still-remaining contributors that
    /// are still live. Folded players' chips flow into the pots but
    /// folded players are never eligible. The bets slice is fully
    /// consumed and zeroed.
    pub fn collect(&mut self, bets: &mut [u32], seats: &[Seat]) {
        let mut remaining: Vec<(usize, u32)> = bets
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, b)| b > 0)
            .collect();
        remaining.sort_by_key(|&(_, b)| b);

        while let Some(&(_, tier)) = remaining.first() {
            let eligible: BTreeSet<usize> = remaining
                .iter()
                .map(|&(i, _)| i)
                .filter(|&i| seats[i].is_live())
                .collect();
            let amount = tier * remaining.len() as u32;
            match self.pots.iter_mut().find(|p| p.eligible == eligible) {
                Some(pot) => pot.amount += amount,
                None => {
                    self.pots.push(Pot {
                        id: self.next_id,
                        amount,
                        eligible,
                    });
                    self.next_id += 1;
                }
            }
            for entry in &mut remaining {
                entry.1 -= tier;
            }
            remaining.retain(|&(_, b)| b > 0);
        }

        bets.iter_mut().for_each(|b| *b = 0);
    }

    /// Empty a pot when it is awarded, returning the chips that move
    /// to the winners.
    pub(crate) fn drain(&mut self, idx: usize) -> u32 {
        let pot = &mut self.pots[idx];
        std::mem::take(&mut pot.amount)
    }
}
