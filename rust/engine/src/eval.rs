use std::cmp::Ordering;

use crate::cards::{Card, Rank};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Evaluates the strength of exactly five cards.
///
/// # Examples
///
/// ```
/// use felt_engine::cards::Card;
/// use felt_engine::eval::{compare_hands, evaluate_five, Category};
/// use std::cmp::Ordering;
///
/// fn five(codes: [&str; 5]) -> [Card; 5] {
///     codes.map(|c| c.parse().unwrap())
/// }
///
/// let wheel = evaluate_five(&five(["Ah", "2c", "3d", "4s", "5h"]));
/// assert_eq!(wheel.category, Category::Straight);
/// assert_eq!(wheel.kickers[0], 5); // ace plays low
///
/// let boat = evaluate_five(&five(["7h", "7s", "7d", "5h", "5c"]));
/// assert_eq!(boat.category, Category::FullHouse);
/// assert_eq!(compare_hands(&boat, &wheel), Ordering::Greater);
/// ```
pub fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    for &c in cards.iter() {
        rank_counts[rank_val(c.rank) as usize] += 1;
    }
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut uniq: Vec<u8> = cards.iter().map(|c| rank_val(c.rank)).collect();
    uniq.sort_unstable();
    uniq.dedup();
    let straight_high = detect_straight_high(&uniq);

    if is_flush {
        if let Some(high) = straight_high {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if is_flush {
        let mut ranks: Vec<u8> = cards.iter().map(|c| rank_val(c.rank)).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks);
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    if let Some(t) = trip_ranks.first().copied() {
        // trips + two kickers
        let mut k = [t, 0, 0, 0, 0];
        let mut remain = singles.clone();
        remain.sort_unstable_by(|a, b| b.cmp(a));
        k[1] = *remain.first().unwrap_or(&0);
        k[2] = *remain.get(1).unwrap_or(&0);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let mut prs = pair_ranks.clone();
        prs.sort_unstable();
        prs.reverse();
        let mut k = [prs[0], prs[1], 0, 0, 0];
        k[2] = *singles.iter().max().unwrap_or(&0);
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        let mut rest = singles.clone();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        for i in 0..3 {
            k[i + 1] = *rest.get(i).unwrap_or(&0);
        }
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    // High card: all five ranks, descending
    let mut highs = singles;
    highs.sort_unstable_by(|a, b| b.cmp(a));
    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = *highs.get(i).unwrap_or(&0);
    }
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

/// Compares two hand strengths: first by category, then by kickers.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Picks the strongest five-card hand out of seven cards, returning its
/// strength and the five cards composing it.
pub fn best_five(cards: &[Card; 7]) -> (HandStrength, [Card; 5]) {
    let mut best: (HandStrength, [Card; 5]) = {
        let five = combo_without(cards, 0, 1);
        (evaluate_five(&five), five)
    };
    for i in 0..7 {
        for j in (i + 1)..7 {
            if (i, j) == (0, 1) {
                continue;
            }
            let five = combo_without(cards, i, j);
            let strength = evaluate_five(&five);
            if compare_hands(&strength, &best.0) == Ordering::Greater {
                best = (strength, five);
            }
        }
    }
    best
}

fn combo_without(cards: &[Card; 7], skip_a: usize, skip_b: usize) -> [Card; 5] {
    let mut five = [cards[0]; 5];
    let mut n = 0;
    for (idx, &c) in cards.iter().enumerate() {
        if idx != skip_a && idx != skip_b {
            five[n] = c;
            n += 1;
        }
    }
    five
}

/// One winner at showdown: the index of the winning hand in the input
/// slice and the five cards composing it. Ties produce multiple entries.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WinnerEntry {
    pub index: usize,
    pub cards: Vec<Card>,
}

/// The showdown oracle: given the contenders' hole cards and the full
/// board, report the winner(s) tied for best hand.
pub trait Evaluator {
    fn winners(&self, hands: &[[Card; 2]], board: &[Card; 5]) -> Vec<WinnerEntry>;
}

/// Default oracle backed by [`best_five`].
#[derive(Debug, Default)]
pub struct HighHandEvaluator;

impl Evaluator for HighHandEvaluator {
    fn winners(&self, hands: &[[Card; 2]], board: &[Card; 5]) -> Vec<WinnerEntry> {
        let evaluated: Vec<(HandStrength, [Card; 5])> = hands
            .iter()
            .map(|h| {
                let seven = [
                    h[0], h[1], board[0], board[1], board[2], board[3], board[4],
                ];
                best_five(&seven)
            })
            .collect();
        let best = evaluated
            .iter()
            .map(|(s, _)| s)
            .max_by(|a, b| compare_hands(a, b))
            .cloned();
        match best {
            None => Vec::new(),
            Some(best) => evaluated
                .into_iter()
                .enumerate()
                .filter(|(_, (s, _))| compare_hands(s, &best) == Ordering::Equal)
                .map(|(index, (_, five))| WinnerEntry {
                    index,
                    cards: five.to_vec(),
                })
                .collect(),
        }
    }
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    if sorted_unique_ranks.len() < 5 {
        return None;
    }
    // Ace-low straight support: treat Ace as 1 additionally
    let mut w = sorted_unique_ranks.to_vec();
    if w.binary_search(&14).is_ok() {
        w.insert(0, 1);
    }

    let mut run = 1;
    let mut best_high = 0u8;
    for i in 1..w.len() {
        if w[i] == w[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best_high = w[i];
            }
        } else {
            run = 1;
        }
    }
    if best_high == 0 {
        None
    } else {
        Some(best_high)
    }
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut quad = 0u8;
    let mut kicker = 0u8;
    for r in (2..=14).rev() {
        if rank_counts[r as usize] == 4 {
            quad = r as u8;
            break;
        }
    }
    if quad == 0 {
        return None;
    }
    for r in (2..=14).rev() {
        if r as u8 != quad && rank_counts[r as usize] > 0 {
            kicker = r as u8;
            break;
        }
    }
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trip = 0u8;
    let mut pair = 0u8;
    for r in (2..=14).rev() {
        match rank_counts[r as usize] {
            3 if trip == 0 => trip = r as u8,
            2 if pair == 0 => pair = r as u8,
            _ => {}
        }
    }
    if trip > 0 && pair > 0 {
        Some((trip, pair))
    } else {
        None
    }
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in 2..=14 {
        match rank_counts[r as usize] {
            3 => trips.push(r as u8),
            2 => pairs.push(r as u8),
            1 => singles.push(r as u8),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
