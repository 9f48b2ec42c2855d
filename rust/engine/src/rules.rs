use crate::player::Seat;

/// Decides whether `amount` is a legal `Bet` for the given seat under
/// No-Limit rules with all-ins.
///
/// Let `current` be the seat's contribution this street, `max_bet` the
/// street maximum, `max_call_in` the largest contribution among seats
/// that are already all-in, and `min_raise` the current raise
/// increment. An amount is valid iff any of:
///
/// - `amount == stack`: all-in is always permitted
/// - `amount + current == max_call_in`: matching the largest existing
///   all-in is always permitted, even below a full raise
/// - `amount + current == max_bet`: check (when nothing is owed) or call
/// - `amount + current >= max_bet + min_raise`: a full raise
///
/// and `amount <= stack`. Everything else is rejected; in particular an
/// amount strictly between a call and a full raise is never legal
/// unless it is the seat's whole stack.
///
/// # Examples
///
/// ```
/// use felt_engine::player::Seat;
/// use felt_engine::rules::is_valid_bet;
///
/// // a bet 100 into a big blind of 20, b called all-in for 50 total.
/// // c (on 20 already, min_raise 80) may call 80, match nothing else
/// // below the full raise to 180, or shove.
/// let seats = vec![
///     Seat::new("a", 900),
///     Seat::new("b", 0),
///     Seat::new("c", 1000),
/// ];
/// let bets = vec![100, 50, 20];
/// assert!(is_valid_bet(&seats, &bets, 80, 2, 80));    // call
/// assert!(!is_valid_bet(&seats, &bets, 80, 2, 79));
/// assert!(!is_valid_bet(&seats, &bets, 80, 2, 159));  // short of a raise
/// assert!(is_valid_bet(&seats, &bets, 80, 2, 160));   // full raise
/// assert!(is_valid_bet(&seats, &bets, 80, 2, 1000));  // all-in
/// ```
pub fn is_valid_bet(
    seats: &[Seat],
    bets: &[u32],
    min_raise: u32,
    seat: usize,
    amount: u32,
) -> bool {
    let stack = seats[seat].stack();
    if amount > stack {
        return false;
    }
    let current = bets[seat];
    let total = current + amount;
    let max_bet = bets.iter().copied().max().unwrap_or(0);
    let max_call_in = bets
        .iter()
        .zip(seats)
        .filter(|(_, s)| s.stack() == 0)
        .map(|(&b, _)| b)
        .max()
        .unwrap_or(0);

    amount == stack
        || (max_call_in > 0 && total == max_call_in)
        || total == max_bet
        || total >= max_bet + min_raise
}
