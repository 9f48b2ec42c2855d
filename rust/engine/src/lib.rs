//! # felt-engine: No-Limit Hold'em Hand Engine
//!
//! A deterministic state machine that conducts exactly one hand of
//! No-Limit Texas Hold'em over an ordered seating ring: dealing,
//! blinds and antes, the four betting streets with full No-Limit
//! action validation, main/side pot construction, and showdown with
//! tie-breaking and odd-chip distribution.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the
//!   two-character card codec
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG and
//!   fixed-order injection
//! - [`config`] - Blinds, antes, and act-timer configuration
//! - [`player`] - Seats and player actions
//! - [`round`] - Streets and per-street betting round state
//! - [`rules`] - The No-Limit bet validation predicate
//! - [`pot`] - Tiered main/side pot construction and eligibility
//! - [`eval`] - Hand evaluation and the showdown oracle
//! - [`sched`] - The single-threaded delay queue driving pauses,
//!   staged transitions, and timers
//! - [`engine`] - The `Hand` aggregate orchestrating one hand
//! - [`errors`] - Error types for hand operations
//!
//! ## Deterministic Gameplay
//!
//! All randomness is confined to deck generation. With an injected
//! deck the engine's entire trace is a pure function of the seats,
//! the configuration, and the action sequence:
//!
//! ```rust
//! use felt_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! for _ in 0..52 {
//!     assert_eq!(deck1.deal_card(), deck2.deal_card());
//! }
//!
//! // A different seed produces a different order
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck3 = Deck::new_with_seed(43);
//! let first: Vec<_> = (0..52).filter_map(|_| deck1.deal_card()).collect();
//! let third: Vec<_> = (0..52).filter_map(|_| deck3.deal_card()).collect();
//! assert_ne!(first, third);
//! ```
//!
//! ## Action Validation
//!
//! Validate a proposed bet against the current street state:
//!
//! ```rust
//! use felt_engine::player::Seat;
//! use felt_engine::rules::is_valid_bet;
//!
//! let seats = vec![Seat::new("a", 980), Seat::new("b", 990)];
//! let bets = vec![20, 10];
//!
//! // facing the big blind, the small blind may call 10...
//! assert!(is_valid_bet(&seats, &bets, 20, 1, 10));
//! // ...or raise at least the increment, but not in between
//! assert!(is_valid_bet(&seats, &bets, 20, 1, 30));
//! assert!(!is_valid_bet(&seats, &bets, 20, 1, 20));
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod eval;
pub mod player;
pub mod pot;
pub mod round;
pub mod rules;
pub mod sched;
