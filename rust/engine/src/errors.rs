use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("Cannot start a hand with {count} seat(s), minimum: 2")]
    NotEnoughSeats { count: usize },
    #[error("Hand already started")]
    AlreadyStarted,
    #[error("Hand has not been started")]
    NotStarted,
    #[error("It's not {actual}'s turn (expected {expected})")]
    OutOfTurn { expected: String, actual: String },
    #[error("Invalid bet of {amount} by {player}")]
    InvalidBet { player: String, amount: u32 },
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),
    #[error("Bad card code: {0:?}")]
    BadCardCode(String),
    #[error("Deck exhausted while dealing")]
    DeckExhausted,
}
