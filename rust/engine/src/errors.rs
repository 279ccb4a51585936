use thiserror::Error;

use crate::player::Seat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card notation: {0}")]
    InvalidCard(String),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already in progress")]
    HandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("It's not {actual:?}'s turn (expected {expected:?})")]
    NotSeatsTurn { expected: Option<Seat>, actual: Seat },
    #[error("Betting round still open on {0:?}")]
    RoundNotComplete(crate::logger::Street),
    #[error("{0:?} cards dealt out of sequence")]
    OutOfSequence(crate::logger::Street),
    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
    #[error("Match over: {0:?} has no chips")]
    MatchOver(Seat),
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
    #[error("Engine halted after invariant violation: {0}")]
    Halted(String),
}

pub type GameResult<T> = Result<T, GameError>;
