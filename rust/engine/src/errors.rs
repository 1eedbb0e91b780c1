use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid action {action:?}: {reason}")]
    InvalidPlayerAction { action: Action, reason: String },
    #[error("invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("insufficient chips for action")]
    InsufficientChips,
    #[error("at least 5 cards are required to evaluate a hand, got {actual}")]
    InsufficientCards { actual: usize },
    #[error("it's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("no action is possible in phase {phase}")]
    HandNotInProgress { phase: String },
}
