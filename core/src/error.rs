use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card index out of range")]
    InvalidIndex,
    #[error("Every deck identity must appear exactly twice")]
    UnbalancedDeck,
}

pub type Result<T> = core::result::Result<T, GameError>;
