use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Letter index out of range")]
    InvalidLetter,
    #[error("All numbers filled!")]
    PoolExhausted,
    #[error("Game has already started! Use Reset to start over.")]
    GameAlreadyStarted,
    #[error("All cells are already filled!")]
    NothingToFill,
}

pub type Result<T> = std::result::Result<T, GameError>;
