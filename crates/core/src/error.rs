use thiserror::Error;

/// Errors that can occur in the Abalone engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbaloneError {
    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Game is already over")]
    GameOver,

    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for Abalone operations
pub type Result<T> = std::result::Result<T, AbaloneError>;
