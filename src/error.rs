//! Error types for the board, the engine and the game session

use thiserror::Error;

use crate::board::Pos;

/// Rejected board mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("position {0} is already occupied")]
    Occupied(Pos),
    #[error("cannot place an empty stone")]
    EmptyStone,
}

/// Why the engine did not produce a move.
///
/// `Cancelled` is an expected outcome of concurrent use and is kept apart
/// from `NoMoveAvailable`, which means the position offers nothing to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no move available")]
    NoMoveAvailable,
    #[error("search cancelled")]
    Cancelled,
    #[error("search exceeded its time limit")]
    TimedOut,
    #[error("search worker stopped without a result")]
    WorkerLost,
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is not in progress")]
    NotPlaying,
    #[error("invalid move at {0}")]
    InvalidMove(Pos),
    #[error("it is not a human player's turn")]
    NotHumanTurn,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error(transparent)]
    Board(#[from] BoardError),
}
