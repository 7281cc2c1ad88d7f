//! Error taxonomy for the game core

use thiserror::Error;

use crate::board::{Player, Pos};

/// Errors surfaced by the board, the rules and the controller.
///
/// Validation errors (`OutOfBounds`, `CellOccupied`) are recoverable and
/// meant for re-prompting. State errors (`GameAlreadyOver`, `NoLegalMoves`,
/// turn errors) signal a caller calling out of sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell ({}, {}) is already occupied", .0.row, .0.col)]
    CellOccupied(Pos),
    #[error("cell ({}, {}) is already empty", .0.row, .0.col)]
    CellEmpty(Pos),
    #[error("the game is already over")]
    GameAlreadyOver,
    #[error("no legal moves remain")]
    NoLegalMoves,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),
    #[error("the player to move is not a computer")]
    NotComputerTurn,
    #[error("search depth {0} is out of range (1-6)")]
    InvalidDepth(u8),
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
