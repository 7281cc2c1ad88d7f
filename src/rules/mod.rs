//! Game rules for fifteen-by-fifteen Gomoku
//!
//! This module implements:
//! - Move validation (bounds, occupancy)
//! - Win detection around the last move (5 or more in a row by default)
//! - Draw detection (board filled without a win)

pub mod win;

use crate::board::{Board, Player, Pos};
use crate::error::{GameError, Result};

// Re-exports for convenient access
pub use win::{count_line, find_winning_move, has_five_at_pos, winning_line, DIRECTIONS};

/// Number of stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// How runs longer than five are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overline {
    /// Five or more in a row wins (freestyle)
    #[default]
    Allowed,
    /// Only an exact run of five wins; six or more does not count
    Forbidden,
}

/// Result of the game so far. Terminal once `Win` or `Draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Rule set applied by the controller and the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub overline: Overline,
}

impl Rules {
    pub fn new(overline: Overline) -> Self {
        Self { overline }
    }

    /// Check that `(row, col)` is on the board and empty.
    pub fn validate_move(&self, board: &Board, row: i32, col: i32) -> Result<Pos> {
        let pos = Pos::try_new(row, col)?;
        if board.is_empty(pos) {
            Ok(pos)
        } else {
            Err(GameError::CellOccupied(pos))
        }
    }

    /// Whether the stone at `last_move` completes a winning line.
    ///
    /// Only the four lines through `last_move` are examined.
    #[inline]
    pub fn check_win(&self, board: &Board, last_move: Pos) -> bool {
        match board.cell(last_move).player() {
            Some(player) => has_five_at_pos(board, last_move, player, self.overline),
            None => false,
        }
    }

    /// Board full and the filling move did not win.
    pub fn check_draw(&self, board: &Board) -> bool {
        board.is_full() && !board.last_move().is_some_and(|pos| self.check_win(board, pos))
    }

    /// Combine win and draw detection for the position after `last_move`.
    pub fn evaluate_state(&self, board: &Board, last_move: Option<Pos>) -> GameOutcome {
        if let Some(pos) = last_move {
            if self.check_win(board, pos) {
                if let Some(player) = board.cell(pos).player() {
                    return GameOutcome::Win(player);
                }
            }
        }
        if board.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    /// Outcome of the board as it stands, judged from its recorded last move.
    pub fn outcome(&self, board: &Board) -> GameOutcome {
        self.evaluate_state(board, board.last_move())
    }
}
