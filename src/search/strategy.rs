//! Difficulty tiers and the non-searching strategies
//!
//! - Easy: a uniformly random empty cell
//! - Medium: win if possible, else block, else the best local cell
//! - Hard: alpha-beta search, see [`super::Searcher`]

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Player, Pos};
use crate::error::{GameError, Result};
use crate::eval::score_move;
use crate::rules::{find_winning_move, Rules};

use super::candidates::DEFAULT_RADIUS;

/// Default search depth of the hard opponent, in plies
pub const DEFAULT_DEPTH: u8 = 2;

/// Deepest search the hard opponent accepts
pub const MAX_SEARCH_DEPTH: u8 = 6;

/// Accept a hard search depth between 1 and `MAX_SEARCH_DEPTH` plies.
pub fn check_depth(depth: u8) -> Result<u8> {
    if (1..=MAX_SEARCH_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(GameError::InvalidDepth(depth))
    }
}

/// Strength of a computer opponent.
///
/// `Hard` can be built directly; its depth is checked by
/// [`Difficulty::validated`] before any search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard { depth: u8 },
}

impl Difficulty {
    /// Hard opponent at the default depth
    pub fn hard() -> Self {
        Difficulty::Hard {
            depth: DEFAULT_DEPTH,
        }
    }

    /// Hard opponent searching `depth` plies (1 to `MAX_SEARCH_DEPTH`)
    pub fn hard_with_depth(depth: u8) -> Result<Self> {
        check_depth(depth).map(|depth| Difficulty::Hard { depth })
    }

    /// This difficulty, or `InvalidDepth` for a hard depth out of range
    pub fn validated(self) -> Result<Self> {
        match self {
            Difficulty::Hard { depth } => Difficulty::hard_with_depth(depth),
            other => Ok(other),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard { depth } => write!(f, "Hard (depth {depth})"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::hard()),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Easy: any empty cell, uniformly at random.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Pos> {
    let empty: Vec<Pos> = board.empty_cells().collect();
    empty.choose(rng).copied().ok_or(GameError::NoLegalMoves)
}

/// Medium: one-ply greedy choice.
///
/// In priority order: a cell that wins for `player`, a cell that would win
/// for the opponent, then the near-stone cell with the best local score,
/// ties going to the cell closest to the center and then row-major order.
/// The board is unchanged on return.
pub fn greedy_move(board: &mut Board, player: Player, rules: &Rules) -> Result<Pos> {
    if board.is_full() {
        return Err(GameError::NoLegalMoves);
    }
    if let Some(win) = find_winning_move(board, player, rules) {
        return Ok(win);
    }
    if let Some(block) = find_winning_move(board, player.opponent(), rules) {
        return Ok(block);
    }
    if board.is_board_empty() {
        return Ok(Pos::center());
    }

    let best = board
        .empty_cells()
        .filter(|&pos| board.has_neighbor(pos, DEFAULT_RADIUS))
        .max_by_key(|&pos| {
            (
                score_move(board, pos, player, rules.overline),
                -pos.center_distance(),
                std::cmp::Reverse(pos),
            )
        });

    match best {
        Some(pos) => Ok(pos),
        None => board.empty_cells().next().ok_or(GameError::NoLegalMoves),
    }
}
