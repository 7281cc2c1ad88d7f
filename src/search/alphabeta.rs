//! Alpha-Beta search over a shared board
//!
//! This module implements the search behind the hard opponent. It uses
//! negamax with alpha-beta pruning over a single mutable board: every node
//! applies a candidate through [`Board::apply`], recurses, and the returned
//! guard undoes the move when it goes out of scope, including on cutoffs.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Player};
//! use gomoku::rules::Rules;
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(Rules::default());
//! let mut board = Board::new();
//! board.place(7, 7, Player::One).unwrap();
//!
//! let result = searcher.search(&mut board, Player::Two, 2).unwrap();
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: ({}, {})", best_move.row, best_move.col);
//! }
//! ```

use crate::board::{Board, Player, Pos};
use crate::error::{GameError, Result};
use crate::eval::evaluate;
use crate::rules::Rules;

use super::candidates::{ordered_candidates, DEFAULT_RADIUS};
use super::strategy::check_depth;

/// Score of a won position, larger than any heuristic evaluation.
/// Wins found `ply` half-moves deep score `WIN_SCORE - ply`.
pub const WIN_SCORE: i32 = 1_000_000_000;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1_000;

/// Maximum moves to consider at internal nodes, after ordering.
/// Move ordering puts winning and blocking cells first, so the cap only
/// drops quiet moves.
const MAX_INTERNAL_MOVES: usize = 20;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score of the best move from the searching player's perspective
    pub score: i32,
    /// Depth searched in plies
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
    /// Number of root candidates considered
    pub candidates: usize,
}

/// Depth-limited negamax searcher.
#[derive(Debug, Clone)]
pub struct Searcher {
    rules: Rules,
    radius: i32,
    nodes: u64,
}

impl Searcher {
    pub fn new(rules: Rules) -> Self {
        Self::with_radius(rules, DEFAULT_RADIUS)
    }

    /// Searcher admitting candidates within `radius` of existing stones
    pub fn with_radius(rules: Rules, radius: i32) -> Self {
        Self {
            rules,
            radius,
            nodes: 0,
        }
    }

    /// Nodes visited by the last search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies for the best move of `player`.
    ///
    /// The board is borrowed mutably for hypothetical moves and is identical
    /// to its input state when this returns. Among equally scored root moves
    /// the first in candidate order wins. Depths outside 1 to
    /// `MAX_SEARCH_DEPTH` fail with `InvalidDepth`.
    pub fn search(&mut self, board: &mut Board, player: Player, depth: u8) -> Result<SearchResult> {
        if board.is_full() {
            return Err(GameError::NoLegalMoves);
        }
        let depth = check_depth(depth)?;
        self.nodes = 0;

        let moves = ordered_candidates(board, player, self.radius, self.rules.overline);
        let mut alpha = -INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for &mov in &moves {
            let score = {
                let mut child = board.apply(mov, player);
                -self.negamax(&mut child, player.opponent(), depth - 1, 1, -INF, -alpha, mov)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
        }

        Ok(SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
            candidates: moves.len(),
        })
    }

    /// Negamax with alpha-beta. Returns the score for `to_move`.
    ///
    /// `last_move` was just played by the opponent of `to_move`; terminal
    /// positions are recognised from it before the depth check, so a win is
    /// always seen even at the horizon.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        to_move: Player,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        beta: i32,
        last_move: Pos,
    ) -> i32 {
        self.nodes += 1;

        if self.rules.check_win(board, last_move) {
            return -(WIN_SCORE - ply);
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate(board, to_move, self.rules.overline);
        }

        let mut moves = ordered_candidates(board, to_move, self.radius, self.rules.overline);
        moves.truncate(MAX_INTERNAL_MOVES);

        let mut best = -INF;
        for mov in moves {
            let score = {
                let mut child = board.apply(mov, to_move);
                -self.negamax(&mut child, to_move.opponent(), depth - 1, ply + 1, -beta, -alpha, mov)
            };

            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}
