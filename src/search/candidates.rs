//! Candidate move generation
//!
//! Only empty cells near existing stones are worth searching: an isolated
//! stone is never competitive and the full 225-cell branching factor makes
//! even shallow search infeasible.

use std::cmp::Reverse;

use crate::board::{Board, Player, Pos};
use crate::eval::score_move;
use crate::rules::Overline;

/// Chebyshev radius around existing stones admitted into search
pub const DEFAULT_RADIUS: i32 = 2;

/// Empty cells within `radius` of any stone, in row-major order.
///
/// On an empty board the only candidate is the center.
pub fn candidates(board: &Board, radius: i32) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![Pos::center()];
    }

    let near: Vec<Pos> = board
        .empty_cells()
        .filter(|&pos| board.has_neighbor(pos, radius))
        .collect();

    if near.is_empty() {
        board.empty_cells().collect()
    } else {
        near
    }
}

/// Candidates ordered best-first for `player` by their local move score.
///
/// The sort is stable over the row-major list, so equal scores keep
/// row-major order and the result is fully deterministic.
pub fn ordered_candidates(board: &Board, player: Player, radius: i32, overline: Overline) -> Vec<Pos> {
    let mut scored: Vec<(Pos, i32)> = candidates(board, radius)
        .into_iter()
        .map(|pos| (pos, score_move(board, pos, player, overline)))
        .collect();
    scored.sort_by_key(|&(_, score)| Reverse(score));
    scored.into_iter().map(|(pos, _)| pos).collect()
}
