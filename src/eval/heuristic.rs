//! Heuristic evaluation function for Gomoku board positions
//!
//! This module provides the static evaluation used at the leaves of the
//! minimax search. It evaluates board positions based on:
//! - Pattern scoring (fives, fours, threes, twos)
//! - Multiple-threat combinations
//! - Positional bonuses (center control)

use crate::board::{Board, Cell, Player, Pos, BOARD_SIZE};
use crate::rules::{Overline, DIRECTIONS};

use super::patterns::{run_score, PatternScore};

/// Maximum Manhattan distance from center on 15x15 board
const MAX_CENTER_DIST: i32 = (BOARD_SIZE as i32 / 2) * 2;

/// Weight per distance unit from center
const POSITION_WEIGHT: i32 = 3;

/// Evaluate the board from the perspective of the given player.
///
/// Returns a score where:
/// - Positive values indicate advantage for `player`
/// - Negative values indicate disadvantage for `player`
///
/// The score is exactly antisymmetric:
/// `evaluate(board, p, o) == -evaluate(board, p.opponent(), o)`. It depends
/// only on which cells are occupied by whom. Under `Overline::Forbidden`
/// runs of six or more are worth nothing.
#[must_use]
pub fn evaluate(board: &Board, player: Player, overline: Overline) -> i32 {
    let opponent = player.opponent();

    let pattern_score =
        evaluate_patterns(board, player, overline) - evaluate_patterns(board, opponent, overline);
    let position_score = evaluate_positions(board, player) - evaluate_positions(board, opponent);

    pattern_score + position_score
}

/// Evaluate pattern-based score for a player.
///
/// Scans the player's stones and evaluates line patterns in all four
/// directions. Cost is linear in the stones placed, never a 225-cell scan. Each line segment is counted exactly once by only evaluating
/// from the "start" position (no same-player stone in the negative direction).
///
/// Also detects multiple threat combinations that cannot all be blocked:
/// - Two fours: opponent can only block one
/// - Four + open three: must block the four, the three promotes
/// - Two open threes: opponent can only block one
fn evaluate_patterns(board: &Board, player: Player, overline: Overline) -> i32 {
    let mut score = 0;
    let mut open_fours = 0i32;
    let mut closed_fours = 0i32;
    let mut open_threes = 0i32;

    for pos in board.stones(player).iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            let pattern_score = evaluate_line(board, pos, dr, dc, player, overline);
            score += pattern_score;

            if pattern_score >= PatternScore::FIVE {
                continue;
            } else if pattern_score >= PatternScore::OPEN_FOUR {
                open_fours += 1;
            } else if pattern_score >= PatternScore::CLOSED_FOUR {
                closed_fours += 1;
            } else if pattern_score >= PatternScore::OPEN_THREE {
                open_threes += 1;
            }
        }
    }

    if open_fours >= 1 && (closed_fours >= 1 || open_threes >= 1) {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 2 {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 1 && open_threes >= 1 {
        score += PatternScore::OPEN_FOUR;
    }
    if open_threes >= 2 {
        score += PatternScore::OPEN_FOUR;
    }

    score
}

/// Evaluate a single line pattern from a position in a given direction.
///
/// Only counts the pattern if this position is the start of the line (no
/// same-player stone in the negative direction). Counts consecutive stones
/// and open ends, and recognises one-gap shapes like `O_OOO` or `OO_OO`
/// where filling the gap completes five.
fn evaluate_line(board: &Board, pos: Pos, dr: i32, dc: i32, player: Player, overline: Overline) -> i32 {
    let own = player.cell();

    let prev = pos.offset(dr, dc, -1);
    if prev.is_some_and(|p| board.cell(p) == own) {
        return 0; // Not the start of this line segment
    }

    let mut count = 1;
    let mut open_ends = 0u8;
    let mut has_gap = false;
    let mut head = 0;

    let start_open = prev.is_some_and(|p| board.cell(p) == Cell::Empty);
    if start_open {
        open_ends += 1;
    }

    // Extend in positive direction, allowing one gap
    let mut step = 1;
    while let Some(p) = pos.offset(dr, dc, step) {
        match board.cell(p) {
            c if c == own => count += 1,
            Cell::Empty if !has_gap => {
                let next_is_own = pos
                    .offset(dr, dc, step + 1)
                    .is_some_and(|n| board.cell(n) == own);
                if next_is_own {
                    has_gap = true;
                    head = count;
                    step += 1;
                    continue;
                }
                open_ends += 1;
                break;
            }
            Cell::Empty => {
                open_ends += 1;
                break;
            }
            _ => break, // Opponent stone blocks
        }
        step += 1;
    }

    // Gap shapes are never a finished five; filling the gap is one move away.
    if has_gap {
        match count {
            // Filling would make six or more: only the run before the gap counts
            5.. if overline == Overline::Forbidden => run_score(head, u8::from(start_open), overline),
            5.. => PatternScore::OPEN_FOUR,
            4 => PatternScore::CLOSED_FOUR,
            3 if open_ends == 2 => PatternScore::OPEN_THREE,
            3 if open_ends == 1 => PatternScore::CLOSED_THREE,
            _ => 0,
        }
    } else {
        run_score(count, open_ends, overline)
    }
}

/// Evaluate positional bonuses for a player.
///
/// Stones closer to the center are worth more as they have more
/// potential for creating patterns in multiple directions.
fn evaluate_positions(board: &Board, player: Player) -> i32 {
    board
        .stones(player)
        .iter_ones()
        .map(|pos| (MAX_CENTER_DIST - pos.center_distance()) * POSITION_WEIGHT)
        .sum()
}

/// Run length and open ends of the line through `pos` if `player` stood there.
fn line_shape(board: &Board, pos: Pos, (dr, dc): (i32, i32), player: Player) -> (usize, u8) {
    let own = player.cell();
    let mut count = 1;
    let mut open_ends = 0;

    for sign in [1, -1] {
        let mut step = 1;
        loop {
            match pos.offset(dr * sign, dc * sign, step) {
                Some(p) if board.cell(p) == own => {
                    count += 1;
                    step += 1;
                }
                Some(p) if board.cell(p) == Cell::Empty => {
                    open_ends += 1;
                    break;
                }
                _ => break,
            }
        }
    }

    (count, open_ends)
}

/// Value of the four lines through `pos` if `player` took it.
fn threat_value(board: &Board, pos: Pos, player: Player, overline: Overline) -> i32 {
    let mut total = 0;
    let mut strong = 0;
    for &dir in &DIRECTIONS {
        let (count, open_ends) = line_shape(board, pos, dir, player);
        let score = run_score(count, open_ends, overline);
        if score >= PatternScore::OPEN_THREE {
            strong += 1;
        }
        total += score;
    }
    if strong >= 2 {
        total += PatternScore::OPEN_FOUR;
    }
    total
}

/// Score an empty cell as a move for `player` from its local window.
///
/// Combines the value of the shapes `player` would make there with the value
/// of the shapes it takes away from the opponent, plus a small pull toward
/// the center. Only the four lines through `pos` are read.
#[must_use]
pub fn score_move(board: &Board, pos: Pos, player: Player, overline: Overline) -> i32 {
    let attack = threat_value(board, pos, player, overline);
    let defense = threat_value(board, pos, player.opponent(), overline);
    attack + defense * 4 / 5 + (MAX_CENTER_DIST - pos.center_distance())
}
