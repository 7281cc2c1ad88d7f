//! Win condition checking
//!
//! Every check is local to the lines through one position: at most nine
//! cells per direction are read, so a check costs the same regardless of
//! how full the board is.

use crate::board::{Board, Player, Pos};

use super::{Overline, Rules, WIN_LENGTH};

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Count `player` stones strictly after `pos` along `(dr, dc)`.
#[inline]
fn count_direction(board: &Board, pos: Pos, dr: i32, dc: i32, player: Player) -> usize {
    let cell = player.cell();
    let mut count = 0;
    let mut step = 1;
    while let Some(p) = pos.offset(dr, dc, step) {
        if board.cell(p) != cell {
            break;
        }
        count += 1;
        step += 1;
    }
    count
}

/// Length of the contiguous run of `player` stones through `pos` along
/// `(dr, dc)`, counting `pos` itself.
#[inline]
pub fn count_line(board: &Board, pos: Pos, (dr, dc): (i32, i32), player: Player) -> usize {
    1 + count_direction(board, pos, dr, dc, player) + count_direction(board, pos, -dr, -dc, player)
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks 4 directions from the given position. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, player: Player, overline: Overline) -> bool {
    DIRECTIONS.iter().any(|&dir| {
        let run = count_line(board, pos, dir, player);
        match overline {
            Overline::Allowed => run >= WIN_LENGTH,
            Overline::Forbidden => run == WIN_LENGTH,
        }
    })
}

/// Cells of the winning run through `pos`, ordered along the line.
///
/// Returns `None` if the stone at `pos` does not win.
pub fn winning_line(board: &Board, pos: Pos, rules: &Rules) -> Option<Vec<Pos>> {
    let player = board.cell(pos).player()?;
    if !rules.check_win(board, pos) {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let back = count_direction(board, pos, -dr, -dc, player) as i32;
        let forward = count_direction(board, pos, dr, dc, player) as i32;
        let run = (back + forward + 1) as usize;
        let wins = match rules.overline {
            Overline::Allowed => run >= WIN_LENGTH,
            Overline::Forbidden => run == WIN_LENGTH,
        };
        if wins {
            return Some((-back..=forward).filter_map(|i| pos.offset(dr, dc, i)).collect());
        }
    }
    None
}

/// Find an empty cell that would complete a win for `player`.
///
/// Cells are tried in row-major order, so the result is deterministic. The
/// board is restored before returning.
pub fn find_winning_move(board: &mut Board, player: Player, rules: &Rules) -> Option<Pos> {
    let candidates: Vec<Pos> = board.empty_cells().collect();
    candidates.into_iter().find(|&pos| {
        let trial = board.apply(pos, player);
        rules.check_win(&trial, pos)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_line_both_sides() {
        let mut board = Board::new();
        for c in [3, 4, 6, 7] {
            board.place(7, c, Player::One).unwrap();
        }
        board.place(7, 5, Player::One).unwrap();
        assert_eq!(count_line(&board, Pos::new(7, 5), (0, 1), Player::One), 5);
        assert_eq!(count_line(&board, Pos::new(7, 5), (1, 0), Player::One), 1);
    }

    #[test]
    fn test_count_line_stops_at_edge() {
        let mut board = Board::new();
        for r in 0..3 {
            board.place(r, 14 - r, Player::Two).unwrap();
        }
        assert_eq!(count_line(&board, Pos::new(1, 13), (1, -1), Player::Two), 3);
    }

    #[test]
    fn test_winning_line_cells() {
        let rules = Rules::default();
        let mut board = Board::new();
        for i in 0..6 {
            board.place(2 + i, 2 + i, Player::One).unwrap();
        }
        let line = winning_line(&board, Pos::new(4, 4), &rules).unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line.first(), Some(&Pos::new(2, 2)));
        assert_eq!(line.last(), Some(&Pos::new(7, 7)));
    }

    #[test]
    fn test_winning_line_none_without_win() {
        let rules = Rules::default();
        let mut board = Board::new();
        board.place(2, 2, Player::One).unwrap();
        assert!(winning_line(&board, Pos::new(2, 2), &rules).is_none());
        assert!(winning_line(&board, Pos::new(3, 3), &rules).is_none());
    }

    #[test]
    fn test_find_winning_move() {
        let rules = Rules::default();
        let mut board = Board::new();
        for r in 3..7 {
            board.place(r, 10, Player::Two).unwrap();
        }
        board.place(2, 10, Player::One).unwrap();
        let before = board.clone();

        assert_eq!(find_winning_move(&mut board, Player::Two, &rules), Some(Pos::new(7, 10)));
        assert_eq!(find_winning_move(&mut board, Player::One, &rules), None);
        assert_eq!(board, before);
    }
}
