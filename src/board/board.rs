//! Board structure with move-stack tracking

use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{Cell, Player, Pos, TOTAL_CELLS};
use crate::error::{GameError, Result};

/// Game board.
///
/// Besides the two bitboards the board caches the number of empty cells and
/// keeps the stack of placed positions, whose top is the last move. Both are
/// restored exactly by [`Board::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Player one's stones
    one: Bitboard,
    /// Player two's stones
    two: Bitboard,
    empty_count: usize,
    /// Placed positions in order, top = last move
    history: Vec<Pos>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            one: Bitboard::new(),
            two: Bitboard::new(),
            empty_count: TOTAL_CELLS,
            history: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    /// Cell at raw coordinates
    pub fn get(&self, row: i32, col: i32) -> Result<Cell> {
        Pos::try_new(row, col).map(|pos| self.cell(pos))
    }

    /// Cell at a validated position
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        if self.one.get(pos) {
            Cell::PlayerOne
        } else if self.two.get(pos) {
            Cell::PlayerTwo
        } else {
            Cell::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.one.get(pos) && !self.two.get(pos)
    }

    /// Place a piece at raw coordinates.
    ///
    /// Fails with `OutOfBounds` or `CellOccupied`; the board is untouched on
    /// failure.
    pub fn place(&mut self, row: i32, col: i32, player: Player) -> Result<Pos> {
        let pos = Pos::try_new(row, col)?;
        self.place_at(pos, player)?;
        Ok(pos)
    }

    /// Place a piece at a validated position
    pub fn place_at(&mut self, pos: Pos, player: Player) -> Result<()> {
        if !self.is_empty(pos) {
            return Err(GameError::CellOccupied(pos));
        }
        self.stones_mut(player).set(pos);
        self.empty_count -= 1;
        self.history.push(pos);
        Ok(())
    }

    /// Clear an occupied cell and restore the last-move bookkeeping.
    pub fn remove(&mut self, pos: Pos) -> Result<()> {
        if self.is_empty(pos) {
            return Err(GameError::CellEmpty(pos));
        }
        self.one.clear(pos);
        self.two.clear(pos);
        self.empty_count += 1;
        if self.history.last() == Some(&pos) {
            self.history.pop();
        } else if let Some(idx) = self.history.iter().rposition(|&p| p == pos) {
            self.history.remove(idx);
        }
        Ok(())
    }

    /// Place a hypothetical move that is undone when the returned guard drops.
    ///
    /// The guard dereferences to the board so recursion can keep going
    /// through it; every exit path, early cutoffs included, removes the piece.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is occupied: callers only apply generated candidates,
    /// so this means the apply/undo discipline has been broken.
    pub fn apply(&mut self, pos: Pos, player: Player) -> Placement<'_> {
        if let Err(err) = self.place_at(pos, player) {
            panic!("hypothetical move rejected: {err}");
        }
        Placement { board: self, pos }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count == 0
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty_count
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Stones placed so far
    #[inline]
    pub fn stone_count(&self) -> usize {
        TOTAL_CELLS - self.empty_count
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.empty_count == TOTAL_CELLS
    }

    /// Bitboard of one player's stones
    #[inline]
    pub fn stones(&self, player: Player) -> &Bitboard {
        match player {
            Player::One => &self.one,
            Player::Two => &self.two,
        }
    }

    #[inline]
    fn stones_mut(&mut self, player: Player) -> &mut Bitboard {
        match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        }
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.is_empty(pos))
    }

    /// Whether any stone lies within Chebyshev distance `radius` of `pos`
    pub fn has_neighbor(&self, pos: Pos, radius: i32) -> bool {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(p) = pos.offset(dr, dc, 1) {
                    if !self.is_empty(p) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Player whose turn it is, derived from stone counts
    #[inline]
    pub fn side_to_move(&self) -> Player {
        if self.one.count() > self.two.count() {
            Player::Two
        } else {
            Player::One
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A move applied for the duration of a search step. See [`Board::apply`].
pub struct Placement<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Placement<'_> {
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.board.remove(self.pos) {
            panic!("undo of hypothetical move failed: {err}");
        }
    }
}
