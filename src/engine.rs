//! Main AI engine dispatching the difficulty strategies
//!
//! The engine is the single entry point for computer moves. It owns the
//! random source used by the easy opponent and the alpha-beta searcher used
//! by the hard one, and reports every decision with its statistics.
//!
//! Hard follows a priority order before searching:
//!
//! 1. **Immediate win**: a cell that completes a winning line
//! 2. **Defense**: a cell the opponent would win on next turn
//! 3. **Alpha-Beta**: depth-limited negamax over nearby cells
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Player, Rules};
//!
//! let mut engine = AIEngine::with_seed(Rules::default(), 7);
//! let mut board = Board::new();
//! board.place(7, 7, Player::One).unwrap();
//!
//! let result = engine.get_move_with_stats(&board, Player::Two, Difficulty::Medium).unwrap();
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::board::{Board, Player, Pos};
use crate::error::{GameError, Result};
use crate::rules::{find_winning_move, Rules};
use crate::search::{greedy_move, random_move, Difficulty, SearchResult, Searcher, WIN_SCORE};

/// Which step of the decision produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Uniform choice among empty cells (easy)
    Random,
    /// Move completes a winning line
    ImmediateWin,
    /// Move blocks the opponent's winning cell
    Defense,
    /// One-ply local heuristic (medium)
    Heuristic,
    /// Result of the alpha-beta search (hard)
    AlphaBeta,
}

/// A chosen move with the statistics of how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Score from the mover's perspective; 0 where no score is computed
    pub score: i32,
    pub search_type: SearchType,
    pub time_ms: u64,
    pub nodes: u64,
    /// Search depth in plies, 0 for the non-searching steps
    pub depth: u8,
    /// Root candidates considered by the search
    pub candidates: usize,
}

impl MoveResult {
    #[inline]
    fn shallow(pos: Pos, score: i32, search_type: SearchType) -> Self {
        Self {
            best_move: pos,
            score,
            search_type,
            time_ms: 0,
            nodes: 0,
            depth: 0,
            candidates: 0,
        }
    }

    fn from_alphabeta(pos: Pos, result: &SearchResult) -> Self {
        Self {
            best_move: pos,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms: 0,
            nodes: result.nodes,
            depth: result.depth,
            candidates: result.candidates,
        }
    }
}

/// Computer player shared by every difficulty.
pub struct AIEngine {
    rules: Rules,
    rng: StdRng,
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with an entropy-seeded random source.
    pub fn new(rules: Rules) -> Self {
        Self::from_rng(rules, StdRng::from_entropy())
    }

    /// Engine whose easy moves replay identically for the same seed.
    pub fn with_seed(rules: Rules, seed: u64) -> Self {
        Self::from_rng(rules, StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed(rules: Rules, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(rules, seed),
            None => Self::new(rules),
        }
    }

    fn from_rng(rules: Rules, rng: StdRng) -> Self {
        Self {
            rules,
            rng,
            searcher: Searcher::new(rules),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Best move for `player`. The board is never modified.
    pub fn get_move(&mut self, board: &Board, player: Player, difficulty: Difficulty) -> Result<Pos> {
        self.get_move_with_stats(board, player, difficulty)
            .map(|result| result.best_move)
    }

    /// Best move for `player` together with how it was found.
    ///
    /// Fails with `InvalidDepth` for a hard depth out of range and with
    /// `NoLegalMoves` on a full board.
    pub fn get_move_with_stats(
        &mut self,
        board: &Board,
        player: Player,
        difficulty: Difficulty,
    ) -> Result<MoveResult> {
        let difficulty = difficulty.validated()?;
        if board.is_full() {
            return Err(GameError::NoLegalMoves);
        }
        let start = Instant::now();

        // Hypothetical moves go to a scratch copy; the caller's board stays shared
        let mut scratch = board.clone();
        let mut result = match difficulty {
            Difficulty::Easy => {
                let pos = random_move(&scratch, &mut self.rng)?;
                MoveResult::shallow(pos, 0, SearchType::Random)
            }
            Difficulty::Medium => {
                let pos = greedy_move(&mut scratch, player, &self.rules)?;
                MoveResult::shallow(pos, 0, SearchType::Heuristic)
            }
            Difficulty::Hard { depth } => self.hard_move(&mut scratch, player, depth)?,
        };
        result.time_ms = start.elapsed().as_millis() as u64;

        debug!(
            %difficulty,
            %player,
            pos = %result.best_move,
            score = result.score,
            search_type = ?result.search_type,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "AI move chosen"
        );
        Ok(result)
    }

    fn hard_move(&mut self, board: &mut Board, player: Player, depth: u8) -> Result<MoveResult> {
        // 1. Immediate win
        if let Some(pos) = find_winning_move(board, player, &self.rules) {
            return Ok(MoveResult::shallow(pos, WIN_SCORE - 1, SearchType::ImmediateWin));
        }

        // 2. Block the opponent's immediate win
        if let Some(pos) = find_winning_move(board, player.opponent(), &self.rules) {
            return Ok(MoveResult::shallow(pos, 0, SearchType::Defense));
        }

        // 3. Alpha-beta
        let result = self.searcher.search(board, player, depth)?;
        trace!(
            candidates = result.candidates,
            nodes = result.nodes,
            score = result.score,
            "alpha-beta finished"
        );
        let pos = result.best_move.ok_or(GameError::NoLegalMoves)?;
        Ok(MoveResult::from_alphabeta(pos, &result))
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Overline;

    fn engine() -> AIEngine {
        AIEngine::with_seed(Rules::default(), 42)
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place(9, c, Player::One).unwrap();
        }
        board.place(3, 3, Player::Two).unwrap();

        let result = engine()
            .get_move_with_stats(&board, Player::One, Difficulty::hard())
            .unwrap();
        assert_eq!(result.best_move, Pos::new(9, 4));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let mut board = Board::new();
        for c in 0..4 {
            board.place(9, c, Player::Two).unwrap();
        }
        board.place(10, 5, Player::One).unwrap();

        let result = engine()
            .get_move_with_stats(&board, Player::One, Difficulty::hard())
            .unwrap();
        assert_eq!(result.best_move, Pos::new(9, 4));
        assert_eq!(result.search_type, SearchType::Defense);
    }

    #[test]
    fn test_engine_empty_board_center() {
        let board = Board::new();
        let mut engine = engine();
        for difficulty in [Difficulty::Medium, Difficulty::hard()] {
            assert_eq!(engine.get_move(&board, Player::One, difficulty), Ok(Pos::center()));
        }
    }

    #[test]
    fn test_engine_alpha_beta_stats() {
        let mut board = Board::new();
        board.place(7, 7, Player::One).unwrap();
        board.place(8, 8, Player::Two).unwrap();

        let result = engine()
            .get_move_with_stats(&board, Player::One, Difficulty::Hard { depth: 2 })
            .unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
        assert!(result.candidates > 0);
        assert!(board.is_empty(result.best_move));
    }

    #[test]
    fn test_engine_leaves_board_untouched() {
        let mut board = Board::new();
        board.place(7, 7, Player::One).unwrap();
        board.place(7, 8, Player::Two).unwrap();
        let before = board.clone();
        let mut engine = engine();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::hard()] {
            engine.get_move(&board, Player::One, difficulty).unwrap();
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_engine_full_board() {
        let mut board = Board::new();
        let mut player = Player::One;
        for pos in Pos::all() {
            board.place_at(pos, player).unwrap();
            player = player.opponent();
        }
        let mut engine = engine();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::hard()] {
            assert_eq!(
                engine.get_move(&board, Player::One, difficulty),
                Err(GameError::NoLegalMoves)
            );
        }
    }

    #[test]
    fn test_easy_reproducible_with_seed() {
        let mut board = Board::new();
        board.place(7, 7, Player::One).unwrap();
        let mut a = AIEngine::with_seed(Rules::default(), 2024);
        let mut b = AIEngine::from_seed(Rules::default(), Some(2024));
        for _ in 0..5 {
            let first = a.get_move_with_stats(&board, Player::Two, Difficulty::Easy).unwrap();
            let second = b.get_move(&board, Player::Two, Difficulty::Easy).unwrap();
            assert_eq!(first.best_move, second);
            assert_eq!(first.search_type, SearchType::Random);
        }
    }

    #[test]
    fn test_hard_deterministic() {
        let mut board = Board::new();
        for (r, c, p) in [
            (7, 7, Player::One),
            (7, 8, Player::Two),
            (8, 7, Player::One),
            (6, 9, Player::Two),
        ] {
            board.place(r, c, p).unwrap();
        }
        let first = AIEngine::new(Rules::default())
            .get_move(&board, Player::One, Difficulty::Hard { depth: 3 })
            .unwrap();
        let second = AIEngine::new(Rules::default())
            .get_move(&board, Player::One, Difficulty::Hard { depth: 3 })
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_rejects_bad_depth() {
        let mut board = Board::new();
        board.place(7, 7, Player::One).unwrap();
        let mut engine = engine();
        for depth in [0, 7, u8::MAX] {
            assert_eq!(
                engine.get_move(&board, Player::Two, Difficulty::Hard { depth }),
                Err(GameError::InvalidDepth(depth))
            );
        }
    }

    #[test]
    fn test_engine_exact_five_skips_dead_overline() {
        let mut board = Board::new();
        board.place(7, 1, Player::One).unwrap();
        for c in [2, 3, 4, 5, 7] {
            board.place(7, c, Player::Two).unwrap();
        }
        let mut engine = AIEngine::with_seed(Rules::new(Overline::Forbidden), 3);

        for difficulty in [Difficulty::Medium, Difficulty::hard()] {
            let result = engine.get_move_with_stats(&board, Player::Two, difficulty).unwrap();
            assert_ne!(result.best_move, Pos::new(7, 6), "{difficulty}");
            assert_ne!(result.search_type, SearchType::ImmediateWin);
        }
    }
}
