//! Gomoku on a 15x15 board with a three-tier computer opponent
//!
//! - Standard 15x15 board, player one (X) moves first
//! - Five or more in a row wins (an exact-five variant is available)
//! - A full board without a winner is a draw
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Board representation with bitboards and scoped hypothetical moves
//! - [`rules`]: Move validation, win and draw detection
//! - [`eval`]: Position evaluation and move scoring heuristics
//! - [`search`]: Candidate generation, alpha-beta search and difficulty strategies
//! - [`engine`]: AI engine dispatching the difficulties
//! - [`game`]: Turn state machine and the stateless game API
//! - [`console`] and [`ui`]: text and graphical front ends
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{compute_ai_move, get_outcome, new_game, submit_move};
//! use gomoku::{Difficulty, GameOutcome, Player};
//!
//! let mut board = new_game();
//! submit_move(&mut board, Player::One, 7, 7).unwrap();
//!
//! // The computer answers as player two
//! let reply = compute_ai_move(&board, Player::Two, Difficulty::Medium).unwrap();
//! submit_move(&mut board, Player::Two, reply.row.into(), reply.col.into()).unwrap();
//!
//! assert_eq!(get_outcome(&board), GameOutcome::InProgress);
//! ```
//!
//! # Difficulties
//!
//! 1. Easy: a random empty cell
//! 2. Medium: win, else block, else the best local cell
//! 3. Hard: win, else block, else alpha-beta search to the configured depth

pub mod board;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Player, Pos, BOARD_SIZE};
pub use config::{GameConfig, Seat, SeatKind};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GameError, Result};
pub use game::{
    compute_ai_move, compute_ai_move_with, get_outcome, get_outcome_with, new_game, submit_move,
    submit_move_with, GameController, GameStatus,
};
pub use rules::{GameOutcome, Overline, Rules};
pub use search::Difficulty;
