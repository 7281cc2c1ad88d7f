//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation with proximity filtering
//! - Alpha-Beta (negamax) search over a shared board with apply/undo
//! - The three difficulty strategies built on top of them

pub mod alphabeta;
pub mod candidates;
pub mod strategy;

pub use alphabeta::{SearchResult, Searcher, WIN_SCORE};
pub use candidates::{candidates, ordered_candidates, DEFAULT_RADIUS};
pub use strategy::{greedy_move, random_move, Difficulty, DEFAULT_DEPTH, MAX_SEARCH_DEPTH};
