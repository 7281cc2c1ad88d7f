//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line patterns (twos, threes, fours, fives, one-gap shapes)
//! - Multiple-threat combinations
//! - Positional bonuses (center control)
//!
//! It also scores single candidate moves from a local window, which the
//! search uses for move ordering and the medium opponent for move choice.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, score_move};
pub use patterns::{run_score, PatternScore};
