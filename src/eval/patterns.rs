//! Pattern scores for Gomoku evaluation
//!
//! These constants define the scoring weights for the line patterns the
//! evaluator recognises. Each tier is an order of magnitude (or close) above
//! the next so that one stronger threat outweighs several weaker ones.

use crate::rules::Overline;

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    // Winning pattern
    /// Five in a row - already won
    pub const FIVE: i32 = 1_000_000;

    // Strong attacking patterns
    /// Open four: _OOOO_ (cannot be stopped)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ or _OOOOX (one way to extend)
    pub const CLOSED_FOUR: i32 = 50_000;

    // Moderate threats
    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: XOOO_ or _OOOX (one side blocked)
    pub const CLOSED_THREE: i32 = 1_500;

    // Building patterns
    /// Open two: _OO_ (potential to grow)
    pub const OPEN_TWO: i32 = 1_000;
    /// Closed two: XOO_ or _OOX (one side blocked)
    pub const CLOSED_TWO: i32 = 200;
    /// Lone stone with room on both sides
    pub const OPEN_ONE: i32 = 10;
}

/// Score a contiguous run by its length and number of open ends.
///
/// A run of five scores `FIVE`, and so does a longer one unless overlines
/// are forbidden, in which case it is dead. Shorter runs with both ends
/// blocked are dead and score nothing.
#[inline]
pub fn run_score(count: usize, open_ends: u8, overline: Overline) -> i32 {
    match (count, open_ends) {
        (6.., _) if overline == Overline::Forbidden => 0,
        (5.., _) => PatternScore::FIVE,
        (4, 2) => PatternScore::OPEN_FOUR,
        (4, 1) => PatternScore::CLOSED_FOUR,
        (3, 2) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::CLOSED_THREE,
        (2, 2) => PatternScore::OPEN_TWO,
        (2, 1) => PatternScore::CLOSED_TWO,
        (1, 2) => PatternScore::OPEN_ONE,
        _ => 0,
    }
}
