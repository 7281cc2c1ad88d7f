//! Game configuration: rule set, who sits in each seat, and the random seed.

use std::fmt;

use crate::board::Player;
use crate::rules::Rules;
use crate::search::Difficulty;

/// Who controls a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    Human,
    Computer(Difficulty),
}

impl SeatKind {
    #[inline]
    pub fn is_computer(self) -> bool {
        matches!(self, SeatKind::Computer(_))
    }
}

/// A named participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    pub kind: SeatKind,
}

impl Seat {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SeatKind::Human,
        }
    }

    /// Computer seat named after its difficulty, e.g. "Computer (Medium)"
    pub fn computer(difficulty: Difficulty) -> Self {
        let label = match difficulty {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard { .. } => "Hard",
        };
        Self {
            name: format!("Computer ({label})"),
            kind: SeatKind::Computer(difficulty),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rules: Rules,
    /// Plays X and moves first
    pub player_one: Seat,
    /// Plays O
    pub player_two: Seat,
    /// Seed for the easy opponent; entropy when `None`
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn seat(&self, player: Player) -> &Seat {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }

    /// Two humans sharing the board
    pub fn two_humans() -> Self {
        Self {
            player_two: Seat::human("Player O"),
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            player_one: Seat::human("Player X"),
            player_two: Seat::computer(Difficulty::Medium),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seats() {
        let config = GameConfig::default();
        assert_eq!(config.seat(Player::One).name, "Player X");
        assert_eq!(config.seat(Player::One).kind, SeatKind::Human);
        assert_eq!(config.seat(Player::Two).name, "Computer (Medium)");
        assert!(config.seat(Player::Two).kind.is_computer());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_computer_seat_names() {
        assert_eq!(Seat::computer(Difficulty::Easy).name, "Computer (Easy)");
        assert_eq!(Seat::computer(Difficulty::Hard { depth: 4 }).name, "Computer (Hard)");
        let named = Seat::computer(Difficulty::Easy).with_name("Rusty");
        assert_eq!(named.to_string(), "Rusty");
        assert_eq!(named.kind, SeatKind::Computer(Difficulty::Easy));
    }

    #[test]
    fn test_two_humans() {
        let config = GameConfig::two_humans();
        assert!(!config.player_one.kind.is_computer());
        assert!(!config.player_two.kind.is_computer());
    }
}
