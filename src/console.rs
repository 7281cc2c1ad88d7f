//! Line-oriented text front end
//!
//! Reads moves as `row col` and prints the board after every move. The UI
//! is generic over its input and output so whole games can be scripted.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::warn;

use crate::board::{Board, Pos, BOARD_SIZE};
use crate::error::GameError;
use crate::game::GameController;
use crate::rules::GameOutcome;

const RULE: &str = "==================================================";

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Parse `"row col"` into raw coordinates. Bounds are checked by the game.
pub fn parse_move(line: &str) -> Result<(i32, i32), &'static str> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] => Err("Please enter a move."),
        [row, col] => match (row.parse(), col.parse()) {
            (Ok(row), Ok(col)) => Ok((row, col)),
            _ => Err("Invalid input! Please enter numbers only."),
        },
        _ => Err("Please enter two numbers separated by a space (e.g. '7 7')."),
    }
}

/// Board as text: column headers above and below, row numbers on both sides.
pub fn render_board(board: &Board) -> String {
    let mut header = String::from("   ");
    for col in 0..BOARD_SIZE {
        header.push_str(&format!("{col:2} "));
    }

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    for row in 0..BOARD_SIZE {
        out.push_str(&format!("{row:2} "));
        for col in 0..BOARD_SIZE {
            let cell = board.cell(Pos::new(row as u8, col as u8));
            out.push_str(&format!(" {} ", cell.symbol()));
        }
        out.push_str(&format!(" {row:2}\n"));
    }
    out.push_str(&header);
    out.push('\n');
    out
}

enum Turn {
    Played,
    Eof,
}

/// Interactive console session around one controller.
pub struct ConsoleUi<R, W> {
    game: GameController,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleUi<R, W> {
    pub fn new(game: GameController, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play games until the user declines another or input ends.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        self.welcome()?;
        loop {
            self.game.new_game();
            self.show_board()?;

            while !self.game.is_game_over() {
                if self.game.is_computer_turn() {
                    self.computer_turn()?;
                } else if let Turn::Eof = self.human_turn()? {
                    writeln!(self.output, "\nInput ended. Exiting game.")?;
                    return Ok(());
                }
                self.show_board()?;
            }

            self.game_over()?;
            if !self.ask_play_again()? {
                break;
            }
        }
        writeln!(self.output, "\nThanks for playing Gomoku!")?;
        Ok(())
    }

    fn welcome(&mut self) -> io::Result<()> {
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "Welcome to Gomoku (Five in a Row)!")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "\nRules:")?;
        writeln!(self.output, "- The board is {BOARD_SIZE}x{BOARD_SIZE}")?;
        writeln!(self.output, "- Players take turns placing pieces")?;
        writeln!(
            self.output,
            "- First to get 5 in a row (horizontally, vertically, or diagonally) wins"
        )?;
        writeln!(self.output, "- Enter moves as row and column (e.g. '7 7' for center)")?;
        writeln!(self.output, "- Coordinates range from 0 to {}\n", BOARD_SIZE - 1)
    }

    fn show_board(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", render_board(self.game.board()))?;
        writeln!(self.output)
    }

    fn announce_turn(&mut self) -> io::Result<()> {
        if let Some(player) = self.game.current_player() {
            let seat = self.game.seat(player).name.clone();
            writeln!(self.output, "\n{seat}'s turn (Symbol: {})", player.cell().symbol())?;
        }
        Ok(())
    }

    /// `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn human_turn(&mut self) -> Result<Turn, ConsoleError> {
        self.announce_turn()?;
        loop {
            let Some(line) = self.read_line("Enter your move (row col): ")? else {
                return Ok(Turn::Eof);
            };
            let (row, col) = match parse_move(&line) {
                Ok(coords) => coords,
                Err(msg) => {
                    writeln!(self.output, "{msg}")?;
                    continue;
                }
            };
            match self.game.submit_move(row, col) {
                Ok(_) => return Ok(Turn::Played),
                Err(err @ (GameError::OutOfBounds { .. } | GameError::CellOccupied(_))) => {
                    warn!(row, col, %err, "rejected move");
                    writeln!(self.output, "Invalid move! {err}. Please try again.")?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn computer_turn(&mut self) -> Result<(), ConsoleError> {
        self.announce_turn()?;
        writeln!(self.output, "Computer is thinking...")?;
        let (pos, _) = self.game.play_ai_turn()?;
        writeln!(self.output, "Computer placed at {pos}")?;
        Ok(())
    }

    fn game_over(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{RULE}")?;
        writeln!(self.output, "GAME OVER!")?;
        writeln!(self.output, "{RULE}")?;
        match self.game.outcome() {
            GameOutcome::Draw => writeln!(self.output, "The game is a draw!")?,
            _ => {
                if let Some(seat) = self.game.winner_seat() {
                    let name = seat.name.clone();
                    writeln!(self.output, "{name} wins!")?;
                }
            }
        }
        writeln!(self.output, "{RULE}")
    }

    fn ask_play_again(&mut self) -> io::Result<bool> {
        loop {
            let Some(answer) = self.read_line("\nPlay again? (y/n): ")? else {
                return Ok(false);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please enter 'y' or 'n'.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::config::{GameConfig, Seat};
    use crate::search::Difficulty;
    use std::io::Cursor;

    fn play(config: GameConfig, script: &str) -> (GameController, String) {
        let input = Cursor::new(script.to_string());
        let mut ui = ConsoleUi::new(GameController::new(config), input, Vec::new());
        ui.run().unwrap();
        let ConsoleUi { game, output, .. } = ui;
        (game, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("7 7"), Ok((7, 7)));
        assert_eq!(parse_move("  3   14 "), Ok((3, 14)));
        assert_eq!(parse_move("-1 20"), Ok((-1, 20)));
        assert!(parse_move("").is_err());
        assert!(parse_move("7").is_err());
        assert!(parse_move("7 7 7").is_err());
        assert!(parse_move("a b").is_err());
    }

    #[test]
    fn test_render_board() {
        let mut board = Board::new();
        board.place(0, 0, Player::One).unwrap();
        board.place(14, 14, Player::Two).unwrap();
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE + 2);
        assert!(lines[0].starts_with("    0  1  2"));
        assert!(lines[1].starts_with(" 0  X  . "));
        assert!(lines[15].ends_with(" O   14"));
        assert_eq!(text.matches('X').count(), 1);
        assert_eq!(text.matches('O').count(), 1);
    }

    #[test]
    fn test_scripted_win_then_quit() {
        let script = "7 3\n0 3\n7 4\n0 4\n7 5\n0 5\n7 6\n0 6\n7 7\nn\n";
        let (game, out) = play(GameConfig::two_humans(), script);
        assert!(out.contains("Player X wins!"));
        assert!(out.contains("Thanks for playing Gomoku!"));
        assert_eq!(game.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let script = "\na b\n7\n20 20\n7 7\n7 7\n";
        let (game, out) = play(GameConfig::two_humans(), script);
        assert!(out.contains("Please enter a move."));
        assert!(out.contains("numbers only"));
        assert!(out.contains("two numbers"));
        assert!(out.contains("Invalid move! position (20, 20) is outside the board"));
        assert!(out.contains("Invalid move! cell (7, 7) is already occupied"));
        assert!(out.contains("Input ended. Exiting game."));
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let (game, out) = play(GameConfig::default(), "");
        assert!(out.contains("Welcome to Gomoku"));
        assert!(out.contains("Input ended. Exiting game."));
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_computer_answers() {
        let config = GameConfig {
            player_two: Seat::computer(Difficulty::Easy),
            seed: Some(5),
            ..GameConfig::default()
        };
        let (game, out) = play(config, "7 7\n");
        assert!(out.contains("Computer (Easy)'s turn (Symbol: O)"));
        assert!(out.contains("Computer placed at ("));
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_play_again_loop() {
        let script = "7 3\n0 3\n7 4\n0 4\n7 5\n0 5\n7 6\n0 6\n7 7\nmaybe\ny\n";
        let (game, out) = play(GameConfig::two_humans(), script);
        assert!(out.contains("Please enter 'y' or 'n'."));
        assert_eq!(out.matches("GAME OVER!").count(), 1);
        // Second game started fresh and ended at EOF
        assert_eq!(game.move_count(), 0);
        assert!(out.contains("Input ended. Exiting game."));
    }
}
