//! Gomoku launcher
//!
//! Plays on the console by default or opens the egui window with `--ui gui`.

use std::error::Error;
use std::io;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use gomoku::config::{GameConfig, Seat};
use gomoku::console::ConsoleUi;
use gomoku::game::GameController;
use gomoku::rules::{Overline, Rules};
use gomoku::search::{Difficulty, DEFAULT_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Frontend {
    Console,
    Gui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Human,
    Easy,
    Medium,
    Hard,
}

/// Five in a row on a 15x15 board
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Gomoku against a friend or the computer", long_about = None)]
#[command(version)]
struct Args {
    /// Front end to play in
    #[arg(long, value_enum, default_value_t = Frontend::Console)]
    ui: Frontend,

    /// Who plays O
    #[arg(long, value_enum, default_value_t = Opponent::Medium)]
    opponent: Opponent,

    /// Search depth of the hard opponent (1-6)
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Seed for the easy opponent's random moves
    #[arg(long)]
    seed: Option<u64>,

    /// Name of the X player
    #[arg(long, default_value = "Player X")]
    name: String,

    /// Name of the O player
    #[arg(long)]
    opponent_name: Option<String>,

    /// Only an exact five wins; six or more in a row does not count
    #[arg(long)]
    exact_five: bool,
}

impl Args {
    fn into_config(self) -> Result<GameConfig, Box<dyn Error>> {
        let player_two = match self.opponent {
            Opponent::Human => Seat::human("Player O"),
            Opponent::Easy => Seat::computer(Difficulty::Easy),
            Opponent::Medium => Seat::computer(Difficulty::Medium),
            Opponent::Hard => Seat::computer(Difficulty::hard_with_depth(self.depth)?),
        };
        let player_two = match self.opponent_name {
            Some(name) => player_two.with_name(name),
            None => player_two,
        };
        let overline = if self.exact_five {
            Overline::Forbidden
        } else {
            Overline::Allowed
        };

        Ok(GameConfig {
            rules: Rules::new(overline),
            player_one: Seat::human(self.name),
            player_two,
            seed: self.seed,
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so they never interleave with the console board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let frontend = args.ui;
    let config = args.into_config()?;

    match frontend {
        Frontend::Console => {
            let stdin = io::stdin();
            let mut ui = ConsoleUi::new(GameController::new(config), stdin.lock(), io::stdout());
            ui.run()?;
        }
        Frontend::Gui => gomoku::ui::run(config)?,
    }
    Ok(())
}
