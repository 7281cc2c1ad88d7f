//! GUI module for the Gomoku game
//!
//! This module provides a native Rust GUI using egui/eframe. Computer moves
//! run on a worker thread so the window stays responsive.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{AiState, GameState};

/// Open the window and block until it is closed.
pub fn run(config: crate::config::GameConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, config)))),
    )
}
