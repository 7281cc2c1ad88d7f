//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::board::{Player, Pos};
use crate::config::{GameConfig, SeatKind};
use crate::engine::{AIEngine, MoveResult};
use crate::error::Result;
use crate::game::GameController;
use crate::rules::winning_line;

/// Worker reply: the engine comes back so its random source keeps going
type AiReply = (AIEngine, Result<MoveResult>);

/// AI computation state
pub enum AiState {
    Idle,
    /// The controller's engine is out on the worker thread
    Thinking {
        receiver: Receiver<AiReply>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// GUI-side session: the controller plus the worker thread bookkeeping
pub struct GameState {
    pub game: GameController,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub winning_line: Option<Vec<Pos>>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: GameController::new(config),
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            winning_line: None,
            message: None,
        }
    }

    /// Start over with the same seats. A search still running is abandoned.
    pub fn reset(&mut self) {
        if self.is_ai_thinking() {
            *self = Self::new(self.game.config().clone());
            return;
        }
        self.game.new_game();
        self.move_timer = MoveTimer::default();
        self.winning_line = None;
        self.message = None;
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_game_over() && !self.game.is_computer_turn()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.game.is_computer_turn()
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Side a click would place for, `None` while input is closed
    pub fn clickable_player(&self) -> Option<Player> {
        if self.is_human_turn() && !self.is_ai_thinking() {
            self.game.current_player()
        } else {
            None
        }
    }

    /// Attempt to place a stone for the human on move
    pub fn try_place_stone(&mut self, pos: Pos) -> std::result::Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.game
            .submit_move(i32::from(pos.row), i32::from(pos.col))
            .map_err(|err| {
                warn!(%pos, %err, "rejected click");
                err.to_string()
            })?;
        self.after_move(pos);
        Ok(())
    }

    fn after_move(&mut self, pos: Pos) {
        self.message = None;
        if self.is_game_over() {
            self.move_timer.stop();
            self.winning_line = winning_line(self.game.board(), pos, self.game.rules());
        } else {
            self.move_timer.start();
        }
    }

    /// Hand the position to a worker thread when a computer seat is on move
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }
        let Some(player) = self.game.current_player() else {
            return;
        };
        let SeatKind::Computer(difficulty) = self.game.seat(player).kind else {
            return;
        };
        let mut engine = self.game.take_engine();
        let board = self.game.board().clone();
        let (tx, rx) = channel();
        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board, player, difficulty);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Commit the worker's move once it has arrived
    pub fn check_ai_result(&mut self) {
        let reply = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(reply) => (reply, start_time.elapsed()),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI worker stopped unexpectedly".to_string());
                    return;
                }
            },
            AiState::Idle => return,
        };

        let ((engine, result), elapsed) = reply;
        self.game.restore_engine(engine);
        self.ai_state = AiState::Idle;
        self.move_timer.ai_thinking_time = Some(elapsed);

        let committed = result.and_then(|result| {
            let pos = result.best_move;
            self.game.commit_ai_move(result).map(|_| pos)
        });
        match committed {
            Ok(pos) => self.after_move(pos),
            Err(err) => self.message = Some(format!("AI could not move: {err}")),
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seat;
    use crate::rules::GameOutcome;
    use crate::search::Difficulty;

    fn wait_for_ai(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() && Instant::now() < deadline {
            state.check_ai_result();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_click_then_ai_reply() {
        let mut state = GameState::new(GameConfig {
            player_two: Seat::computer(Difficulty::Medium),
            ..GameConfig::default()
        });
        assert_eq!(state.clickable_player(), Some(Player::One));
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert!(state.is_ai_turn());
        assert_eq!(state.clickable_player(), None);

        state.start_ai_thinking();
        assert!(state.is_ai_thinking());
        assert_eq!(state.try_place_stone(Pos::new(0, 0)), Err("AI is thinking".to_string()));
        wait_for_ai(&mut state);

        assert!(!state.is_ai_thinking());
        assert_eq!(state.game.move_count(), 2);
        assert!(state.game.last_ai_result().is_some());
        assert_eq!(state.clickable_player(), Some(Player::One));
    }

    #[test]
    fn test_occupied_click_rejected() {
        let mut state = GameState::new(GameConfig::two_humans());
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        let err = state.try_place_stone(Pos::new(7, 7)).unwrap_err();
        assert_eq!(err, "cell (7, 7) is already occupied");
        assert_eq!(state.game.current_player(), Some(Player::Two));
    }

    #[test]
    fn test_win_highlights_line() {
        let mut state = GameState::new(GameConfig::two_humans());
        for c in 3..7 {
            state.try_place_stone(Pos::new(7, c)).unwrap();
            state.try_place_stone(Pos::new(0, c)).unwrap();
        }
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert_eq!(state.game.outcome(), GameOutcome::Win(Player::One));
        let line = state.winning_line.clone().unwrap();
        assert_eq!(line.len(), 5);
        assert!(line.contains(&Pos::new(7, 3)) && line.contains(&Pos::new(7, 7)));
        assert_eq!(state.try_place_stone(Pos::new(9, 9)), Err("Game is over".to_string()));

        state.reset();
        assert!(state.winning_line.is_none());
        assert_eq!(state.clickable_player(), Some(Player::One));
    }

    #[test]
    fn test_worker_uses_controller_engine() {
        let config = GameConfig {
            player_two: Seat::computer(Difficulty::Easy),
            seed: Some(9),
            ..GameConfig::default()
        };
        let mut direct = GameController::new(config.clone());
        direct.submit_move(7, 7).unwrap();
        let (expected, _) = direct.play_ai_turn().unwrap();

        let mut state = GameState::new(config);
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.start_ai_thinking();
        wait_for_ai(&mut state);
        assert_eq!(state.game.last_ai_result().map(|r| r.best_move), Some(expected));
        assert_eq!(state.game.board(), direct.board());
    }
}
