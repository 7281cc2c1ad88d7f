//! Game flow: the turn state machine and the stateless game API
//!
//! [`GameController`] owns one board and walks it through
//! `AwaitingMove(player)` until a win or draw moves it to `Finished`.
//! Only [`GameController::new_game`] leaves the finished state.
//!
//! The free functions at the bottom expose the same operations over a
//! caller-owned [`Board`] for front ends that keep their own state.

use tracing::{info, warn};

use crate::board::{Board, Player, Pos};
use crate::config::{GameConfig, Seat, SeatKind};
use crate::engine::{AIEngine, MoveResult};
use crate::error::{GameError, Result};
use crate::rules::{GameOutcome, Rules};
use crate::search::Difficulty;

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingMove(Player),
    Finished(GameOutcome),
}

impl GameStatus {
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// Drives one game between the two configured seats.
pub struct GameController {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    /// `None` while lent to a worker through [`Self::take_engine`]
    engine: Option<AIEngine>,
    last_ai_result: Option<MoveResult>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        let engine = AIEngine::from_seed(config.rules, config.seed);
        info!(
            player_one = %config.player_one,
            player_two = %config.player_two,
            overline = ?config.rules.overline,
            "new game"
        );
        Self {
            config,
            board: Board::new(),
            status: GameStatus::AwaitingMove(Player::One),
            engine: Some(engine),
            last_ai_result: None,
        }
    }

    /// Clear the board and give the first move back to player one.
    ///
    /// The engine's random source carries on, so a seeded session still
    /// replays identically across several games.
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.status = GameStatus::AwaitingMove(Player::One);
        self.last_ai_result = None;
        info!(
            player_one = %self.config.player_one,
            player_two = %self.config.player_two,
            "new game"
        );
    }

    pub fn state(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_finished()
    }

    /// Side to move, `None` once the game is over
    pub fn current_player(&self) -> Option<Player> {
        match self.status {
            GameStatus::AwaitingMove(player) => Some(player),
            GameStatus::Finished(_) => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rules(&self) -> &Rules {
        &self.config.rules
    }

    pub fn seat(&self, player: Player) -> &Seat {
        self.config.seat(player)
    }

    /// Outcome so far; `InProgress` while awaiting a move
    pub fn outcome(&self) -> GameOutcome {
        match self.status {
            GameStatus::AwaitingMove(_) => GameOutcome::InProgress,
            GameStatus::Finished(outcome) => outcome,
        }
    }

    pub fn winner_seat(&self) -> Option<&Seat> {
        self.outcome().winner().map(|player| self.seat(player))
    }

    pub fn move_count(&self) -> usize {
        self.board.stone_count()
    }

    /// Statistics of the last move played through [`Self::play_ai_turn`]
    pub fn last_ai_result(&self) -> Option<&MoveResult> {
        self.last_ai_result.as_ref()
    }

    /// Whether the side to move is a computer seat
    pub fn is_computer_turn(&self) -> bool {
        self.current_player()
            .is_some_and(|player| self.seat(player).kind.is_computer())
    }

    /// Play `(row, col)` for the side to move.
    ///
    /// Seats are not checked, so a front end that computes computer moves
    /// elsewhere can commit them here. On error the board is untouched.
    pub fn submit_move(&mut self, row: i32, col: i32) -> Result<GameOutcome> {
        let player = match self.status {
            GameStatus::AwaitingMove(player) => player,
            GameStatus::Finished(_) => return Err(GameError::GameAlreadyOver),
        };
        let pos = self.config.rules.validate_move(&self.board, row, col)?;
        self.commit(pos, player)
    }

    /// Let the computer seat on move choose and play.
    pub fn play_ai_turn(&mut self) -> Result<(Pos, GameOutcome)> {
        let player = match self.status {
            GameStatus::AwaitingMove(player) => player,
            GameStatus::Finished(_) => return Err(GameError::GameAlreadyOver),
        };
        let difficulty = match self.seat(player).kind {
            SeatKind::Computer(difficulty) => difficulty,
            SeatKind::Human => return Err(GameError::NotComputerTurn),
        };

        let rules = self.config.rules;
        let engine = self.engine.get_or_insert_with(|| AIEngine::new(rules));
        let result = engine.get_move_with_stats(&self.board, player, difficulty)?;
        let pos = result.best_move;
        let outcome = self.commit_ai_move(result)?;
        Ok((pos, outcome))
    }

    /// Lend the engine out, e.g. to a worker thread. Give it back with
    /// [`Self::restore_engine`] so a seeded random source keeps its sequence;
    /// if it never returns a fresh entropy-seeded engine takes its place.
    pub fn take_engine(&mut self) -> AIEngine {
        let rules = self.config.rules;
        self.engine.take().unwrap_or_else(|| AIEngine::new(rules))
    }

    pub fn restore_engine(&mut self, engine: AIEngine) {
        self.engine = Some(engine);
    }

    /// Play a move computed outside the controller for the side to move and
    /// keep its statistics. On error the board is untouched.
    pub fn commit_ai_move(&mut self, result: MoveResult) -> Result<GameOutcome> {
        let player = match self.status {
            GameStatus::AwaitingMove(player) => player,
            GameStatus::Finished(_) => return Err(GameError::GameAlreadyOver),
        };
        let outcome = self.commit(result.best_move, player)?;
        self.last_ai_result = Some(result);
        Ok(outcome)
    }

    fn commit(&mut self, pos: Pos, player: Player) -> Result<GameOutcome> {
        self.board.place_at(pos, player)?;
        let outcome = self.config.rules.evaluate_state(&self.board, Some(pos));
        self.status = match outcome {
            GameOutcome::InProgress => GameStatus::AwaitingMove(player.opponent()),
            finished => {
                let moves = self.move_count();
                match finished.winner() {
                    Some(winner) => info!(winner = %self.seat(winner), moves, "game over"),
                    None => info!(moves, "game drawn"),
                }
                GameStatus::Finished(finished)
            }
        };
        Ok(outcome)
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Fresh empty board, player one to move.
pub fn new_game() -> Board {
    Board::new()
}

/// Play `(row, col)` for `player` on a caller-owned board under the
/// default rules (five or more wins).
///
/// Checks in order: the game is not over, the cell is on the board and
/// empty, and it is `player`'s turn (player one moves first). The board is
/// only modified when every check passes.
pub fn submit_move(board: &mut Board, player: Player, row: i32, col: i32) -> Result<GameOutcome> {
    submit_move_with(&Rules::default(), board, player, row, col)
}

/// [`submit_move`] under an explicit rule set.
pub fn submit_move_with(
    rules: &Rules,
    board: &mut Board,
    player: Player,
    row: i32,
    col: i32,
) -> Result<GameOutcome> {
    if rules.outcome(board).is_terminal() {
        return Err(GameError::GameAlreadyOver);
    }
    let pos = rules.validate_move(board, row, col)?;
    if board.side_to_move() != player {
        warn!(%player, %pos, "move out of turn");
        return Err(GameError::NotYourTurn(player));
    }
    board.place_at(pos, player)?;
    Ok(rules.evaluate_state(board, Some(pos)))
}

/// Move the computer would play for `player` under the default rules. The
/// board is not modified.
///
/// Easy draws from a fresh entropy-seeded source; use [`AIEngine`] directly
/// for reproducible easy play.
pub fn compute_ai_move(board: &Board, player: Player, difficulty: Difficulty) -> Result<Pos> {
    compute_ai_move_with(&Rules::default(), board, player, difficulty)
}

/// [`compute_ai_move`] under an explicit rule set.
pub fn compute_ai_move_with(
    rules: &Rules,
    board: &Board,
    player: Player,
    difficulty: Difficulty,
) -> Result<Pos> {
    AIEngine::new(*rules).get_move(board, player, difficulty)
}

/// Current outcome of `board` under the default rules, judged from its last
/// move.
pub fn get_outcome(board: &Board) -> GameOutcome {
    get_outcome_with(&Rules::default(), board)
}

/// [`get_outcome`] under an explicit rule set.
pub fn get_outcome_with(rules: &Rules, board: &Board) -> GameOutcome {
    rules.outcome(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Overline;

    fn human_vs_human() -> GameController {
        GameController::new(GameConfig::two_humans())
    }

    #[test]
    fn test_initial_state() {
        let game = GameController::default();
        assert_eq!(game.state(), GameStatus::AwaitingMove(Player::One));
        assert_eq!(game.current_player(), Some(Player::One));
        assert_eq!(game.move_count(), 0);
        assert!(game.board().is_board_empty());
        assert!(game.winner_seat().is_none());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = human_vs_human();
        assert_eq!(game.submit_move(7, 7), Ok(GameOutcome::InProgress));
        assert_eq!(game.state(), GameStatus::AwaitingMove(Player::Two));
        assert_eq!(game.submit_move(7, 8), Ok(GameOutcome::InProgress));
        assert_eq!(game.current_player(), Some(Player::One));
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut game = human_vs_human();
        game.submit_move(7, 7).unwrap();
        let before = game.board().clone();
        assert_eq!(game.submit_move(7, 7), Err(GameError::CellOccupied(Pos::new(7, 7))));
        assert_eq!(
            game.submit_move(15, 0),
            Err(GameError::OutOfBounds { row: 15, col: 0 })
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), Some(Player::Two));
    }

    #[test]
    fn test_win_finishes_game() {
        let mut game = human_vs_human();
        for c in 3..7 {
            game.submit_move(7, c).unwrap();
            game.submit_move(0, c).unwrap();
        }
        assert_eq!(game.submit_move(7, 7), Ok(GameOutcome::Win(Player::One)));
        assert_eq!(game.state(), GameStatus::Finished(GameOutcome::Win(Player::One)));
        assert_eq!(game.winner_seat().map(|s| s.name.as_str()), Some("Player X"));
        assert_eq!(game.current_player(), None);
        assert_eq!(game.submit_move(10, 10), Err(GameError::GameAlreadyOver));
        assert_eq!(game.play_ai_turn(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn test_new_game_resets() {
        let mut game = human_vs_human();
        for c in 3..7 {
            game.submit_move(7, c).unwrap();
            game.submit_move(0, c).unwrap();
        }
        game.submit_move(7, 7).unwrap();
        game.new_game();
        assert_eq!(game.state(), GameStatus::AwaitingMove(Player::One));
        assert!(game.board().is_board_empty());
        assert_eq!(game.submit_move(7, 7), Ok(GameOutcome::InProgress));
    }

    #[test]
    fn test_ai_turn_requires_computer_seat() {
        let mut game = GameController::default();
        assert_eq!(game.play_ai_turn(), Err(GameError::NotComputerTurn));
        game.submit_move(7, 7).unwrap();
        assert!(game.is_computer_turn());

        let (pos, outcome) = game.play_ai_turn().unwrap();
        assert_eq!(outcome, GameOutcome::InProgress);
        assert_eq!(game.board().cell(pos), Player::Two.cell());
        assert_eq!(game.current_player(), Some(Player::One));
        assert!(game.last_ai_result().is_some());
    }

    #[test]
    fn test_free_submit_move() {
        let mut board = new_game();
        assert_eq!(submit_move(&mut board, Player::One, 7, 7), Ok(GameOutcome::InProgress));
        assert_eq!(
            submit_move(&mut board, Player::One, 7, 8),
            Err(GameError::NotYourTurn(Player::One))
        );
        assert_eq!(
            submit_move(&mut board, Player::Two, -1, 8),
            Err(GameError::OutOfBounds { row: -1, col: 8 })
        );
        assert_eq!(
            submit_move(&mut board, Player::Two, 7, 7),
            Err(GameError::CellOccupied(Pos::new(7, 7)))
        );
        assert_eq!(board.stone_count(), 1);
        assert_eq!(get_outcome(&board), GameOutcome::InProgress);
    }

    #[test]
    fn test_free_api_game_over() {
        let mut board = new_game();
        for c in 3..7 {
            submit_move(&mut board, Player::One, 7, c).unwrap();
            submit_move(&mut board, Player::Two, 0, c).unwrap();
        }
        assert_eq!(
            submit_move(&mut board, Player::One, 7, 7),
            Ok(GameOutcome::Win(Player::One))
        );
        assert_eq!(get_outcome(&board), GameOutcome::Win(Player::One));
        assert_eq!(
            submit_move(&mut board, Player::Two, 9, 9),
            Err(GameError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_compute_ai_move_leaves_board() {
        let mut board = new_game();
        submit_move(&mut board, Player::One, 7, 7).unwrap();
        let before = board.clone();
        let pos = compute_ai_move(&board, Player::Two, Difficulty::hard()).unwrap();
        assert!(board.is_empty(pos));
        assert_eq!(board, before);
    }

    #[test]
    fn test_lent_engine_result_commits() {
        let mut game = GameController::new(GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        });
        game.submit_move(7, 7).unwrap();

        let mut engine = game.take_engine();
        let result = engine
            .get_move_with_stats(game.board(), Player::Two, Difficulty::Medium)
            .unwrap();
        game.restore_engine(engine);
        let pos = result.best_move;

        let stale = result.clone();
        assert_eq!(game.commit_ai_move(result), Ok(GameOutcome::InProgress));
        assert_eq!(game.board().cell(pos), Player::Two.cell());
        assert_eq!(game.last_ai_result().map(|r| r.best_move), Some(pos));

        let before = game.board().clone();
        assert_eq!(game.commit_ai_move(stale), Err(GameError::CellOccupied(pos)));
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_player(), Some(Player::One));
    }

    #[test]
    fn test_ai_turn_without_engine_back() {
        let mut game = GameController::default();
        game.submit_move(7, 7).unwrap();
        let _lost = game.take_engine();
        let (pos, _) = game.play_ai_turn().unwrap();
        assert_eq!(game.board().cell(pos), Player::Two.cell());
    }

    #[test]
    fn test_free_api_with_exact_five() {
        let exact = Rules::new(Overline::Forbidden);
        let mut board = new_game();
        let moves = [
            (Player::One, 7, 2),
            (Player::Two, 0, 0),
            (Player::One, 7, 3),
            (Player::Two, 0, 2),
            (Player::One, 7, 4),
            (Player::Two, 0, 4),
            (Player::One, 7, 6),
            (Player::Two, 0, 6),
            (Player::One, 7, 7),
            (Player::Two, 0, 8),
        ];
        for (player, row, col) in moves {
            assert_eq!(
                submit_move_with(&exact, &mut board, player, row, col),
                Ok(GameOutcome::InProgress)
            );
        }
        // (7, 5) joins a run of six
        assert_eq!(
            submit_move_with(&exact, &mut board, Player::One, 7, 5),
            Ok(GameOutcome::InProgress)
        );
        assert_eq!(get_outcome_with(&exact, &board), GameOutcome::InProgress);
        assert_eq!(get_outcome(&board), GameOutcome::Win(Player::One));
        assert_eq!(
            submit_move_with(&exact, &mut board, Player::Two, 10, 10),
            Ok(GameOutcome::InProgress)
        );
    }

    #[test]
    fn test_compute_ai_move_with_exact_five() {
        let mut board = new_game();
        board.place(7, 1, Player::One).unwrap();
        for c in [2, 3, 4, 5, 7] {
            board.place(7, c, Player::Two).unwrap();
        }
        let exact = Rules::new(Overline::Forbidden);
        let pos = compute_ai_move_with(&exact, &board, Player::Two, Difficulty::Medium).unwrap();
        assert_ne!(pos, Pos::new(7, 6));
        assert_eq!(
            compute_ai_move(&board, Player::Two, Difficulty::Medium),
            Ok(Pos::new(7, 6))
        );
    }
}
