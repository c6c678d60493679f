//! Game session: two seats, one board, and the rules between them
//!
//! Black always moves first. After every move the session checks for five
//! through the last stone, then for a full board. Computer seats answer
//! asynchronously; drive them with [`GameSession::poll`] from an event loop,
//! or with [`GameSession::wait_for_ai`] when blocking is fine.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::{Difficulty, GameMode, GameSettings};
use crate::coordinator::{MoveCoordinator, MoveEvent};
use crate::engine::AIEngine;
use crate::error::{EngineError, GameError};
use crate::player::{HumanPlayer, Player, PlayerKind};
use crate::rules::{check_win, is_draw, is_valid_move, WinInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ready,
    Playing,
    Paused,
    Finished,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(WinInfo),
    Draw,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Stone> {
        match self {
            GameOutcome::Win(info) => Some(info.winner),
            GameOutcome::Draw => None,
        }
    }
}

pub struct GameSession {
    board: Board,
    settings: GameSettings,
    state: GameState,
    /// Indexed by color: Black, then White
    players: [Box<dyn Player>; 2],
    outcome: Option<GameOutcome>,
    undo_count: u32,
    started_at: Option<Instant>,
    finished_after: Option<Duration>,
}

impl GameSession {
    pub fn new(settings: GameSettings) -> Self {
        let players = seat_players(&settings);
        Self {
            board: Board::new(),
            settings,
            state: GameState::Ready,
            players,
            outcome: None,
            undo_count: 0,
            started_at: None,
            finished_after: None,
        }
    }

    /// Clear the board, reseat the players for `mode` and ask Black to move.
    ///
    /// A game still in progress is ended first.
    pub fn start_new_game(&mut self, mode: GameMode) {
        if matches!(self.state, GameState::Playing | GameState::Paused) {
            self.end_game();
        }
        self.settings.mode = mode;
        self.players = seat_players(&self.settings);
        self.board.clear();
        self.outcome = None;
        self.undo_count = 0;
        self.started_at = Some(Instant::now());
        self.finished_after = None;
        self.state = GameState::Playing;
        info!(mode = ?mode, difficulty = ?self.settings.ai_difficulty, "game started");
        self.request_current_move();
    }

    /// Start over in the current mode.
    pub fn restart(&mut self) {
        self.start_new_game(self.settings.mode);
    }

    /// Returns `false` unless the game was playing.
    pub fn pause(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.current_seat_mut().cancel_move();
        self.state = GameState::Paused;
        info!(moves = self.board.history().len(), "game paused");
        true
    }

    /// Returns `false` unless the game was paused.
    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.state = GameState::Playing;
        info!("game resumed");
        self.request_current_move();
        true
    }

    /// Stop the game where it stands. Outstanding AI searches are cancelled.
    pub fn end_game(&mut self) {
        if !matches!(self.state, GameState::Playing | GameState::Paused) {
            return;
        }
        for seat in &mut self.players {
            seat.cancel_move();
        }
        self.finish();
        info!(moves = self.board.history().len(), "game ended");
    }

    /// Play `pos` for the human whose turn it is.
    pub fn play(&mut self, pos: Pos) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying);
        }
        if !is_valid_move(&self.board, pos) {
            return Err(GameError::InvalidMove(pos));
        }
        if !self.current_seat_mut().claim_turn() {
            return Err(GameError::NotHumanTurn);
        }
        self.apply_move(pos)
    }

    /// Apply the current computer seat's answer if it has one.
    ///
    /// Never blocks. Returns the event that was handled, if any.
    pub fn poll(&mut self) -> Result<Option<MoveEvent>, GameError> {
        let event = self.current_seat_mut().poll_move();
        self.handle_event(event)
    }

    /// Block until the current computer seat answers, then apply it.
    ///
    /// Notices left over from searches cancelled earlier are skipped while a
    /// newer search is still running. Returns `Ok(None)` when no search is
    /// outstanding.
    pub fn wait_for_ai(&mut self) -> Result<Option<MoveEvent>, GameError> {
        let mut event = self.current_seat_mut().wait_move();
        while event == Some(MoveEvent::Cancelled) && self.current_seat().is_thinking() {
            event = self.current_seat_mut().wait_move();
        }
        self.handle_event(event)
    }

    /// Take back the last move. Against the computer, moves are taken back
    /// until it is the human's turn again, at most two.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::NotPlaying);
        }
        if !self.board.has_history() {
            return Err(GameError::NothingToUndo);
        }

        self.current_seat_mut().cancel_move();
        let mut removed = 0;
        if self.board.undo().is_some() {
            removed += 1;
        }
        if self.settings.mode == GameMode::PvC
            && self.current_seat().kind() == PlayerKind::Computer
            && self.board.undo().is_some()
        {
            removed += 1;
        }

        self.undo_count += 1;
        info!(removed, moves = self.board.history().len(), "undo");
        self.request_current_move();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.state == GameState::Playing && self.board.has_history()
    }

    /// Takes effect from the computer's next search.
    pub fn set_ai_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.ai_difficulty = difficulty;
        for seat in &mut self.players {
            seat.set_difficulty(difficulty);
        }
        debug!(difficulty = ?difficulty, "AI difficulty changed");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    /// Color to move.
    #[inline]
    pub fn current_player(&self) -> Stone {
        self.board.side_to_move()
    }

    pub fn current_player_kind(&self) -> PlayerKind {
        self.current_seat().kind()
    }

    /// Check if the seat to move is searching
    pub fn is_ai_thinking(&self) -> bool {
        self.current_seat().is_thinking()
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Stone> {
        self.outcome.and_then(|o| o.winner())
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.board.history().len()
    }

    #[inline]
    pub fn undo_count(&self) -> u32 {
        self.undo_count
    }

    /// Time since the game started, frozen once it is finished.
    pub fn elapsed(&self) -> Duration {
        match (self.finished_after, self.started_at) {
            (Some(total), _) => total,
            (None, Some(start)) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    fn handle_event(&mut self, event: Option<MoveEvent>) -> Result<Option<MoveEvent>, GameError> {
        match event {
            Some(MoveEvent::Ready(pos)) if self.state == GameState::Playing => {
                if !is_valid_move(&self.board, pos) {
                    return Err(GameError::InvalidMove(pos));
                }
                self.apply_move(pos)?;
            }
            Some(MoveEvent::Unavailable(err)) if self.state == GameState::Playing => {
                warn!(player = %self.current_player(), error = %err, "computer has no move");
                // No legal cell left counts as a draw
                if err == EngineError::NoMoveAvailable {
                    self.outcome = Some(GameOutcome::Draw);
                }
                self.finish();
                info!(outcome = ?self.outcome, "game ended without a move");
            }
            _ => {}
        }
        Ok(event)
    }

    fn apply_move(&mut self, pos: Pos) -> Result<(), GameError> {
        let stone = self.current_player();
        self.board.place(pos, stone)?;
        info!(player = %stone, pos = %pos, moves = self.board.history().len(), "move played");

        if let Some(win) = check_win(&self.board, pos) {
            self.outcome = Some(GameOutcome::Win(win));
            self.finish();
            info!(winner = %win.winner, start = %win.start, end = %win.end, "game won");
        } else if is_draw(&self.board) {
            self.outcome = Some(GameOutcome::Draw);
            self.finish();
            info!("game drawn");
        } else {
            self.request_current_move();
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.state = GameState::Finished;
        self.finished_after = self.started_at.map(|start| start.elapsed());
    }

    fn request_current_move(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let idx = seat_index(self.current_player());
        self.players[idx].request_move(&self.board);
    }

    fn current_seat(&self) -> &dyn Player {
        self.players[seat_index(self.current_player())].as_ref()
    }

    fn current_seat_mut(&mut self) -> &mut dyn Player {
        let idx = seat_index(self.current_player());
        self.players[idx].as_mut()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

#[inline]
fn seat_index(stone: Stone) -> usize {
    match stone {
        Stone::White => 1,
        _ => 0,
    }
}

fn seat_players(settings: &GameSettings) -> [Box<dyn Player>; 2] {
    let seat = |stone: Stone| -> Box<dyn Player> {
        if settings.mode == GameMode::PvC && stone == settings.ai_stone {
            let engine = AIEngine::with_config(settings.engine_config());
            Box::new(MoveCoordinator::new(engine, stone))
        } else {
            Box::new(HumanPlayer::new(stone))
        }
    };
    [seat(Stone::Black), seat(Stone::White)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn pvp() -> GameSession {
        let mut session = GameSession::new(GameSettings {
            mode: GameMode::PvP,
            ..GameSettings::default()
        });
        session.start_new_game(GameMode::PvP);
        session
    }

    fn pvc_easy() -> GameSession {
        let mut session = GameSession::new(GameSettings {
            ai_difficulty: Difficulty::Easy,
            ..GameSettings::default()
        });
        session.start_new_game(GameMode::PvC);
        session
    }

    #[test]
    fn test_new_session_is_ready() {
        let session = GameSession::default();
        assert_eq!(session.state(), GameState::Ready);
        assert_eq!(session.mode(), GameMode::PvC);
        assert_eq!(session.current_player(), Stone::Black);
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_play_before_start_is_rejected() {
        let mut session = GameSession::default();
        assert_eq!(session.play(Pos::new(7, 7)), Err(GameError::NotPlaying));
    }

    #[test]
    fn test_pvp_alternates_and_rejects_occupied() {
        let mut session = pvp();
        session.play(Pos::new(7, 7)).unwrap();
        assert_eq!(session.current_player(), Stone::White);
        assert_eq!(session.play(Pos::new(7, 7)), Err(GameError::InvalidMove(Pos::new(7, 7))));
        session.play(Pos::new(8, 8)).unwrap();
        assert_eq!(session.board().get(Pos::new(8, 8)), Stone::White);
        assert_eq!(session.move_count(), 2);
    }

    #[test]
    fn test_pvp_five_wins() {
        let mut session = pvp();
        for c in 0..4 {
            session.play(Pos::new(0, c)).unwrap();
            session.play(Pos::new(1, c)).unwrap();
        }
        session.play(Pos::new(0, 4)).unwrap();
        assert_eq!(session.state(), GameState::Finished);
        assert_eq!(session.winner(), Some(Stone::Black));
        let Some(GameOutcome::Win(info)) = session.outcome() else {
            panic!("expected a win");
        };
        assert_eq!(info.length(), 5);
        assert_eq!(session.play(Pos::new(5, 5)), Err(GameError::NotPlaying));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_pvp_undo_takes_back_one_move() {
        let mut session = pvp();
        assert_eq!(session.undo(), Err(GameError::NothingToUndo));
        session.play(Pos::new(7, 7)).unwrap();
        session.play(Pos::new(8, 8)).unwrap();
        session.undo().unwrap();
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.current_player(), Stone::White);
        session.play(Pos::new(6, 6)).unwrap();
        assert_eq!(session.board().get(Pos::new(6, 6)), Stone::White);
        assert_eq!(session.undo_count(), 1);
    }

    #[test]
    fn test_pvc_human_then_computer() {
        let mut session = pvc_easy();
        assert_eq!(session.current_player_kind(), PlayerKind::Human);
        session.play(Pos::new(7, 7)).unwrap();
        assert_eq!(session.current_player_kind(), PlayerKind::Computer);
        assert_eq!(session.play(Pos::new(0, 0)), Err(GameError::NotHumanTurn));

        let event = session.wait_for_ai().unwrap();
        assert!(matches!(event, Some(MoveEvent::Ready(_))));
        assert_eq!(session.move_count(), 2);
        assert_eq!(session.current_player(), Stone::Black);
        assert!(!session.is_ai_thinking());
    }

    #[test]
    fn test_pvc_undo_returns_to_human_turn() {
        let mut session = pvc_easy();
        session.play(Pos::new(7, 7)).unwrap();
        session.wait_for_ai().unwrap();
        session.play(Pos::new(0, 0)).unwrap();
        session.wait_for_ai().unwrap();
        assert_eq!(session.move_count(), 4);

        session.undo().unwrap();
        assert_eq!(session.move_count(), 2);
        assert_eq!(session.current_player(), Stone::Black);
        assert_eq!(session.current_player_kind(), PlayerKind::Human);
        assert!(session.board().is_empty(Pos::new(0, 0)));
        session.play(Pos::new(0, 0)).unwrap();
    }

    #[test]
    fn test_pvc_undo_while_computer_thinks() {
        let mut session = pvc_easy();
        session.play(Pos::new(7, 7)).unwrap();
        session.undo().unwrap();
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.current_player_kind(), PlayerKind::Human);
        assert_eq!(session.wait_for_ai().unwrap(), None);
    }

    #[test]
    fn test_computer_opens_at_center_when_black() {
        let mut session = GameSession::new(GameSettings {
            ai_stone: Stone::Black,
            ai_difficulty: Difficulty::Easy,
            ..GameSettings::default()
        });
        session.start_new_game(GameMode::PvC);
        assert_eq!(
            session.wait_for_ai().unwrap(),
            Some(MoveEvent::Ready(Pos::CENTER))
        );
        assert_eq!(session.board().get(Pos::CENTER), Stone::Black);
        assert_eq!(session.current_player_kind(), PlayerKind::Human);
    }

    #[test]
    fn test_pause_cancels_and_resume_requests_again() {
        let mut session = pvc_easy();
        session.play(Pos::new(7, 7)).unwrap();
        assert!(session.pause());
        assert!(!session.pause());
        assert_eq!(session.state(), GameState::Paused);
        assert!(!session.is_ai_thinking());
        assert_eq!(session.play(Pos::new(0, 0)), Err(GameError::NotPlaying));
        assert_eq!(session.poll().unwrap(), Some(MoveEvent::Cancelled));
        assert_eq!(session.move_count(), 1);

        assert!(session.resume());
        assert!(matches!(session.wait_for_ai().unwrap(), Some(MoveEvent::Ready(_))));
        assert_eq!(session.move_count(), 2);
    }

    #[test]
    fn test_computer_timeout_ends_game() {
        let mut session = GameSession::new(GameSettings {
            ai_difficulty: Difficulty::Easy,
            engine: EngineConfig::default().with_time_limit(Duration::ZERO),
            ..GameSettings::default()
        });
        session.start_new_game(GameMode::PvC);
        session.play(Pos::new(7, 7)).unwrap();

        assert_eq!(
            session.wait_for_ai().unwrap(),
            Some(MoveEvent::Unavailable(EngineError::TimedOut))
        );
        assert_eq!(session.state(), GameState::Finished);
        assert_eq!(session.outcome(), None);
        assert_eq!(session.play(Pos::new(0, 0)), Err(GameError::NotPlaying));
        assert_eq!(session.wait_for_ai().unwrap(), None);

        session.restart();
        assert_eq!(session.state(), GameState::Playing);
    }

    #[test]
    fn test_computer_without_move_is_a_draw() {
        let mut session = pvc_easy();
        session.play(Pos::new(7, 7)).unwrap();
        let event = Some(MoveEvent::Unavailable(EngineError::NoMoveAvailable));
        assert_eq!(session.handle_event(event).unwrap(), event);
        assert_eq!(session.state(), GameState::Finished);
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
        assert_eq!(session.winner(), None);
    }

    #[test]
    fn test_wait_skips_notice_of_cancelled_search() {
        let mut session = pvc_easy();
        session.play(Pos::new(7, 7)).unwrap();
        assert!(session.pause());
        assert!(session.resume());
        // The pause notice is still queued ahead of the new search
        assert!(matches!(session.wait_for_ai().unwrap(), Some(MoveEvent::Ready(_))));
        assert_eq!(session.move_count(), 2);
    }

    #[test]
    fn test_end_game_and_restart() {
        let mut session = pvp();
        session.play(Pos::new(7, 7)).unwrap();
        session.end_game();
        assert_eq!(session.state(), GameState::Finished);
        assert_eq!(session.outcome(), None);
        let frozen = session.elapsed();
        assert_eq!(session.elapsed(), frozen);

        session.restart();
        assert_eq!(session.state(), GameState::Playing);
        assert_eq!(session.mode(), GameMode::PvP);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_set_ai_difficulty_updates_settings() {
        let mut session = pvc_easy();
        session.set_ai_difficulty(Difficulty::Hard);
        assert_eq!(session.settings().ai_difficulty, Difficulty::Hard);
        assert_eq!(session.settings().engine_config().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_full_board_is_a_draw() {
        let mut session = pvp();
        // Columns paired as XXOOXXOO.. shifted every row: no run reaches five
        let cells: Vec<Pos> = (0..crate::board::TOTAL_CELLS).map(Pos::from_index).collect();
        let (black, white): (Vec<Pos>, Vec<Pos>) = cells
            .into_iter()
            .partition(|p| (p.col / 2 + p.row) % 2 == 0);
        // Black has one more stone than White on this pattern
        assert_eq!(black.len(), white.len() + 1);
        for i in 0..white.len() {
            session.play(black[i]).unwrap();
            session.play(white[i]).unwrap();
        }
        session.play(black[white.len()]).unwrap();
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
        assert_eq!(session.winner(), None);
    }
}
