//! Main AI Engine
//!
//! Wraps the minimax searcher with the engine's move policy:
//!
//! 1. **Opening**: on a board with no history, play the exact center
//! 2. **Minimax**: alpha-beta search to the difficulty's depth
//! 3. **Fallback**: if the search returns no move, pick a random root candidate
//!
//! The engine is a pure function of its inputs (board, color, config). It
//! keeps no state between calls and never mutates the caller's board.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let engine = AIEngine::with_difficulty(Difficulty::Easy);
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let result = engine.select_move(&board, Stone::White).unwrap();
//! println!("Best move: {}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use tracing::{debug, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::{Difficulty, EngineConfig};
use crate::error::EngineError;
use crate::rules::has_five_at_pos;
use crate::search::{generate_candidates, SearchResult, Searcher, WIN_SCORE};

/// How the move in a [`MoveResult`] was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// First move of the game, played at the center without searching
    Opening,
    /// The chosen move completes five
    ImmediateWin,
    /// Regular minimax result
    Minimax,
    /// Search produced no move; picked at random among root candidates
    RandomFallback,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Score from the engine's perspective
    pub score: i32,
    pub search_type: SearchType,
    /// Depth searched, 0 for the opening move
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn opening() -> Self {
        Self {
            best_move: Pos::CENTER,
            score: 0,
            search_type: SearchType::Opening,
            depth: 0,
            nodes: 0,
            time_ms: 0,
        }
    }
}

/// Main AI Engine for Gomoku.
#[derive(Debug, Clone, Default)]
pub struct AIEngine {
    config: EngineConfig,
}

impl AIEngine {
    /// Engine with default settings (medium difficulty, 20 candidates).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::with_config(EngineConfig::default().with_difficulty(difficulty))
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
    }

    /// Search depth implied by the difficulty.
    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.config.difficulty.search_depth()
    }

    /// Best move for `color`, or `None` if the engine has nothing to offer.
    #[must_use]
    pub fn get_move(&self, board: &Board, color: Stone) -> Option<Pos> {
        self.select_move(board, color).ok().map(|r| r.best_move)
    }

    /// Choose a move for `color` at the configured difficulty.
    pub fn select_move(&self, board: &Board, color: Stone) -> Result<MoveResult, EngineError> {
        self.search_at_depth(board, color, self.max_depth(), None)
    }

    /// Like [`AIEngine::select_move`], but gives up with
    /// `EngineError::Cancelled` once `stop` is raised.
    pub fn select_move_with_stop(
        &self,
        board: &Board,
        color: Stone,
        stop: &AtomicBool,
    ) -> Result<MoveResult, EngineError> {
        self.search_at_depth(board, color, self.max_depth(), Some(stop))
    }

    /// Choose a move for `color` searching exactly `depth` plies.
    pub fn search_at_depth(
        &self,
        board: &Board,
        color: Stone,
        depth: u8,
        stop: Option<&AtomicBool>,
    ) -> Result<MoveResult, EngineError> {
        if !board.has_history() {
            debug!(color = %color, "empty board, opening at center");
            return Ok(MoveResult::opening());
        }

        let start = Instant::now();
        let mut searcher = Searcher::new(color, &self.config);
        if let Some(stop) = stop {
            searcher = searcher.with_stop(stop);
        }
        if let Some(limit) = self.config.time_limit {
            searcher = searcher.with_deadline(start + limit);
        }

        let result = searcher.search(board, depth)?;
        let time_ms = start.elapsed().as_millis() as u64;

        let outcome = match result.best_move {
            Some(pos) => Ok(MoveResult {
                best_move: pos,
                score: result.score,
                search_type: classify(board, color, pos, &result),
                depth,
                nodes: result.stats.nodes,
                time_ms,
            }),
            None => self.random_fallback(board, color, &result, time_ms),
        };

        if let Ok(chosen) = &outcome {
            debug!(
                color = %color,
                depth,
                nodes = chosen.nodes,
                cutoffs = result.stats.cutoffs,
                score = chosen.score,
                time_ms,
                best = %chosen.best_move,
                search_type = ?chosen.search_type,
                "search finished"
            );
        }
        outcome
    }

    fn random_fallback(
        &self,
        board: &Board,
        color: Stone,
        result: &SearchResult,
        time_ms: u64,
    ) -> Result<MoveResult, EngineError> {
        let candidates = generate_candidates(
            board,
            color,
            self.config.max_candidates,
            self.config.neighbor_radius,
        );
        if candidates.is_empty() {
            warn!(color = %color, "no legal move available");
            return Err(EngineError::NoMoveAvailable);
        }
        let pick = candidates[fastrand::usize(..candidates.len())];
        debug!(color = %color, pick = %pick, "search returned no move, picking a random candidate");
        Ok(MoveResult {
            best_move: pick,
            score: result.score,
            search_type: SearchType::RandomFallback,
            depth: result.depth,
            nodes: result.stats.nodes,
            time_ms,
        })
    }
}

fn classify(board: &Board, color: Stone, pos: Pos, result: &SearchResult) -> SearchType {
    if result.score < WIN_SCORE {
        return SearchType::Minimax;
    }
    let mut probe = board.clone();
    match probe.place(pos, color) {
        Ok(()) if has_five_at_pos(&probe, pos) => SearchType::ImmediateWin,
        _ => SearchType::Minimax,
    }
}
