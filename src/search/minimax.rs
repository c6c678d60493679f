//! Fixed-depth minimax with alpha-beta pruning
//!
//! The maximizing side is always the engine's own color and the minimizing
//! side its opponent; the mover alternates strictly with depth. Leaves are
//! scored with [`evaluate_board`] from the engine's perspective.
//!
//! Every trial move is placed on the searcher's private board and taken
//! back with `undo` before the next sibling is tried, so the board handed to
//! [`Searcher::search`] is never touched.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::config::EngineConfig;
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! let config = EngineConfig::default();
//! let mut searcher = Searcher::new(Stone::White, &config);
//! let result = searcher.search(&board, 2).unwrap();
//! assert!(result.best_move.is_some());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::{evaluate_board, PatternScore};
use crate::rules::has_five_at_pos;

use super::candidates::generate_candidates;

/// Terminal score of a decided game
pub const WIN_SCORE: i32 = PatternScore::WIN;

/// A move and the score the search gave it. `position` is `None` when the
/// node had nothing to play (leaf, full board, no candidates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveScore {
    pub position: Option<Pos>,
    pub score: i32,
}

impl MoveScore {
    #[inline]
    fn leaf(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, leaves included
    pub nodes: u64,
    /// Calls to the static evaluator
    pub evaluations: u64,
    /// Alpha-beta cutoffs
    pub cutoffs: u64,
    /// Nodes closed early by a winning move
    pub wins_found: u64,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best root move; `None` when the root had no candidate
    pub best_move: Option<Pos>,
    /// Score of the best move from the engine's perspective
    pub score: i32,
    pub depth: u8,
    pub stats: SearchStats,
}

/// Single search invocation over a private copy of the board.
pub struct Searcher<'a> {
    engine: Stone,
    max_candidates: usize,
    radius: i32,
    stop: Option<&'a AtomicBool>,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Searcher playing `engine`, using the candidate limits from `config`.
    ///
    /// The time limit in `config` is not applied here; see [`Searcher::with_deadline`].
    #[must_use]
    pub fn new(engine: Stone, config: &EngineConfig) -> Self {
        Self {
            engine,
            max_candidates: config.max_candidates,
            radius: config.neighbor_radius,
            stop: None,
            deadline: None,
            stats: SearchStats::default(),
        }
    }

    /// Unwind with `EngineError::Cancelled` once `stop` is raised.
    #[must_use]
    pub fn with_stop(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Unwind with `EngineError::TimedOut` after `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search `depth` plies from `board` with the engine to move.
    pub fn search(&mut self, board: &Board, depth: u8) -> Result<SearchResult, EngineError> {
        let mut work_board = board.clone();
        let best = self.minimax(&mut work_board, depth, true, i32::MIN, i32::MAX)?;
        debug_assert_eq!(&work_board, board, "search must restore its working board");

        Ok(SearchResult {
            best_move: best.position,
            score: best.score,
            depth,
            stats: self.stats.clone(),
        })
    }

    /// Minimax with alpha-beta over ranked candidates.
    ///
    /// A move that completes five returns at once with `±WIN_SCORE`; no
    /// sibling can do better for the side that played it.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<MoveScore, EngineError> {
        self.check_interrupt()?;
        self.stats.nodes += 1;

        if depth == 0 || board.is_full() {
            return Ok(self.leaf(board));
        }

        let candidates = generate_candidates(board, self.engine, self.max_candidates, self.radius);
        if candidates.is_empty() {
            return Ok(self.leaf(board));
        }

        let mover = if maximizing {
            self.engine
        } else {
            self.engine.opponent()
        };
        let mut best = MoveScore {
            position: None,
            score: if maximizing { i32::MIN } else { i32::MAX },
        };

        for mov in candidates {
            board.place(mov, mover)?;

            if has_five_at_pos(board, mov) {
                board.undo();
                self.stats.wins_found += 1;
                let score = if maximizing { WIN_SCORE } else { -WIN_SCORE };
                return Ok(MoveScore {
                    position: Some(mov),
                    score,
                });
            }

            let child = self.minimax(board, depth - 1, !maximizing, alpha, beta);
            board.undo();
            let child = child?;

            if maximizing {
                if child.score > best.score {
                    best = MoveScore {
                        position: Some(mov),
                        score: child.score,
                    };
                }
                alpha = alpha.max(child.score);
            } else {
                if child.score < best.score {
                    best = MoveScore {
                        position: Some(mov),
                        score: child.score,
                    };
                }
                beta = beta.min(child.score);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }

    #[inline]
    fn leaf(&mut self, board: &Board) -> MoveScore {
        self.stats.evaluations += 1;
        MoveScore::leaf(evaluate_board(board, self.engine))
    }

    /// Cooperative stop: polled once per node.
    #[inline]
    fn check_interrupt(&self) -> Result<(), EngineError> {
        if self.stop.is_some_and(|stop| stop.load(Ordering::Relaxed)) {
            return Err(EngineError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(EngineError::TimedOut);
        }
        Ok(())
    }
}
