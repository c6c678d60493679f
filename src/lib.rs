//! Gomoku AI engine for the standard 15x15 game
//!
//! A minimax Gomoku engine with free-style rules:
//! - 15x15 board, Black moves first
//! - 5 or more in a row wins (overlines count)
//! - A full board with no five is a draw
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and move history
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Pattern scoring of runs along the four directions
//! - [`search`]: Candidate generation and alpha-beta minimax
//! - [`engine`]: Move policy wrapping the search (opening, depth, fallback)
//! - [`coordinator`]: Runs searches on a worker thread, one at a time, cancellable
//! - [`player`] and [`game`]: Human and computer seats around a game session
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new();
//! let engine = AIEngine::with_difficulty(Difficulty::Easy);
//!
//! board.place(Pos::new(7, 7), Stone::Black).unwrap();
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&board, Stone::White) {
//!     board.place(pos, Stone::White).unwrap();
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Search Policy
//!
//! 1. Empty board: play the center (7, 7) without searching
//! 2. Alpha-beta search to the difficulty's depth (Easy 2, Medium 4, Hard 6)
//! 3. A move completing five ends the search at that node
//! 4. No move from the search: random candidate, or "no move available"

pub mod board;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod player;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Direction, Pos, Stone, BOARD_SIZE};
pub use config::{Difficulty, EngineConfig, GameMode, GameSettings};
pub use coordinator::{MoveCoordinator, MoveEvent, MoveSource};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{BoardError, EngineError, GameError};
pub use game::{GameOutcome, GameSession, GameState};
pub use player::{HumanPlayer, Player, PlayerKind};
pub use rules::WinInfo;
