//! Evaluation module for Gomoku positions
//!
//! Pattern recognition and scoring: runs of one to five stones, scored by
//! length and by whether their ends are open.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_board, evaluate_line, evaluate_position, scan_run, LineRun};
pub use patterns::{line_score, PatternScore};
