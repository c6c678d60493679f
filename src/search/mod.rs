//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate move generation around played stones
//! - Fixed-depth minimax with alpha-beta pruning

pub mod candidates;
pub mod minimax;

pub use candidates::{candidate_priority, center_cells, generate_candidates, neighbor_cells};
pub use minimax::{MoveScore, SearchResult, SearchStats, Searcher, WIN_SCORE};
