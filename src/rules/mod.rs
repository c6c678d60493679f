//! Game rules for standard Gomoku
//!
//! Free-style rules: five or more in a row wins, a full board is a draw.
//! Everything here is a read-only query on a `Board`.

pub mod win;

// Re-exports for convenient access
pub use win::{
    check_win, count_consecutive, has_five_at_pos, is_draw, is_valid_move, winning_line, WinInfo,
    WIN_LENGTH,
};
