//! Heuristic evaluation function for Gomoku board positions
//!
//! Every occupied cell contributes the pattern scores of the four lines
//! through it: positive for the perspective color, negative for the other.
//! A run of `n` stones is therefore counted once per stone, which weights
//! long runs more heavily still. No double-threat detection is done here;
//! combinations are left for the search to discover.

use crate::board::{Board, Direction, Pos, Stone};

use super::patterns::line_score;

/// A run of same-color stones through one cell along one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    /// Stones in the run, including the scanned cell
    pub count: usize,
    /// Ends that stop on an empty cell (0-2)
    pub open_ends: u8,
}

impl LineRun {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open_ends > 0
    }
}

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where positive values favor `perspective`. Swapping the
/// perspective negates the result.
#[must_use]
pub fn evaluate_board(board: &Board, perspective: Stone) -> i32 {
    let mut score = 0;
    for stone in [Stone::Black, Stone::White] {
        let Some(stones) = board.stones(stone) else {
            continue;
        };
        let sign = if stone == perspective { 1 } else { -1 };
        for pos in stones.iter_ones() {
            score += sign * evaluate_position(board, pos, stone);
        }
    }
    score
}

/// Sum of the four directional line scores for `stone` at `pos`.
///
/// The cell itself is treated as holding `stone` whatever it contains, so
/// this also rates an empty cell as a prospective move.
#[must_use]
pub fn evaluate_position(board: &Board, pos: Pos, stone: Stone) -> i32 {
    Direction::ALL
        .iter()
        .map(|&dir| evaluate_line(board, pos, dir, stone))
        .sum()
}

/// Score the run of `stone` through `pos` along `direction`.
#[inline]
#[must_use]
pub fn evaluate_line(board: &Board, pos: Pos, direction: Direction, stone: Stone) -> i32 {
    let run = scan_run(board, pos, direction, stone);
    line_score(run.count, run.is_open())
}

/// Count consecutive `stone` cells through `pos`, scanning forward and
/// backward independently until the first non-matching cell.
pub fn scan_run(board: &Board, pos: Pos, direction: Direction, stone: Stone) -> LineRun {
    let (dr, dc) = direction.delta();
    let mut run = LineRun {
        count: 1,
        open_ends: 0,
    };

    for sign in [1, -1] {
        let mut step = 1;
        while let Some(next) = pos.offset(dr * sign, dc * sign, step) {
            let cell = board.get(next);
            if cell == stone {
                run.count += 1;
                step += 1;
                continue;
            }
            if cell == Stone::Empty {
                run.open_ends += 1;
            }
            break;
        }
    }
    run
}
