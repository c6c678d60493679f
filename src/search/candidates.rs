//! Candidate move generation
//!
//! Only empty cells close to stones already played are worth searching.
//! Candidates are ranked by their heuristic value and truncated, which keeps
//! the branching factor bounded and puts the strongest moves first so
//! alpha-beta cuts early.

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};
use crate::eval::evaluate_position;

/// Rows and columns of the 3x3 block used when nothing has been played.
const CENTER_BLOCK: std::ops::RangeInclusive<u8> = 6..=8;

/// Empty cells within Chebyshev distance `radius` of any played move,
/// deduplicated, in discovery order (history order, then row-major offset).
pub fn neighbor_cells(board: &Board, radius: i32) -> Vec<Pos> {
    let mut seen = [false; TOTAL_CELLS];
    let mut cells = Vec::with_capacity(64);

    for &played in board.history() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let Some(pos) = played.offset(dr, dc, 1) else {
                    continue;
                };
                let idx = pos.to_index();
                if seen[idx] {
                    continue;
                }
                seen[idx] = true;
                if board.is_empty(pos) {
                    cells.push(pos);
                }
            }
        }
    }
    cells
}

/// Empty cells of the central 3x3 block.
pub fn center_cells(board: &Board) -> Vec<Pos> {
    CENTER_BLOCK
        .flat_map(|row| CENTER_BLOCK.map(move |col| Pos::new(row, col)))
        .filter(|&pos| board.is_empty(pos))
        .collect()
}

/// Ranking key of an empty cell.
///
/// What the cell is worth to `perspective` plus what it would be worth to
/// the opponent. The second term keeps forced blocks (the opponent's
/// winning cell) at the top of the list so truncation never drops them.
#[inline]
pub fn candidate_priority(board: &Board, pos: Pos, perspective: Stone) -> i32 {
    evaluate_position(board, pos, perspective) + evaluate_position(board, pos, perspective.opponent())
}

/// Ranked candidate moves, best first, at most `limit` of them.
///
/// Falls back to the center block when nothing has been played near any
/// stone. Empty only when the board has no empty cell in either set.
pub fn generate_candidates(board: &Board, perspective: Stone, limit: usize, radius: i32) -> Vec<Pos> {
    let mut cells = neighbor_cells(board, radius);
    if cells.is_empty() {
        cells = center_cells(board);
    }

    let mut scored: Vec<(Pos, i32)> = cells
        .into_iter()
        .map(|pos| (pos, candidate_priority(board, pos, perspective)))
        .collect();
    // Stable sort: ties keep discovery order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);
    scored.into_iter().map(|(pos, _)| pos).collect()
}
