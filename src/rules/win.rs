//! Win and draw detection
//!
//! A move wins when the run of its color through it reaches five or more
//! stones along one of the four directions (overlines count). The board is
//! drawn when every cell is occupied.

use crate::board::{Board, Direction, Pos, Stone};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Details of a detected five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinInfo {
    pub direction: Direction,
    /// First stone of the run, walking against `direction`
    pub start: Pos,
    /// Last stone of the run, walking along `direction`
    pub end: Pos,
    pub winner: Stone,
}

impl WinInfo {
    /// Number of stones in the winning run.
    pub fn length(&self) -> usize {
        let rows = (self.end.row as i32 - self.start.row as i32).abs();
        let cols = (self.end.col as i32 - self.start.col as i32).abs();
        rows.max(cols) as usize + 1
    }
}

/// A legal move is an empty cell on the board.
#[inline]
pub fn is_valid_move(board: &Board, pos: Pos) -> bool {
    Pos::is_valid(pos.row as i32, pos.col as i32) && board.is_empty(pos)
}

/// Length of the `stone` run through `pos` along `direction`, both ways,
/// counting `pos` once. Zero when `pos` does not hold `stone`.
pub fn count_consecutive(board: &Board, pos: Pos, direction: Direction, stone: Stone) -> usize {
    if stone == Stone::Empty || board.get(pos) != stone {
        return 0;
    }
    let (start, end) = run_bounds(board, pos, direction, stone);
    let rows = (end.row as i32 - start.row as i32).abs();
    let cols = (end.col as i32 - start.col as i32).abs();
    rows.max(cols) as usize + 1
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks 4 directions from the given position. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos) -> bool {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return false;
    }
    Direction::ALL
        .iter()
        .any(|&dir| count_consecutive(board, pos, dir, stone) >= WIN_LENGTH)
}

/// Check whether the stone at `pos` completes a five.
///
/// Returns the winning run when it does. Empty cells never win.
pub fn check_win(board: &Board, pos: Pos) -> Option<WinInfo> {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return None;
    }

    for direction in Direction::ALL {
        let (start, end) = run_bounds(board, pos, direction, stone);
        let info = WinInfo {
            direction,
            start,
            end,
            winner: stone,
        };
        if info.length() >= WIN_LENGTH {
            return Some(info);
        }
    }
    None
}

/// Every stone of the winning run through `pos`, from start to end.
pub fn winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let info = check_win(board, pos)?;
    let (dr, dc) = info.direction.delta();
    let line = (0..info.length() as i32)
        .filter_map(|step| info.start.offset(dr, dc, step))
        .collect();
    Some(line)
}

/// Board is drawn once no empty cell remains.
#[inline]
pub fn is_draw(board: &Board) -> bool {
    board.is_full()
}

/// Walk back to the first and forward to the last `stone` of the run.
fn run_bounds(board: &Board, pos: Pos, direction: Direction, stone: Stone) -> (Pos, Pos) {
    let (dr, dc) = direction.delta();
    let mut start = pos;
    while let Some(prev) = start.offset(dr, dc, -1) {
        if board.get(prev) != stone {
            break;
        }
        start = prev;
    }
    let mut end = pos;
    while let Some(next) = end.offset(dr, dc, 1) {
        if board.get(next) != stone {
            break;
        }
        end = next;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_CELLS;

    fn place_all(board: &mut Board, stones: &[(u8, u8)], stone: Stone) {
        for &(r, c) in stones {
            board.place(Pos::new(r, c), stone).unwrap();
        }
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        place_all(&mut board, &[(9, 0), (9, 1), (9, 2), (9, 3), (9, 4)], Stone::Black);

        let info = check_win(&board, Pos::new(9, 2)).unwrap();
        assert_eq!(info.direction, Direction::Horizontal);
        assert_eq!(info.start, Pos::new(9, 0));
        assert_eq!(info.end, Pos::new(9, 4));
        assert_eq!(info.winner, Stone::Black);
        assert!(has_five_at_pos(&board, Pos::new(9, 4)));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let mut board = Board::new();
        place_all(&mut board, &[(3, 5), (4, 5), (5, 5), (6, 5), (7, 5)], Stone::White);

        let info = check_win(&board, Pos::new(7, 5)).unwrap();
        assert_eq!(info.direction, Direction::Vertical);
        assert_eq!((info.start, info.end), (Pos::new(3, 5), Pos::new(7, 5)));
        assert_eq!(info.winner, Stone::White);
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let mut board = Board::new();
        place_all(&mut board, &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)], Stone::Black);

        let info = check_win(&board, Pos::new(0, 0)).unwrap();
        assert_eq!(info.direction, Direction::Diagonal);
        assert_eq!(info.end, Pos::new(4, 4));
    }

    #[test]
    fn test_five_in_row_anti_diagonal() {
        let mut board = Board::new();
        // From (4, 8) down-left to (8, 4)
        place_all(&mut board, &[(4, 8), (5, 7), (6, 6), (7, 5), (8, 4)], Stone::White);

        let info = check_win(&board, Pos::new(6, 6)).unwrap();
        assert_eq!(info.direction, Direction::AntiDiagonal);
        assert_eq!(info.start, Pos::new(8, 4));
        assert_eq!(info.end, Pos::new(4, 8));
        assert_eq!(info.length(), 5);
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let mut board = Board::new();
        place_all(
            &mut board,
            &[(2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7)],
            Stone::Black,
        );
        let info = check_win(&board, Pos::new(2, 7)).unwrap();
        assert_eq!(info.length(), 6);
        let line = winning_line(&board, Pos::new(2, 7)).unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line[0], Pos::new(2, 2));
        assert_eq!(line[5], Pos::new(2, 7));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)], Stone::Black);
        assert!(check_win(&board, Pos::new(7, 6)).is_none());
        assert!(!has_five_at_pos(&board, Pos::new(7, 6)));
        assert_eq!(
            count_consecutive(&board, Pos::new(7, 4), Direction::Horizontal, Stone::Black),
            4
        );
    }

    #[test]
    fn test_opponent_stone_breaks_run() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 3), (7, 4), (7, 6), (7, 7)], Stone::Black);
        board.place(Pos::new(7, 5), Stone::White).unwrap();
        assert!(check_win(&board, Pos::new(7, 7)).is_none());
        assert_eq!(
            count_consecutive(&board, Pos::new(7, 7), Direction::Horizontal, Stone::Black),
            2
        );
    }

    #[test]
    fn test_five_at_board_edge() {
        let mut board = Board::new();
        place_all(&mut board, &[(14, 10), (14, 11), (14, 12), (14, 13), (14, 14)], Stone::White);
        let info = check_win(&board, Pos::new(14, 14)).unwrap();
        assert_eq!(info.end, Pos::new(14, 14));
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new();
        assert!(check_win(&board, Pos::CENTER).is_none());
        assert!(winning_line(&board, Pos::CENTER).is_none());
        assert_eq!(
            count_consecutive(&board, Pos::CENTER, Direction::Vertical, Stone::Empty),
            0
        );
    }

    #[test]
    fn test_valid_move() {
        let mut board = Board::new();
        assert!(is_valid_move(&board, Pos::CENTER));
        board.place(Pos::CENTER, Stone::Black).unwrap();
        assert!(!is_valid_move(&board, Pos::CENTER));
    }

    #[test]
    fn test_draw_on_full_board_without_five() {
        // Rows alternate two patterns so no color ever gets five in any line.
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            let stone = if (pos.col / 2 + pos.row) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place(pos, stone).unwrap();
        }
        assert!(is_draw(&board));
        let last = board.last_move().unwrap();
        assert!(check_win(&board, last).is_none());
        assert!(!is_draw(&Board::new()));
    }
}
