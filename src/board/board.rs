//! Board structure with move history

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::BoardError;

/// Game board: one bitboard per color plus the ordered move history.
///
/// The grid is always the replay of `history`: `place` appends, `undo` pops
/// and clears the popped cell. Search works on a clone so trial moves never
/// touch the live game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
    history: Vec<Pos>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            history: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    /// Build a board by replaying `(pos, stone)` moves in order.
    pub fn from_moves<I>(moves: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (Pos, Stone)>,
    {
        let mut board = Self::new();
        for (pos, stone) in moves {
            board.place(pos, stone)?;
        }
        Ok(board)
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at signed coordinates; `None` when off the board.
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        Pos::try_new(row, col).map(|pos| self.get(pos))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone and record it in the history.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        if !Pos::is_valid(pos.row as i32, pos.col as i32) {
            return Err(BoardError::OutOfBounds {
                row: pos.row as i32,
                col: pos.col as i32,
            });
        }
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied(pos));
        }
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => return Err(BoardError::EmptyStone),
        }
        self.history.push(pos);
        Ok(())
    }

    /// Take back the most recent move, returning its position.
    pub fn undo(&mut self) -> Option<Pos> {
        let pos = self.history.pop()?;
        self.black.clear(pos);
        self.white.clear(pos);
        Some(pos)
    }

    /// Remove every stone and forget the history.
    pub fn clear(&mut self) {
        self.black = Bitboard::new();
        self.white = Bitboard::new();
        self.history.clear();
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Moves in the order they were played.
    #[inline]
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    #[inline]
    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == TOTAL_CELLS
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Color whose turn it is, assuming Black opened and colors alternated.
    #[inline]
    pub fn side_to_move(&self) -> Stone {
        if self.history.len() % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{:>3}", row)?;
            for col in 0..BOARD_SIZE {
                let symbol = match self.get(Pos::new(row as u8, col as u8)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "{:>3}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
