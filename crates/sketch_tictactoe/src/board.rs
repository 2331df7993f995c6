//! Board storage for drawn tic-tac-toe.

use crate::error::BoardError;
use crate::types::{BOARD_SIDE, CELL_COUNT, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// 3x3 board of cell classifications.
///
/// Cells are addressed in row-major order (0-8). A classified cell is never
/// overwritten; the only way to clear it is [`BoardState::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    cells: [Option<Symbol>; CELL_COUNT],
}

impl BoardState {
    /// Creates an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the classification of a cell, or `None` if it is unset or
    /// the index is off the board.
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.cells.get(index).copied().flatten()
    }

    /// Writes a classification into an unset cell.
    ///
    /// # Errors
    ///
    /// - [`BoardError::OutOfRange`] if `index` is not in `0..9`.
    /// - [`BoardError::AlreadyClassified`] if the cell already holds a symbol.
    ///
    /// The board is unchanged when an error is returned.
    #[instrument(skip(self))]
    pub fn set_classification(&mut self, index: usize, symbol: Symbol) -> Result<(), BoardError> {
        let cell = self.cells.get_mut(index).ok_or_else(|| {
            warn!("Write to cell outside the board");
            BoardError::OutOfRange { index }
        })?;

        if let Some(existing) = *cell {
            warn!(%existing, "Cell already classified");
            return Err(BoardError::AlreadyClassified {
                index,
                symbol: existing,
            });
        }

        *cell = Some(symbol);
        debug!("Cell classified");
        Ok(())
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    /// Checks if a cell holds a classification.
    pub fn is_classified(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Checks if every cell holds a classification.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of classified cells.
    pub fn classified_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Option<Symbol>; CELL_COUNT] {
        &self.cells
    }

    /// Indices of unset cells.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| !self.is_classified(i)).collect()
    }

    /// Converts a cell index to `(row, col)`.
    pub fn coordinates(index: usize) -> Option<(usize, usize)> {
        (index < CELL_COUNT).then(|| (index / BOARD_SIDE, index % BOARD_SIDE))
    }

    /// Converts `(row, col)` to a cell index.
    pub fn index_of(row: usize, col: usize) -> Option<usize> {
        (row < BOARD_SIDE && col < BOARD_SIDE).then(|| row * BOARD_SIDE + col)
    }
}

impl std::fmt::Display for BoardState {
    /// Renders unset cells as their 1-based number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIDE {
            for col in 0..BOARD_SIDE {
                let index = row * BOARD_SIDE + col;
                match self.cells[index] {
                    Some(symbol) => write!(f, "{}", symbol.glyph())?,
                    None => write!(f, "{}", index + 1)?,
                }
                if col < BOARD_SIDE - 1 {
                    write!(f, "|")?;
                }
            }
            if row < BOARD_SIDE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = BoardState::new();
        assert_eq!(board.classified_count(), 0);
        assert!((0..CELL_COUNT).all(|i| board.get(i).is_none()));
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_set_mutates_only_target_cell() {
        let mut board = BoardState::new();
        board.set_classification(4, Symbol::B).unwrap();
        assert_eq!(board.get(4), Some(Symbol::B));
        for i in (0..CELL_COUNT).filter(|&i| i != 4) {
            assert_eq!(board.get(i), None);
        }
    }

    #[test]
    fn test_double_write_fails_and_keeps_board() {
        let mut board = BoardState::new();
        board.set_classification(0, Symbol::A).unwrap();
        let before = board.clone();

        let err = board.set_classification(0, Symbol::B).unwrap_err();
        assert_eq!(
            err,
            BoardError::AlreadyClassified {
                index: 0,
                symbol: Symbol::A
            }
        );
        assert_eq!(board, before);

        // Same symbol is still a double write.
        assert!(board.set_classification(0, Symbol::A).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_out_of_range() {
        let mut board = BoardState::new();
        assert_eq!(
            board.set_classification(9, Symbol::A),
            Err(BoardError::OutOfRange { index: 9 })
        );
        assert_eq!(board.get(9), None);
        assert_eq!(board, BoardState::new());
    }

    #[test]
    fn test_reset_clears_all_cells() {
        let mut board = BoardState::new();
        for i in 0..CELL_COUNT {
            board.set_classification(i, Symbol::A).unwrap();
        }
        assert!(board.is_full());
        board.reset();
        assert_eq!(board, BoardState::new());
        assert!(board.set_classification(0, Symbol::B).is_ok());
    }

    #[test]
    fn test_coordinate_conversions() {
        assert_eq!(BoardState::coordinates(0), Some((0, 0)));
        assert_eq!(BoardState::coordinates(5), Some((1, 2)));
        assert_eq!(BoardState::coordinates(9), None);
        assert_eq!(BoardState::index_of(2, 1), Some(7));
        assert_eq!(BoardState::index_of(3, 0), None);
        for i in 0..CELL_COUNT {
            let (row, col) = BoardState::coordinates(i).unwrap();
            assert_eq!(BoardState::index_of(row, col), Some(i));
        }
    }

    #[test]
    fn test_display() {
        let mut board = BoardState::new();
        board.set_classification(0, Symbol::A).unwrap();
        board.set_classification(4, Symbol::B).unwrap();
        assert_eq!(board.to_string(), "O|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|9");
    }
}
