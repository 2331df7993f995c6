//! Core domain types for drawn tic-tac-toe.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// Number of cells along one side of the board.
pub const BOARD_SIDE: usize = 3;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// Three cell indices forming a row, column or diagonal.
pub type Line = [usize; 3];

/// Symbol recognised from a drawing.
///
/// `A` corresponds to the classifier's first output and `B` to its second.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Symbol {
    /// First symbol, drawn as an "O".
    A,
    /// Second symbol, drawn as an "X".
    B,
}

impl Symbol {
    /// Returns the glyph players draw for this symbol.
    pub fn glyph(self) -> char {
        match self {
            Symbol::A => 'O',
            Symbol::B => 'X',
        }
    }

    /// Returns the other symbol.
    pub fn other(self) -> Self {
        match self {
            Symbol::A => Symbol::B,
            Symbol::B => Symbol::A,
        }
    }
}

/// Outcome of evaluating a board for a completed line.
///
/// `winner` and `winning_line` are either both present or both absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WinResult {
    winner: Option<Symbol>,
    winning_line: Option<Line>,
}

impl WinResult {
    /// No line is complete.
    pub fn none() -> Self {
        Self::default()
    }

    /// `symbol` completed `line`.
    pub fn won(symbol: Symbol, line: Line) -> Self {
        Self {
            winner: Some(symbol),
            winning_line: Some(line),
        }
    }

    /// Returns the winning symbol, if any.
    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    /// Returns the cells of the winning line, if any.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// Returns true if a line is complete.
    pub fn is_win(&self) -> bool {
        self.winner.is_some()
    }
}

impl std::fmt::Display for WinResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.winner, self.winning_line) {
            (Some(symbol), Some([a, b, c])) => {
                write!(f, "{} wins on cells {}, {}, {}", symbol.glyph(), a, b, c)
            }
            _ => write!(f, "No winner"),
        }
    }
}

/// A symbol written into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Placement {
    /// The cell index (0-8).
    pub cell: usize,
    /// The recognised symbol.
    pub symbol: Symbol,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> cell {}", self.symbol.glyph(), self.cell)
    }
}

/// Summary of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No line complete and free cells remain.
    InProgress,
    /// A line was completed.
    Won(Symbol),
    /// Every cell is classified and no line is complete.
    Draw,
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundStatus::InProgress => write!(f, "In progress"),
            RoundStatus::Won(symbol) => write!(f, "{} wins", symbol.glyph()),
            RoundStatus::Draw => write!(f, "Draw"),
        }
    }
}
