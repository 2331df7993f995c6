//! Win detection.

use crate::board::BoardState;
use crate::types::{Line, Symbol, WinResult};
use tracing::{debug, instrument};

/// Winning lines in priority order: rows top to bottom, columns left to
/// right, then the two diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Evaluates the board for a completed line.
///
/// Returns the first line in [`LINES`] whose three cells hold the same
/// symbol, or [`WinResult::none`] if there is none.
#[instrument(skip(board), fields(classified = board.classified_count()))]
pub fn evaluate(board: &BoardState) -> WinResult {
    for line in LINES {
        if let Some(symbol) = line_owner(board, line) {
            debug!(%symbol, ?line, "Line complete");
            return WinResult::won(symbol, line);
        }
    }

    WinResult::none()
}

/// Symbol held by all three cells of `line`, stopping at the first unset or
/// mismatched cell.
fn line_owner(board: &BoardState, [a, b, c]: Line) -> Option<Symbol> {
    let first = board.get(a)?;
    if board.get(b)? != first || board.get(c)? != first {
        return None;
    }
    Some(first)
}
