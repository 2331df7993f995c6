//! Draw detection.

use super::win::evaluate;
use crate::board::BoardState;
use tracing::instrument;

/// Checks if the board is full with no completed line.
#[instrument(skip(board))]
pub fn is_draw(board: &BoardState) -> bool {
    board.is_full() && !evaluate(board).is_win()
}
