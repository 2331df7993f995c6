//! Game rules for drawn tic-tac-toe.
//!
//! Pure functions over a [`BoardState`](crate::BoardState). Rules are kept
//! apart from board storage so the turn controller is the only writer.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{LINES, evaluate};
