//! Sketch tic-tac-toe - board and turn logic for hand-drawn symbols.
//!
//! Players draw an "O" or an "X" into a selected cell; an external
//! classifier decides which symbol was drawn and the turn controller
//! writes it to the board and checks for a completed line.
//!
//! # Architecture
//!
//! - **Board**: [`BoardState`], nine single-assignment cells
//! - **Rules**: [`evaluate`] finds the winning line, [`is_draw`] a full board
//! - **Controller**: [`TurnController`], the `Idle -> AwaitingClassification
//!   -> Evaluated -> Idle` state machine and sole board writer
//! - **Recognition**: [`Recognizer`] runs a pending turn through a
//!   [`Classifier`]
//! - **Events**: [`GameEvent`]s queued for a [`Renderer`]
//!
//! # Example
//!
//! ```
//! use sketch_tictactoe::{Symbol, TurnController};
//!
//! let mut controller = TurnController::new();
//! for cell in [0, 1, 2] {
//!     controller.select_cell(cell)?;
//!     let result = controller.submit_classification(cell, Symbol::A)?;
//!     if cell == 2 {
//!         assert_eq!(result.winning_line(), Some([0, 1, 2]));
//!     }
//! }
//! # Ok::<(), sketch_tictactoe::TurnError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod controller;
mod error;
mod events;
pub mod invariants;
mod recognition;
pub mod rules;
mod settings;
mod types;

// Crate-level exports - Board
pub use board::BoardState;

// Crate-level exports - Turn state machine
pub use controller::{TurnController, TurnPhase};

// Crate-level exports - Errors
pub use error::{
    BoardError, ClassifierError, PixelError, RecognitionError, TurnError, Unavailable,
};

// Crate-level exports - Events
pub use events::{GameEvent, Renderer, dispatch};

// Crate-level exports - Recognition
pub use recognition::{Classifier, Confidence, PixelVector, Recognition, Recognizer};

// Crate-level exports - Rules
pub use rules::{LINES, evaluate, is_draw};

// Crate-level exports - Settings
pub use settings::{BoardSettings, ConfigError, NetworkSettings, Settings};

// Crate-level exports - Domain types
pub use types::{BOARD_SIDE, CELL_COUNT, Line, Placement, RoundStatus, Symbol, WinResult};
