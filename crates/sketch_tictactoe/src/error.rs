//! Error types for board writes, turns and recognition.

use crate::types::Symbol;
use derive_more::{Display, Error};
use tracing::instrument;

/// Error returned by [`BoardState`](crate::BoardState) writes.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The index is not a cell on the board.
    #[display("Cell {index} is out of range (expected 0-8)")]
    OutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// The cell already holds a classification.
    #[display("Cell {index} is already classified as {symbol}")]
    AlreadyClassified {
        /// The cell index.
        index: usize,
        /// The classification already stored.
        symbol: Symbol,
    },
}

/// Why a cell cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Unavailable {
    /// The cell already holds a classification.
    #[display("already classified")]
    AlreadyClassified,

    /// Another selection is awaiting its classification.
    #[display("cell {pending} is awaiting classification")]
    SelectionPending {
        /// The cell whose classification is pending.
        pending: usize,
    },
}

/// Failure reported by a classifier collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Classifier error: {} at {}:{}", message, file, line)]
pub struct ClassifierError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClassifierError {
    /// Creates a new classifier error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A pixel vector that does not meet the classifier's input contract.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum PixelError {
    /// The buffer has the wrong number of values.
    #[display("Expected {expected} values, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// The drawing is not square with the expected side length.
    #[display("Expected a {expected}x{expected} drawing, got {width}x{height}")]
    WrongDimensions {
        /// Required side length.
        expected: usize,
        /// Supplied width.
        width: usize,
        /// Supplied height.
        height: usize,
    },

    /// An intensity is not within `0.0..=1.0`.
    #[display("Intensity {value} at offset {offset} is outside 0.0-1.0")]
    OutOfRange {
        /// Offset of the offending value.
        offset: usize,
        /// The offending value.
        value: f32,
    },
}

/// Failure while turning a drawing into a symbol.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum RecognitionError {
    /// The drawing could not be used as classifier input.
    #[display("Invalid drawing: {source}")]
    Pixels {
        /// Underlying pixel error.
        source: PixelError,
    },

    /// The classifier failed.
    #[display("{source}")]
    Classifier {
        /// Underlying classifier error.
        source: ClassifierError,
    },
}

impl From<PixelError> for RecognitionError {
    fn from(source: PixelError) -> Self {
        Self::Pixels { source }
    }
}

impl From<ClassifierError> for RecognitionError {
    fn from(source: ClassifierError) -> Self {
        Self::Classifier { source }
    }
}

/// Error returned by [`TurnController`](crate::TurnController) operations.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum TurnError {
    /// The index is not a cell on the board.
    #[display("Cell {index} is out of range (expected 0-8)")]
    OutOfRange {
        /// The rejected index.
        index: usize,
    },

    /// The cell cannot be selected right now.
    #[display("Cell {index} is unavailable: {reason}")]
    CellUnavailable {
        /// The requested cell.
        index: usize,
        /// Why the selection was refused.
        reason: Unavailable,
    },

    /// The controller's internal bookkeeping disagrees with the caller.
    #[display("State inconsistency: {reason}")]
    StateInconsistency {
        /// Description of the mismatch.
        reason: String,
    },

    /// Recognising the drawing failed; the turn was aborted.
    #[display("Recognition failed: {source}")]
    Recognition {
        /// Underlying recognition error.
        source: RecognitionError,
    },
}

impl From<RecognitionError> for TurnError {
    fn from(source: RecognitionError) -> Self {
        Self::Recognition { source }
    }
}
