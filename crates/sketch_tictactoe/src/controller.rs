//! Turn state machine.
//!
//! A turn runs `Idle -> AwaitingClassification -> Evaluated -> Idle`.
//! While a selection is pending the input surface is locked: no other cell
//! can be selected until the classification is submitted or the turn is
//! aborted.

use crate::board::BoardState;
use crate::error::{TurnError, Unavailable};
use crate::events::GameEvent;
#[cfg(debug_assertions)]
use crate::invariants::{ControllerInvariants, InvariantSet};
use crate::rules;
use crate::types::{CELL_COUNT, Placement, RoundStatus, Symbol, WinResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Phase of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Ready for a cell selection.
    #[default]
    Idle,
    /// A cell is selected and its drawing is being classified.
    AwaitingClassification {
        /// The selected cell.
        cell: usize,
    },
    /// The classification was written and the board is being evaluated.
    Evaluated,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::Idle => write!(f, "idle"),
            TurnPhase::AwaitingClassification { cell } => {
                write!(f, "awaiting classification of cell {}", cell)
            }
            TurnPhase::Evaluated => write!(f, "evaluated"),
        }
    }
}

/// Sequences turns and owns the board.
///
/// This is the only writer of its [`BoardState`]; callers observe the board
/// through [`TurnController::board`] and the queued [`GameEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct TurnController {
    pub(crate) board: BoardState,
    pub(crate) phase: TurnPhase,
    pub(crate) history: Vec<Placement>,
    pub(crate) events: Vec<GameEvent>,
}

impl TurnController {
    /// Creates a controller with an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a cell to draw in, locking input until the turn completes.
    ///
    /// # Errors
    ///
    /// - [`TurnError::OutOfRange`] if `index` is not in `0..9`.
    /// - [`TurnError::CellUnavailable`] if another selection is pending or
    ///   the cell is already classified.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn select_cell(&mut self, index: usize) -> Result<(), TurnError> {
        if index >= CELL_COUNT {
            warn!("Selection outside the board");
            return Err(TurnError::OutOfRange { index });
        }

        if let TurnPhase::AwaitingClassification { cell } = self.phase {
            debug!(pending = cell, "Input locked, selection refused");
            return Err(TurnError::CellUnavailable {
                index,
                reason: Unavailable::SelectionPending { pending: cell },
            });
        }

        if self.board.is_classified(index) {
            debug!("Cell already classified, selection refused");
            return Err(TurnError::CellUnavailable {
                index,
                reason: Unavailable::AlreadyClassified,
            });
        }

        self.phase = TurnPhase::AwaitingClassification { cell: index };
        self.events.push(GameEvent::CellSelected { cell: index });
        debug!("Awaiting classification");
        Ok(())
    }

    /// Writes the classification for the pending cell and evaluates the board.
    ///
    /// The controller is back in [`TurnPhase::Idle`] when this returns,
    /// whether or not it succeeded.
    ///
    /// # Errors
    ///
    /// [`TurnError::StateInconsistency`] if no selection is pending, if
    /// `index` is not the pending cell, or if the board refuses the write.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn submit_classification(
        &mut self,
        index: usize,
        symbol: Symbol,
    ) -> Result<WinResult, TurnError> {
        let pending = match self.phase {
            TurnPhase::AwaitingClassification { cell } => cell,
            phase => {
                return Err(Self::inconsistency(format!(
                    "classification for cell {} submitted while {}",
                    index, phase
                )));
            }
        };

        if pending != index {
            self.release(pending);
            return Err(Self::inconsistency(format!(
                "classification for cell {} submitted while cell {} was selected",
                index, pending
            )));
        }

        if let Err(err) = self.board.set_classification(index, symbol) {
            self.release(pending);
            return Err(Self::inconsistency(format!("board write failed: {}", err)));
        }

        let placement = Placement::new(index, symbol);
        self.history.push(placement);
        self.events.push(GameEvent::Placed(placement));
        self.phase = TurnPhase::Evaluated;

        let result = rules::evaluate(&self.board);
        if let (Some(winner), Some(line)) = (result.winner(), result.winning_line()) {
            info!(%winner, ?line, "Line completed");
            self.events.push(GameEvent::Won {
                symbol: winner,
                line,
            });
        }

        self.phase = TurnPhase::Idle;

        #[cfg(debug_assertions)]
        ControllerInvariants::check_all(&*self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            Self::inconsistency(format!("postcondition failed: {}", descriptions))
        })?;

        Ok(result)
    }

    /// Releases the pending selection without touching the board.
    ///
    /// Does nothing when no selection is pending.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn abort(&mut self) {
        if let TurnPhase::AwaitingClassification { cell } = self.phase {
            self.release(cell);
        }
    }

    /// Clears the board for a new round.
    ///
    /// Undrained events of the previous round are discarded; the queue holds
    /// only [`GameEvent::Reset`] afterwards.
    #[instrument(skip(self), fields(discarded = self.events.len()))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.history.clear();
        self.phase = TurnPhase::Idle;
        self.events.clear();
        self.events.push(GameEvent::Reset);
        info!("Round reset");
    }

    /// Checks if the controller accepts a new selection.
    pub fn is_idle(&self) -> bool {
        self.phase == TurnPhase::Idle
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns the cell awaiting classification, if any.
    pub fn pending_cell(&self) -> Option<usize> {
        match self.phase {
            TurnPhase::AwaitingClassification { cell } => Some(cell),
            _ => None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns placements of the current round in order.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Summarises the current round.
    #[instrument(skip(self))]
    pub fn status(&self) -> RoundStatus {
        if let Some(winner) = rules::evaluate(&self.board).winner() {
            RoundStatus::Won(winner)
        } else if self.board.is_full() {
            RoundStatus::Draw
        } else {
            RoundStatus::InProgress
        }
    }

    /// Takes the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn release(&mut self, cell: usize) {
        self.phase = TurnPhase::Idle;
        self.events.push(GameEvent::SelectionAborted { cell });
        debug!(cell, "Selection released");
    }

    fn inconsistency(reason: String) -> TurnError {
        error!(%reason, "Turn controller state inconsistency");
        TurnError::StateInconsistency { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_controller_is_idle() {
        let controller = TurnController::new();
        assert!(controller.is_idle());
        assert_eq!(controller.pending_cell(), None);
        assert_eq!(controller.status(), RoundStatus::InProgress);
    }

    #[test]
    fn test_select_locks_input() {
        let mut controller = TurnController::new();
        controller.select_cell(4).unwrap();
        assert_eq!(
            controller.phase(),
            TurnPhase::AwaitingClassification { cell: 4 }
        );
        assert!(!controller.is_idle());

        let err = controller.select_cell(0).unwrap_err();
        assert_eq!(
            err,
            TurnError::CellUnavailable {
                index: 0,
                reason: Unavailable::SelectionPending { pending: 4 },
            }
        );
        assert_eq!(controller.pending_cell(), Some(4));
    }

    #[test]
    fn test_submit_without_selection_is_inconsistent() {
        let mut controller = TurnController::new();
        let err = controller.submit_classification(0, Symbol::A).unwrap_err();
        assert!(matches!(err, TurnError::StateInconsistency { .. }));
        assert_eq!(controller.board(), &BoardState::new());
        assert!(controller.is_idle());
    }

    #[test]
    fn test_submit_for_other_cell_releases_selection() {
        let mut controller = TurnController::new();
        controller.select_cell(2).unwrap();
        let err = controller.submit_classification(3, Symbol::B).unwrap_err();
        assert!(matches!(err, TurnError::StateInconsistency { .. }));
        assert!(controller.is_idle());
        assert_eq!(controller.board().classified_count(), 0);
        assert_eq!(
            controller.drain_events(),
            vec![
                GameEvent::CellSelected { cell: 2 },
                GameEvent::SelectionAborted { cell: 2 },
            ]
        );
    }

    #[test]
    fn test_concurrent_write_reported_as_inconsistency() {
        let mut controller = TurnController::new();
        controller.select_cell(5).unwrap();
        // Simulate a write that bypassed the controller.
        controller.board.set_classification(5, Symbol::A).unwrap();

        let err = controller.submit_classification(5, Symbol::B).unwrap_err();
        assert!(matches!(err, TurnError::StateInconsistency { .. }));
        assert!(controller.is_idle());
        assert_eq!(controller.board().get(5), Some(Symbol::A));
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_abort_leaves_board_untouched() {
        let mut controller = TurnController::new();
        controller.select_cell(7).unwrap();
        controller.abort();
        assert!(controller.is_idle());
        assert_eq!(controller.board().classified_count(), 0);

        // Aborting while idle is a no-op.
        controller.abort();
        assert_eq!(
            controller.drain_events(),
            vec![
                GameEvent::CellSelected { cell: 7 },
                GameEvent::SelectionAborted { cell: 7 },
            ]
        );
    }

    #[test]
    fn test_events_for_winning_turn() {
        let mut controller = TurnController::new();
        for cell in [0, 4] {
            controller.select_cell(cell).unwrap();
            controller.submit_classification(cell, Symbol::B).unwrap();
        }
        controller.drain_events();

        controller.select_cell(8).unwrap();
        let result = controller.submit_classification(8, Symbol::B).unwrap();
        assert_eq!(result, WinResult::won(Symbol::B, [0, 4, 8]));
        assert_eq!(
            controller.drain_events(),
            vec![
                GameEvent::CellSelected { cell: 8 },
                GameEvent::Placed(Placement::new(8, Symbol::B)),
                GameEvent::Won {
                    symbol: Symbol::B,
                    line: [0, 4, 8],
                },
            ]
        );
        assert!(controller.drain_events().is_empty());
        assert_eq!(controller.status(), RoundStatus::Won(Symbol::B));
    }

    #[test]
    fn test_reset_clears_round() {
        let mut controller = TurnController::new();
        controller.select_cell(1).unwrap();
        controller.submit_classification(1, Symbol::A).unwrap();
        controller.select_cell(2).unwrap();
        assert_eq!(controller.events.len(), 3);

        controller.reset();
        assert!(controller.is_idle());
        assert!(controller.history().is_empty());
        assert_eq!(controller.board(), &BoardState::new());
        assert_eq!(controller.drain_events(), vec![GameEvent::Reset]);
        assert!(controller.select_cell(1).is_ok());
    }

    #[test]
    fn test_draw_status() {
        use Symbol::{A, B};
        let mut controller = TurnController::new();
        for (cell, symbol) in [B, A, B, A, B, B, A, B, A].into_iter().enumerate() {
            controller.select_cell(cell).unwrap();
            assert!(!controller.submit_classification(cell, symbol).unwrap().is_win());
        }
        assert_eq!(controller.status(), RoundStatus::Draw);
    }
}
