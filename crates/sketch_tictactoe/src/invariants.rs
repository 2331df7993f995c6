//! Invariants of the turn controller.
//!
//! Checked after every placement in debug builds; a violation is reported
//! as [`TurnError::StateInconsistency`](crate::TurnError::StateInconsistency).

use crate::board::BoardState;
use crate::controller::{TurnController, TurnPhase};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: every cell was written exactly once, in history order.
///
/// Replaying the placement history onto an empty board must succeed
/// without a double write and reproduce the current board.
pub struct SingleAssignmentInvariant;

impl Invariant<TurnController> for SingleAssignmentInvariant {
    fn holds(controller: &TurnController) -> bool {
        let mut replayed = BoardState::new();

        for placement in controller.history() {
            if replayed
                .set_classification(placement.cell, placement.symbol)
                .is_err()
            {
                return false;
            }
        }

        replayed == *controller.board()
    }

    fn description() -> &'static str {
        "Board cells are written once and match the placement history"
    }
}

/// Invariant: a completed turn leaves no selection pending.
pub struct SettledPhaseInvariant;

impl Invariant<TurnController> for SettledPhaseInvariant {
    fn holds(controller: &TurnController) -> bool {
        controller.phase() == TurnPhase::Idle
    }

    fn description() -> &'static str {
        "Controller returns to idle after a turn"
    }
}

/// Invariants checked after each placement.
pub type ControllerInvariants = (SingleAssignmentInvariant, SettledPhaseInvariant);
