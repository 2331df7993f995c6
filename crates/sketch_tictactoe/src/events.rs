//! Events emitted by the turn controller for the rendering layer.

use crate::types::{Line, Placement, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Something the renderer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cell was selected and awaits a drawing.
    CellSelected {
        /// The selected cell.
        cell: usize,
    },
    /// The pending selection was released without a placement.
    SelectionAborted {
        /// The released cell.
        cell: usize,
    },
    /// A symbol was written into a cell.
    Placed(Placement),
    /// A line was completed.
    Won {
        /// The winning symbol.
        symbol: Symbol,
        /// The completed line.
        line: Line,
    },
    /// The board was cleared for a new round.
    Reset,
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::CellSelected { cell } => write!(f, "Cell {} selected", cell),
            GameEvent::SelectionAborted { cell } => write!(f, "Selection of cell {} aborted", cell),
            GameEvent::Placed(placement) => write!(f, "Placed {}", placement),
            GameEvent::Won { symbol, line } => {
                write!(f, "{} completes line {:?}", symbol.glyph(), line)
            }
            GameEvent::Reset => write!(f, "Board reset"),
        }
    }
}

/// Consumer of game events (model placement, win-line animation).
pub trait Renderer {
    /// Handles a single event.
    fn render(&mut self, event: &GameEvent);
}

/// Records events in order.
impl Renderer for Vec<GameEvent> {
    fn render(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Feeds events to a renderer in order, returning how many were delivered.
#[instrument(skip_all)]
pub fn dispatch<R>(events: impl IntoIterator<Item = GameEvent>, renderer: &mut R) -> usize
where
    R: Renderer + ?Sized,
{
    let mut delivered = 0;
    for event in events {
        trace!(%event, "Dispatching");
        renderer.render(&event);
        delivered += 1;
    }
    delivered
}
