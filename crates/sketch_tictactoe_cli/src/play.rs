//! Plays a round from a scripted list of classified moves.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use sketch_tictactoe::{
    BoardState, Placement, Renderer, RoundStatus, Settings, Symbol, TurnController, TurnError,
    WinResult, dispatch,
};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Loads the settings for a round, falling back to the defaults.
#[instrument]
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    debug!(?settings, "Using settings");
    Ok(settings)
}

/// Parses `"0=A, 4=B"` into `(cell, symbol)` pairs.
#[instrument]
pub fn parse_moves(moves: &str) -> Result<Vec<(usize, Symbol)>> {
    moves
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (cell, symbol) = pair
                .split_once('=')
                .with_context(|| format!("Move '{}' is not CELL=SYMBOL", pair))?;
            let cell = cell
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid cell in move '{}'", pair))?;
            let symbol = symbol
                .trim()
                .parse::<Symbol>()
                .with_context(|| format!("Invalid symbol in move '{}' (expected A or B)", pair))?;
            Ok((cell, symbol))
        })
        .collect()
}

/// Result of playing scripted moves.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaySummary {
    /// Evaluation after the last accepted move.
    pub last_result: WinResult,
    /// Moves the controller refused, with the reason.
    pub ignored: Vec<(usize, String)>,
}

/// Runs each move through select and submit, rendering events as they occur.
///
/// Refused selections are skipped the way the drawing surface ignores a
/// click on an unavailable cell. A state inconsistency stops the round.
#[instrument(skip(controller, renderer), fields(moves = moves.len()))]
pub fn play_moves<R: Renderer>(
    controller: &mut TurnController,
    moves: &[(usize, Symbol)],
    renderer: &mut R,
) -> Result<PlaySummary> {
    let mut summary = PlaySummary {
        last_result: WinResult::none(),
        ignored: Vec::new(),
    };

    for &(cell, symbol) in moves {
        match controller.select_cell(cell) {
            Ok(()) => {}
            Err(err @ TurnError::StateInconsistency { .. }) => return Err(err.into()),
            Err(err) => {
                warn!(cell, %err, "Move ignored");
                summary.ignored.push((cell, err.to_string()));
                continue;
            }
        }

        summary.last_result = controller
            .submit_classification(cell, symbol)
            .with_context(|| format!("Failed to submit {} for cell {}", symbol, cell))?;
        dispatch(controller.drain_events(), renderer);
    }

    info!(
        accepted = controller.history().len(),
        ignored = summary.ignored.len(),
        "Moves played"
    );
    Ok(summary)
}

/// Final state of a round, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Board cells in row-major order.
    pub board: &'a BoardState,
    /// Round status.
    pub status: RoundStatus,
    /// Evaluation after the last accepted move.
    pub result: WinResult,
    /// Accepted placements in order.
    pub history: &'a [Placement],
    /// Settings the round was played with.
    pub settings: &'a Settings,
    /// Intensities a drawing must have for the classifier.
    pub pixel_count: usize,
}

impl<'a> Report<'a> {
    /// Builds a report from the controller state.
    pub fn new(controller: &'a TurnController, result: WinResult, settings: &'a Settings) -> Self {
        Self {
            board: controller.board(),
            status: controller.status(),
            result,
            history: controller.history(),
            settings,
            pixel_count: settings.pixel_count(),
        }
    }
}
