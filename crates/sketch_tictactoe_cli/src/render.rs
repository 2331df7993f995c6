//! Plain-text rendering of game events.

use sketch_tictactoe::{BoardState, GameEvent, Renderer};
use tracing::debug;

/// Writes one line per event to stdout.
#[derive(Debug, Default)]
pub struct TextRenderer {
    lines: Vec<String>,
}

impl TextRenderer {
    /// Lines rendered so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn describe(event: &GameEvent) -> String {
        match event {
            GameEvent::Placed(placement) => match BoardState::coordinates(placement.cell) {
                Some((row, col)) => format!(
                    "Placed {} at row {}, column {}",
                    placement.symbol.glyph(),
                    row + 1,
                    col + 1
                ),
                None => event.to_string(),
            },
            GameEvent::Won { symbol, line } => format!(
                "{} wins! Animating cells {}, {}, {}",
                symbol.glyph(),
                line[0],
                line[1],
                line[2]
            ),
            other => other.to_string(),
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, event: &GameEvent) {
        debug!(?event, "Rendering event");
        let line = Self::describe(event);
        println!("{}", line);
        self.lines.push(line);
    }
}
