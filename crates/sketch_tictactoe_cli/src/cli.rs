//! Command-line interface for sketch_tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sketch Tic-Tac-Toe - drive the turn controller from the terminal
#[derive(Parser, Debug)]
#[command(name = "sketch_tictactoe")]
#[command(about = "Tic-tac-toe turn controller for hand-drawn symbols", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a round from a list of classified moves
    Play {
        /// Moves as comma-separated CELL=SYMBOL pairs, e.g. "0=A,4=B,1=A"
        #[arg(short, long)]
        moves: String,

        /// Path to a settings file (defaults are used if omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load and validate a settings file
    CheckSettings {
        /// Path to the settings file
        path: PathBuf,
    },
}
