//! Sketch Tic-Tac-Toe - command-line driver
//!
//! Plays scripted rounds through the turn controller and validates
//! settings files.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod play;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use play::{Report, load_settings, parse_moves, play_moves};
use render::TextRenderer;
use sketch_tictactoe::{Settings, TurnController};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            moves,
            settings,
            json,
        } => run_play(&moves, settings, json),
        Command::CheckSettings { path } => run_check_settings(path),
    }
}

/// Plays a scripted round and prints the outcome.
#[instrument(skip(moves))]
fn run_play(moves: &str, settings: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = load_settings(settings.as_deref())?;

    let moves = parse_moves(moves)?;
    let mut controller = TurnController::new();
    let mut renderer = TextRenderer::default();
    let summary = play_moves(&mut controller, &moves, &mut renderer)?;

    for (cell, reason) in &summary.ignored {
        println!("Ignored move on cell {}: {}", cell, reason);
    }

    let report = Report::new(&controller, summary.last_result, &settings);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}\n", controller.board());
        println!("Status: {}", report.status);
        println!("Result: {}", report.result);
        println!(
            "Classifier input: {}x{} ({} pixels)",
            settings.neural_network().input(),
            settings.neural_network().input(),
            report.pixel_count
        );
    }

    Ok(())
}

/// Loads a settings file and reports whether it is valid.
#[instrument]
fn run_check_settings(path: PathBuf) -> Result<()> {
    let settings = Settings::from_file(&path)?;
    info!("Settings are valid");
    println!(
        "{}: board {}x{}, classifier {} -> {} -> {}",
        path.display(),
        settings.board().size(),
        settings.board().size(),
        settings.pixel_count(),
        settings.neural_network().hidden(),
        settings.neural_network().output(),
    );
    Ok(())
}
