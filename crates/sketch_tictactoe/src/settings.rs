//! Read-only game settings loaded once at startup.

use crate::types::BOARD_SIDE;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Game settings.
///
/// ```toml
/// [board]
/// size = 3
///
/// [neural_network]
/// input = 24
/// hidden = 100
/// output = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Board dimensions.
    #[serde(default)]
    board: BoardSettings,

    /// Classifier dimensions.
    #[serde(default)]
    neural_network: NetworkSettings,
}

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Cells per side.
    #[serde(default = "default_board_size")]
    size: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            size: default_board_size(),
        }
    }
}

/// Dimensions of the pre-trained classifier.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Side length of the downsampled drawing fed to the classifier.
    #[serde(default = "default_input")]
    input: usize,

    /// Hidden layer width.
    #[serde(default = "default_hidden")]
    hidden: usize,

    /// Number of outputs (one score per symbol).
    #[serde(default = "default_output")]
    output: usize,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            input: default_input(),
            hidden: default_hidden(),
            output: default_output(),
        }
    }
}

fn default_board_size() -> usize {
    BOARD_SIDE
}

fn default_input() -> usize {
    24
}

fn default_hidden() -> usize {
    100
}

fn default_output() -> usize {
    2
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings = Self::from_toml_str(&content)?;
        info!(
            board_size = settings.board.size,
            input = settings.neural_network.input,
            "Settings loaded successfully"
        );
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the settings against what the game supports.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.size != BOARD_SIDE {
            return Err(ConfigError::new(format!(
                "Unsupported board size {} (only {} is supported)",
                self.board.size, BOARD_SIDE
            )));
        }
        if self.neural_network.input == 0 {
            return Err(ConfigError::new("Classifier input size must be positive"));
        }
        if self.neural_network.hidden == 0 {
            return Err(ConfigError::new("Classifier hidden layer must be positive"));
        }
        if self.neural_network.output != 2 {
            return Err(ConfigError::new(format!(
                "Classifier must have 2 outputs, got {}",
                self.neural_network.output
            )));
        }
        Ok(())
    }

    /// Number of intensities in a downsampled drawing.
    pub fn pixel_count(&self) -> usize {
        self.neural_network
            .input
            .saturating_mul(self.neural_network.input)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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
