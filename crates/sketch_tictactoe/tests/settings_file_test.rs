//! Tests for loading settings from disk.

use std::fs;
use tempfile::TempDir;

use sketch_tictactoe::{ClassifierError, Confidence, PixelVector, Recognizer, Settings};

fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("settings.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_load_settings_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(
        &dir,
        r#"
[board]
size = 3

[neural_network]
input = 12
hidden = 64
output = 2
"#,
    );

    let settings = Settings::from_file(&path).expect("Load failed");
    assert_eq!(*settings.neural_network().input(), 12);
    assert_eq!(*settings.neural_network().hidden(), 64);
    assert_eq!(settings.pixel_count(), 144);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = Settings::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read settings file"));
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(&dir, "[neural_network]\ninput = 0\n");
    assert!(Settings::from_file(&path).is_err());
}

#[test]
fn test_recognizer_uses_configured_input_size() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_settings(&dir, "[neural_network]\ninput = 8\n");
    let settings = Settings::from_file(&path).expect("Load failed");

    let classifier = |_: &PixelVector| -> Result<Confidence, ClassifierError> {
        Ok(Confidence::new(1.0, 0.0))
    };
    let recognizer = Recognizer::from_settings(classifier, &settings);
    assert_eq!(recognizer.downsample_size(), 8);
}
