//! Drawing recognition: classifier input, output mapping and the turn driver.
//!
//! The classifier itself is an external collaborator. This module fixes the
//! contract on both sides of it: a [`PixelVector`] of normalized
//! intensities goes in, a two-score [`Confidence`] comes out and maps to a
//! [`Symbol`].

use crate::controller::TurnController;
use crate::error::{ClassifierError, PixelError, RecognitionError, TurnError};
use crate::settings::Settings;
use crate::types::{Symbol, WinResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Downsampled drawing as intensities in `0.0..=1.0`, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelVector {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl PixelVector {
    /// Wraps normalized intensities.
    ///
    /// # Errors
    ///
    /// [`PixelError::WrongLength`] unless `values.len() == width * height`
    /// (dimensions whose product overflows never match),
    /// [`PixelError::OutOfRange`] for any value outside `0.0..=1.0`.
    #[instrument(skip(values), fields(len = values.len()))]
    pub fn new(values: Vec<f32>, width: usize, height: usize) -> Result<Self, PixelError> {
        let expected = width.checked_mul(height);
        if expected != Some(values.len()) {
            return Err(PixelError::WrongLength {
                expected: expected.unwrap_or(usize::MAX),
                actual: values.len(),
            });
        }

        if let Some((offset, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(PixelError::OutOfRange { offset, value });
        }

        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Normalizes an RGBA buffer using the red channel of each pixel.
    ///
    /// Drawings are white on black, so the green and blue channels carry the
    /// same value as red and are ignored.
    #[instrument(skip(rgba), fields(len = rgba.len()))]
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Result<Self, PixelError> {
        let expected = width.checked_mul(height).and_then(|n| n.checked_mul(4));
        if expected != Some(rgba.len()) {
            return Err(PixelError::WrongLength {
                expected: expected.unwrap_or(usize::MAX),
                actual: rgba.len(),
            });
        }

        let values = rgba
            .chunks_exact(4)
            .map(|px| f32::from(px[0]) / 255.0)
            .collect();

        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Intensities in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of intensities.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if the vector holds no intensities.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks if nothing was drawn.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|&v| v <= 0.0)
    }
}

/// Classifier scores for the two symbols.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    scores: [f32; 2],
}

impl Confidence {
    /// Creates a confidence pair (first score for A, second for B).
    pub fn new(a: f32, b: f32) -> Self {
        Self { scores: [a, b] }
    }

    /// Reads a raw classifier output.
    ///
    /// # Errors
    ///
    /// [`ClassifierError`] unless the output has exactly two scores.
    #[track_caller]
    pub fn from_slice(output: &[f32]) -> Result<Self, ClassifierError> {
        match output {
            [a, b] => Ok(Self::new(*a, *b)),
            _ => Err(ClassifierError::new(format!(
                "expected 2 scores, got {}",
                output.len()
            ))),
        }
    }

    /// Returns the raw scores.
    pub fn scores(&self) -> [f32; 2] {
        self.scores
    }

    /// Maps the argmax to a symbol.
    ///
    /// B is chosen only when its score is strictly greater; ties go to A.
    pub fn symbol(&self) -> Symbol {
        let [a, b] = self.scores;
        if b > a { Symbol::B } else { Symbol::A }
    }
}

/// Pre-trained model that scores a drawing.
pub trait Classifier {
    /// Scores a drawing.
    fn classify(&self, pixels: &PixelVector) -> Result<Confidence, ClassifierError>;
}

impl<F> Classifier for F
where
    F: Fn(&PixelVector) -> Result<Confidence, ClassifierError>,
{
    fn classify(&self, pixels: &PixelVector) -> Result<Confidence, ClassifierError> {
        self(pixels)
    }
}

/// What happened to a drawing handed to [`Recognizer::recognize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recognition {
    /// No cell was selected; the drawing was ignored.
    NoSelection,
    /// Nothing was drawn; the turn was aborted.
    Blank {
        /// The released cell.
        cell: usize,
    },
    /// The drawing was classified and placed.
    Placed {
        /// The cell written.
        cell: usize,
        /// The recognised symbol.
        symbol: Symbol,
        /// Board evaluation after the placement.
        result: WinResult,
    },
}

/// Drives the pending turn of a [`TurnController`] from a drawing.
#[derive(Debug, Clone)]
pub struct Recognizer<C> {
    classifier: C,
    downsample_size: usize,
}

impl<C: Classifier> Recognizer<C> {
    /// Creates a recognizer for square drawings of `downsample_size` pixels
    /// per side.
    pub fn new(classifier: C, downsample_size: usize) -> Self {
        Self {
            classifier,
            downsample_size,
        }
    }

    /// Creates a recognizer using the configured input size.
    pub fn from_settings(classifier: C, settings: &Settings) -> Self {
        Self::new(classifier, *settings.neural_network().input())
    }

    /// Side length of accepted drawings.
    pub fn downsample_size(&self) -> usize {
        self.downsample_size
    }

    /// Classifies the drawing for the pending cell and submits the result.
    ///
    /// Blank drawings, wrongly sized drawings and classifier failures abort
    /// the turn, so the controller is idle again afterwards.
    ///
    /// # Errors
    ///
    /// [`TurnError::Recognition`] for a bad drawing or classifier failure,
    /// or any error from [`TurnController::submit_classification`].
    #[instrument(skip(self, controller, pixels), fields(pending = ?controller.pending_cell()))]
    pub fn recognize(
        &self,
        controller: &mut TurnController,
        pixels: &PixelVector,
    ) -> Result<Recognition, TurnError> {
        let Some(cell) = controller.pending_cell() else {
            debug!("No cell selected, drawing ignored");
            return Ok(Recognition::NoSelection);
        };

        let side = self.downsample_size;
        if pixels.width() != side || pixels.height() != side {
            warn!(
                side,
                width = pixels.width(),
                height = pixels.height(),
                "Drawing has wrong size"
            );
            controller.abort();
            return Err(RecognitionError::from(PixelError::WrongDimensions {
                expected: side,
                width: pixels.width(),
                height: pixels.height(),
            })
            .into());
        }

        if pixels.is_blank() {
            debug!(cell, "Blank drawing, aborting turn");
            controller.abort();
            return Ok(Recognition::Blank { cell });
        }

        let confidence = match self.classifier.classify(pixels) {
            Ok(confidence) => confidence,
            Err(err) => {
                warn!(%err, "Classifier failed, aborting turn");
                controller.abort();
                return Err(RecognitionError::from(err).into());
            }
        };

        let symbol = confidence.symbol();
        info!(cell, %symbol, scores = ?confidence.scores(), "Drawing recognised");
        let result = controller.submit_classification(cell, symbol)?;

        Ok(Recognition::Placed {
            cell,
            symbol,
            result,
        })
    }
}
