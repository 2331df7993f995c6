//! Tests for driving whole rounds from drawings.

use sketch_tictactoe::{
    Classifier, ClassifierError, Confidence, GameEvent, PixelVector, Recognition, Recognizer,
    Renderer, Symbol, TurnController, WinResult, dispatch,
};

const SIZE: usize = 4;

/// Scores by where the ink is: left half reads as A, right half as B.
struct InkSideClassifier;

impl Classifier for InkSideClassifier {
    fn classify(&self, pixels: &PixelVector) -> Result<Confidence, ClassifierError> {
        let (mut left, mut right) = (0.0f32, 0.0f32);
        for (offset, value) in pixels.values().iter().enumerate() {
            if offset % pixels.width() < pixels.width() / 2 {
                left += *value;
            } else {
                right += *value;
            }
        }
        Ok(Confidence::new(left, right))
    }
}

/// RGBA drawing with a white stroke down one column.
fn stroke(column: usize) -> PixelVector {
    let mut rgba = vec![0u8; SIZE * SIZE * 4];
    for row in 0..SIZE {
        let px = (row * SIZE + column) * 4;
        rgba[px..px + 4].copy_from_slice(&[255, 255, 255, 255]);
    }
    PixelVector::from_rgba(&rgba, SIZE, SIZE).expect("Valid RGBA")
}

#[derive(Default)]
struct CountingRenderer {
    placements: usize,
    wins: Vec<[usize; 3]>,
}

impl Renderer for CountingRenderer {
    fn render(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Placed(_) => self.placements += 1,
            GameEvent::Won { line, .. } => self.wins.push(*line),
            _ => {}
        }
    }
}

#[test]
fn test_round_played_from_drawings() {
    let recognizer = Recognizer::new(InkSideClassifier, SIZE);
    let mut controller = TurnController::new();
    let mut renderer = CountingRenderer::default();

    let turns = [(0, 0), (3, 3), (4, 1), (5, 2), (8, 0)];
    let mut last = None;
    for (cell, column) in turns {
        controller.select_cell(cell).unwrap();
        last = Some(recognizer.recognize(&mut controller, &stroke(column)).unwrap());
        dispatch(controller.drain_events(), &mut renderer);
    }

    assert_eq!(
        last,
        Some(Recognition::Placed {
            cell: 8,
            symbol: Symbol::A,
            result: WinResult::won(Symbol::A, [0, 4, 8]),
        })
    );
    assert_eq!(controller.board().get(3), Some(Symbol::B));
    assert_eq!(renderer.placements, 5);
    assert_eq!(renderer.wins, vec![[0, 4, 8]]);
}

#[test]
fn test_drawing_while_idle_is_ignored() {
    let recognizer = Recognizer::new(InkSideClassifier, SIZE);
    let mut controller = TurnController::new();
    assert_eq!(
        recognizer.recognize(&mut controller, &stroke(0)).unwrap(),
        Recognition::NoSelection
    );
    assert!(controller.drain_events().is_empty());
}

#[test]
fn test_blank_drawing_releases_cell() {
    let recognizer = Recognizer::new(InkSideClassifier, SIZE);
    let mut controller = TurnController::new();
    let blank = PixelVector::from_rgba(&vec![0u8; SIZE * SIZE * 4], SIZE, SIZE).unwrap();

    controller.select_cell(1).unwrap();
    assert_eq!(
        recognizer.recognize(&mut controller, &blank).unwrap(),
        Recognition::Blank { cell: 1 }
    );
    assert!(controller.is_idle());
    assert_eq!(controller.board().classified_count(), 0);
}
