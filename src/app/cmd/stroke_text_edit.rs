//! Bearbeiten eines Texts (Board- oder Footprint-Text).

use crate::app::undo::Command;
use crate::core::{
    Angle, Board, BoardResult, Orientation, Point, StrokeTextPlacement, StrokeTextRef,
};

/// Ändert Platzierung und/oder Inhalt eines Texts.
pub struct CmdStrokeTextEdit {
    text: StrokeTextRef,
    old: (StrokeTextPlacement, String),
    new: (StrokeTextPlacement, String),
}

impl CmdStrokeTextEdit {
    /// Liest die aktuellen Werte als Ausgangszustand.
    pub fn new(board: &Board, text: StrokeTextRef) -> BoardResult<Self> {
        let t = board.stroke_text(text)?;
        let values = (t.placement(), t.text.clone());
        Ok(Self {
            text,
            old: values.clone(),
            new: values,
        })
    }

    /// Neue Position.
    pub fn set_position(&mut self, position: Point) {
        self.new.0.position = position;
    }

    /// Neue Rotation.
    pub fn set_rotation(&mut self, rotation: Angle) {
        self.new.0.rotation = rotation;
    }

    /// Neuer Inhalt.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.new.1 = text.into();
    }

    /// Spiegelt Position, Rotation und Layer.
    pub fn mirror(&mut self, center: Point, orientation: Orientation) {
        self.new.0 = self.new.0.mirrored(orientation, center);
    }

    fn apply(&self, board: &mut Board, (placement, content): &(StrokeTextPlacement, String)) -> BoardResult<bool> {
        let moved = board.set_stroke_text_placement(self.text, *placement)?;
        let edited = board.set_stroke_text_content(self.text, content)?;
        Ok(moved || edited)
    }
}

impl Command for CmdStrokeTextEdit {
    fn text(&self) -> &str {
        "Text bearbeiten"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        self.apply(board, &self.new)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.apply(board, &self.old).map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.apply(board, &self.new).map(|_| ())
    }
}
