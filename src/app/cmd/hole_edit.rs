//! Verschieben einer Bohrung.

use crate::app::undo::Command;
use crate::core::{Board, BoardResult, Orientation, Point};
use uuid::Uuid;

/// Ändert die Position einer Bohrung.
pub struct CmdHoleEdit {
    hole: Uuid,
    old: Point,
    new: Point,
}

impl CmdHoleEdit {
    /// Liest die aktuelle Position als Ausgangszustand.
    pub fn new(board: &Board, hole: Uuid) -> BoardResult<Self> {
        let position = board.hole(hole)?.position;
        Ok(Self {
            hole,
            old: position,
            new: position,
        })
    }

    /// Neue Position.
    pub fn set_position(&mut self, position: Point) {
        self.new = position;
    }

    /// Spiegelt die Position an der Achse durch `center`.
    pub fn mirror(&mut self, center: Point, orientation: Orientation) {
        self.new = self.new.mirrored(orientation, center);
    }
}

impl Command for CmdHoleEdit {
    fn text(&self) -> &str {
        "Bohrung verschieben"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        board.set_hole_position(self.hole, self.new)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.set_hole_position(self.hole, self.old).map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.set_hole_position(self.hole, self.new).map(|_| ())
    }
}
