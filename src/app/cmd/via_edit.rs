//! Bearbeiten eines Vias.

use crate::app::undo::Command;
use crate::core::{Board, BoardResult, Orientation, Point, PositiveLength, ViaShape};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViaValues {
    position: Point,
    size: PositiveLength,
    shape: ViaShape,
}

/// Ändert Position, Größe und/oder Form eines Vias.
///
/// Angeheftete Netzpunkte aktiver Segmente folgen der Position.
pub struct CmdViaEdit {
    via: Uuid,
    old: ViaValues,
    new: ViaValues,
}

impl CmdViaEdit {
    /// Liest die aktuellen Werte des Vias als Ausgangszustand.
    pub fn new(board: &Board, via: Uuid) -> BoardResult<Self> {
        let v = board.via(via)?;
        let values = ViaValues {
            position: v.position,
            size: v.size,
            shape: v.shape,
        };
        Ok(Self {
            via,
            old: values,
            new: values,
        })
    }

    /// Neue Position.
    pub fn set_position(&mut self, position: Point) {
        self.new.position = position;
    }

    /// Spiegelt die (neue) Position an der Achse durch `center`.
    pub fn mirror(&mut self, center: Point, orientation: Orientation) {
        self.new.position = self.new.position.mirrored(orientation, center);
    }

    /// Neuer Außendurchmesser.
    pub fn set_size(&mut self, size: PositiveLength) {
        self.new.size = size;
    }

    /// Neue Form.
    pub fn set_shape(&mut self, shape: ViaShape) {
        self.new.shape = shape;
    }

    fn apply(&self, board: &mut Board, target: ViaValues) -> BoardResult<bool> {
        let moved = board.set_via_position(self.via, target.position)?;
        let resized = board.set_via_size(self.via, target.size)?;
        let reshaped = board.set_via_shape(self.via, target.shape)?;
        Ok(moved || resized || reshaped)
    }
}

impl Command for CmdViaEdit {
    fn text(&self) -> &str {
        "Via bearbeiten"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        self.apply(board, self.new)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.apply(board, self.old).map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.apply(board, self.new).map(|_| ())
    }
}
