//! Bearbeiten einer Netzlinie (Layer, Breite).

use crate::app::undo::Command;
use crate::core::{Board, BoardLayer, BoardResult, PositiveLength};
use uuid::Uuid;

/// Ändert Kupferlage und/oder Breite einer Netzlinie.
pub struct CmdNetLineEdit {
    segment: Uuid,
    line: Uuid,
    old: (BoardLayer, PositiveLength),
    new: (BoardLayer, PositiveLength),
}

impl CmdNetLineEdit {
    /// Liest die aktuellen Werte der Linie als Ausgangszustand.
    pub fn new(board: &Board, segment: Uuid, line: Uuid) -> BoardResult<Self> {
        let l = board.net_segment(segment)?.get_net_line_by_uuid(line)?;
        let values = (l.layer(), l.width());
        Ok(Self {
            segment,
            line,
            old: values,
            new: values,
        })
    }

    /// Neue Kupferlage.
    pub fn set_layer(&mut self, layer: BoardLayer) {
        self.new.0 = layer;
    }

    /// Neue Breite.
    pub fn set_width(&mut self, width: PositiveLength) {
        self.new.1 = width;
    }

    fn apply(&self, board: &mut Board, (layer, width): (BoardLayer, PositiveLength)) -> BoardResult<bool> {
        let layer_changed = board.set_net_line_layer(self.segment, self.line, layer)?;
        let width_changed = board.set_net_line_width(self.segment, self.line, width)?;
        Ok(layer_changed || width_changed)
    }
}

impl Command for CmdNetLineEdit {
    fn text(&self) -> &str {
        "Netzlinie bearbeiten"
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
