//! Bearbeiten einer Kupferfläche.

use crate::app::undo::Command;
use crate::core::{Board, BoardLayer, BoardResult, Orientation, Path, Point};
use uuid::Uuid;

/// Ändert Umriss und/oder Layer einer Kupferfläche.
pub struct CmdPlaneEdit {
    plane: Uuid,
    old: (BoardLayer, Path),
    new: (BoardLayer, Path),
}

impl CmdPlaneEdit {
    /// Liest die aktuellen Werte als Ausgangszustand.
    pub fn new(board: &Board, plane: Uuid) -> BoardResult<Self> {
        let p = board.plane(plane)?;
        let values = (p.layer, p.outline.clone());
        Ok(Self {
            plane,
            old: values.clone(),
            new: values,
        })
    }

    /// Neuer Umriss.
    pub fn set_outline(&mut self, outline: Path) {
        self.new.1 = outline;
    }

    /// Neue Kupferlage.
    pub fn set_layer(&mut self, layer: BoardLayer) {
        self.new.0 = layer;
    }

    /// Spiegelt Umriss und Layer.
    pub fn mirror(&mut self, center: Point, orientation: Orientation) {
        self.new.1 = self.new.1.mirrored(orientation, center);
        self.new.0 = self.new.0.mirrored();
    }
}

impl Command for CmdPlaneEdit {
    fn text(&self) -> &str {
        "Kupferflaeche bearbeiten"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        board.set_plane_geometry(self.plane, self.new.0, self.new.1.clone())
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        board
            .set_plane_geometry(self.plane, self.old.0, self.old.1.clone())
            .map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        board
            .set_plane_geometry(self.plane, self.new.0, self.new.1.clone())
            .map(|_| ())
    }
}
