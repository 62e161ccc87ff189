//! Bearbeiten eines Polygons.

use crate::app::undo::Command;
use crate::core::{Board, BoardLayer, BoardResult, Orientation, Path, Point};
use uuid::Uuid;

/// Ändert Pfad und/oder Layer eines Polygons.
pub struct CmdPolygonEdit {
    polygon: Uuid,
    old: (BoardLayer, Path),
    new: (BoardLayer, Path),
}

impl CmdPolygonEdit {
    /// Liest die aktuellen Werte als Ausgangszustand.
    pub fn new(board: &Board, polygon: Uuid) -> BoardResult<Self> {
        let p = board.polygon(polygon)?;
        let values = (p.layer, p.path.clone());
        Ok(Self {
            polygon,
            old: values.clone(),
            new: values,
        })
    }

    /// Neuer Pfad.
    pub fn set_path(&mut self, path: Path) {
        self.new.1 = path;
    }

    /// Neuer Layer.
    pub fn set_layer(&mut self, layer: BoardLayer) {
        self.new.0 = layer;
    }

    /// Spiegelt Pfad und Layer.
    pub fn mirror(&mut self, center: Point, orientation: Orientation) {
        self.new.1 = self.new.1.mirrored(orientation, center);
        self.new.0 = self.new.0.mirrored();
    }
}

impl Command for CmdPolygonEdit {
    fn text(&self) -> &str {
        "Polygon bearbeiten"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        board.set_polygon_geometry(self.polygon, self.new.0, self.new.1.clone())
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        board
            .set_polygon_geometry(self.polygon, self.old.0, self.old.1.clone())
            .map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        board
            .set_polygon_geometry(self.polygon, self.new.0, self.new.1.clone())
            .map(|_| ())
    }
}
