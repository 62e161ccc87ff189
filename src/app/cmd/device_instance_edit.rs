//! Bearbeiten einer Bauteil-Instanz (Position, Rotation, Spiegelung).

use crate::app::undo::Command;
use crate::core::{Angle, Board, BoardResult, DevicePlacement, Orientation, Point};
use uuid::Uuid;

/// Ändert die Platzierung eines Bauteils.
pub struct CmdDeviceInstanceEdit {
    device: Uuid,
    old: DevicePlacement,
    new: DevicePlacement,
}

impl CmdDeviceInstanceEdit {
    /// Liest die aktuelle Platzierung als Ausgangszustand.
    pub fn new(board: &Board, device: Uuid) -> BoardResult<Self> {
        let placement = board.device(device)?.placement();
        Ok(Self {
            device,
            old: placement,
            new: placement,
        })
    }

    /// Neue Position.
    pub fn set_position(&mut self, position: Point) {
        self.new.position = position;
    }

    /// Neue Rotation.
    pub fn set_rotation(&mut self, rotation: Angle) {
        self.new.rotation = rotation;
    }

    /// Rotiert die Platzierung um `center`.
    pub fn rotate(&mut self, angle: Angle, center: Point) {
        self.new.position = self.new.position.rotated(angle, center);
        self.new.rotation = (self.new.rotation + angle).mapped_to_0_360();
    }

    /// Spiegelt das Bauteil an der Achse durch `center` auf die andere Seite.
    pub fn mirror(&mut self, center: Point, orientation: Orientation) {
        self.new = self.new.mirrored(orientation, center);
    }
}

impl Command for CmdDeviceInstanceEdit {
    fn text(&self) -> &str {
        "Bauteil bearbeiten"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        board.set_device_placement(self.device, self.new)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.set_device_placement(self.device, self.old).map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.set_device_placement(self.device, self.new).map(|_| ())
    }
}
