//! Bearbeiten eines Netzpunkts (Layer, Position, Anheftung).

use crate::app::undo::Command;
use crate::core::{Board, BoardLayer, BoardResult, NetPointAttachment, Point};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NetPointValues {
    layer: BoardLayer,
    position: Point,
    attachment: NetPointAttachment,
}

/// Ändert Layer, Position und/oder Anheftung eines Netzpunkts.
pub struct CmdNetPointEdit {
    segment: Uuid,
    point: Uuid,
    old: NetPointValues,
    new: NetPointValues,
}

impl CmdNetPointEdit {
    /// Liest die aktuellen Werte des Punkts als Ausgangszustand.
    pub fn new(board: &Board, segment: Uuid, point: Uuid) -> BoardResult<Self> {
        let p = board.net_segment(segment)?.get_net_point_by_uuid(point)?;
        let values = NetPointValues {
            layer: p.layer(),
            position: p.position(),
            attachment: p.attachment(),
        };
        Ok(Self {
            segment,
            point,
            old: values,
            new: values,
        })
    }

    /// Neuer Layer.
    pub fn set_layer(&mut self, layer: BoardLayer) {
        self.new.layer = layer;
    }

    /// Neue Position (nur für freie Punkte wirksam).
    pub fn set_position(&mut self, position: Point) {
        self.new.position = position;
    }

    /// Neue Anheftung.
    pub fn set_attachment(&mut self, attachment: NetPointAttachment) {
        self.new.attachment = attachment;
    }

    /// Wendet `target` an: erst lösen, dann Layer und Position, zuletzt anheften.
    ///
    /// So wird eine neue Anheftung bereits mit dem neuen Layer geprüft.
    fn apply(&self, board: &mut Board, target: NetPointValues) -> BoardResult<bool> {
        let current = board
            .net_segment(self.segment)?
            .get_net_point_by_uuid(self.point)?
            .attachment();
        let mut changed = false;
        if current.is_attached() && current != target.attachment {
            changed |= board.set_net_point_attachment(
                self.segment,
                self.point,
                NetPointAttachment::None,
            )?;
        }
        changed |= board.set_net_point_layer(self.segment, self.point, target.layer)?;
        if !target.attachment.is_attached() {
            changed |= board.set_net_point_position(self.segment, self.point, target.position)?;
        }
        changed |= board.set_net_point_attachment(self.segment, self.point, target.attachment)?;
        Ok(changed)
    }
}

impl Command for CmdNetPointEdit {
    fn text(&self) -> &str {
        "Netzpunkt bearbeiten"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        self.apply(board, self.new).inspect_err(|_| {
            // Teilweise angewendete Änderungen zurücknehmen
            if let Err(err) = self.apply(board, self.old) {
                log::error!("Netzpunkt {} nicht wiederherstellbar: {err}", self.point);
            }
        })
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.apply(board, self.old).map(|_| ())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.apply(board, self.new).map(|_| ())
    }
}
