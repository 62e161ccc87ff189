//! Netzpunkt: Knoten des Verbindungsgraphen innerhalb eines Netzsegments.

use super::error::{BoardError, BoardResult};
use super::geometry::Point;
use super::layer::BoardLayer;
use indexmap::IndexSet;
use uuid::Uuid;

/// Woran ein Netzpunkt angeheftet ist.
///
/// Ein angehefteter Punkt übernimmt seine Position vom Anker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetPointAttachment {
    /// Frei positionierbarer Punkt
    #[default]
    None,
    /// Angeheftet an eine Durchkontaktierung
    Via(Uuid),
    /// Angeheftet an ein Pad eines Bauteils
    Pad {
        /// Bauteil-UUID
        device: Uuid,
        /// Pad-UUID innerhalb des Bauteils
        pad: Uuid,
    },
}

impl NetPointAttachment {
    /// `true` wenn der Punkt an einen Anker gebunden ist.
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Ein Netzpunkt gehört genau zu einem Netzsegment.
#[derive(Debug, Clone, PartialEq)]
pub struct NetPoint {
    uuid: Uuid,
    segment: Uuid,
    layer: BoardLayer,
    position: Point,
    attachment: NetPointAttachment,
    net_lines: IndexSet<Uuid>,
}

impl NetPoint {
    /// Erstellt einen neuen Netzpunkt mit zufälliger UUID.
    pub fn new(
        segment: Uuid,
        layer: BoardLayer,
        position: Point,
        attachment: NetPointAttachment,
    ) -> Self {
        Self::with_uuid(Uuid::new_v4(), segment, layer, position, attachment)
    }

    /// Erstellt einen Netzpunkt mit vorgegebener UUID (z.B. beim Laden).
    pub fn with_uuid(
        uuid: Uuid,
        segment: Uuid,
        layer: BoardLayer,
        position: Point,
        attachment: NetPointAttachment,
    ) -> Self {
        Self {
            uuid,
            segment,
            layer,
            position,
            attachment,
            net_lines: IndexSet::new(),
        }
    }

    /// UUID des Punkts.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// UUID des besitzenden Netzsegments.
    pub fn segment(&self) -> Uuid {
        self.segment
    }

    /// Layer des Punkts.
    pub fn layer(&self) -> BoardLayer {
        self.layer
    }

    /// Aktuelle Position (bei angehefteten Punkten vom Anker abgeleitet).
    pub fn position(&self) -> Point {
        self.position
    }

    /// Aktuelle Anheftung.
    pub fn attachment(&self) -> NetPointAttachment {
        self.attachment
    }

    /// Alle registrierten Netzlinien.
    pub fn net_lines(&self) -> &IndexSet<Uuid> {
        &self.net_lines
    }

    /// `true` wenn mindestens eine Netzlinie diesen Punkt verwendet.
    pub fn is_used(&self) -> bool {
        !self.net_lines.is_empty()
    }

    /// `true` wenn der Punkt an einem Anker hängt.
    pub fn is_attached(&self) -> bool {
        self.attachment.is_attached()
    }

    /// `true` wenn der Punkt an einer Durchkontaktierung hängt.
    pub fn is_attached_to_via(&self) -> bool {
        matches!(self.attachment, NetPointAttachment::Via(_))
    }

    /// `true` wenn der Punkt an einem Pad hängt.
    pub fn is_attached_to_pad(&self) -> bool {
        matches!(self.attachment, NetPointAttachment::Pad { .. })
    }

    /// UUID der Durchkontaktierung, falls angeheftet.
    pub fn via(&self) -> Option<Uuid> {
        match self.attachment {
            NetPointAttachment::Via(via) => Some(via),
            _ => None,
        }
    }

    /// `(Bauteil, Pad)`, falls an ein Pad angeheftet.
    pub fn pad(&self) -> Option<(Uuid, Uuid)> {
        match self.attachment {
            NetPointAttachment::Pad { device, pad } => Some((device, pad)),
            _ => None,
        }
    }

    /// Setzt den Layer. Gibt zurück ob sich etwas geändert hat.
    pub fn set_layer(&mut self, layer: BoardLayer) -> bool {
        if self.layer == layer {
            return false;
        }
        self.layer = layer;
        true
    }

    /// Setzt die Position eines freien Punkts.
    ///
    /// Angeheftete Punkte leiten ihre Position vom Anker ab; der Aufruf schlägt fehl.
    pub fn set_position(&mut self, position: Point) -> BoardResult<bool> {
        if self.is_attached() {
            return Err(BoardError::validation(format!(
                "Netzpunkt {} ist angeheftet, Position wird vom Anker bestimmt",
                self.uuid
            )));
        }
        Ok(self.apply_position(position))
    }

    /// Setzt die Anheftung; beim Lösen bleibt die letzte Position als freie Position erhalten.
    pub fn set_attachment(&mut self, attachment: NetPointAttachment) -> bool {
        if self.attachment == attachment {
            return false;
        }
        self.attachment = attachment;
        true
    }

    /// Übernimmt die vom Anker abgeleitete Position.
    pub(crate) fn sync_position(&mut self, position: Point) -> bool {
        self.apply_position(position)
    }

    fn apply_position(&mut self, position: Point) -> bool {
        if self.position == position {
            return false;
        }
        self.position = position;
        true
    }

    /// Registriert eine Netzlinie; doppelte Registrierung ist ein Programmierfehler.
    pub(crate) fn register_net_line(&mut self, line: Uuid) -> BoardResult<()> {
        if !self.net_lines.insert(line) {
            return Err(BoardError::logic(format!(
                "Netzlinie {line} ist bereits an Netzpunkt {} registriert",
                self.uuid
            )));
        }
        Ok(())
    }

    /// Verschiebt eine registrierte Netzlinie an `index` der Registrierungsreihenfolge.
    pub(crate) fn move_net_line_to(&mut self, line: Uuid, index: usize) {
        if let Some(from) = self.net_lines.get_index_of(&line) {
            let to = index.min(self.net_lines.len() - 1);
            self.net_lines.move_index(from, to);
        }
    }

    /// Entfernt die Registrierung einer Netzlinie.
    pub(crate) fn unregister_net_line(&mut self, line: Uuid) -> BoardResult<()> {
        if !self.net_lines.shift_remove(&line) {
            return Err(BoardError::logic(format!(
                "Netzlinie {line} ist nicht an Netzpunkt {} registriert",
                self.uuid
            )));
        }
        Ok(())
    }
}
