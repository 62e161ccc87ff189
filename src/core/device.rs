//! Bauteil-Instanz mit Footprint-Pads und Footprint-Texten.

use super::board_items::StrokeText;
use super::geometry::{Angle, Orientation, Point, PositiveLength};
use super::layer::BoardLayer;
use indexmap::IndexMap;
use uuid::Uuid;

/// Bestückungstechnologie eines Pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadTechnology {
    /// Oberflächenmontiert auf der angegebenen Seite (relativ zum ungespiegelten Footprint)
    Smt(BoardLayer),
    /// Durchsteckmontiert (alle Kupferlagen)
    Tht,
}

/// Pad eines Footprints; Position relativ zum Bauteilursprung.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintPad {
    /// Eindeutige ID innerhalb des Bauteils
    pub uuid: Uuid,
    /// Pad-Name, z.B. "1"
    pub name: String,
    /// Relative Position
    pub position: Point,
    /// SMT oder THT
    pub technology: PadTechnology,
    /// Größe des Kupferpads
    pub size: PositiveLength,
    /// Angeschlossenes Netzsignal
    pub net_signal: Option<Uuid>,
}

/// Platzierte Bauteil-Instanz.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Bezeichner, z.B. "R1"
    pub name: String,
    /// Ursprung auf dem Board
    pub position: Point,
    /// Rotation
    pub rotation: Angle,
    /// Auf die Unterseite gespiegelt
    pub mirrored: bool,
    /// Pads nach UUID
    pub pads: IndexMap<Uuid, FootprintPad>,
    /// Footprint-Texte (Name, Wert) mit absoluten Positionen
    pub stroke_texts: IndexMap<Uuid, StrokeText>,
}

/// Platzierung eines Bauteils.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePlacement {
    /// Ursprung
    pub position: Point,
    /// Rotation
    pub rotation: Angle,
    /// Gespiegelt
    pub mirrored: bool,
}

impl DevicePlacement {
    /// Spiegelt die Platzierung an der Achse durch `center`.
    ///
    /// Die absolute Lage jedes Pads wird dabei mitgespiegelt.
    pub fn mirrored(self, orientation: Orientation, center: Point) -> Self {
        Self {
            position: self.position.mirrored(orientation, center),
            rotation: self.rotation.mirrored(orientation),
            mirrored: !self.mirrored,
        }
    }
}

impl Device {
    /// Erstellt ein Bauteil ohne Pads.
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            position,
            rotation: Angle::deg0(),
            mirrored: false,
            pads: IndexMap::new(),
            stroke_texts: IndexMap::new(),
        }
    }

    /// Aktuelle Platzierung.
    pub fn placement(&self) -> DevicePlacement {
        DevicePlacement {
            position: self.position,
            rotation: self.rotation,
            mirrored: self.mirrored,
        }
    }

    /// Übernimmt eine Platzierung. Gibt zurück ob sich etwas geändert hat.
    pub fn apply_placement(&mut self, placement: DevicePlacement) -> bool {
        if self.placement() == placement {
            return false;
        }
        self.position = placement.position;
        self.rotation = placement.rotation;
        self.mirrored = placement.mirrored;
        true
    }

    /// Absolute Position eines Pads.
    pub fn pad_position(&self, pad: &FootprintPad) -> Point {
        let relative = if self.mirrored {
            Point::new(-pad.position.x, pad.position.y)
        } else {
            pad.position
        };
        self.position + relative.rotated(self.rotation, Point::ORIGIN)
    }

    /// Absolute Kupferlage eines SMT-Pads; `None` für THT-Pads.
    pub fn pad_layer(&self, pad: &FootprintPad) -> Option<BoardLayer> {
        match pad.technology {
            PadTechnology::Smt(layer) if self.mirrored => Some(layer.mirrored()),
            PadTechnology::Smt(layer) => Some(layer),
            PadTechnology::Tht => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device_with_pad() -> (Device, Uuid) {
        let mut device = Device::new("R1", Point::from_mm(10.0, 5.0));
        let pad = FootprintPad {
            uuid: Uuid::new_v4(),
            name: "1".into(),
            position: Point::from_mm(1.0, 2.0),
            technology: PadTechnology::Smt(BoardLayer::TopCopper),
            size: PositiveLength::from_mm(1.0).unwrap(),
            net_signal: None,
        };
        let id = pad.uuid;
        device.pads.insert(id, pad);
        (device, id)
    }

    #[test]
    fn test_pad_position_follows_rotation() {
        let (mut device, pad) = device_with_pad();
        device.rotation = Angle::deg90();
        let pos = device.pad_position(&device.pads[&pad]);
        assert_eq!(pos, Point::from_mm(8.0, 6.0));
    }

    #[test]
    fn test_mirroring_device_mirrors_pad_positions_and_layers() {
        let center = Point::from_mm(2.0, 3.0);
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let (mut device, pad) = device_with_pad();
            device.rotation = Angle::deg90();
            let before = device.pad_position(&device.pads[&pad]);

            device.apply_placement(device.placement().mirrored(orientation, center));
            let after = device.pad_position(&device.pads[&pad]);

            assert_eq!(after, before.mirrored(orientation, center));
            assert_eq!(device.pad_layer(&device.pads[&pad]), Some(BoardLayer::BottomCopper));
        }
    }
}
