//! Weitere Board-Elemente: Netzsignale, Flächen, Polygone, Texte und Bohrungen.

use super::geometry::{Angle, Length, Orientation, Path, Point, PositiveLength};
use super::layer::BoardLayer;
use uuid::Uuid;

/// Ein Netzsignal (logisches Netz).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetSignal {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Anzeigename, z.B. "GND"
    pub name: String,
}

impl NetSignal {
    /// Erstellt ein Netzsignal mit zufälliger UUID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Kupferfläche eines Netzsignals.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Zugehöriges Netzsignal
    pub net_signal: Uuid,
    /// Kupferlage
    pub layer: BoardLayer,
    /// Umriss
    pub outline: Path,
}

/// Grafisches Polygon (z.B. Bestückungsdruck oder Kontur).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Layer
    pub layer: BoardLayer,
    /// Linienbreite (0 = Haarlinie)
    pub line_width: Length,
    /// Gefüllt
    pub filled: bool,
    /// Pfad
    pub path: Path,
}

/// Vektorschrift-Text.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeText {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Layer
    pub layer: BoardLayer,
    /// Textinhalt
    pub text: String,
    /// Ankerposition (absolut)
    pub position: Point,
    /// Rotation
    pub rotation: Angle,
    /// Schrifthöhe
    pub height: PositiveLength,
    /// Gespiegelt dargestellt
    pub mirrored: bool,
}

/// Geometrie eines Texts nach einer Spiegelung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeTextPlacement {
    /// Position
    pub position: Point,
    /// Rotation
    pub rotation: Angle,
    /// Layer
    pub layer: BoardLayer,
    /// Spiegelung
    pub mirrored: bool,
}

impl StrokeText {
    /// Aktuelle Platzierung.
    pub fn placement(&self) -> StrokeTextPlacement {
        StrokeTextPlacement {
            position: self.position,
            rotation: self.rotation,
            layer: self.layer,
            mirrored: self.mirrored,
        }
    }

    /// Übernimmt eine Platzierung. Gibt zurück ob sich etwas geändert hat.
    pub fn apply_placement(&mut self, placement: StrokeTextPlacement) -> bool {
        if self.placement() == placement {
            return false;
        }
        self.position = placement.position;
        self.rotation = placement.rotation;
        self.layer = placement.layer;
        self.mirrored = placement.mirrored;
        true
    }
}

impl StrokeTextPlacement {
    /// Spiegelt Position, Rotation und Layer und kehrt das Spiegel-Flag um.
    pub fn mirrored(self, orientation: Orientation, center: Point) -> Self {
        Self {
            position: self.position.mirrored(orientation, center),
            rotation: self.rotation.mirrored(orientation),
            layer: self.layer.mirrored(),
            mirrored: !self.mirrored,
        }
    }
}

/// Nicht durchkontaktierte Bohrung.
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Mittelpunkt
    pub position: Point,
    /// Durchmesser
    pub diameter: PositiveLength,
}
