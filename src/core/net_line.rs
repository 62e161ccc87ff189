//! Netzlinie: Kupferverbindung zwischen zwei Netzpunkten desselben Segments.

use super::error::{BoardError, BoardResult};
use super::geometry::{Length, Path, Point, PositiveLength};
use super::layer::BoardLayer;
use super::net_point::NetPoint;
use uuid::Uuid;

/// Eine Netzlinie zwischen zwei Netzpunkten.
///
/// Die Endpunkt-Positionen und der Mittelpunkt werden gecacht und über
/// [`NetLine::update_geometry`] nachgeführt, sobald sich ein Endpunkt bewegt.
#[derive(Debug, Clone, PartialEq)]
pub struct NetLine {
    uuid: Uuid,
    segment: Uuid,
    start: Uuid,
    end: Uuid,
    layer: BoardLayer,
    width: PositiveLength,
    start_position: Point,
    end_position: Point,
    position: Point,
}

impl NetLine {
    /// Erstellt eine neue Netzlinie mit zufälliger UUID.
    pub fn new(
        start: &NetPoint,
        end: &NetPoint,
        layer: BoardLayer,
        width: PositiveLength,
    ) -> BoardResult<Self> {
        Self::with_uuid(Uuid::new_v4(), start, end, layer, width)
    }

    /// Erstellt eine Netzlinie mit vorgegebener UUID.
    ///
    /// Fehler: Endpunkte in verschiedenen Segmenten, Nicht-Kupfer-Layer oder
    /// identische Endpunkte.
    pub fn with_uuid(
        uuid: Uuid,
        start: &NetPoint,
        end: &NetPoint,
        layer: BoardLayer,
        width: PositiveLength,
    ) -> BoardResult<Self> {
        if start.segment() != end.segment() {
            return Err(BoardError::validation(format!(
                "Netzlinie {uuid}: Endpunkte liegen in verschiedenen Netzsegmenten"
            )));
        }
        if !layer.is_copper() {
            return Err(BoardError::validation(format!(
                "Netzlinie {uuid}: invalid board layer \"{layer}\" (kein Kupfer)"
            )));
        }
        if start.uuid() == end.uuid() {
            return Err(BoardError::validation(format!(
                "Netzlinie {uuid}: beide Endpunkte sind identisch"
            )));
        }
        let mut line = Self {
            uuid,
            segment: start.segment(),
            start: start.uuid(),
            end: end.uuid(),
            layer,
            width,
            start_position: Point::ORIGIN,
            end_position: Point::ORIGIN,
            position: Point::ORIGIN,
        };
        line.update_geometry(start.position(), end.position());
        Ok(line)
    }

    /// Neue Linie mit gleichem Layer und gleicher Breite zwischen anderen Punkten.
    pub fn copy_between(&self, start: &NetPoint, end: &NetPoint) -> BoardResult<Self> {
        Self::new(start, end, self.layer, self.width)
    }

    /// UUID der Linie.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// UUID des besitzenden Netzsegments.
    pub fn segment(&self) -> Uuid {
        self.segment
    }

    /// UUID des Startpunkts.
    pub fn start_point(&self) -> Uuid {
        self.start
    }

    /// UUID des Endpunkts.
    pub fn end_point(&self) -> Uuid {
        self.end
    }

    /// Kupferlage der Linie.
    pub fn layer(&self) -> BoardLayer {
        self.layer
    }

    /// Leiterbahnbreite.
    pub fn width(&self) -> PositiveLength {
        self.width
    }

    /// Gecachte Startposition.
    pub fn start_position(&self) -> Point {
        self.start_position
    }

    /// Gecachte Endposition.
    pub fn end_position(&self) -> Point {
        self.end_position
    }

    /// Mittelpunkt der Linie.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Der jeweils andere Endpunkt; `None` wenn `point` kein Endpunkt ist.
    pub fn other_point(&self, point: Uuid) -> Option<Uuid> {
        if point == self.start {
            Some(self.end)
        } else if point == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    /// `true` wenn `point` Start- oder Endpunkt ist.
    pub fn touches(&self, point: Uuid) -> bool {
        self.start == point || self.end == point
    }

    /// Setzt die Kupferlage; nur Kupferlagen sind erlaubt.
    pub fn set_layer(&mut self, layer: BoardLayer) -> BoardResult<bool> {
        if !layer.is_copper() {
            return Err(BoardError::validation(format!(
                "Netzlinie {}: invalid board layer \"{layer}\" (kein Kupfer)",
                self.uuid
            )));
        }
        if self.layer == layer {
            return Ok(false);
        }
        self.layer = layer;
        Ok(true)
    }

    /// Setzt die Breite.
    pub fn set_width(&mut self, width: PositiveLength) -> bool {
        if self.width == width {
            return false;
        }
        self.width = width;
        true
    }

    /// Aktualisiert die gecachte Geometrie auf Basis der Endpunkt-Positionen.
    pub fn update_geometry(&mut self, start_position: Point, end_position: Point) {
        self.start_position = start_position;
        self.end_position = end_position;
        self.position = (start_position + end_position) / 2;
    }

    /// Kontur der Linie für Hit-Tests und DRC, um `expansion` auf jeder Seite verbreitert.
    ///
    /// Ergibt eine leere Kontur, wenn die effektive Breite nicht positiv ist.
    pub fn scene_outline(&self, expansion: Length) -> Path {
        match PositiveLength::new(self.width.get() + expansion * 2) {
            Ok(width) => Path::obround(self.start_position, self.end_position, width),
            Err(_) => Path::default(),
        }
    }
}
