//! Durchkontaktierung (Via): Anker für Netzpunkte auf beliebigen Kupferlagen.

use super::geometry::{Path, Point, PositiveLength};
use uuid::Uuid;

/// Form des Via-Restrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViaShape {
    /// Rund
    #[default]
    Round,
    /// Quadratisch
    Square,
    /// Achteckig
    Octagon,
}

impl ViaShape {
    /// Stabiler Name für die Persistenz.
    pub fn name(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Square => "square",
            Self::Octagon => "octagon",
        }
    }

    /// Parst einen persistierten Namen.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "round" => Some(Self::Round),
            "square" => Some(Self::Square),
            "octagon" => Some(Self::Octagon),
            _ => None,
        }
    }
}

/// Eine Durchkontaktierung.
#[derive(Debug, Clone, PartialEq)]
pub struct Via {
    /// Eindeutige ID
    pub uuid: Uuid,
    /// Mittelpunkt
    pub position: Point,
    /// Form des Restrings
    pub shape: ViaShape,
    /// Außendurchmesser
    pub size: PositiveLength,
    /// Bohrdurchmesser
    pub drill: PositiveLength,
}

impl Via {
    /// Erstellt ein Via mit zufälliger UUID.
    pub fn new(position: Point, shape: ViaShape, size: PositiveLength, drill: PositiveLength) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            position,
            shape,
            size,
            drill,
        }
    }

    /// Kreisförmige Außenkontur (für alle Formen angenähert).
    pub fn outline(&self) -> Path {
        Path::circle(self.position, self.size)
    }
}
