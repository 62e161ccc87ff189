//! Board-Layer und Lagenaufbau.

use super::error::{BoardError, BoardResult};
use std::fmt;

/// Ein Layer des Boards (Kupfer- und Bestückungsebenen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardLayer {
    /// Oberste Kupferlage
    TopCopper,
    /// Innere Kupferlage (1-basiert)
    InnerCopper(u8),
    /// Unterste Kupferlage
    BottomCopper,
    /// Bestückungsdruck oben
    TopPlacement,
    /// Bestückungsdruck unten
    BottomPlacement,
    /// Bauteilnamen oben
    TopNames,
    /// Bauteilnamen unten
    BottomNames,
    /// Bauteilwerte oben
    TopValues,
    /// Bauteilwerte unten
    BottomValues,
    /// Dokumentation oben
    TopDocumentation,
    /// Dokumentation unten
    BottomDocumentation,
    /// Platinenkontur
    BoardOutlines,
}

impl BoardLayer {
    /// `true` für alle Kupferlagen (oben, innen, unten).
    pub fn is_copper(self) -> bool {
        matches!(
            self,
            Self::TopCopper | Self::InnerCopper(_) | Self::BottomCopper
        )
    }

    /// `true` für Layer der Oberseite.
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Self::TopCopper
                | Self::TopPlacement
                | Self::TopNames
                | Self::TopValues
                | Self::TopDocumentation
        )
    }

    /// `true` für Layer der Unterseite.
    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            Self::BottomCopper
                | Self::BottomPlacement
                | Self::BottomNames
                | Self::BottomValues
                | Self::BottomDocumentation
        )
    }

    /// Gegenstück auf der anderen Seite; Innenlagen und Kontur bleiben unverändert.
    pub fn mirrored(self) -> Self {
        match self {
            Self::TopCopper => Self::BottomCopper,
            Self::BottomCopper => Self::TopCopper,
            Self::TopPlacement => Self::BottomPlacement,
            Self::BottomPlacement => Self::TopPlacement,
            Self::TopNames => Self::BottomNames,
            Self::BottomNames => Self::TopNames,
            Self::TopValues => Self::BottomValues,
            Self::BottomValues => Self::TopValues,
            Self::TopDocumentation => Self::BottomDocumentation,
            Self::BottomDocumentation => Self::TopDocumentation,
            other => other,
        }
    }

    /// Stabiler Name für die Persistenz.
    pub fn name(self) -> String {
        match self {
            Self::TopCopper => "top_cu".to_string(),
            Self::InnerCopper(n) => format!("in{n}_cu"),
            Self::BottomCopper => "bot_cu".to_string(),
            Self::TopPlacement => "top_placement".to_string(),
            Self::BottomPlacement => "bot_placement".to_string(),
            Self::TopNames => "top_names".to_string(),
            Self::BottomNames => "bot_names".to_string(),
            Self::TopValues => "top_values".to_string(),
            Self::BottomValues => "bot_values".to_string(),
            Self::TopDocumentation => "top_documentation".to_string(),
            Self::BottomDocumentation => "bot_documentation".to_string(),
            Self::BoardOutlines => "brd_outlines".to_string(),
        }
    }

    /// Parst einen Layer-Namen ohne Prüfung gegen den Lagenaufbau.
    pub fn from_name(name: &str) -> Option<Self> {
        let layer = match name {
            "top_cu" => Self::TopCopper,
            "bot_cu" => Self::BottomCopper,
            "top_placement" => Self::TopPlacement,
            "bot_placement" => Self::BottomPlacement,
            "top_names" => Self::TopNames,
            "bot_names" => Self::BottomNames,
            "top_values" => Self::TopValues,
            "bot_values" => Self::BottomValues,
            "top_documentation" => Self::TopDocumentation,
            "bot_documentation" => Self::BottomDocumentation,
            "brd_outlines" => Self::BoardOutlines,
            other => {
                let n: u8 = other.strip_prefix("in")?.strip_suffix("_cu")?.parse().ok()?;
                if n == 0 {
                    return None;
                }
                Self::InnerCopper(n)
            }
        };
        Some(layer)
    }
}

impl fmt::Display for BoardLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Lagenaufbau des Boards; bestimmt welche Innenlagen existieren.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerStack {
    /// Anzahl der inneren Kupferlagen
    pub inner_copper_layers: u8,
}

impl LayerStack {
    /// Erstellt einen Lagenaufbau mit `inner_copper_layers` Innenlagen.
    pub fn new(inner_copper_layers: u8) -> Self {
        Self {
            inner_copper_layers,
        }
    }

    /// Prüft ob der Layer im Board existiert.
    pub fn contains(&self, layer: BoardLayer) -> bool {
        match layer {
            BoardLayer::InnerCopper(n) => n >= 1 && n <= self.inner_copper_layers,
            _ => true,
        }
    }

    /// Prüft einen Layer gegen den Lagenaufbau.
    pub fn check(&self, layer: BoardLayer) -> BoardResult<BoardLayer> {
        if self.contains(layer) {
            Ok(layer)
        } else {
            Err(invalid_layer(&layer.name()))
        }
    }

    /// Löst einen Layer-Namen auf; unbekannte Namen sind ein Validierungsfehler.
    pub fn layer_by_name(&self, name: &str) -> BoardResult<BoardLayer> {
        let layer = BoardLayer::from_name(name).ok_or_else(|| invalid_layer(name))?;
        self.check(layer)
    }

    /// Alle Kupferlagen von oben nach unten.
    pub fn copper_layers(&self) -> Vec<BoardLayer> {
        let mut layers = Vec::with_capacity(self.inner_copper_layers as usize + 2);
        layers.push(BoardLayer::TopCopper);
        layers.extend((1..=self.inner_copper_layers).map(BoardLayer::InnerCopper));
        layers.push(BoardLayer::BottomCopper);
        layers
    }
}

fn invalid_layer(name: &str) -> BoardError {
    BoardError::validation(format!("invalid board layer: \"{name}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_swaps_sides_and_keeps_inner_layers() {
        assert_eq!(BoardLayer::TopCopper.mirrored(), BoardLayer::BottomCopper);
        assert_eq!(BoardLayer::BottomNames.mirrored(), BoardLayer::TopNames);
        assert_eq!(BoardLayer::InnerCopper(2).mirrored(), BoardLayer::InnerCopper(2));
        assert_eq!(BoardLayer::BoardOutlines.mirrored(), BoardLayer::BoardOutlines);
    }

    #[test]
    fn names_round_trip() {
        for layer in [
            BoardLayer::TopCopper,
            BoardLayer::InnerCopper(3),
            BoardLayer::BottomCopper,
            BoardLayer::TopDocumentation,
            BoardLayer::BoardOutlines,
        ] {
            assert_eq!(BoardLayer::from_name(&layer.name()), Some(layer));
        }
        assert_eq!(BoardLayer::from_name("in0_cu"), None);
        assert_eq!(BoardLayer::from_name("mid_cu"), None);
    }

    #[test]
    fn layer_stack_rejects_missing_inner_layer() {
        let stack = LayerStack::new(2);
        assert_eq!(stack.layer_by_name("in2_cu"), Ok(BoardLayer::InnerCopper(2)));
        let err = stack.layer_by_name("in3_cu").unwrap_err();
        assert!(err.to_string().contains("invalid board layer"));
        assert!(matches!(
            stack.layer_by_name("foo"),
            Err(BoardError::Validation(_))
        ));
        assert_eq!(stack.copper_layers().len(), 4);
    }
}
