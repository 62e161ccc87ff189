//! EditorCommand-Enum für den Command-Datenfluss.

use super::selection_query::BoardSelection;
use crate::core::Orientation;
use crate::shared::EditorOptions;

/// Mutierende Commands, die der Controller auf den State anwendet.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Neues, leeres Board mit den aktuellen Optionen anlegen
    NewBoard {
        /// Anzeigename
        name: String,
    },
    /// Board aus Datei laden
    LoadBoard {
        /// Dateipfad
        path: String,
    },
    /// Board speichern (`None` = unter dem zuletzt benutzten Pfad)
    SaveBoard {
        /// Optionaler neuer Dateipfad
        path: Option<String>,
    },
    /// Selektion ersetzen
    SetSelection {
        /// Neue (aufgelöste) Selektion
        selection: BoardSelection,
    },
    /// Alles selektieren
    SelectAll,
    /// Selektion aufheben
    ClearSelection,
    /// Selektion auf die andere Board-Seite spiegeln
    FlipSelected {
        /// Spiegelachse
        orientation: Orientation,
    },
    /// Letzten Schritt rückgängig machen
    Undo,
    /// Rückgängig gemachten Schritt wiederholen
    Redo,
    /// Optionen übernehmen
    ApplyOptions {
        /// Neue Optionen
        options: EditorOptions,
    },
}
