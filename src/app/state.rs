//! Application State: zentrale Datenhaltung einer Editor-Sitzung.

use super::history::EditHistory;
use super::selection_query::BoardSelection;
use super::CommandLog;
use crate::core::Board;
use crate::shared::EditorOptions;

/// Hauptzustand einer Editor-Sitzung
pub struct EditorState {
    /// Aktuell geladenes Board (None = kein Board geöffnet)
    pub board: Option<Board>,
    /// Aktuelle Selektion
    pub selection: BoardSelection,
    /// Undo/Redo-History (Command-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Pfad der zuletzt geladenen oder gespeicherten Datei
    pub current_file_path: Option<String>,
}

impl EditorState {
    /// Erstellt einen neuen, leeren State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren State mit den gegebenen Optionen
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            board: None,
            selection: BoardSelection::default(),
            history: EditHistory::new_with_capacity(options.max_undo_depth),
            command_log: CommandLog::with_capacity(options.command_log_capacity),
            options,
            current_file_path: None,
        }
    }

    /// Gibt zurück, ob ein Undo-Schritt verfügbar ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
