//! Handler für Selektions-Operationen.

use crate::app::selection_query::BoardSelection;
use crate::app::EditorState;

/// Ersetzt die aktuelle Selektion.
pub fn set(state: &mut EditorState, selection: BoardSelection) {
    state.selection = selection;
}

/// Selektiert alle Elemente des Boards.
pub fn select_all(state: &mut EditorState) {
    match state.board.as_ref() {
        Some(board) => state.selection = BoardSelection::select_all(board),
        None => log::debug!("Alles selektieren: kein Board geladen"),
    }
}

/// Hebt die Selektion auf.
pub fn clear(state: &mut EditorState) {
    state.selection.clear();
}
