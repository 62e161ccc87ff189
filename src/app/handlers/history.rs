//! Handler für Undo/Redo-Operationen.

use crate::app::EditorState;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut EditorState) -> anyhow::Result<()> {
    let EditorState { board, history, .. } = state;
    let Some(board) = board.as_mut() else {
        log::debug!("Undo: kein Board geladen");
        return Ok(());
    };
    if !history.undo(board)? {
        log::debug!("Undo: nichts zu tun");
    }
    Ok(())
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut EditorState) -> anyhow::Result<()> {
    let EditorState { board, history, .. } = state;
    let Some(board) = board.as_mut() else {
        log::debug!("Redo: kein Board geladen");
        return Ok(());
    };
    if !history.redo(board)? {
        log::debug!("Redo: nichts zu tun");
    }
    Ok(())
}
