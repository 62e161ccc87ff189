//! Handler für Bearbeitungs-Operationen auf dem Board.

use crate::app::use_cases::CmdFlipSelectedBoardItems;
use crate::app::EditorState;
use crate::core::Orientation;

/// Spiegelt die Selektion als ein Undo-Schritt.
///
/// Schlägt das Spiegeln fehl, bleibt das Board unverändert und der
/// ursprüngliche Fehler wird weitergereicht.
pub fn flip_selected(state: &mut EditorState, orientation: Orientation) -> anyhow::Result<()> {
    let command = CmdFlipSelectedBoardItems::new(state.selection.clone(), orientation);
    let EditorState { board, history, .. } = state;
    let board = board
        .as_mut()
        .ok_or_else(|| anyhow::anyhow!("Kein Board geladen"))?;
    if !history.exec_cmd(board, command)? {
        log::debug!("Spiegeln: nichts zu tun");
    }
    Ok(())
}
