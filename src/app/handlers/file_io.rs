//! Handler für Datei-Operationen (Neu, Laden, Speichern).

use crate::app::EditorState;
use crate::core::{Board, LayerStack};
use anyhow::Context;
use uuid::Uuid;

/// Legt ein leeres Board mit Lagenaufbau und Raster aus den Optionen an.
pub fn new_board(state: &mut EditorState, name: String) {
    let mut board = Board::with_uuid(
        Uuid::new_v4(),
        name,
        LayerStack::new(state.options.inner_copper_layers),
    );
    if let Some(interval) = state.options.grid_interval() {
        board.set_grid_interval(interval);
    }
    log::info!("Neues Board angelegt: \"{}\"", board.name());
    replace_board(state, board, None);
}

/// Lädt ein Board aus dem übergebenen Pfad.
///
/// Selektion und Undo-History werden verworfen.
pub fn load(state: &mut EditorState, path: String) -> anyhow::Result<()> {
    let xml_content =
        std::fs::read_to_string(&path).with_context(|| format!("Datei nicht lesbar: {path}"))?;
    let board = crate::xml::parse_board(&xml_content)
        .with_context(|| format!("Board-Datei fehlerhaft: {path}"))?;
    replace_board(state, board, Some(path));
    Ok(())
}

/// Speichert das Board unter `path` oder dem zuletzt benutzten Pfad.
pub fn save(state: &mut EditorState, path: Option<String>) -> anyhow::Result<()> {
    let path = path
        .or_else(|| state.current_file_path.clone())
        .ok_or_else(|| anyhow::anyhow!("Kein Speicherpfad bekannt"))?;
    let board = state
        .board
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Kein Board geladen"))?;
    let xml_content = crate::xml::write_board(board);
    std::fs::write(&path, xml_content).with_context(|| format!("Speichern fehlgeschlagen: {path}"))?;
    log::info!("Board gespeichert: {}", path);
    state.current_file_path = Some(path);
    Ok(())
}

fn replace_board(state: &mut EditorState, board: Board, path: Option<String>) {
    state.board = Some(board);
    state.selection.clear();
    state.history.clear();
    state.current_file_path = path;
}
