//! Editor Controller für zentrale Command-Verarbeitung.

use super::{EditorCommand, EditorState};

/// Wendet EditorCommands über die Feature-Handler auf den EditorState an.
#[derive(Default)]
pub struct EditorController;

impl EditorController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Führt einen Command auf dem EditorState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut EditorState,
        command: EditorCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            EditorCommand::NewBoard { name } => handlers::file_io::new_board(state, name),
            EditorCommand::LoadBoard { path } => handlers::file_io::load(state, path)?,
            EditorCommand::SaveBoard { path } => handlers::file_io::save(state, path)?,

            // === Selektion ===
            EditorCommand::SetSelection { selection } => handlers::selection::set(state, selection),
            EditorCommand::SelectAll => handlers::selection::select_all(state),
            EditorCommand::ClearSelection => handlers::selection::clear(state),

            // === Editing ===
            EditorCommand::FlipSelected { orientation } => {
                handlers::editing::flip_selected(state, orientation)?
            }

            // === History ===
            EditorCommand::Undo => handlers::history::undo(state)?,
            EditorCommand::Redo => handlers::history::redo(state)?,

            // === Optionen ===
            EditorCommand::ApplyOptions { options } => handlers::options::apply(state, options),
        }

        Ok(())
    }
}
