//! Handler für das Übernehmen geänderter Optionen.

use crate::app::EditorState;
use crate::shared::EditorOptions;

/// Übernimmt neue Optionen für History und Command-Log.
///
/// Rasterweite und Lagenaufbau gelten erst für neu angelegte Boards.
pub fn apply(state: &mut EditorState, options: EditorOptions) {
    state.history.set_max_depth(options.max_undo_depth);
    state.command_log.set_capacity(options.command_log_capacity);
    state.options = options;
    log::info!("Optionen uebernommen");
}
