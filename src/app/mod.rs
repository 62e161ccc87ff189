//! Application-Layer: Controller, State, Commands und Use-Cases.

pub mod cmd;
pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
pub mod selection_query;
/// Application State
///
/// Dieses Modul verwaltet den Zustand einer Sitzung (Board, Selektion, History).
pub mod state;
pub mod undo;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::EditorController;
pub use events::EditorCommand;
pub use history::EditHistory;
pub use selection_query::{
    BoardSelection, BoardSelectionQuery, NetLineFilter, NetPointFilter, SelectedItems,
};
pub use state::EditorState;
pub use undo::{Command, UndoCommand, UndoCommandGroup};
pub use use_cases::CmdFlipSelectedBoardItems;
