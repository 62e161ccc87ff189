//! PCB Board Editor Library.
//! Verbindungsgraph eines Boards mit umkehrbaren Bearbeitungs-Commands.

pub mod app;
pub mod core;
pub mod shared;
pub mod xml;

pub use app::{
    BoardSelection, CmdFlipSelectedBoardItems, EditHistory, EditorCommand, EditorController,
    EditorState, UndoCommandGroup,
};
pub use core::{
    Board, BoardError, BoardLayer, BoardResult, LayerStack, Length, NetLine, NetPoint,
    NetPointAttachment, NetSegment, Orientation, Point, PositiveLength,
};
pub use shared::EditorOptions;
pub use xml::{parse_board, write_board};
