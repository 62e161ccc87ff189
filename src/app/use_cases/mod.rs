//! Use-Cases der Application-Layer-Orchestrierung.

pub mod flip_selected;

pub use flip_selected::CmdFlipSelectedBoardItems;
