//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Editor-Konfiguration, die von `app` und Tests gemeinsam
//! genutzt wird.

pub mod options;

pub use options::EditorOptions;
pub use options::{COMMAND_LOG_CAPACITY, GRID_INTERVAL_MM, MAX_UNDO_DEPTH};
