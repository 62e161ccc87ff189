//! Undo/Redo-Engine: reversible Commands und transaktionale Command-Gruppen.
//!
//! Jeder Command mutiert das Board nur über `&mut Board`; damit ist während
//! der Ausführung keine zweite Mutation möglich.

mod group;

pub use group::UndoCommandGroup;

use crate::core::{Board, BoardError, BoardResult};

/// Lebenszyklus eines Commands: `Created → Executed ⇄ Undone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    /// Noch nicht (erfolgreich) ausgeführt
    #[default]
    Created,
    /// Ausgeführt bzw. wiederhergestellt
    Executed,
    /// Rückgängig gemacht
    Undone,
}

/// Eine reversible Änderung am Board.
///
/// `perform_undo` darf nach erfolgreichem `perform_execute` nicht fehlschlagen;
/// ein Fehler dort gilt als Programmierfehler.
pub trait Command {
    /// Anzeigetext für die Undo-Historie.
    fn text(&self) -> &str;

    /// Führt den Command aus. Gibt zurück ob sich etwas geändert hat.
    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool>;

    /// Nimmt die Änderung zurück.
    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()>;

    /// Stellt die Änderung nach einem Undo wieder her.
    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()>;
}

/// Hülle um einen Command, die den Zustandsautomaten erzwingt.
pub struct UndoCommand {
    inner: Box<dyn Command>,
    state: CommandState,
    modified: bool,
}

impl UndoCommand {
    /// Verpackt einen Command im Zustand `Created`.
    pub fn new(command: impl Command + 'static) -> Self {
        Self::from_boxed(Box::new(command))
    }

    /// Verpackt einen bereits geboxten Command.
    pub fn from_boxed(inner: Box<dyn Command>) -> Self {
        Self {
            inner,
            state: CommandState::Created,
            modified: false,
        }
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// Anzeigetext des Commands.
    pub fn text(&self) -> &str {
        self.inner.text()
    }

    /// `true` wenn die Ausführung etwas geändert hat.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Führt den Command genau einmal aus.
    ///
    /// Schlägt die Ausführung fehl, bleibt der Zustand `Created`.
    pub fn execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        if self.state != CommandState::Created {
            return Err(self.wrong_state("execute"));
        }
        let modified = self.inner.perform_execute(board)?;
        self.modified = modified;
        self.state = CommandState::Executed;
        Ok(modified)
    }

    /// Macht einen ausgeführten Command rückgängig.
    pub fn undo(&mut self, board: &mut Board) -> BoardResult<()> {
        if self.state != CommandState::Executed {
            return Err(self.wrong_state("undo"));
        }
        self.inner.perform_undo(board)?;
        self.state = CommandState::Undone;
        Ok(())
    }

    /// Stellt einen rückgängig gemachten Command wieder her.
    pub fn redo(&mut self, board: &mut Board) -> BoardResult<()> {
        if self.state != CommandState::Undone {
            return Err(self.wrong_state("redo"));
        }
        self.inner.perform_redo(board)?;
        self.state = CommandState::Executed;
        Ok(())
    }

    fn wrong_state(&self, action: &str) -> BoardError {
        BoardError::logic(format!(
            "{action} von \"{}\" im Zustand {:?} nicht erlaubt",
            self.inner.text(),
            self.state
        ))
    }
}
