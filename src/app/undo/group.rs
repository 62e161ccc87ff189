//! Transaktionale Gruppe von Commands.

use super::{Command, CommandState, UndoCommand};
use crate::core::{Board, BoardError, BoardResult};

/// Führt Kind-Commands der Reihe nach als eine Einheit aus.
///
/// Schlägt ein Kind fehl, werden alle bereits ausgeführten Kinder in
/// umgekehrter Reihenfolge rückgängig gemacht und der ursprüngliche Fehler
/// weitergereicht.
pub struct UndoCommandGroup {
    text: String,
    children: Vec<UndoCommand>,
}

impl UndoCommandGroup {
    /// Erstellt eine leere Gruppe.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Hängt ein Kind an, das beim Ausführen der Gruppe ausgeführt wird.
    pub fn append_child(&mut self, command: impl Command + 'static) -> BoardResult<()> {
        if self
            .children
            .iter()
            .any(|child| child.state() != CommandState::Created)
        {
            return Err(BoardError::logic(format!(
                "Gruppe \"{}\" wurde bereits ausgefuehrt",
                self.text
            )));
        }
        self.children.push(UndoCommand::new(command));
        Ok(())
    }

    /// Führt ein neues Kind sofort aus und behält es nur, wenn es etwas geändert hat.
    pub fn exec_new_child_cmd(
        &mut self,
        board: &mut Board,
        command: impl Command + 'static,
    ) -> BoardResult<bool> {
        let mut child = UndoCommand::new(command);
        if child.execute(board)? {
            self.children.push(child);
            Ok(true)
        } else {
            log::debug!("Command \"{}\" ohne Aenderung verworfen", child.text());
            Ok(false)
        }
    }

    /// Anzahl der Kinder.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Zustände aller Kinder in Reihenfolge.
    pub fn child_states(&self) -> Vec<CommandState> {
        self.children.iter().map(UndoCommand::state).collect()
    }

    /// Macht alle ausgeführten Kinder in umgekehrter Reihenfolge rückgängig.
    ///
    /// Fehler werden protokolliert, die übrigen Kinder trotzdem zurückgerollt.
    pub fn rollback(&mut self, board: &mut Board) {
        for child in self.children.iter_mut().rev() {
            if child.state() != CommandState::Executed {
                continue;
            }
            if let Err(err) = child.undo(board) {
                log::error!("Rollback von \"{}\" fehlgeschlagen: {err}", child.text());
            }
        }
    }
}

impl Command for UndoCommandGroup {
    fn text(&self) -> &str {
        &self.text
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        let mut modified = false;
        for index in 0..self.children.len() {
            match self.children[index].execute(board) {
                Ok(changed) => modified |= changed,
                Err(err) => {
                    log::warn!(
                        "\"{}\" abgebrochen bei \"{}\": {err}",
                        self.text,
                        self.children[index].text()
                    );
                    self.rollback(board);
                    return Err(err);
                }
            }
        }
        Ok(modified)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        for child in self.children.iter_mut().rev() {
            if let Err(err) = child.undo(board) {
                log::error!("Undo von \"{}\" fehlgeschlagen: {err}", child.text());
                return Err(BoardError::logic(format!(
                    "Undo von \"{}\" fehlgeschlagen: {err}",
                    child.text()
                )));
            }
        }
        Ok(())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        for child in self.children.iter_mut() {
            if let Err(err) = child.redo(board) {
                log::error!("Redo von \"{}\" fehlgeschlagen: {err}", child.text());
                return Err(BoardError::logic(format!(
                    "Redo von \"{}\" fehlgeschlagen: {err}",
                    child.text()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Protokolliert Aufrufe in einer gemeinsamen Liste.
    struct Probe {
        name: &'static str,
        fail: bool,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Command for Probe {
        fn text(&self) -> &str {
            self.name
        }

        fn perform_execute(&mut self, _board: &mut Board) -> BoardResult<bool> {
            if self.fail {
                return Err(BoardError::validation(self.name));
            }
            self.calls.borrow_mut().push(format!("exec {}", self.name));
            Ok(true)
        }

        fn perform_undo(&mut self, _board: &mut Board) -> BoardResult<()> {
            self.calls.borrow_mut().push(format!("undo {}", self.name));
            Ok(())
        }

        fn perform_redo(&mut self, _board: &mut Board) -> BoardResult<()> {
            self.calls.borrow_mut().push(format!("redo {}", self.name));
            Ok(())
        }
    }

    fn probe(name: &'static str, fail: bool, calls: &Rc<RefCell<Vec<String>>>) -> Probe {
        Probe {
            name,
            fail,
            calls: Rc::clone(calls),
        }
    }

    #[test]
    fn failing_child_rolls_back_in_reverse_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut group = UndoCommandGroup::new("Gruppe");
        group.append_child(probe("a", false, &calls)).unwrap();
        group.append_child(probe("b", false, &calls)).unwrap();
        group.append_child(probe("c", true, &calls)).unwrap();

        let mut cmd = UndoCommand::new(group);
        let mut board = Board::new("Test");
        let err = cmd.execute(&mut board).unwrap_err();

        assert_eq!(err, BoardError::validation("c"));
        assert_eq!(cmd.state(), CommandState::Created);
        assert_eq!(
            *calls.borrow(),
            vec!["exec a", "exec b", "undo b", "undo a"]
        );
    }

    #[test]
    fn undo_and_redo_iterate_in_opposite_directions() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut group = UndoCommandGroup::new("Gruppe");
        group.append_child(probe("a", false, &calls)).unwrap();
        group.append_child(probe("b", false, &calls)).unwrap();
        let mut cmd = UndoCommand::new(group);
        let mut board = Board::new("Test");

        assert_eq!(cmd.execute(&mut board), Ok(true));
        cmd.undo(&mut board).unwrap();
        cmd.redo(&mut board).unwrap();
        assert_eq!(
            *calls.borrow(),
            vec!["exec a", "exec b", "undo b", "undo a", "redo a", "redo b"]
        );
    }

    #[test]
    fn append_after_execute_is_logic_error() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut board = Board::new("Test");
        let mut group = UndoCommandGroup::new("Gruppe");
        group
            .exec_new_child_cmd(&mut board, probe("a", false, &calls))
            .unwrap();
        assert_eq!(group.child_states(), vec![CommandState::Executed]);
        assert!(group
            .append_child(probe("b", false, &calls))
            .unwrap_err()
            .is_logic_error());
    }

    #[test]
    fn empty_group_reports_no_modification() {
        let mut cmd = UndoCommand::new(UndoCommandGroup::new("Leer"));
        let mut board = Board::new("Test");
        assert_eq!(cmd.execute(&mut board), Ok(false));
    }
}
