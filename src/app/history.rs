use super::undo::{Command, UndoCommand};
use crate::core::{Board, BoardResult};

/// Undo/Redo-Manager über ausgeführte Commands.
///
/// Nur Commands, die das Board tatsächlich verändert haben, landen auf dem
/// Undo-Stack; ein neuer Command leert den Redo-Stack.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<UndoCommand>,
    redo_stack: Vec<UndoCommand>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Führt einen Command aus und zeichnet ihn auf, falls er etwas geändert hat.
    pub fn exec_cmd(
        &mut self,
        board: &mut Board,
        command: impl Command + 'static,
    ) -> BoardResult<bool> {
        let mut command = UndoCommand::new(command);
        if !command.execute(board)? {
            log::debug!("\"{}\" ohne Aenderung, kein Undo-Eintrag", command.text());
            return Ok(false);
        }
        log::info!("\"{}\" ausgefuehrt", command.text());
        if self.max_depth > 0 && self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(true)
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Text des nächsten Undo-Schritts.
    pub fn undo_text(&self) -> Option<&str> {
        self.undo_stack.last().map(UndoCommand::text)
    }

    /// Text des nächsten Redo-Schritts.
    pub fn redo_text(&self) -> Option<&str> {
        self.redo_stack.last().map(UndoCommand::text)
    }

    /// Anzahl der Undo-Schritte.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Macht den letzten Command rückgängig. Gibt `false` zurück, wenn nichts zu tun war.
    ///
    /// Scheitert das Undo, bleibt der Command oben auf dem Undo-Stack.
    pub fn undo(&mut self, board: &mut Board) -> BoardResult<bool> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.undo(board) {
            log::error!("Undo von \"{}\" fehlgeschlagen: {err}", command.text());
            self.undo_stack.push(command);
            return Err(err);
        }
        log::info!("Undo: \"{}\"", command.text());
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Stellt den zuletzt rückgängig gemachten Command wieder her.
    ///
    /// Scheitert das Redo, bleibt der Command oben auf dem Redo-Stack.
    pub fn redo(&mut self, board: &mut Board) -> BoardResult<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(err) = command.redo(board) {
            log::error!("Redo von \"{}\" fehlgeschlagen: {err}", command.text());
            self.redo_stack.push(command);
            return Err(err);
        }
        log::info!("Redo: \"{}\"", command.text());
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Verwirft alle Einträge (z.B. nach dem Laden eines Boards).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Setzt die maximale Tiefe und verwirft überzählige alte Einträge.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        if max_depth > 0 && self.undo_stack.len() > max_depth {
            let excess = self.undo_stack.len() - max_depth;
            self.undo_stack.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardError, Length, PositiveLength};

    struct SetGrid(Length, Option<Length>);

    impl Command for SetGrid {
        fn text(&self) -> &str {
            "Raster setzen"
        }

        fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
            let old = board.grid_interval();
            self.1 = Some(old);
            self.perform_redo(board)?;
            Ok(old != self.0)
        }

        fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
            let old = self.1.ok_or_else(|| BoardError::logic("kein alter Wert"))?;
            board.set_grid_interval(PositiveLength::new(old)?);
            Ok(())
        }

        fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
            board.set_grid_interval(PositiveLength::new(self.0)?);
            Ok(())
        }
    }

    /// Scheitert beim Undo oder Redo, solange `fail` gesetzt ist.
    struct Flaky {
        fail: std::rc::Rc<std::cell::Cell<bool>>,
    }

    impl Command for Flaky {
        fn text(&self) -> &str {
            "Wackelig"
        }

        fn perform_execute(&mut self, _board: &mut Board) -> BoardResult<bool> {
            Ok(true)
        }

        fn perform_undo(&mut self, _board: &mut Board) -> BoardResult<()> {
            if self.fail.get() {
                return Err(BoardError::logic("Undo gescheitert"));
            }
            Ok(())
        }

        fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
            self.perform_undo(board)
        }
    }

    fn grid(nm: i64) -> SetGrid {
        SetGrid(Length::from_nm(nm), None)
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn exec_enables_undo() {
        let mut board = Board::new("Test");
        let mut history = EditHistory::new_with_capacity(10);
        assert_eq!(history.exec_cmd(&mut board, grid(100)), Ok(true));
        assert!(history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_text(), Some("Raster setzen"));
    }

    #[test]
    fn unchanged_command_is_not_recorded() {
        let mut board = Board::new("Test");
        let mut history = EditHistory::new_with_capacity(10);
        let current = board.grid_interval().to_nm();
        assert_eq!(history.exec_cmd(&mut board, grid(current)), Ok(false));
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_and_redo_restore_board() {
        let mut board = Board::new("Test");
        let before = board.grid_interval();
        let mut history = EditHistory::new_with_capacity(10);
        history.exec_cmd(&mut board, grid(100)).unwrap();

        assert_eq!(history.undo(&mut board), Ok(true));
        assert_eq!(board.grid_interval(), before);
        assert!(history.can_redo());
        assert_eq!(history.redo_text(), Some("Raster setzen"));

        assert_eq!(history.redo(&mut board), Ok(true));
        assert_eq!(board.grid_interval(), Length::from_nm(100));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_command_clears_redo_stack() {
        let mut board = Board::new("Test");
        let mut history = EditHistory::new_with_capacity(10);
        history.exec_cmd(&mut board, grid(100)).unwrap();
        history.undo(&mut board).unwrap();
        assert!(history.can_redo());

        history.exec_cmd(&mut board, grid(300)).unwrap();
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut board = Board::new("Test");
        let mut history = EditHistory::new_with_capacity(3);
        for i in 1..=5 {
            history.exec_cmd(&mut board, grid(i * 100)).unwrap();
        }

        // Nur 3 Undo-Schritte sollten möglich sein
        let mut undo_count = 0;
        while history.undo(&mut board).unwrap() {
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
        assert_eq!(board.grid_interval(), Length::from_nm(200));
    }

    #[test]
    fn failed_undo_and_redo_keep_command_on_stack() {
        let mut board = Board::new("Test");
        let mut history = EditHistory::new_with_capacity(10);
        let fail = std::rc::Rc::new(std::cell::Cell::new(true));
        history
            .exec_cmd(&mut board, Flaky { fail: fail.clone() })
            .expect("Ausfuehrung erwartet");

        assert!(history.undo(&mut board).is_err_and(|e| e.is_logic_error()));
        assert_eq!(history.undo_text(), Some("Wackelig"));
        assert!(!history.can_redo());

        // Erneuter Versuch gelingt
        fail.set(false);
        assert_eq!(history.undo(&mut board), Ok(true));
        assert_eq!(history.redo_text(), Some("Wackelig"));

        fail.set(true);
        assert!(history.redo(&mut board).is_err());
        assert_eq!(history.redo_text(), Some("Wackelig"));
        assert!(!history.can_undo());
    }
}
