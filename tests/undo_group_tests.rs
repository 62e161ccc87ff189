mod common;

use common::{empty_board, free_point};
use pcb_board_editor::app::cmd::CmdNetSegmentAddElements;
use pcb_board_editor::app::undo::{Command, CommandState};
use pcb_board_editor::core::{BoardError, BoardLayer, NetSegment};
use pcb_board_editor::{EditHistory, UndoCommandGroup};

#[test]
fn test_group_rolls_back_when_child_fails() {
    let (mut board, signal) = empty_board();
    let segment = NetSegment::new(signal);
    let seg = segment.uuid();
    let first = free_point(&segment, BoardLayer::TopCopper, 0.0, 0.0);
    let second = free_point(&segment, BoardLayer::TopCopper, 1.0, 0.0);
    let duplicate = first.clone();
    board.add_net_segment(segment).unwrap();

    let mut group = UndoCommandGroup::new("Punkte hinzufuegen");
    for point in [first.clone(), second.clone(), duplicate] {
        let mut cmd = CmdNetSegmentAddElements::new(seg);
        cmd.add_net_point(point);
        group.append_child(cmd).expect("Kind erwartet");
    }

    let err = group
        .perform_execute(&mut board)
        .expect_err("Gruppe sollte fehlschlagen");

    assert_eq!(
        err,
        BoardError::DuplicateUuid {
            kind: "net point",
            uuid: first.uuid(),
        }
    );
    let segment = board.net_segment(seg).unwrap();
    assert_eq!(segment.net_point_count(), 0);
    assert!(!segment.contains_net_point(second.uuid()));
    assert_eq!(
        group.child_states(),
        vec![CommandState::Undone, CommandState::Undone, CommandState::Created]
    );
}

#[test]
fn test_failed_group_creates_no_history_entry() {
    let (mut board, signal) = empty_board();
    let segment = NetSegment::new(signal);
    let seg = segment.uuid();
    let point = free_point(&segment, BoardLayer::TopCopper, 0.0, 0.0);
    board.add_net_segment(segment).unwrap();

    let mut group = UndoCommandGroup::new("Punkte hinzufuegen");
    for p in [point.clone(), point] {
        let mut cmd = CmdNetSegmentAddElements::new(seg);
        cmd.add_net_point(p);
        group.append_child(cmd).unwrap();
    }

    let mut history = EditHistory::new_with_capacity(10);
    assert!(history.exec_cmd(&mut board, group).is_err());
    assert!(!history.can_undo());
    assert_eq!(board.net_segment(seg).unwrap().net_point_count(), 0);
}

#[test]
fn test_group_undo_and_redo_apply_all_children() {
    let (mut board, signal) = empty_board();
    let segment = NetSegment::new(signal);
    let seg = segment.uuid();
    let points = [
        free_point(&segment, BoardLayer::TopCopper, 0.0, 0.0),
        free_point(&segment, BoardLayer::TopCopper, 1.0, 0.0),
    ];
    board.add_net_segment(segment).unwrap();

    let mut group = UndoCommandGroup::new("Punkte hinzufuegen");
    for point in points {
        let mut cmd = CmdNetSegmentAddElements::new(seg);
        cmd.add_net_point(point);
        group.append_child(cmd).unwrap();
    }
    assert_eq!(group.child_states(), vec![CommandState::Created; 2]);

    let mut history = EditHistory::new_with_capacity(10);
    assert_eq!(history.exec_cmd(&mut board, group), Ok(true));
    assert_eq!(board.net_segment(seg).unwrap().net_point_count(), 2);
    assert_eq!(history.undo_text(), Some("Punkte hinzufuegen"));

    history.undo(&mut board).unwrap();
    assert_eq!(board.net_segment(seg).unwrap().net_point_count(), 0);
    history.redo(&mut board).unwrap();
    assert_eq!(board.net_segment(seg).unwrap().net_point_count(), 2);
}
