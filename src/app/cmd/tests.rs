use super::*;
use crate::app::history::EditHistory;
use crate::core::{
    Board, BoardError, BoardLayer, NetLine, NetPoint, NetPointAttachment, NetSegment, NetSignal,
    Point, PositiveLength, Via, ViaShape,
};
use uuid::Uuid;

fn mm(v: f64) -> PositiveLength {
    PositiveLength::from_mm(v).expect("positive Laenge erwartet")
}

/// Board mit Segment P1(0,0)–P2(10,0) auf top_cu und einem Via bei (20,0).
fn board_with_line() -> (Board, Uuid, Uuid, Uuid, Uuid, Uuid) {
    let mut board = Board::new("Test");
    let signal = NetSignal::new("N1");
    let signal_id = signal.uuid;
    board.add_net_signal(signal).unwrap();
    let via = Via::new(Point::from_mm(20.0, 0.0), ViaShape::Round, mm(0.8), mm(0.4));
    let via_id = via.uuid;
    board.add_via(via).unwrap();

    let mut segment = NetSegment::new(signal_id);
    let p1 = NetPoint::new(segment.uuid(), BoardLayer::TopCopper, Point::from_mm(0.0, 0.0), NetPointAttachment::None);
    let p2 = NetPoint::new(segment.uuid(), BoardLayer::TopCopper, Point::from_mm(10.0, 0.0), NetPointAttachment::None);
    let line = NetLine::new(&p1, &p2, BoardLayer::TopCopper, mm(2.0)).unwrap();
    let ids = (segment.uuid(), p1.uuid(), p2.uuid(), line.uuid());
    segment.add_elements(vec![p1, p2], vec![line]).unwrap();
    board.add_net_segment(segment).unwrap();
    (board, ids.0, ids.1, ids.2, ids.3, via_id)
}

#[test]
fn test_net_point_edit_undo_restores_position_and_line() {
    let (mut board, seg, p1, _, line, _) = board_with_line();
    let mut history = EditHistory::new_with_capacity(10);

    let mut cmd = CmdNetPointEdit::new(&board, seg, p1).unwrap();
    cmd.set_position(Point::from_mm(0.0, 4.0));
    cmd.set_layer(BoardLayer::BottomCopper);
    assert_eq!(history.exec_cmd(&mut board, cmd), Ok(true));

    let segment = board.net_segment(seg).unwrap();
    let point = segment.get_net_point_by_uuid(p1).unwrap();
    assert_eq!(point.position(), Point::from_mm(0.0, 4.0));
    assert_eq!(point.layer(), BoardLayer::BottomCopper);
    assert_eq!(
        segment.get_net_line_by_uuid(line).unwrap().position(),
        Point::from_mm(5.0, 2.0)
    );

    history.undo(&mut board).unwrap();
    let segment = board.net_segment(seg).unwrap();
    let point = segment.get_net_point_by_uuid(p1).unwrap();
    assert_eq!(point.position(), Point::ORIGIN);
    assert_eq!(point.layer(), BoardLayer::TopCopper);
    assert_eq!(
        segment.get_net_line_by_uuid(line).unwrap().position(),
        Point::from_mm(5.0, 0.0)
    );
}

#[test]
fn test_net_point_attach_and_detach_round_trip() {
    let (mut board, seg, _, p2, _, via) = board_with_line();
    let mut history = EditHistory::new_with_capacity(10);

    let mut cmd = CmdNetPointEdit::new(&board, seg, p2).unwrap();
    cmd.set_attachment(NetPointAttachment::Via(via));
    history.exec_cmd(&mut board, cmd).unwrap();
    let point = board
        .net_segment(seg)
        .unwrap()
        .get_net_point_by_uuid(p2)
        .unwrap()
        .clone();
    assert_eq!(point.via(), Some(via));
    assert_eq!(point.position(), Point::from_mm(20.0, 0.0));

    history.undo(&mut board).unwrap();
    let point = board.net_segment(seg).unwrap().get_net_point_by_uuid(p2).unwrap();
    assert!(!point.is_attached());
    assert_eq!(point.position(), Point::from_mm(10.0, 0.0));
}

#[test]
fn test_unchanged_edit_reports_no_modification() {
    let (mut board, seg, p1, ..) = board_with_line();
    let cmd = CmdNetPointEdit::new(&board, seg, p1).unwrap();
    let mut history = EditHistory::new_with_capacity(10);
    assert_eq!(history.exec_cmd(&mut board, cmd), Ok(false));
    assert!(!history.can_undo());
}

#[test]
fn test_failed_point_edit_leaves_point_unchanged() {
    let (mut board, seg, p1, ..) = board_with_line();
    let mut cmd = CmdNetPointEdit::new(&board, seg, p1).unwrap();
    cmd.set_layer(BoardLayer::BottomCopper);
    cmd.set_attachment(NetPointAttachment::Via(Uuid::new_v4()));
    let mut history = EditHistory::new_with_capacity(10);
    assert!(matches!(
        history.exec_cmd(&mut board, cmd),
        Err(BoardError::Reference { kind: "via", .. })
    ));
    let point = board.net_segment(seg).unwrap().get_net_point_by_uuid(p1).unwrap();
    assert_eq!(point.layer(), BoardLayer::TopCopper);
}

#[test]
fn test_remove_elements_undo_restores_registrations() {
    let (mut board, seg, p1, p2, line, _) = board_with_line();
    let mut history = EditHistory::new_with_capacity(10);

    let mut cmd = CmdNetSegmentRemoveElements::new(seg);
    cmd.remove_net_line(line);
    cmd.remove_net_point(p1);
    history.exec_cmd(&mut board, cmd).unwrap();
    let segment = board.net_segment(seg).unwrap();
    assert!(!segment.contains_net_point(p1));
    assert!(!segment.get_net_point_by_uuid(p2).unwrap().is_used());

    history.undo(&mut board).unwrap();
    let segment = board.net_segment(seg).unwrap();
    assert!(segment.contains_net_line(line));
    assert!(segment.get_net_point_by_uuid(p1).unwrap().net_lines().contains(&line));

    history.redo(&mut board).unwrap();
    assert!(!board.net_segment(seg).unwrap().contains_net_line(line));
}

#[test]
fn test_add_elements_undo_removes_them() {
    let (mut board, seg, _, p2, _, _) = board_with_line();
    let mut history = EditHistory::new_with_capacity(10);

    let p3 = NetPoint::new(seg, BoardLayer::TopCopper, Point::from_mm(10.0, 5.0), NetPointAttachment::None);
    let p2_ref = board.net_segment(seg).unwrap().get_net_point_by_uuid(p2).unwrap();
    let l2 = NetLine::new(p2_ref, &p3, BoardLayer::TopCopper, mm(0.5)).unwrap();
    let mut cmd = CmdNetSegmentAddElements::new(seg);
    let p3_id = cmd.add_net_point(p3);
    let l2_id = cmd.add_net_line(l2);
    history.exec_cmd(&mut board, cmd).unwrap();
    assert_eq!(board.net_segment(seg).unwrap().net_line_count(), 2);

    history.undo(&mut board).unwrap();
    let segment = board.net_segment(seg).unwrap();
    assert!(!segment.contains_net_point(p3_id));
    assert!(!segment.contains_net_line(l2_id));
    assert_eq!(segment.get_net_point_by_uuid(p2).unwrap().net_lines().len(), 1);

    history.redo(&mut board).unwrap();
    assert!(board.net_segment(seg).unwrap().contains_net_line(l2_id));
}

#[test]
fn test_segment_add_undo_takes_segment_back() {
    let (mut board, _, _, _, _, _) = board_with_line();
    let signal = board.net_signals().next().unwrap().uuid;
    let mut segment = NetSegment::new(signal);
    let p = NetPoint::new(segment.uuid(), BoardLayer::BottomCopper, Point::ORIGIN, NetPointAttachment::None);
    segment.add_elements(vec![p], vec![]).unwrap();
    let seg_id = segment.uuid();

    let mut history = EditHistory::new_with_capacity(10);
    history.exec_cmd(&mut board, CmdNetSegmentAdd::new(segment)).unwrap();
    assert_eq!(board.net_segment_count(), 2);

    history.undo(&mut board).unwrap();
    assert_eq!(board.net_segment_count(), 1);
    assert!(board.net_segment(seg_id).is_err());

    history.redo(&mut board).unwrap();
    assert!(board.net_segment(seg_id).unwrap().is_added_to_board());
}

#[test]
fn test_segment_remove_and_readd() {
    let (mut board, seg, ..) = board_with_line();
    let mut history = EditHistory::new_with_capacity(10);
    history
        .exec_cmd(&mut board, CmdNetSegmentRemove::new(seg))
        .unwrap();
    assert_eq!(board.net_segment_count(), 0);
    history
        .exec_cmd(&mut board, CmdNetSegmentAdd::re_add(seg))
        .unwrap();
    assert_eq!(board.net_segment_count(), 1);
    history.undo(&mut board).unwrap();
    history.undo(&mut board).unwrap();
    assert!(board.net_segment(seg).unwrap().is_added_to_board());
}

#[test]
fn test_via_edit_moves_attached_point_and_undoes() {
    let (mut board, seg, _, p2, line, via) = board_with_line();
    let mut history = EditHistory::new_with_capacity(10);
    let mut attach = CmdNetPointEdit::new(&board, seg, p2).unwrap();
    attach.set_attachment(NetPointAttachment::Via(via));
    history.exec_cmd(&mut board, attach).unwrap();

    let mut cmd = CmdViaEdit::new(&board, via).unwrap();
    cmd.set_position(Point::from_mm(20.0, 10.0));
    history.exec_cmd(&mut board, cmd).unwrap();
    let l = board.net_segment(seg).unwrap().get_net_line_by_uuid(line).unwrap();
    assert_eq!(l.end_position(), Point::from_mm(20.0, 10.0));

    history.undo(&mut board).unwrap();
    let l = board.net_segment(seg).unwrap().get_net_line_by_uuid(line).unwrap();
    assert_eq!(l.end_position(), Point::from_mm(20.0, 0.0));
}

#[test]
fn test_net_line_edit_rejects_non_copper() {
    let (mut board, seg, _, _, line, _) = board_with_line();
    let mut cmd = CmdNetLineEdit::new(&board, seg, line).unwrap();
    cmd.set_layer(BoardLayer::TopPlacement);
    cmd.set_width(mm(0.1));
    let mut history = EditHistory::new_with_capacity(10);
    assert!(matches!(
        history.exec_cmd(&mut board, cmd),
        Err(BoardError::Validation(_))
    ));
    let l = board.net_segment(seg).unwrap().get_net_line_by_uuid(line).unwrap();
    assert_eq!(l.width(), mm(2.0));
}
