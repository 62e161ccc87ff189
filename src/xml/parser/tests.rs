use super::*;
use crate::core::BoardLayer;
use crate::xml::write_board;

const SIGNAL: &str = "7b0f7a0e-3c33-4a8e-9d1c-000000000001";
const SEGMENT: &str = "7b0f7a0e-3c33-4a8e-9d1c-000000000002";
const P1: &str = "7b0f7a0e-3c33-4a8e-9d1c-000000000003";
const P2: &str = "7b0f7a0e-3c33-4a8e-9d1c-000000000004";
const LINE: &str = "7b0f7a0e-3c33-4a8e-9d1c-000000000005";
const VIA: &str = "7b0f7a0e-3c33-4a8e-9d1c-000000000006";

fn board_xml(netline: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<board uuid="7b0f7a0e-3c33-4a8e-9d1c-0000000000ff" name="Test" grid="1">
  <netsignal uuid="{SIGNAL}" name="GND"/>
  <via uuid="{VIA}" x="10" y="0" shape="round" size="0.8" drill="0.4"/>
  <netsegment uuid="{SEGMENT}" netsignal="{SIGNAL}">
    <netpoint uuid="{P1}" layer="top_cu" x="0" y="0"/>
    <netpoint uuid="{P2}" layer="top_cu" x="3" y="0" via="{VIA}"/>
    {netline}
  </netsegment>
</board>"#
    )
}

fn valid_line() -> String {
    format!(r#"<netline uuid="{LINE}" layer="top_cu" width="0.25" p1="{P1}" p2="{P2}"/>"#)
}

#[test]
fn test_parse_board_with_segment() {
    let board = parse_board(&board_xml(&valid_line())).expect("Board erwartet");
    assert_eq!(board.name(), "Test");
    assert_eq!(board.grid_interval().to_mm_string(), "1");
    assert_eq!(board.net_segment_count(), 1);

    let segment = board
        .net_segment(Uuid::parse_str(SEGMENT).unwrap())
        .expect("Segment erwartet");
    let line = segment
        .get_net_line_by_uuid(Uuid::parse_str(LINE).unwrap())
        .expect("Linie erwartet");
    assert_eq!(line.layer(), BoardLayer::TopCopper);
    assert_eq!(line.width().get().to_mm_string(), "0.25");
    // Angehefteter Punkt übernimmt die Via-Position
    assert_eq!(line.end_position(), Point::from_mm(10.0, 0.0));
}

#[test]
fn test_dangling_endpoint_is_reference_error() {
    let missing = "7b0f7a0e-3c33-4a8e-9d1c-0000000000aa";
    let netline =
        format!(r#"<netline uuid="{LINE}" layer="top_cu" width="0.25" p1="{missing}" p2="{P2}"/>"#);
    let err = parse_board(&board_xml(&netline)).expect_err("Parser sollte fehlschlagen");
    assert_eq!(
        err,
        BoardError::Reference {
            kind: "net point",
            uuid: Uuid::parse_str(missing).unwrap(),
        }
    );
}

#[test]
fn test_zero_width_is_malformed() {
    let netline = format!(r#"<netline uuid="{LINE}" layer="top_cu" width="0" p1="{P1}" p2="{P2}"/>"#);
    let err = parse_board(&board_xml(&netline)).expect_err("Parser sollte fehlschlagen");
    assert!(matches!(err, BoardError::MalformedValue { .. }));
}

#[test]
fn test_unknown_layer_is_validation_error() {
    let netline =
        format!(r#"<netline uuid="{LINE}" layer="copper9" width="0.25" p1="{P1}" p2="{P2}"/>"#);
    let err = parse_board(&board_xml(&netline)).expect_err("Parser sollte fehlschlagen");
    assert!(matches!(err, BoardError::Validation(msg) if msg.contains("invalid board layer")));
}

#[test]
fn test_same_endpoints_are_rejected() {
    let netline = format!(r#"<netline uuid="{LINE}" layer="top_cu" width="0.25" p1="{P1}" p2="{P1}"/>"#);
    let err = parse_board(&board_xml(&netline)).expect_err("Parser sollte fehlschlagen");
    assert!(matches!(err, BoardError::Validation(_)));
}

#[test]
fn test_syntax_error_is_xml_error() {
    let err = parse_board("<board uuid=\"x\"><via></board>").expect_err("Parser sollte fehlschlagen");
    assert!(matches!(err, BoardError::Xml(_)));
}

#[test]
fn test_wrong_root_element() {
    let err = parse_board("<project/>").expect_err("Parser sollte fehlschlagen");
    assert!(matches!(err, BoardError::Xml(_)));
}

#[test]
fn test_write_then_parse_preserves_segment() {
    let board = parse_board(&board_xml(&valid_line())).expect("Board erwartet");
    let text = write_board(&board);
    let reparsed = parse_board(&text).expect("Board erwartet");

    let id = Uuid::parse_str(SEGMENT).unwrap();
    let a = board.net_segment(id).unwrap();
    let b = reparsed.net_segment(id).unwrap();
    assert_eq!(a.net_point_count(), b.net_point_count());
    for point in a.net_points() {
        let other = b.get_net_point_by_uuid(point.uuid()).expect("Punkt erwartet");
        assert_eq!(other.layer(), point.layer());
        assert_eq!(other.position(), point.position());
        assert_eq!(other.attachment(), point.attachment());
    }
    for line in a.net_lines() {
        let other = b.get_net_line_by_uuid(line.uuid()).expect("Linie erwartet");
        assert_eq!(other.width(), line.width());
        assert_eq!(other.start_point(), line.start_point());
        assert_eq!(other.end_point(), line.end_point());
    }
    assert_eq!(write_board(&reparsed), text);
}
