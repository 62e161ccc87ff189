//! Gemeinsame Board-Fixtures für die Integrationstests.
#![allow(dead_code)]

use pcb_board_editor::core::{
    Board, BoardLayer, Device, FootprintPad, NetLine, NetPoint, NetPointAttachment, NetSegment,
    NetSignal, PadTechnology, Point, PositiveLength, Via, ViaShape,
};
use uuid::Uuid;

/// Aktiviert Log-Ausgaben für Tests (`RUST_LOG=debug`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn mm(v: f64) -> PositiveLength {
    PositiveLength::from_mm(v).expect("positive Laenge erwartet")
}

/// Leeres Board mit 1 mm Raster und einem Netzsignal.
pub fn empty_board() -> (Board, Uuid) {
    let mut board = Board::new("Test");
    board.set_grid_interval(mm(1.0));
    let signal = NetSignal::new("GND");
    let signal_id = signal.uuid;
    board.add_net_signal(signal).expect("Netzsignal erwartet");
    (board, signal_id)
}

pub fn free_point(segment: &NetSegment, layer: BoardLayer, x: f64, y: f64) -> NetPoint {
    NetPoint::new(segment.uuid(), layer, Point::from_mm(x, y), NetPointAttachment::None)
}

pub fn line(start: &NetPoint, end: &NetPoint, width: f64) -> NetLine {
    NetLine::new(start, end, start.layer(), mm(width)).expect("Netzlinie erwartet")
}

pub fn add_via(board: &mut Board, x: f64, y: f64) -> Uuid {
    let via = Via::new(Point::from_mm(x, y), ViaShape::Round, mm(0.8), mm(0.4));
    let uuid = via.uuid;
    board.add_via(via).expect("Via erwartet");
    uuid
}

/// Bauteil mit einem SMT-Pad auf top_cu bei relativer Position (1, 0).
pub fn add_smt_device(board: &mut Board, signal: Uuid, x: f64, y: f64) -> (Uuid, Uuid) {
    let mut device = Device::new("U1", Point::from_mm(x, y));
    let pad = FootprintPad {
        uuid: Uuid::new_v4(),
        name: "1".into(),
        position: Point::from_mm(1.0, 0.0),
        technology: PadTechnology::Smt(BoardLayer::TopCopper),
        size: mm(1.0),
        net_signal: Some(signal),
    };
    let pad_id = pad.uuid;
    device.pads.insert(pad_id, pad);
    let device_id = device.uuid;
    board.add_device(device).expect("Bauteil erwartet");
    (device_id, pad_id)
}

pub fn point(board: &Board, segment: Uuid, point: Uuid) -> NetPoint {
    board
        .net_segment(segment)
        .expect("Segment erwartet")
        .get_net_point_by_uuid(point)
        .expect("Punkt erwartet")
        .clone()
}

pub fn net_line(board: &Board, segment: Uuid, line: Uuid) -> NetLine {
    board
        .net_segment(segment)
        .expect("Segment erwartet")
        .get_net_line_by_uuid(line)
        .expect("Linie erwartet")
        .clone()
}
