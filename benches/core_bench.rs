use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pcb_board_editor::core::{
    Board, BoardLayer, NetLine, NetPoint, NetPointAttachment, NetSegment, NetSignal, Orientation,
    Point, PositiveLength,
};
use pcb_board_editor::{parse_board, BoardSelection, CmdFlipSelectedBoardItems, EditHistory};
use std::hint::black_box;

fn bench_xml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/simple_board.xml");

    c.bench_function("xml_parse_simple_board", |b| {
        b.iter(|| {
            let board = parse_board(black_box(xml_content)).expect("XML parse failed");
            black_box(board.net_segment_count())
        })
    });
}

/// Board mit `segment_count` Segmenten aus je einer Kette von 10 Punkten.
fn build_synthetic_board(segment_count: usize) -> Board {
    let mut board = Board::new("Bench");
    let signal = NetSignal::new("N");
    let signal_id = signal.uuid;
    board.add_net_signal(signal).expect("net signal");
    let width = PositiveLength::from_mm(0.2).expect("width");

    for s in 0..segment_count {
        let mut segment = NetSegment::new(signal_id);
        let points: Vec<NetPoint> = (0..10)
            .map(|i| {
                NetPoint::new(
                    segment.uuid(),
                    BoardLayer::TopCopper,
                    Point::from_mm(i as f64, s as f64),
                    NetPointAttachment::None,
                )
            })
            .collect();
        let lines: Vec<NetLine> = points
            .windows(2)
            .map(|pair| NetLine::new(&pair[0], &pair[1], BoardLayer::TopCopper, width).expect("line"))
            .collect();
        segment.add_elements(points, lines).expect("elements");
        board.add_net_segment(segment).expect("segment");
    }
    board
}

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip_selected");

    for &segment_count in &[10usize, 100usize] {
        let board = build_synthetic_board(segment_count);
        let selection = BoardSelection::select_all(&board);

        group.bench_with_input(
            BenchmarkId::new("flip_and_undo", segment_count),
            &selection,
            |b, selection| {
                let mut board = board.clone();
                let mut history = EditHistory::new_with_capacity(1);
                b.iter(|| {
                    let cmd = CmdFlipSelectedBoardItems::new(selection.clone(), Orientation::Horizontal);
                    history.exec_cmd(&mut board, cmd).expect("flip");
                    history.undo(&mut board).expect("undo");
                    black_box(board.net_segment_count())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(core_benches, bench_xml_parsing, bench_flip);
criterion_main!(core_benches);
