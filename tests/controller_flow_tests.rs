use pcb_board_editor::core::{BoardLayer, Orientation, Point};
use pcb_board_editor::{
    BoardSelection, EditorCommand, EditorController, EditorOptions, EditorState,
};
use uuid::Uuid;

const FIXTURE: &str = include_str!("fixtures/simple_board.xml");
const FREE_POINT: &str = "3d1f0c2a-6b7e-4f0a-9c51-910000000002";
const SEGMENT: &str = "3d1f0c2a-6b7e-4f0a-9c51-900000000001";

fn id(text: &str) -> Uuid {
    Uuid::parse_str(text).expect("gueltige UUID erwartet")
}

fn loaded_state(dir: &tempfile::TempDir) -> (EditorController, EditorState, String) {
    let path = dir.path().join("board.xml");
    std::fs::write(&path, FIXTURE).expect("Fixture sollte schreibbar sein");
    let path = path.to_string_lossy().into_owned();

    let mut controller = EditorController::new();
    let mut state = EditorState::new();
    controller
        .handle_command(&mut state, EditorCommand::LoadBoard { path: path.clone() })
        .expect("Laden sollte gelingen");
    (controller, state, path)
}

fn free_point_position(state: &EditorState) -> (Point, BoardLayer) {
    let board = state.board.as_ref().expect("Board erwartet");
    let point = board
        .net_segment(id(SEGMENT))
        .unwrap()
        .get_net_point_by_uuid(id(FREE_POINT))
        .unwrap();
    (point.position(), point.layer())
}

#[test]
fn test_load_board_sets_path_and_logs_command() {
    let dir = tempfile::tempdir().unwrap();
    let (_, state, path) = loaded_state(&dir);

    assert!(state.board.is_some());
    assert_eq!(state.current_file_path.as_deref(), Some(path.as_str()));
    assert!(!state.can_undo());

    match state.command_log.entries().last() {
        Some(EditorCommand::LoadBoard { path: logged }) => assert_eq!(logged, &path),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_load_missing_file_returns_error() {
    let mut controller = EditorController::new();
    let mut state = EditorState::new();

    let result = controller.handle_command(
        &mut state,
        EditorCommand::LoadBoard {
            path: "/nicht/vorhanden/board.xml".into(),
        },
    );

    assert!(result.is_err());
    assert!(state.board.is_none());
}

#[test]
fn test_flip_undo_redo_through_controller() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut state, _) = loaded_state(&dir);
    let before = free_point_position(&state);

    let mut selection = BoardSelection::default();
    selection.net_lines.insert(id("3d1f0c2a-6b7e-4f0a-9c51-920000000002"));
    selection.vias.insert(id("3d1f0c2a-6b7e-4f0a-9c51-400000000001"));
    controller
        .handle_command(&mut state, EditorCommand::SetSelection { selection })
        .unwrap();
    controller
        .handle_command(
            &mut state,
            EditorCommand::FlipSelected {
                orientation: Orientation::Vertical,
            },
        )
        .expect("Spiegeln sollte gelingen");

    assert!(state.can_undo());
    let flipped = free_point_position(&state);
    assert_eq!(flipped.1, BoardLayer::BottomCopper);
    assert_ne!(flipped.0, before.0);

    controller.handle_command(&mut state, EditorCommand::Undo).unwrap();
    assert_eq!(free_point_position(&state), before);
    assert!(state.can_redo());

    controller.handle_command(&mut state, EditorCommand::Redo).unwrap();
    assert_eq!(free_point_position(&state), flipped);
}

#[test]
fn test_failed_flip_keeps_board_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut state, _) = loaded_state(&dir);
    let before = free_point_position(&state);

    // Linie am SMT-Pad von R1 ohne das Bauteil selbst
    let mut selection = BoardSelection::default();
    selection.net_lines.insert(id("3d1f0c2a-6b7e-4f0a-9c51-920000000001"));
    controller
        .handle_command(&mut state, EditorCommand::SetSelection { selection })
        .unwrap();
    let result = controller.handle_command(
        &mut state,
        EditorCommand::FlipSelected {
            orientation: Orientation::Horizontal,
        },
    );

    assert!(result.is_err());
    assert!(!state.can_undo());
    assert_eq!(free_point_position(&state), before);
}

#[test]
fn test_select_all_and_clear_selection() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut state, _) = loaded_state(&dir);

    controller.handle_command(&mut state, EditorCommand::SelectAll).unwrap();
    assert_eq!(state.selection.devices.len(), 1);
    assert_eq!(state.selection.net_lines.len(), 3);
    // Board-Text und Footprint-Text
    assert_eq!(state.selection.stroke_texts.len(), 2);

    controller
        .handle_command(&mut state, EditorCommand::ClearSelection)
        .unwrap();
    assert!(state.selection.is_empty());
}

#[test]
fn test_save_writes_file_that_loads_again() {
    let dir = tempfile::tempdir().unwrap();
    let (mut controller, mut state, _) = loaded_state(&dir);
    let target = dir.path().join("saved.xml").to_string_lossy().into_owned();

    controller
        .handle_command(&mut state, EditorCommand::SaveBoard { path: Some(target.clone()) })
        .expect("Speichern sollte gelingen");
    assert_eq!(state.current_file_path.as_deref(), Some(target.as_str()));

    let written = std::fs::read_to_string(&target).unwrap();
    let board = pcb_board_editor::parse_board(&written).expect("Gespeichertes Board erwartet");
    assert_eq!(board.net_segment_count(), 1);
}

#[test]
fn test_save_without_board_fails() {
    let mut controller = EditorController::new();
    let mut state = EditorState::new();

    let result = controller.handle_command(
        &mut state,
        EditorCommand::SaveBoard {
            path: Some("egal.xml".into()),
        },
    );
    assert!(result.is_err());
}

#[test]
fn test_new_board_uses_options() {
    let mut controller = EditorController::new();
    let mut state = EditorState::new();
    let options = EditorOptions {
        grid_interval_mm: 0.1,
        inner_copper_layers: 4,
        ..EditorOptions::default()
    };
    controller
        .handle_command(&mut state, EditorCommand::ApplyOptions { options })
        .unwrap();
    controller
        .handle_command(&mut state, EditorCommand::NewBoard { name: "Leer".into() })
        .unwrap();

    let board = state.board.as_ref().expect("Board erwartet");
    assert_eq!(board.name(), "Leer");
    assert_eq!(board.grid_interval().to_mm_string(), "0.1");
    assert_eq!(board.layer_stack().inner_copper_layers, 4);
    assert!(state.current_file_path.is_none());
}

#[test]
fn test_undo_without_board_is_noop() {
    let mut controller = EditorController::new();
    let mut state = EditorState::new();

    controller.handle_command(&mut state, EditorCommand::Undo).unwrap();
    controller.handle_command(&mut state, EditorCommand::Redo).unwrap();
    assert_eq!(state.command_log.len(), 2);
}
