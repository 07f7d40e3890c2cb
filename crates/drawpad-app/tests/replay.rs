use drawpad_app::{EventHandler, Script, UiAction, UiState};
use drawpad_core::{CursorMode, Editor, InputEvent, MouseButton, SceneGraph, ShapeKind};
use kurbo::Point;

#[test]
fn test_copy_paste_session_replays() {
    let script = Script::from_json(
        r#"{
            "config": { "paste_offset": 25.0 },
            "steps": [
                { "type": "pointer_down", "position": { "x": 0.0, "y": 0.0 } },
                { "type": "pointer_move", "position": { "x": 60.0, "y": 30.0 } },
                { "type": "pointer_up", "position": { "x": 60.0, "y": 30.0 } },
                { "type": "pointer_down", "position": { "x": 30.0, "y": 15.0 } },
                { "type": "pointer_up", "position": { "x": 30.0, "y": 15.0 } },
                { "action": "copy" },
                { "action": "paste" },
                { "action": "paste" }
            ]
        }"#,
    )
    .unwrap();

    let editor = script.replay(None).unwrap();
    assert_eq!(editor.scene().len(), 3);
    assert_eq!(editor.mode(), CursorMode::Select);
    assert_eq!(editor.history().undo_len(), 3);

    let last = editor.scene().shapes().last().unwrap();
    assert!((last.bounds().x0 - 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_toolbar_state_follows_selection() {
    let mut editor = Editor::new().unwrap();
    let mut handler = EventHandler::new();
    handler
        .apply_action(&mut editor, &UiAction::SetDrawingMode(ShapeKind::Rectangle))
        .unwrap();
    handler
        .apply_action(&mut editor, &UiAction::SetFillColor("#eeeeee".to_string()))
        .unwrap();

    let press = |x, y| InputEvent::PointerDown {
        position: Point::new(x, y),
        button: MouseButton::Left,
    };
    let release = |x, y| InputEvent::PointerUp {
        position: Point::new(x, y),
        button: MouseButton::Left,
    };

    handler.handle_input(&mut editor, &press(0.0, 0.0)).unwrap();
    handler
        .handle_input(&mut editor, &InputEvent::PointerMove { position: Point::new(40.0, 40.0) })
        .unwrap();
    handler.handle_input(&mut editor, &release(40.0, 40.0)).unwrap();
    let state = UiState::from_editor(&editor);
    assert!(!state.delete_enabled);
    assert!(state.undo_enabled);

    handler.handle_input(&mut editor, &press(20.0, 20.0)).unwrap();
    handler.handle_input(&mut editor, &release(20.0, 20.0)).unwrap();
    let state = UiState::from_editor(&editor);
    assert!(state.delete_enabled);
    assert_eq!(state.mode, CursorMode::Select);

    handler.apply_action(&mut editor, &UiAction::DeleteSelected).unwrap();
    let state = UiState::from_editor(&editor);
    assert!(!state.delete_enabled);
    assert_eq!(state.mode, CursorMode::Draw);
    assert!(editor.scene().is_empty());
}

#[test]
fn test_save_action_runs_callback() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut editor = Editor::new().unwrap();
    let saved = Rc::new(Cell::new(false));
    let flag = Rc::clone(&saved);
    editor.set_save_callback(move || flag.set(true));

    EventHandler::new()
        .apply_action(&mut editor, &UiAction::Save)
        .unwrap();
    assert!(saved.get());
}
