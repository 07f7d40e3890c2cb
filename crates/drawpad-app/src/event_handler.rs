//! Translates raw host events and toolbar actions into editor calls.

use crate::ui::UiAction;
use drawpad_core::{Editor, EditorResult, InputEvent, InputState, MouseButton};

/// Event adapter between a host surface and an [`Editor`].
///
/// Only the primary button draws or drags. A release is forwarded only if
/// the matching press was, so a press that started outside the surface
/// never closes a gesture.
#[derive(Debug, Default)]
pub struct EventHandler {
    input: InputState,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Route one input event. Returns whether the editor saw it.
    pub fn handle_input(&mut self, editor: &mut Editor, event: &InputEvent) -> EditorResult<bool> {
        let was_pressed = self.input.is_button_pressed(MouseButton::Left);
        self.input.handle_event(event);

        match event {
            InputEvent::PointerDown { position, button } => {
                if *button != MouseButton::Left {
                    log::trace!("ignoring {button:?} press");
                    return Ok(false);
                }
                editor.pointer_down(*position)?;
            }
            InputEvent::PointerMove { position } => {
                editor.pointer_move(*position)?;
            }
            InputEvent::PointerUp { position, button } => {
                if *button != MouseButton::Left || !was_pressed {
                    log::trace!("ignoring unmatched {button:?} release");
                    return Ok(false);
                }
                editor.pointer_up(*position)?;
            }
            InputEvent::PointerLeave => editor.pointer_leave(),
            InputEvent::KeyDown { key, modifiers } => {
                return editor.handle_key(key, *modifiers);
            }
        }
        Ok(true)
    }

    /// Apply a toolbar action.
    pub fn apply_action(&mut self, editor: &mut Editor, action: &UiAction) -> EditorResult<()> {
        log::trace!("ui action {action:?}");
        match action {
            UiAction::SetDrawingMode(kind) => editor.set_drawing_mode(*kind),
            UiAction::SetStrokeColor(color) => editor.set_stroke_color(color)?,
            UiAction::SetFillColor(color) => editor.set_fill_color(color)?,
            UiAction::SetStrokeWidth(width) => editor.set_stroke_width(*width),
            UiAction::SetLineDash(dash) => editor.set_line_dash(*dash),
            UiAction::CycleLineDash => {
                let next = editor.style().line_dash.next();
                editor.set_line_dash(next);
            }
            UiAction::DeleteSelected => {
                editor.delete_selected()?;
            }
            UiAction::Undo => {
                editor.undo()?;
            }
            UiAction::Redo => {
                editor.redo()?;
            }
            UiAction::Copy => {
                editor.copy();
            }
            UiAction::Cut => {
                editor.cut()?;
            }
            UiAction::Paste => {
                editor.paste()?;
            }
            UiAction::Save => {
                editor.save();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpad_core::{LineDash, Modifiers, SceneGraph, ShapeKind};
    use kurbo::Point;

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn mv(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_gesture_reaches_editor() {
        let mut editor = Editor::new().unwrap();
        let mut handler = EventHandler::new();
        for event in [down(0.0, 0.0), mv(20.0, 20.0), up(20.0, 20.0)] {
            assert!(handler.handle_input(&mut editor, &event).unwrap());
        }
        assert_eq!(editor.scene().len(), 1);
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut editor = Editor::new().unwrap();
        let mut handler = EventHandler::new();
        let right = InputEvent::PointerDown {
            position: Point::ZERO,
            button: MouseButton::Right,
        };
        assert!(!handler.handle_input(&mut editor, &right).unwrap());
        assert!(editor.scene().is_empty());
    }

    #[test]
    fn test_unmatched_release_is_ignored() {
        let mut editor = Editor::new().unwrap();
        let mut handler = EventHandler::new();
        assert!(!handler.handle_input(&mut editor, &up(5.0, 5.0)).unwrap());
        assert_eq!(editor.history().undo_len(), 0);
    }

    #[test]
    fn test_keys_dispatch_shortcuts() {
        let mut editor = Editor::new().unwrap();
        let mut handler = EventHandler::new();
        for event in [down(0.0, 0.0), mv(20.0, 20.0), up(20.0, 20.0)] {
            handler.handle_input(&mut editor, &event).unwrap();
        }
        let undo = InputEvent::KeyDown {
            key: "z".to_string(),
            modifiers: Modifiers::CTRL,
        };
        assert!(handler.handle_input(&mut editor, &undo).unwrap());
        assert!(editor.scene().is_empty());
        assert_eq!(handler.input().modifiers, Modifiers::CTRL);
    }

    #[test]
    fn test_actions() {
        let mut editor = Editor::new().unwrap();
        let mut handler = EventHandler::new();
        handler
            .apply_action(&mut editor, &UiAction::SetDrawingMode(ShapeKind::Triangle))
            .unwrap();
        handler.apply_action(&mut editor, &UiAction::CycleLineDash).unwrap();
        handler
            .apply_action(&mut editor, &UiAction::SetStrokeWidth(4.0))
            .unwrap();
        assert_eq!(editor.drawing_mode(), ShapeKind::Triangle);
        assert_eq!(editor.style().line_dash, LineDash::Dashed);

        let err = handler.apply_action(&mut editor, &UiAction::SetFillColor("#12345".to_string()));
        assert!(err.is_err());

        // Nothing to undo or paste: still fine
        handler.apply_action(&mut editor, &UiAction::Undo).unwrap();
        handler.apply_action(&mut editor, &UiAction::Paste).unwrap();
    }
}
