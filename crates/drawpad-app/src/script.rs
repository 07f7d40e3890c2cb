//! Recorded gesture scripts, replayed headlessly against a fresh editor.
//!
//! A script is a JSON object:
//!
//! ```json
//! {
//!   "config": { "history_capacity": 50 },
//!   "steps": [
//!     { "action": "set_drawing_mode", "value": "rectangle" },
//!     { "type": "pointer_down", "position": { "x": 10.0, "y": 10.0 } },
//!     { "type": "pointer_move", "position": { "x": 50.0, "y": 40.0 } },
//!     { "type": "pointer_up", "position": { "x": 50.0, "y": 40.0 } }
//!   ]
//! }
//! ```

use crate::event_handler::EventHandler;
use crate::ui::UiAction;
use drawpad_core::{Editor, EditorConfig, EditorError, InputEvent, SceneGraph};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Script errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to create editor: {0}")]
    Editor(#[from] EditorError),
    #[error("Step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: EditorError,
    },
}

/// One recorded event: raw input or a toolbar action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Input(InputEvent),
    Ui(UiAction),
}

/// A recorded session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    /// Editor settings; defaults when absent.
    #[serde(default)]
    pub config: Option<EditorConfig>,
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = read(path)?;
        Self::from_json(&json)
    }

    /// Run every step against a new editor. `config` overrides the
    /// script's own settings.
    pub fn replay(&self, config: Option<EditorConfig>) -> Result<Editor, ScriptError> {
        let config = config.or_else(|| self.config.clone()).unwrap_or_default();
        let mut editor = Editor::with_config(config)?;
        let mut handler = EventHandler::new();

        for (index, step) in self.steps.iter().enumerate() {
            let result = match step {
                ScriptStep::Input(event) => handler.handle_input(&mut editor, event).map(|_| ()),
                ScriptStep::Ui(action) => handler.apply_action(&mut editor, action),
            };
            result.map_err(|source| ScriptError::Step { index, source })?;
        }
        log::info!(
            "replayed {} steps: {} shapes, {} undo entries",
            self.steps.len(),
            editor.scene().len(),
            editor.history().undo_len()
        );
        Ok(editor)
    }
}

/// Load an editor config from a JSON file.
pub fn load_config(path: &Path) -> Result<EditorConfig, ScriptError> {
    let json = read(path)?;
    Ok(EditorConfig::from_json(&json)?)
}

fn read(path: &Path) -> Result<String, ScriptError> {
    std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpad_core::ShapeKind;
    use kurbo::Rect;
    use std::io::Write;

    const RECTANGLE: &str = r#"{
        "steps": [
            { "action": "set_drawing_mode", "value": "rectangle" },
            { "type": "pointer_down", "position": { "x": 10.0, "y": 10.0 } },
            { "type": "pointer_move", "position": { "x": 50.0, "y": 40.0 } },
            { "type": "pointer_up", "position": { "x": 50.0, "y": 40.0 } }
        ]
    }"#;

    #[test]
    fn test_replay_rectangle() {
        let editor = Script::from_json(RECTANGLE).unwrap().replay(None).unwrap();
        let shapes: Vec<_> = editor.scene().shapes().collect();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind(), ShapeKind::Rectangle);
        assert_eq!(shapes[0].bounds(), Rect::new(10.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_replay_undo_via_keyboard() {
        let script = r#"{
            "steps": [
                { "type": "pointer_down", "position": { "x": 0.0, "y": 0.0 } },
                { "type": "pointer_up", "position": { "x": 30.0, "y": 0.0 } },
                { "type": "key_down", "key": "z", "modifiers": { "ctrl": true } }
            ]
        }"#;
        let editor = Script::from_json(script).unwrap().replay(None).unwrap();
        assert!(editor.scene().is_empty());
        assert!(editor.can_redo());
    }

    #[test]
    fn test_failing_step_reports_index() {
        let script = r#"{
            "steps": [
                { "action": "undo" },
                { "action": "set_stroke_color", "value": "nope" }
            ]
        }"#;
        let err = Script::from_json(script).unwrap().replay(None).unwrap_err();
        assert!(matches!(err, ScriptError::Step { index: 1, .. }));
    }

    #[test]
    fn test_unknown_step_is_a_parse_error() {
        let err = Script::from_json(r#"{"steps": [{"action": "explode"}]}"#).unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn test_load_from_files() {
        let mut script_file = tempfile::NamedTempFile::new().unwrap();
        script_file.write_all(RECTANGLE.as_bytes()).unwrap();
        let mut config_file = tempfile::NamedTempFile::new().unwrap();
        config_file
            .write_all(br#"{"initial_mode": "ellipse", "history_capacity": 1}"#)
            .unwrap();

        let script = Script::load(script_file.path()).unwrap();
        let config = load_config(config_file.path()).unwrap();
        assert_eq!(config.initial_mode, ShapeKind::Ellipse);

        let editor = script.replay(Some(config)).unwrap();
        assert_eq!(editor.config().history_capacity, 1);
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Script::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }
}
