//! Toolbar actions and the state the toolbar renders from.

use drawpad_core::{CursorMode, Editor, LineDash, ShapeKind};
use serde::{Deserialize, Serialize};

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum UiAction {
    /// Choose the shape drawn by the next gesture.
    SetDrawingMode(ShapeKind),
    /// Stroke color, any CSS color string.
    SetStrokeColor(String),
    /// Fill color; empty string for no fill.
    SetFillColor(String),
    SetStrokeWidth(f64),
    SetLineDash(LineDash),
    /// Step through solid, dashed and dotted.
    CycleLineDash,
    DeleteSelected,
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    /// Run the host's save callback.
    Save,
}

/// Everything the toolbar and host surface render from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    pub drawing_mode: ShapeKind,
    pub mode: CursorMode,
    pub stroke_color: String,
    pub fill_color: Option<String>,
    pub stroke_width: f64,
    pub line_dash: LineDash,
    /// On/off lengths for previewing the current stroke.
    pub stroke_dash: Vec<f64>,
    pub delete_enabled: bool,
    pub undo_enabled: bool,
    pub redo_enabled: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl UiState {
    pub fn from_editor(editor: &Editor) -> Self {
        let style = editor.style();
        let canvas = editor.canvas_size();
        Self {
            drawing_mode: editor.drawing_mode(),
            mode: editor.mode(),
            stroke_color: style.stroke_color.to_hex(),
            fill_color: style.fill_color.map(|c| c.to_hex()),
            stroke_width: style.stroke_width,
            line_dash: style.line_dash,
            stroke_dash: style.line_dash.dash_array(style.stroke_width),
            delete_enabled: editor.can_delete(),
            undo_enabled: editor.can_undo(),
            redo_enabled: editor.can_redo(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        }
    }
}
