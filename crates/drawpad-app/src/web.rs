//! WebAssembly bindings for the host page.

use crate::event_handler::EventHandler;
use crate::ui::UiState;
use drawpad_core::{Editor, EditorConfig, InputEvent, LineDash, Modifiers, ShapeKind};
use kurbo::Point;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize panic reporting and logging.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Drawpad: logger already initialized".into());
    }

    log::info!("Drawpad (WASM) ready");
}

/// The editor as seen from JavaScript.
#[wasm_bindgen]
pub struct WebEditor {
    editor: RefCell<Editor>,
    handler: RefCell<EventHandler>,
    save_fn: RefCell<Option<js_sys::Function>>,
    save_requested: Rc<Cell<bool>>,
}

impl WebEditor {
    fn input(&self, event: InputEvent) -> Result<bool, JsValue> {
        self.handler
            .borrow_mut()
            .handle_input(&mut self.editor.borrow_mut(), &event)
            .map_err(js_error)
    }
}

#[wasm_bindgen]
impl WebEditor {
    /// Create an editor. `config_json` may be a partial `EditorConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json).map_err(js_error)?,
            None => EditorConfig::default(),
        };
        let editor = Editor::with_config(config).map_err(js_error)?;
        Ok(Self {
            editor: RefCell::new(editor),
            handler: RefCell::new(EventHandler::new()),
            save_fn: RefCell::new(None),
            save_requested: Rc::new(Cell::new(false)),
        })
    }

    pub fn pointer_down(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.input(InputEvent::PointerDown {
            position: Point::new(x, y),
            button: Default::default(),
        })
        .map(drop)
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.input(InputEvent::PointerMove {
            position: Point::new(x, y),
        })
        .map(drop)
    }

    pub fn pointer_up(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.input(InputEvent::PointerUp {
            position: Point::new(x, y),
            button: Default::default(),
        })
        .map(drop)
    }

    pub fn pointer_leave(&self) -> Result<(), JsValue> {
        self.input(InputEvent::PointerLeave).map(drop)
    }

    /// Keyboard handler. Returns true when the key was a shortcut, so the
    /// page can suppress the browser's default action.
    pub fn key_down(&self, key: String, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        match self.input(InputEvent::KeyDown { key, modifiers }) {
            Ok(handled) => handled,
            Err(err) => {
                log::error!("Shortcut failed: {:?}", err);
                false
            }
        }
    }

    /// Toolbar drawing-mode buttons. Accepts kind names such as `"rect"`.
    pub fn set_drawing_mode(&self, name: &str) -> Result<(), JsValue> {
        let kind = ShapeKind::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown drawing mode: {name}")))?;
        self.editor.borrow_mut().set_drawing_mode(kind);
        Ok(())
    }

    pub fn drawing_mode(&self) -> String {
        self.editor.borrow().drawing_mode().name().to_string()
    }

    pub fn set_stroke_color(&self, color: &str) -> Result<(), JsValue> {
        self.editor.borrow_mut().set_stroke_color(color).map_err(js_error)
    }

    pub fn set_fill_color(&self, color: &str) -> Result<(), JsValue> {
        self.editor.borrow_mut().set_fill_color(color).map_err(js_error)
    }

    pub fn set_stroke_width(&self, width: f64) {
        self.editor.borrow_mut().set_stroke_width(width);
    }

    /// `"solid"`, `"dashed"` or `"dotted"`.
    pub fn set_line_dash(&self, name: &str) -> Result<(), JsValue> {
        let dash = match name {
            "solid" => LineDash::Solid,
            "dashed" => LineDash::Dashed,
            "dotted" => LineDash::Dotted,
            other => return Err(JsValue::from_str(&format!("Unknown line type: {other}"))),
        };
        self.editor.borrow_mut().set_line_dash(dash);
        Ok(())
    }

    pub fn delete_selected(&self) -> Result<bool, JsValue> {
        self.editor.borrow_mut().delete_selected().map_err(js_error)
    }

    pub fn undo(&self) -> Result<bool, JsValue> {
        self.editor.borrow_mut().undo().map_err(js_error)
    }

    pub fn redo(&self) -> Result<bool, JsValue> {
        self.editor.borrow_mut().redo().map_err(js_error)
    }

    pub fn copy(&self) -> bool {
        self.editor.borrow_mut().copy()
    }

    pub fn cut(&self) -> Result<bool, JsValue> {
        self.editor.borrow_mut().cut().map_err(js_error)
    }

    pub fn paste(&self) -> Result<bool, JsValue> {
        self.editor.borrow_mut().paste().map_err(js_error)
    }

    pub fn can_delete(&self) -> bool {
        self.editor.borrow().can_delete()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.borrow().can_redo()
    }

    /// Register the page's save function.
    pub fn set_save_callback(&self, callback: js_sys::Function) {
        *self.save_fn.borrow_mut() = Some(callback);
        let requested = Rc::clone(&self.save_requested);
        self.editor
            .borrow_mut()
            .set_save_callback(move || requested.set(true));
    }

    /// Run the page's save function. Returns false if none is registered.
    pub fn save(&self) -> bool {
        // The page callback usually calls back into `get_json`, so it runs
        // after the editor borrow is released.
        let saved = self.editor.borrow_mut().save();
        if !self.save_requested.replace(false) {
            return saved;
        }
        let callback = self.save_fn.borrow().clone();
        if let Some(callback) = callback {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                log::error!("Save callback failed: {:?}", err);
            }
        }
        saved
    }

    /// Toolbar and surface state as JSON; see [`UiState`].
    pub fn ui_state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&UiState::from_editor(&self.editor.borrow())).map_err(js_error)
    }

    /// Width of the surface the page should create.
    pub fn canvas_width(&self) -> f64 {
        self.editor.borrow().canvas_size().width
    }

    /// Height of the surface the page should create.
    pub fn canvas_height(&self) -> f64 {
        self.editor.borrow().canvas_size().height
    }

    /// The drawing as JSON.
    pub fn get_json(&self) -> Result<String, JsValue> {
        self.editor.borrow().serialized_scene().map_err(js_error)
    }

    /// Re-open a drawing previously returned by `get_json`.
    pub fn load_json(&self, json: &str) -> Result<(), JsValue> {
        self.editor.borrow_mut().load_scene(json).map_err(js_error)
    }
}
