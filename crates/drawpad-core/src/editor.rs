//! The editor facade: owns the scene and routes pointer, keyboard and UI
//! calls to the cursor state machine, history and clipboard.

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::cursor::{CursorMode, CursorStateMachine, PointerOutcome};
use crate::history::History;
use crate::input::{Modifiers, Shortcut};
use crate::scene::{Scene, SceneError, SceneGraph, SceneSnapshot};
use crate::shapes::{LineDash, ShapeKind, ShapeStyle};
use crate::strategy::{ConstructError, StrategyRegistry};
use crate::style::{StyleContext, StyleError};
use kurbo::{Point, Size};
use thiserror::Error;

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Construct(#[from] ConstructError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

type SaveCallback = Box<dyn FnMut()>;

/// A drawing editor bound to one scene.
pub struct Editor<S: SceneGraph = Scene> {
    scene: S,
    config: EditorConfig,
    strategies: StrategyRegistry,
    style: StyleContext,
    cursor: CursorStateMachine,
    history: History,
    clipboard: Clipboard,
    save_callback: Option<SaveCallback>,
}

impl<S: SceneGraph> std::fmt::Debug for Editor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("shapes", &self.scene.len())
            .field("mode", &self.cursor.mode())
            .field("drawing_mode", &self.cursor.drawing_kind())
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .field("has_save_callback", &self.save_callback.is_some())
            .finish()
    }
}

impl Editor<Scene> {
    /// Editor over an empty in-memory scene with default settings.
    pub fn new() -> EditorResult<Self> {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> EditorResult<Self> {
        let scene = Scene::with_hit_tolerance(config.hit_tolerance);
        Self::with_scene(scene, config)
    }
}

impl<S: SceneGraph> Editor<S> {
    /// Editor over an existing scene. Its current contents become the
    /// history baseline.
    pub fn with_scene(scene: S, config: EditorConfig) -> EditorResult<Self> {
        let mut history = History::new(config.history_capacity);
        history.reset(&scene)?;
        log::debug!(
            "editor created: {} shapes, drawing mode {:?}",
            scene.len(),
            config.initial_mode
        );
        Ok(Self {
            scene,
            strategies: StrategyRegistry::new(&config),
            style: StyleContext::new(),
            cursor: CursorStateMachine::new(config.initial_mode),
            clipboard: Clipboard::new(config.paste_offset),
            history,
            config,
            save_callback: None,
        })
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn cursor(&self) -> &CursorStateMachine {
        &self.cursor
    }

    pub fn mode(&self) -> CursorMode {
        self.cursor.mode()
    }

    pub fn drawing_mode(&self) -> ShapeKind {
        self.cursor.drawing_kind()
    }

    /// Size of the drawing surface the host should create.
    pub fn canvas_size(&self) -> Size {
        Size::new(
            f64::from(self.config.canvas_width),
            f64::from(self.config.canvas_height),
        )
    }

    /// Style applied to the next shape drawn.
    pub fn style(&self) -> &ShapeStyle {
        self.style.current()
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, point: Point) -> EditorResult<()> {
        let outcome = self
            .cursor
            .pointer_down(&mut self.scene, &self.strategies, &self.style, point)?;
        self.finish_pointer(outcome)
    }

    pub fn pointer_move(&mut self, point: Point) -> EditorResult<()> {
        let outcome = self
            .cursor
            .pointer_move(&mut self.scene, &self.strategies, point)?;
        self.finish_pointer(outcome)
    }

    pub fn pointer_up(&mut self, point: Point) -> EditorResult<()> {
        let outcome = self.cursor.pointer_up(&mut self.scene, point);
        self.finish_pointer(outcome)
    }

    pub fn pointer_leave(&mut self) {
        self.cursor.pointer_leave(&mut self.scene);
    }

    fn finish_pointer(&mut self, outcome: PointerOutcome) -> EditorResult<()> {
        if outcome.commit {
            self.commit()?;
        }
        Ok(())
    }

    // --- UI controls ---

    /// Choose the strategy for the next gesture. Drops the current selection.
    pub fn set_drawing_mode(&mut self, kind: ShapeKind) {
        self.scene.discard_active_selection();
        self.cursor.sync(&mut self.scene);
        self.cursor.set_drawing_kind(kind);
        self.scene.render();
    }

    /// Stroke color of subsequently drawn shapes. Placed shapes keep theirs.
    pub fn set_stroke_color(&mut self, color: &str) -> EditorResult<()> {
        self.style.set_stroke_color(color)?;
        Ok(())
    }

    /// Fill color of subsequently drawn shapes; an empty string means none.
    pub fn set_fill_color(&mut self, color: &str) -> EditorResult<()> {
        self.style.set_fill_color(color)?;
        Ok(())
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.set_stroke_width(width);
    }

    pub fn set_line_dash(&mut self, dash: LineDash) {
        self.style.set_line_dash(dash);
    }

    /// Remove the selected shape. Returns false when nothing is selected.
    pub fn delete_selected(&mut self) -> EditorResult<bool> {
        let Some(id) = self.scene.active_selection() else {
            log::trace!("delete: nothing selected");
            return Ok(false);
        };
        self.scene.remove(id);
        self.cursor.sync(&mut self.scene);
        log::debug!("deleted {id}");
        self.commit()?;
        Ok(true)
    }

    pub fn undo(&mut self) -> EditorResult<bool> {
        self.cursor.cancel_gesture();
        let restored = self.history.undo(&mut self.scene)?;
        self.after_restore(restored);
        Ok(restored)
    }

    pub fn redo(&mut self) -> EditorResult<bool> {
        self.cursor.cancel_gesture();
        let restored = self.history.redo(&mut self.scene)?;
        self.after_restore(restored);
        Ok(restored)
    }

    fn after_restore(&mut self, restored: bool) {
        if restored {
            self.cursor.sync(&mut self.scene);
            self.scene.render();
        }
    }

    /// Copy the selected shape. Returns false when nothing is selected.
    pub fn copy(&mut self) -> bool {
        self.clipboard.copy(&self.scene)
    }

    /// Copy then remove the selected shape. Returns false when nothing is
    /// selected.
    pub fn cut(&mut self) -> EditorResult<bool> {
        if !self.clipboard.cut(&mut self.scene) {
            return Ok(false);
        }
        self.cursor.sync(&mut self.scene);
        self.commit()?;
        Ok(true)
    }

    /// Insert and select a copy of the clipboard. Returns false when the
    /// clipboard is empty.
    pub fn paste(&mut self) -> EditorResult<bool> {
        if self.clipboard.paste(&mut self.scene).is_none() {
            return Ok(false);
        }
        self.cursor.sync(&mut self.scene);
        self.commit()?;
        Ok(true)
    }

    pub fn can_delete(&self) -> bool {
        self.scene.active_selection().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Keyboard ---

    /// Run the command bound to a shortcut, exactly as the matching UI
    /// control would. Returns whether anything changed.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> EditorResult<bool> {
        log::trace!("shortcut {}", shortcut.label());
        match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::Copy => Ok(self.copy()),
            Shortcut::Cut => self.cut(),
            Shortcut::Paste => self.paste(),
            Shortcut::Delete => self.delete_selected(),
        }
    }

    /// Resolve and run a key press. Keys without a binding are ignored.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> EditorResult<bool> {
        match Shortcut::from_key(key, modifiers) {
            Some(shortcut) => self.handle_shortcut(shortcut),
            None => Ok(false),
        }
    }

    // --- Host page ---

    /// Install the function the host wants run by [`Editor::save`].
    pub fn set_save_callback(&mut self, callback: impl FnMut() + 'static) {
        self.save_callback = Some(Box::new(callback));
    }

    /// Invoke the save callback. Returns false if none is installed.
    pub fn save(&mut self) -> bool {
        match self.save_callback.as_mut() {
            Some(callback) => {
                log::info!("saving drawing ({} shapes)", self.scene.len());
                callback();
                true
            }
            None => {
                log::trace!("save: no callback installed");
                false
            }
        }
    }

    /// JSON of the whole scene, for the host to persist.
    pub fn serialized_scene(&self) -> EditorResult<String> {
        Ok(self.scene.serialize()?.into_string())
    }

    /// Replace the scene with a previously saved drawing and start a fresh
    /// history from it. On error nothing changes.
    pub fn load_scene(&mut self, json: &str) -> EditorResult<()> {
        self.scene
            .deserialize(&SceneSnapshot::from(json.to_string()))?;
        self.cursor.cancel_gesture();
        self.cursor.sync(&mut self.scene);
        self.history.reset(&self.scene)?;
        self.scene.render();
        log::info!("loaded drawing ({} shapes)", self.scene.len());
        Ok(())
    }

    fn commit(&mut self) -> EditorResult<()> {
        self.history.commit(&self.scene)?;
        self.scene.render();
        Ok(())
    }
}
