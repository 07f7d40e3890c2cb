//! Drawpad Core Library
//!
//! Platform-agnostic interaction engine for the Drawpad vector editor:
//! shapes, drawing strategies, the cursor-mode state machine, undo/redo
//! history and the clipboard, composed by [`Editor`].

pub mod clipboard;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod history;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod strategy;
pub mod style;

pub use clipboard::Clipboard;
pub use config::EditorConfig;
pub use cursor::{CursorMode, CursorStateMachine};
pub use editor::{Editor, EditorError, EditorResult};
pub use history::History;
pub use input::{InputEvent, InputState, Modifiers, MouseButton, Shortcut};
pub use scene::{Scene, SceneError, SceneEvent, SceneGraph, SceneSnapshot};
pub use shapes::{LineDash, SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use strategy::{ConstructError, ShapeStrategy, StrategyRegistry};
pub use style::{StyleContext, StyleError};
