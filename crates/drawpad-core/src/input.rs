//! Input events, pointer state tracking, and keyboard shortcut resolution.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Raw input from the host surface, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    /// The pointer left the surface.
    PointerLeave,
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shortcut {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Delete,
}

impl Shortcut {
    /// Resolve a key press. `key` is a DOM-style key name (`"z"`, `"Delete"`).
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        if modifiers.command() {
            return match key.to_ascii_lowercase().as_str() {
                "z" if modifiers.shift => Some(Shortcut::Redo),
                "z" => Some(Shortcut::Undo),
                "y" => Some(Shortcut::Redo),
                "c" => Some(Shortcut::Copy),
                "x" => Some(Shortcut::Cut),
                "v" => Some(Shortcut::Paste),
                _ => None,
            };
        }
        match key {
            "Delete" | "Backspace" => Some(Shortcut::Delete),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Shortcut::Undo => "Undo",
            Shortcut::Redo => "Redo",
            Shortcut::Copy => "Copy",
            Shortcut::Cut => "Cut",
            Shortcut::Paste => "Paste",
            Shortcut::Delete => "Delete",
        }
    }
}

/// Tracks pointer buttons and modifiers between events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in canvas coordinates.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the state from an event.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.insert(*button);
            }
            InputEvent::PointerMove { position } => {
                self.pointer_position = *position;
            }
            InputEvent::PointerUp { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.remove(button);
            }
            InputEvent::PointerLeave => {}
            InputEvent::KeyDown { modifiers, .. } => {
                self.modifiers = *modifiers;
            }
        }
    }

    /// Check if a mouse button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }
}
