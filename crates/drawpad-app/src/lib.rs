//! Drawpad Application
//!
//! The event-adapter layer between a host surface and the Drawpad engine:
//! input translation, toolbar actions, keyboard shortcut documentation,
//! gesture replay, and the WASM bindings.

mod event_handler;
mod script;
mod shortcuts;
mod ui;

pub use event_handler::EventHandler;
pub use script::{Script, ScriptError, ScriptStep, load_config};
pub use shortcuts::{ShortcutBinding, ShortcutRegistry};
pub use ui::{UiAction, UiState};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebEditor, start};
