//! Keyboard shortcut registry and documentation.

use drawpad_core::Shortcut;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct ShortcutBinding {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub shortcut: Shortcut,
}

impl ShortcutBinding {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        shortcut: Shortcut,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            shortcut,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<ShortcutBinding> {
        vec![
            ShortcutBinding::new("Z", true, false, "Undo", Shortcut::Undo),
            ShortcutBinding::new("Y", true, false, "Redo", Shortcut::Redo),
            ShortcutBinding::new("Z", true, true, "Redo", Shortcut::Redo),
            ShortcutBinding::new("C", true, false, "Copy selected shape", Shortcut::Copy),
            ShortcutBinding::new("X", true, false, "Cut selected shape", Shortcut::Cut),
            ShortcutBinding::new("V", true, false, "Paste shape", Shortcut::Paste),
            ShortcutBinding::new("Delete", false, false, "Delete selected shape", Shortcut::Delete),
            ShortcutBinding::new(
                "Backspace",
                false,
                false,
                "Delete selected shape",
                Shortcut::Delete,
            ),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for binding in Self::all() {
            println!("  {:20} {}", binding.format(), binding.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpad_core::Modifiers;

    #[test]
    fn test_bindings_resolve_to_their_shortcut() {
        for binding in ShortcutRegistry::all() {
            let modifiers = Modifiers {
                ctrl: binding.ctrl,
                shift: binding.shift,
                ..Modifiers::NONE
            };
            assert_eq!(
                Shortcut::from_key(binding.key, modifiers),
                Some(binding.shortcut),
                "{}",
                binding.format()
            );
        }
    }

    #[test]
    fn test_format() {
        let binding = ShortcutBinding::new("Z", true, true, "Redo", Shortcut::Redo);
        assert_eq!(binding.format(), "Ctrl+Shift+Z");
    }
}
