//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Requires the platform modifier (Ctrl, or Cmd on macOS).
    pub platform: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, platform: bool, description: &'static str) -> Self {
        Self {
            key,
            platform,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+A").
    pub fn format(&self) -> String {
        if self.platform {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("A", true, "Select all nodes"),
            Shortcut::new("D", true, "Duplicate selected nodes"),
            Shortcut::new("Delete", false, "Delete selected nodes"),
            Shortcut::new("Backspace", false, "Delete selected nodes"),
            Shortcut::new("Escape", false, "Clear selection and return to the select tool"),
            Shortcut::new("Alt+Drag", false, "Duplicate while dragging"),
            Shortcut::new("Shift+Click", false, "Toggle selection, keep the active tool"),
            Shortcut::new("Ctrl+Wheel", false, "Zoom"),
        ]
    }

    /// Render all shortcuts as a help section.
    pub fn help() -> String {
        let mut out = String::from("Keyboard shortcuts:\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:20} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("A", true, "").format(), "Ctrl+A");
        assert_eq!(Shortcut::new("Escape", false, "").format(), "Escape");
    }

    #[test]
    fn test_help_lists_every_shortcut() {
        let help = ShortcutRegistry::help();
        assert_eq!(help.lines().count(), ShortcutRegistry::all().len() + 1);
        assert!(help.contains("Ctrl+D"));
    }
}
