//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to the pad's two actions. The map lives in
//! Rust so the browser bridge and native hosts agree on bindings.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Wipe the drawing.
    Clear,
    /// Export the drawing and hand it to the upload form.
    Upload,
}

impl ShortcutAction {
    /// Stable name passed across the JS boundary.
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::Clear => "clear",
            ShortcutAction::Upload => "upload",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"Escape"`, `"Enter"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        _shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;
        if alt {
            return None;
        }

        if cmd {
            return match key {
                "Delete" | "Backspace" => Some(ShortcutAction::Clear),
                "Enter" => Some(ShortcutAction::Upload),
                _ => None,
            };
        }

        match key {
            "Escape" => Some(ShortcutAction::Clear),
            _ => None,
        }
    }
}
