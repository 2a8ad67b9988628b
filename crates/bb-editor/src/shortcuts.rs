//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s so every host
//! binds the same keys.

use crate::tools::ToolKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── File ──
    NewCanvas,
    Open,
    Save,

    // ── Edit ──
    Undo,
    Redo,
    Clear,

    // ── Tools ──
    Tool(ToolKind),
    /// Pick the palette preset at this 0-based slot.
    PaletteSlot(usize),
    /// Open the host's color picker.
    CustomColor,
    WidenStroke,
    NarrowStroke,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the logical key name (e.g. `"z"`, `"Delete"`, `"3"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "n" | "N" => Some(ShortcutAction::NewCanvas),
                "o" | "O" => Some(ShortcutAction::Open),
                "s" | "S" => Some(ShortcutAction::Save),
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "Delete" | "Backspace" => Some(ShortcutAction::Clear),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "p" | "P" => Some(ShortcutAction::Tool(ToolKind::Pen)),
            "e" | "E" => Some(ShortcutAction::Tool(ToolKind::Eraser)),
            "r" | "R" => Some(ShortcutAction::Tool(ToolKind::Rectangle)),
            "o" | "O" => Some(ShortcutAction::Tool(ToolKind::Ellipse)),
            "l" | "L" => Some(ShortcutAction::Tool(ToolKind::Line)),
            "c" | "C" => Some(ShortcutAction::CustomColor),
            "]" => Some(ShortcutAction::WidenStroke),
            "[" => Some(ShortcutAction::NarrowStroke),
            // Digits 1..8 select palette slots 0..7.
            _ => match key.parse::<usize>() {
                Ok(n @ 1..=8) => Some(ShortcutAction::PaletteSlot(n - 1)),
                _ => None,
            },
        }
    }
}
