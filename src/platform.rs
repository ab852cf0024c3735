//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for form shortcuts
/// - macOS: SUPER (Cmd key) or CONTROL
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Whether a key event carries a shortcut modifier
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(SHORTCUT_MODIFIER | KeyModifiers::CONTROL)
}

/// Submit shortcut display
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

#[cfg(target_os = "macos")]
pub const ADD_ENTRY_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const ADD_ENTRY_SHORTCUT: &str = "Ctrl+N";

#[cfg(target_os = "macos")]
pub const REMOVE_ENTRY_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const REMOVE_ENTRY_SHORTCUT: &str = "Ctrl+D";

#[cfg(target_os = "macos")]
pub const TEMPLATE_SHORTCUT: &str = "Cmd+T";

#[cfg(not(target_os = "macos"))]
pub const TEMPLATE_SHORTCUT: &str = "Ctrl+T";
