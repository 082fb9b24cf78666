use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use soiree_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Runtime keymap for efficient key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        // Helper to add binding with conflict detection
        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.focus_next, Action::FocusNext);
        add_binding(&config.focus_prev, Action::FocusPrev);
        add_binding(&config.next, Action::Next);
        add_binding(&config.prev, Action::Prev);
        add_binding(&config.toggle_play, Action::TogglePlay);
        add_binding(&config.open_viewer, Action::OpenViewer);
        add_binding(&config.cycle_category, Action::CycleCategory);
        add_binding(&config.search, Action::StartSearch);
        add_binding(&config.slider_left, Action::SliderLeft);
        add_binding(&config.slider_right, Action::SliderRight);
        add_binding(&config.open_external, Action::OpenExternal);

        // Hardcoded bindings that shouldn't be configurable
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.entry(KeyBinding::simple(KeyCode::Left)).or_insert(Action::Prev);
        bindings.entry(KeyBinding::simple(KeyCode::Right)).or_insert(Action::Next);
        bindings.entry(KeyBinding::simple(KeyCode::Char('?'))).or_insert(Action::Help);
        bindings.entry(KeyBinding::shift(KeyCode::Char('?'))).or_insert(Action::Help);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "l", "h", "q", "[", etc.
/// - Uppercase (Shift): "G", "N", etc.
/// - Ctrl: "<C-n>", "<C-p>", etc.
/// - Shift: "<S-Tab>", "<S-g>", etc.
/// - Special keys: "<CR>", "<Enter>", "<Esc>", "<Tab>", "<Space>",
///   "<Left>", "<Right>", "<Up>", "<Down>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    // Handle special notation <...>
    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        let inner = &s[1..s.len() - 1];
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    // Uppercase letters are Shift+lowercase
    if c.is_ascii_uppercase() {
        return Some(KeyBinding::shift(KeyCode::Char(c)));
    }
    Some(KeyBinding::simple(KeyCode::Char(c)))
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    // Handle modifiers: C- (Ctrl), S- (Shift)
    if let Some(rest) = inner.strip_prefix("C-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::ctrl(key));
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        let key = parse_key_name(rest)?;
        // Terminals report Shift+Tab as BackTab
        let key = if key == KeyCode::Tab { KeyCode::BackTab } else { key };
        return Some(KeyBinding::shift(key));
    }

    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            // Single character after modifier (e.g., "n" in "<C-n>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(c.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("l"),
            Some(KeyBinding::simple(KeyCode::Char('l')))
        );
        assert_eq!(
            parse_key_binding("["),
            Some(KeyBinding::simple(KeyCode::Char('[')))
        );
        assert_eq!(parse_key_binding("ll"), None);
        assert_eq!(parse_key_binding(""), None);
    }

    #[test]
    fn test_parse_uppercase_and_ctrl() {
        assert_eq!(
            parse_key_binding("N"),
            Some(KeyBinding::shift(KeyCode::Char('N')))
        );
        assert_eq!(
            parse_key_binding("<C-n>"),
            Some(KeyBinding::ctrl(KeyCode::Char('n')))
        );
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(
            parse_key_binding("<CR>"),
            Some(KeyBinding::simple(KeyCode::Enter))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::BackTab))
        );
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char(' '))),
            Some(&Action::TogglePlay)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Right)),
            Some(&Action::Next)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            next: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        // Arrow fallback still reaches Next
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Right)),
            Some(&Action::Next)
        );
    }
}
