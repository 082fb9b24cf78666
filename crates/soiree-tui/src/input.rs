use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use soiree_core::media::ViewerKey;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    Next,
    Prev,
    TogglePlay,
    OpenViewer,
    CycleCategory,
    StartSearch,
    SliderLeft,
    SliderRight,
    OpenExternal,
    Help,
    ExitMode,
    /// Key routed to the open modal viewer
    Viewer(ViewerKey),
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Ctrl+C quits from every mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // An open viewer owns the keyboard
    if app.modal_open() {
        return handle_viewer_mode(key);
    }

    match &app.mode {
        Mode::Search(_) => return handle_input_mode(key),
        // Any key exits help
        Mode::Help => return Action::ExitMode,
        Mode::Normal => {}
    }

    keymap
        .get(&KeyBinding::from(key))
        .copied()
        .unwrap_or(Action::None)
}

/// Handle key events in input mode (gallery search)
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handle key events in the modal viewer
fn handle_viewer_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Left, _) => Action::Viewer(ViewerKey::ArrowLeft),
        (KeyCode::Right, _) => Action::Viewer(ViewerKey::ArrowRight),
        (KeyCode::Esc, _) => Action::Viewer(ViewerKey::Escape),
        // Open in external viewer
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenExternal,
        (KeyCode::Char(c), _) => Action::Viewer(ViewerKey::Char(c)),
        _ => Action::None,
    }
}
