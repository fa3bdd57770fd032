//! Keybinding definitions
//!
//! Maps key presses to selector events and provides the help lines shown
//! under the list.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::session::SelectionEvent;

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// Keys that trigger the binding
    pub keys: &'static [(KeyCode, KeyModifiers)],
    /// Short key label for the help line
    pub label: &'static str,
    /// Description of what the key does
    pub description: &'static str,
    /// Event produced
    pub event: SelectionEvent,
    /// Shown in the one-line help
    pub short_help: bool,
    /// Row of the full help (0 or 1)
    pub full_help_row: u8,
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    Keybinding {
        keys: &[
            (KeyCode::Up, KeyModifiers::NONE),
            (KeyCode::Char('k'), KeyModifiers::NONE),
        ],
        label: "↑/k",
        description: "up",
        event: SelectionEvent::MoveUp,
        short_help: true,
        full_help_row: 0,
    },
    Keybinding {
        keys: &[
            (KeyCode::Down, KeyModifiers::NONE),
            (KeyCode::Char('j'), KeyModifiers::NONE),
        ],
        label: "↓/j",
        description: "down",
        event: SelectionEvent::MoveDown,
        short_help: true,
        full_help_row: 0,
    },
    Keybinding {
        keys: &[(KeyCode::PageUp, KeyModifiers::NONE)],
        label: "pgup",
        description: "page up",
        event: SelectionEvent::PageUp,
        short_help: false,
        full_help_row: 0,
    },
    Keybinding {
        keys: &[(KeyCode::PageDown, KeyModifiers::NONE)],
        label: "pgdn",
        description: "page down",
        event: SelectionEvent::PageDown,
        short_help: false,
        full_help_row: 0,
    },
    Keybinding {
        keys: &[
            (KeyCode::Home, KeyModifiers::NONE),
            (KeyCode::Char('g'), KeyModifiers::NONE),
        ],
        label: "g/home",
        description: "top",
        event: SelectionEvent::First,
        short_help: false,
        full_help_row: 0,
    },
    Keybinding {
        keys: &[
            (KeyCode::End, KeyModifiers::NONE),
            (KeyCode::Char('G'), KeyModifiers::NONE),
        ],
        label: "G/end",
        description: "bottom",
        event: SelectionEvent::Last,
        short_help: false,
        full_help_row: 0,
    },
    Keybinding {
        keys: &[(KeyCode::Char(' '), KeyModifiers::NONE)],
        label: "space",
        description: "toggle",
        event: SelectionEvent::Toggle,
        short_help: true,
        full_help_row: 1,
    },
    Keybinding {
        keys: &[(KeyCode::Enter, KeyModifiers::NONE)],
        label: "enter",
        description: "confirm",
        event: SelectionEvent::Confirm,
        short_help: true,
        full_help_row: 1,
    },
    Keybinding {
        keys: &[(KeyCode::Char('?'), KeyModifiers::NONE)],
        label: "?",
        description: "more help",
        event: SelectionEvent::ToggleHelp,
        short_help: true,
        full_help_row: 1,
    },
    Keybinding {
        keys: &[
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ],
        label: "q/esc",
        description: "cancel",
        event: SelectionEvent::Cancel,
        short_help: true,
        full_help_row: 1,
    },
];

/// Translate a key press into a selector event
///
/// Releases and repeats are ignored. Shift is not significant for character
/// keys since it is already reflected in the character.
pub fn map_key(key: &KeyEvent) -> Option<SelectionEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let modifiers = if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.difference(KeyModifiers::SHIFT)
    } else {
        key.modifiers
    };

    KEYBINDINGS
        .iter()
        .find(|kb| kb.keys.iter().any(|&(code, mods)| code == key.code && mods == modifiers))
        .map(|kb| kb.event)
}

/// Bindings for the one-line help
pub fn short_help() -> Vec<&'static Keybinding> {
    KEYBINDINGS.iter().filter(|kb| kb.short_help).collect()
}

/// Bindings for the full help, grouped by row
pub fn full_help() -> [Vec<&'static Keybinding>; 2] {
    [0u8, 1u8].map(|row| {
        KEYBINDINGS
            .iter()
            .filter(|kb| kb.full_help_row == row)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_vim_keys() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(SelectionEvent::MoveUp));
        assert_eq!(map_key(&press(KeyCode::Char('k'))), Some(SelectionEvent::MoveUp));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(SelectionEvent::MoveDown));
        assert_eq!(map_key(&press(KeyCode::Char('j'))), Some(SelectionEvent::MoveDown));
    }

    #[test]
    fn test_toggle_confirm_cancel() {
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(SelectionEvent::Toggle));
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(SelectionEvent::Confirm));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(SelectionEvent::Cancel));
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(SelectionEvent::Cancel));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(SelectionEvent::Cancel)
        );
    }

    #[test]
    fn test_shifted_characters() {
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&question), Some(SelectionEvent::ToggleHelp));

        let big_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&big_g), Some(SelectionEvent::Last));
    }

    #[test]
    fn test_plain_c_is_not_cancel() {
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(&key), None);
    }

    #[test]
    fn test_help_groups() {
        let short: Vec<_> = short_help().iter().map(|kb| kb.label).collect();
        assert_eq!(short, vec!["↑/k", "↓/j", "space", "enter", "?", "q/esc"]);

        let [nav, actions] = full_help();
        assert!(nav.iter().any(|kb| kb.event == SelectionEvent::Last));
        assert!(actions.iter().any(|kb| kb.event == SelectionEvent::Cancel));
    }
}
