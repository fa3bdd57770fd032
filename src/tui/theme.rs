//! Presentation styles for the selector
//!
//! A [`Theme`] is passed to the renderer by value; there is no global style
//! state.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Named theme, as stored in the settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// 256-colour theme
    #[default]
    Default,
    /// No colours or attributes
    Plain,
}

impl ThemeName {
    pub fn theme(self) -> Theme {
        match self {
            Self::Default => Theme::default(),
            Self::Plain => Theme::plain(),
        }
    }
}

/// Styles and marks used when rendering a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub cursor: Style,
    /// Row under the cursor
    pub selected_item: Style,
    pub normal_item: Style,
    pub checked: Style,
    pub unchecked: Style,
    pub comment: Style,
    pub help_key: Style,
    pub help_text: Style,
    pub cursor_mark: &'static str,
    pub checked_mark: &'static str,
    pub unchecked_mark: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Indexed(205))
                .add_modifier(Modifier::BOLD),
            cursor: Style::default().fg(Color::Indexed(205)),
            selected_item: Style::default().fg(Color::Indexed(170)),
            normal_item: Style::default(),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::Gray),
            comment: Style::default().fg(Color::Indexed(240)),
            help_key: Style::default().fg(Color::Indexed(245)),
            help_text: Style::default().fg(Color::Indexed(240)),
            cursor_mark: "> ",
            checked_mark: "[✓]",
            unchecked_mark: "[ ]",
        }
    }
}

impl Theme {
    /// Theme without any colours, for `NO_COLOR` and dumb terminals
    pub fn plain() -> Self {
        Self {
            title: Style::default(),
            cursor: Style::default(),
            selected_item: Style::default(),
            normal_item: Style::default(),
            checked: Style::default(),
            unchecked: Style::default(),
            comment: Style::default(),
            help_key: Style::default(),
            help_text: Style::default(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_has_no_styles_but_same_marks() {
        let plain = Theme::plain();
        let default = Theme::default();
        assert_eq!(plain.title, Style::default());
        assert_eq!(plain.checked_mark, default.checked_mark);
        assert_ne!(plain.title, default.title);
    }

    #[test]
    fn test_theme_name_serde() {
        let name: ThemeName = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(name, ThemeName::Plain);
        assert_eq!(name.theme(), Theme::plain());
        assert_eq!(serde_json::to_string(&ThemeName::Default).unwrap(), "\"default\"");
    }
}
