//! Selector rendering
//!
//! [`lines`] is a pure function of the session and the theme. [`draw`] only
//! places those lines into a frame.

use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::keybindings::{self, Keybinding};
use super::session::SelectionSession;
use super::theme::Theme;

const TITLE: &str = "Select the environment variables to apply";

/// Render a session to text lines
///
/// Layout: title, blank, the visible entries, blank, two help rows.
pub fn lines(session: &SelectionSession, theme: &Theme) -> Vec<Line<'static>> {
    let width = usize::from(session.width());
    let mut out = Vec::with_capacity(session.viewport_height() + 5);

    let title = Line::from(vec![
        Span::styled(TITLE, theme.title),
        Span::styled(
            format!(
                " ({}/{} enabled)",
                session.enabled_count(),
                session.entries().len()
            ),
            theme.comment,
        ),
    ]);
    out.push(fit(title, width));
    out.push(Line::from(""));

    if session.entries().is_empty() {
        out.push(Line::from(Span::styled(
            "  (no variables in this vault)",
            theme.comment,
        )));
    }

    for index in session.visible_range() {
        out.push(fit(entry_line(session, index, theme), width));
    }

    out.push(Line::from(""));

    if session.show_full_help() {
        for row in keybindings::full_help() {
            out.push(fit(help_line(&row, theme), width));
        }
    } else {
        out.push(fit(help_line(&keybindings::short_help(), theme), width));
    }

    out
}

/// Draw a session into the whole frame
pub fn draw(frame: &mut Frame, session: &SelectionSession, theme: &Theme) {
    let paragraph = Paragraph::new(lines(session, theme));
    frame.render_widget(paragraph, frame.area());
}

/// One checklist row: cursor mark, check box, key and optional comment
fn entry_line(session: &SelectionSession, index: usize, theme: &Theme) -> Line<'static> {
    let entry = &session.entries()[index];
    let at_cursor = index == session.cursor();

    let cursor = if at_cursor {
        Span::styled(theme.cursor_mark, theme.cursor)
    } else {
        Span::raw(" ".repeat(theme.cursor_mark.chars().count()))
    };

    let check = if entry.enabled {
        Span::styled(theme.checked_mark, theme.checked)
    } else {
        Span::styled(theme.unchecked_mark, theme.unchecked)
    };

    let item_style = if at_cursor {
        theme.selected_item
    } else {
        theme.normal_item
    };

    let mut spans = vec![
        cursor,
        check,
        Span::styled(format!(" {}", entry.key), item_style),
    ];

    if !entry.comment.is_empty() {
        spans.push(Span::styled(format!(" - {}", entry.comment), theme.comment));
    }

    Line::from(spans)
}

/// `label description • label description ...`
fn help_line(bindings: &[&Keybinding], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, kb) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.help_text));
        }
        spans.push(Span::styled(kb.label, theme.help_key));
        spans.push(Span::styled(format!(" {}", kb.description), theme.help_text));
    }

    Line::from(spans)
}

/// Truncate a line to `width` characters
fn fit(line: Line<'static>, width: usize) -> Line<'static> {
    let mut remaining = width;
    let mut spans = Vec::with_capacity(line.spans.len());

    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let len = span.content.chars().count();
        if len <= remaining {
            remaining -= len;
            spans.push(span);
        } else {
            let cut: String = span.content.chars().take(remaining).collect();
            spans.push(Span::styled(cut, span.style));
            remaining = 0;
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvVar;
    use crate::tui::session::{SelectionEvent, CHROME_ROWS};
    use ratatui::{backend::TestBackend, Terminal};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn sample() -> Vec<EnvVar> {
        vec![
            EnvVar::new("DB_URL", "postgres://x").with_comment("Database"),
            EnvVar::new("API_KEY", "abc"),
            EnvVar::new("DEBUG", "1"),
        ]
    }

    #[test]
    fn test_rows_show_cursor_checkbox_and_comment() {
        let mut session = SelectionSession::new(sample(), 80, 24);
        session.handle(SelectionEvent::MoveDown);
        session.handle(SelectionEvent::Toggle);

        let rendered: Vec<String> = lines(&session, &Theme::plain()).iter().map(text).collect();

        assert_eq!(rendered[0], format!("{} (2/3 enabled)", TITLE));
        assert_eq!(rendered[1], "");
        assert_eq!(rendered[2], "  [✓] DB_URL - Database");
        assert_eq!(rendered[3], "> [ ] API_KEY");
        assert_eq!(rendered[4], "  [✓] DEBUG");
        assert_eq!(rendered[5], "");
        assert!(rendered[6].contains("space toggle"));
        assert_eq!(rendered.len(), 7);
    }

    #[test]
    fn test_values_are_never_rendered() {
        let session = SelectionSession::new(sample(), 200, 24);
        let all: String = lines(&session, &Theme::default()).iter().map(text).collect();
        assert!(!all.contains("postgres://x"));
        assert!(!all.contains("abc"));
    }

    #[test]
    fn test_only_viewport_rows_are_rendered() {
        let entries: Vec<EnvVar> = (0..10).map(|i| EnvVar::new(format!("K{}", i), "v")).collect();
        let mut session = SelectionSession::new(entries, 80, 3 + CHROME_ROWS);
        for _ in 0..5 {
            session.handle(SelectionEvent::MoveDown);
        }

        let rendered: Vec<String> = lines(&session, &Theme::plain()).iter().map(text).collect();
        let rows: Vec<&String> = rendered.iter().filter(|l| l.contains("] K")).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].ends_with("K3"));
        assert!(rows[2].starts_with("> "));
        assert!(rows[2].ends_with("K5"));
    }

    #[test]
    fn test_full_help_uses_two_rows() {
        let mut session = SelectionSession::new(sample(), 200, 24);
        session.handle(SelectionEvent::ToggleHelp);

        let rendered: Vec<String> = lines(&session, &Theme::plain()).iter().map(text).collect();
        let n = rendered.len();
        assert!(rendered[n - 2].contains("bottom"));
        assert!(rendered[n - 1].contains("cancel"));
    }

    #[test]
    fn test_empty_list_message() {
        let session = SelectionSession::new(Vec::new(), 80, 24);
        let rendered: Vec<String> = lines(&session, &Theme::plain()).iter().map(text).collect();
        assert!(rendered[2].contains("no variables"));
        assert!(rendered[0].contains("(0/0 enabled)"));
    }

    #[test]
    fn test_lines_are_clipped_to_width() {
        let entries = vec![EnvVar::new("A_VERY_LONG_VARIABLE_NAME", "v")
            .with_comment("with an equally long comment attached")];
        let session = SelectionSession::new(entries, 20, 24);
        for line in lines(&session, &Theme::plain()) {
            assert!(text(&line).chars().count() <= 20);
        }
    }

    #[test]
    fn test_draw_on_test_backend() {
        let session = SelectionSession::new(sample(), 60, 12);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| draw(frame, &session, &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let row: String = (0..60u16)
            .map(|x| buffer[(x, 2u16)].symbol().to_string())
            .collect();
        assert!(row.starts_with("> [✓] DB_URL - Database"));
    }
}
