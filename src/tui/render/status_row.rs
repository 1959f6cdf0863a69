use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::spans_width;
use crate::tui::app::{App, Focus};

fn key_hint(app: &App) -> &'static str {
    if app.coord.modal().is_some() {
        return "x toggle  d delete  Esc close";
    }
    match app.focus {
        Focus::Grid => "hjkl move  Enter select  [ ] month  t today  ? help",
        Focus::List => "jk move  Enter open  x toggle  d delete  Tab focus  ? help",
        Focus::Form => "Tab next field  Enter add  Esc back",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    // A message from the last key wins; an unsaved store stays visible
    let mut spans = match (&app.status, app.coord.last_persist_error()) {
        (Some(message), _) => vec![Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )],
        (None, Some(e)) => vec![Span::styled(
            format!(" Not saved: {}", e),
            Style::default().fg(app.theme.red).bg(bg),
        )],
        (None, None) => Vec::new(),
    };

    if app.show_key_hints {
        let hint = key_hint(app);
        let content_width = spans_width(&spans);
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
