use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::App;
use crate::util::unicode;

/// Checkbox for a task line
pub(super) fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Style for a task's text: struck through once completed
pub(super) fn task_style(app: &App, completed: bool) -> Style {
    let style = Style::default()
        .fg(app.theme.task_color(completed))
        .bg(app.theme.background);
    if completed {
        style.add_modifier(Modifier::CROSSED_OUT)
    } else {
        style
    }
}

/// Bordered pane block, bright when it has focus
pub(super) fn pane_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let border = if focused {
        app.theme.selection_border
    } else {
        app.theme.dim
    };
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default().fg(app.theme.text_bright).bg(app.theme.background),
        ))
        .border_style(Style::default().fg(border).bg(app.theme.background))
        .style(Style::default().bg(app.theme.background))
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
