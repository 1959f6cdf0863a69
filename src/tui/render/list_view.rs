use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode;

use super::helpers::{checkbox, pane_block, task_style};

/// Render every day with tasks, in store order, one line per task
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::List;
    let block = pane_block(app, " Tasks ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bg = app.theme.background;
    let width = inner.width as usize;
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;
    let mut entry = 0;

    for (date, tasks) in app.coord.flat_list() {
        let mut header = date.to_string();
        if *date == app.coord.today() {
            header.push_str("  today");
        }
        lines.push(Line::from(Span::styled(header, header_style)));

        for (index, task) in tasks.iter().enumerate() {
            let is_cursor = focused && entry == app.list_cursor;
            if entry == app.list_cursor {
                cursor_line = lines.len();
            }
            let prefix = format!("  {} ", checkbox(task.completed));
            let text = unicode::truncate_to_width(
                &task.text,
                width.saturating_sub(unicode::display_width(&prefix) + 4),
            );
            let mut prefix_style = Style::default().fg(app.theme.dim).bg(bg);
            let mut text_style = task_style(app, task.completed);
            if is_cursor {
                prefix_style = prefix_style.bg(app.theme.selection_bg);
                text_style = text_style.bg(app.theme.selection_bg);
            }
            lines.push(Line::from(vec![
                Span::styled(prefix, prefix_style),
                Span::styled(text, text_style),
                Span::styled(
                    format!("  #{}", index),
                    Style::default().fg(app.theme.dim).bg(bg),
                ),
            ]));
            entry += 1;
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No tasks yet. Tab to the form to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    // Keep the cursor row on screen
    let height = inner.height as usize;
    let scroll = cursor_line.saturating_sub(height.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}
