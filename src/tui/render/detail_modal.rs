use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::helpers::{centered_rect, pane_block, task_style};
use crate::tui::app::App;

/// Render the detail modal for the task captured when it opened
pub fn render_detail_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(modal) = app.coord.modal() else {
        return;
    };
    let task = &modal.snapshot;

    let overlay_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let value_style = Style::default().fg(app.theme.text).bg(bg);
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            task.text.as_str(),
            task_style(app, task.completed).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Date    ", label_style),
            Span::styled(
                format!("{}  #{}", modal.target.date, modal.target.index),
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::styled("Status  ", label_style),
            if task.completed {
                Span::styled("done", Style::default().fg(app.theme.green).bg(bg))
            } else {
                Span::styled("open", value_style)
            },
        ]),
        Line::from(""),
    ];

    if task.description.is_empty() {
        lines.push(Line::from(Span::styled("No description", label_style)));
    } else {
        lines.extend(
            task.description
                .lines()
                .map(|l| Line::from(Span::styled(l, value_style))),
        );
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("x ", key_style),
        Span::styled(task.toggle_label(), value_style),
        Span::styled("   d ", key_style),
        Span::styled("Delete", value_style),
        Span::styled("   Esc ", key_style),
        Span::styled("Close", value_style),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(pane_block(app, " Task ", true))
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, overlay_area);
}
