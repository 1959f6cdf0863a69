use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::helpers::centered_rect;
use crate::tui::app::{App, Focus};

const GRID_KEYS: &[(&str, &str)] = &[
    (" \u{2190}\u{2191}\u{2192}\u{2193}/hjkl", "Move cursor"),
    (" Enter/Space", "Select day"),
    (" [ / ]", "Previous / next month"),
    (" t", "Go to today"),
    (" 1-9", "Open nth task of the day"),
];

const LIST_KEYS: &[(&str, &str)] = &[
    (" \u{2191}\u{2193}/jk", "Move cursor"),
    (" g/G", "Jump to top/bottom"),
    (" Enter", "Open task"),
    (" x", "Toggle complete"),
    (" d", "Delete task"),
];

const FORM_KEYS: &[(&str, &str)] = &[
    (" Tab", "Next field"),
    (" Enter", "Add task to the date"),
    (" Ctrl+W", "Delete word"),
    (" Esc", "Back to calendar"),
];

const TASK_KEYS: &[(&str, &str)] = &[
    (" x", "Toggle complete"),
    (" d", "Delete"),
    (" Esc", "Close"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive section first
    let (title, keys) = match app.focus {
        Focus::Grid => (" Calendar", GRID_KEYS),
        Focus::List => (" Task list", LIST_KEYS),
        Focus::Form => (" Add form", FORM_KEYS),
    };
    lines.push(Line::from(Span::styled(title, header_style)));
    for (key, desc) in keys {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Task detail", header_style)));
    for (key, desc) in TASK_KEYS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab", "Cycle focus", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+C", "Quit (anywhere)", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
