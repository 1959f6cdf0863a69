use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::WEEKDAY_LABELS;
use crate::ops::calendar::{self, CalendarCell, GRID_COLUMNS};
use crate::tui::app::{App, Focus};
use crate::util::unicode;

use super::helpers::pane_block;

/// Day number plus a marker: `•n` open tasks, `✓` all done
fn cell_label(app: &App, cell: &CalendarCell) -> String {
    let Some(date) = cell.date else {
        return String::new();
    };
    let tasks = app.coord.tasks_on(&date);
    let open = tasks.iter().filter(|t| !t.completed).count();
    match (tasks.is_empty(), open) {
        (true, _) => format!("{:>3}", cell.day),
        (false, 0) => format!("{:>3}\u{2713}", cell.day),
        (false, n) => format!("{:>3}\u{2022}{}", cell.day, n),
    }
}

fn cell_style(app: &App, index: usize, cell: &CalendarCell) -> Style {
    let theme = &app.theme;
    let mut style = Style::default().fg(theme.text).bg(theme.background);

    let Some(date) = cell.date else {
        return style.bg(theme.filler_bg);
    };
    if date == app.coord.today() {
        style = style.fg(theme.today).add_modifier(Modifier::BOLD);
    }
    if app.coord.selected_date() == Some(date) {
        style = style.bg(theme.selection_bg);
    }
    if index == app.grid_cursor {
        style = if app.focus == Focus::Grid {
            style.fg(theme.background).bg(theme.selection_border)
        } else {
            style.add_modifier(Modifier::UNDERLINED)
        };
    }
    style
}

/// Render the month grid with weekday header
pub fn render_calendar_view(frame: &mut Frame, app: &App, area: Rect) {
    let block = pane_block(app, " Calendar ", app.focus == Focus::Grid);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bg = app.theme.background;
    let cell_width = (inner.width as usize / GRID_COLUMNS).max(1);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(
        Line::from(Span::styled(
            format!(
                "\u{25C0} {} \u{25B6}",
                calendar::month_title(app.coord.cursor())
            ),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );
    lines.push(Line::from(
        WEEKDAY_LABELS
            .iter()
            .map(|label| {
                Span::styled(
                    unicode::fit_to_width(&format!(" {}", label), cell_width),
                    Style::default().fg(app.theme.dim).bg(bg),
                )
            })
            .collect::<Vec<_>>(),
    ));

    for (week, cells) in app.coord.grid().chunks(GRID_COLUMNS).enumerate() {
        let spans: Vec<Span> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let index = week * GRID_COLUMNS + col;
                Span::styled(
                    unicode::fit_to_width(&cell_label(app, cell), cell_width),
                    cell_style(app, index, cell),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;

    fn render(app: &App) -> String {
        render_to_string(46, 12, |frame, area| render_calendar_view(frame, app, area))
    }

    #[test]
    fn test_march_2024_layout() {
        let app = app_on("2024-03-15");
        let out = render(&app);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("March 2024"));
        assert!(lines[2].contains("Sun"));
        assert!(lines[2].contains("Sat"));
        // Friday the 1st sits in the sixth column of the first week
        assert_eq!(lines[3].trim_matches('│').trim(), "1     2");
        assert!(lines[8].contains("31"));
    }

    #[test]
    fn test_markers_show_open_and_done() {
        let app = app_with_payload("2024-03-15", TWO_DAYS_JSON);
        let out = render(&app);
        assert!(out.contains("1\u{2022}1"));
        assert!(out.contains("5\u{2022}1"));

        let app = app_with_payload(
            "2024-03-15",
            r#"{"2024-03-02": [{"text": "x", "completed": true}]}"#,
        );
        assert!(render(&app).contains("2\u{2713}"));
    }

    #[test]
    fn test_cursor_cell_is_highlighted_when_focused() {
        let app = app_on("2024-03-15");
        let backend = ratatui::backend::TestBackend::new(46, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_calendar_view(frame, &app, area);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        // The 15th: third week, sixth column, below the title and weekday rows
        let cell = &buf[(1 + 5 * 6 + 1, 1 + 2 + 2)];
        assert_eq!(cell.bg, app.theme.selection_border);
    }
}
