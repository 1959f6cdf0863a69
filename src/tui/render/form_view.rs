use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::DateKey;
use crate::tui::app::{App, Focus, FormField};
use crate::util::unicode;

use super::helpers::pane_block;

const FIELDS: [(FormField, &str); 3] = [
    (FormField::Date, "Date (YYYY-MM-DD)"),
    (FormField::Text, "Task"),
    (FormField::Description, "Description"),
];

/// Render the add-task form: one label and one value line per field
pub fn render_form_view(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Form;
    let block = pane_block(app, " Add task ", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bg = app.theme.background;
    let width = (inner.width as usize).saturating_sub(1);
    let mut lines: Vec<Line> = Vec::new();

    for (field, label) in FIELDS {
        let active = focused && app.form.field == field;
        let label_style = if active {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        lines.push(Line::from(Span::styled(format!(" {}", label), label_style)));

        let value = app.form.value(field);
        let invalid = field == FormField::Date && value.parse::<DateKey>().is_err();
        let value_style = Style::default()
            .fg(if invalid { app.theme.red } else { app.theme.text_bright })
            .bg(bg);

        if active {
            lines.push(edit_line(app, value, width, value_style));
        } else {
            lines.push(Line::from(Span::styled(
                format!(" {}", unicode::truncate_to_width(value, width)),
                value_style,
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter add  Esc back",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), inner);
}

/// The active field with a block cursor. Long values scroll so the
/// cursor stays visible.
fn edit_line<'a>(app: &App, value: &'a str, width: usize, style: Style) -> Line<'a> {
    let cursor = app.form.cursor.min(value.len());
    let (before, after) = value.split_at(cursor);

    let before_width = unicode::display_width(before);
    let budget = width.saturating_sub(1);
    let shown_before = if before_width > budget {
        // Drop graphemes from the left until the prefix fits
        let mut start = 0;
        while unicode::display_width(&before[start..]) > budget {
            match unicode::next_grapheme_boundary(before, start) {
                Some(next) => start = next,
                None => break,
            }
        }
        &before[start..]
    } else {
        before
    };
    let room = budget.saturating_sub(unicode::display_width(shown_before));

    Line::from(vec![
        Span::styled(" ", style),
        Span::styled(shown_before, style),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(app.theme.background)), // ▌ cursor
        Span::styled(unicode::truncate_to_width(after, room), style),
    ])
}
