pub mod calendar_view;
pub mod detail_modal;
pub mod form_view;
pub mod help_overlay;
mod helpers;
pub mod list_view;
pub mod status_row;
#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Width of the add-task form column
const FORM_WIDTH: u16 = 34;
/// Height of the form and calendar row: borders, title, weekdays, six weeks
const TOP_HEIGHT: u16 = 12;

/// Draw the whole screen: panes first, then overlays
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: form | calendar, then the task list, then the status row
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOP_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(22)])
        .split(rows[0]);

    form_view::render_form_view(frame, app, top[0]);
    calendar_view::render_calendar_view(frame, app, top[1]);
    list_view::render_list_view(frame, app, rows[1]);
    status_row::render_status_row(frame, app, rows[2]);

    // Overlays (rendered on top of everything)
    if app.coord.modal().is_some() {
        detail_modal::render_detail_modal(frame, app, area);
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
