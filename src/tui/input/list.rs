use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.move_list(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_list(-1),
        KeyCode::Char('g') | KeyCode::Home => app.list_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_list(isize::MAX),
        KeyCode::Enter => app.open_from_list(),
        KeyCode::Char('x') => app.toggle_from_list(),
        KeyCode::Char('d') => app.delete_from_list(),
        _ => {}
    }
}
