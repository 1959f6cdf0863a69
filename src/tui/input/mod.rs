mod form;
mod grid;
mod list;
mod modal;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use form::handle_form;
use grid::handle_grid;
use list::handle_list;
use modal::handle_modal;

/// Handle a key event for whichever layer is on top
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.should_quit = true;
        return;
    }

    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // The detail modal intercepts everything while open
    if app.coord.modal().is_some() {
        handle_modal(app, key);
        return;
    }

    if app.focus == Focus::Form {
        handle_form(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        _ => match app.focus {
            Focus::Grid => handle_grid(app, key),
            Focus::List => handle_list(app, key),
            Focus::Form => {}
        },
    }
}
