use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.coord.close_detail(),
        KeyCode::Char('x') => app.toggle_detail(),
        KeyCode::Char('d') => app.delete_detail(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::{app_on, key};

    #[test]
    fn test_x_toggles_and_closes() {
        let mut app = app_on("2024-03-15");
        app.coord.add_task("a", "").unwrap();
        press(&mut app, KeyCode::Char('1'));
        assert!(app.coord.modal().is_some());
        press(&mut app, KeyCode::Char('x'));
        assert!(app.coord.modal().is_none());
        assert!(app.coord.tasks_on(&key("2024-03-15"))[0].completed);
    }

    #[test]
    fn test_d_deletes_and_closes() {
        let mut app = app_on("2024-03-15");
        app.coord.add_task("a", "").unwrap();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('d'));
        assert!(app.coord.modal().is_none());
        assert!(app.coord.store().is_empty());
    }

    #[test]
    fn test_esc_closes_without_change_and_q_does_not_quit() {
        let mut app = app_on("2024-03-15");
        app.coord.add_task("a", "").unwrap();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('j'));
        assert!(app.coord.modal().is_some());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.coord.modal().is_none());
        assert!(!app.should_quit);
        assert!(!app.coord.tasks_on(&key("2024-03-15"))[0].completed);
    }
}
