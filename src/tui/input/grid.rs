use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_grid(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_grid(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.move_grid(0, 1),
        KeyCode::Up | KeyCode::Char('k') => app.move_grid(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.move_grid(1, 0),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_cursor_cell(),
        KeyCode::Char('[') => app.change_month(-1),
        KeyCode::Char(']') => app.change_month(1),
        KeyCode::Char('t') => app.go_to_today(),
        KeyCode::Char(c @ '1'..='9') => {
            let n = c as usize - '1' as usize;
            app.open_from_grid(n);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::model::MonthCursor;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::{app_on, key};

    #[test]
    fn test_arrows_and_select() {
        let mut app = app_on("2024-03-15");
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.coord.selected_date(), Some(key("2024-03-23")));
        assert_eq!(app.form.date, "2024-03-23");
    }

    #[test]
    fn test_brackets_change_month_and_t_returns() {
        let mut app = app_on("2024-01-10");
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.coord.cursor(), MonthCursor { year: 2023, month: 11 });
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.coord.cursor(), MonthCursor { year: 2024, month: 1 });
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.coord.cursor(), MonthCursor { year: 2024, month: 0 });
        assert_eq!(app.coord.selected_date(), Some(key("2024-01-10")));
    }

    #[test]
    fn test_digit_opens_nth_task_of_cell() {
        let mut app = app_on("2024-03-15");
        app.coord.add_task("first", "").unwrap();
        app.coord.add_task("second", "").unwrap();
        press(&mut app, KeyCode::Char('2'));
        let modal = app.coord.modal().unwrap();
        assert_eq!(modal.snapshot.text, "second");
        assert_eq!(modal.target.index, 1);
    }
}
