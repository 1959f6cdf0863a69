use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus, FormField};

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let editing_date = app.form.field == FormField::Date;

    match key.code {
        KeyCode::Esc => app.focus = Focus::Grid,
        KeyCode::Tab => match app.form.next_field() {
            Some(field) => app.form.focus_field(field),
            None => app.focus = Focus::Grid,
        },
        KeyCode::BackTab => match app.form.prev_field() {
            Some(field) => app.form.focus_field(field),
            None => app.focus = Focus::List,
        },
        KeyCode::Enter => app.submit_form(),
        KeyCode::Left => app.form.move_left(),
        KeyCode::Right => app.form.move_right(),
        KeyCode::Home => app.form.home(),
        KeyCode::End => app.form.end(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Delete => app.form.delete_forward(),
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.delete_word_back()
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut buf = [0u8; 4];
            app.form.insert_str(c.encode_utf8(&mut buf));
        }
        _ => return,
    }

    if editing_date && app.form.field == FormField::Date {
        app.form_date_changed();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::tui::app::{Focus, FormField};
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::{app_on, key};

    #[test]
    fn test_type_and_submit() {
        let mut app = app_on("2024-03-15");
        app.focus = Focus::Form;
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.field, FormField::Description);
        type_str(&mut app, "semi-skimmed");
        press(&mut app, KeyCode::Enter);

        let tasks = app.coord.tasks_on(&key("2024-03-15"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Buy milk");
        assert_eq!(tasks[0].description, "semi-skimmed");
        assert_eq!(app.form.field, FormField::Text);
        assert_eq!(app.focus, Focus::Form);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut app = app_on("2024-03-15");
        app.focus = Focus::Form;
        press(&mut app, KeyCode::Enter);
        assert!(app.coord.store().is_empty());
        assert_eq!(app.status.as_deref(), Some("Task text cannot be empty"));
    }

    #[test]
    fn test_editing_date_field_updates_selection() {
        let mut app = app_on("2024-03-15");
        app.focus = Focus::Form;
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.field, FormField::Date);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.coord.selected_date(), None);
        type_str(&mut app, "8");
        assert_eq!(app.coord.selected_date(), Some(key("2024-03-18")));

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Dentist");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.coord.tasks_on(&key("2024-03-18"))[0].text, "Dentist");
    }

    #[test]
    fn test_tab_past_last_field_leaves_form() {
        let mut app = app_on("2024-03-15");
        app.focus = Focus::Form;
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Grid);
        app.focus = Focus::Form;
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Grid);
    }
}
