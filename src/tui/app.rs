use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::coordinator::{CommandError, ViewCoordinator};
use crate::io::config_io;
use crate::io::persistence::{JsonFileStore, PersistencePort};
use crate::logging::{self, LogSink};
use crate::model::{DateKey, MonthCursor, UiConfig};
use crate::ops::calendar::{self, CalendarCell, GRID_CELLS, GRID_COLUMNS};
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// The coordinator as the TUI holds it. Boxed so tests can swap the port.
pub type Coordinator = ViewCoordinator<Box<dyn PersistencePort>>;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Grid,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Form => Focus::Grid,
            Focus::Grid => Focus::List,
            Focus::List => Focus::Form,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Form => Focus::List,
            Focus::Grid => Focus::Form,
            Focus::List => Focus::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Text,
    Description,
}

/// Contents of the add-task form. `cursor` is a byte offset into the
/// active field, always on a grapheme boundary.
#[derive(Debug, Clone)]
pub struct FormState {
    pub date: String,
    pub text: String,
    pub description: String,
    pub field: FormField,
    pub cursor: usize,
}

impl FormState {
    fn new(date: Option<DateKey>) -> Self {
        FormState {
            date: date.map(|d| d.to_string()).unwrap_or_default(),
            text: String::new(),
            description: String::new(),
            field: FormField::Text,
            cursor: 0,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Text => &self.text,
            FormField::Description => &self.description,
        }
    }

    fn current_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Date => &mut self.date,
            FormField::Text => &mut self.text,
            FormField::Description => &mut self.description,
        }
    }

    pub fn current(&self) -> &str {
        self.value(self.field)
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.current().len();
    }

    /// Next field, or None when leaving the last one
    pub fn next_field(&self) -> Option<FormField> {
        match self.field {
            FormField::Date => Some(FormField::Text),
            FormField::Text => Some(FormField::Description),
            FormField::Description => None,
        }
    }

    pub fn prev_field(&self) -> Option<FormField> {
        match self.field {
            FormField::Date => None,
            FormField::Text => Some(FormField::Date),
            FormField::Description => Some(FormField::Text),
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        let cursor = self.cursor;
        self.current_mut().insert_str(cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        let Some(prev) = unicode::prev_grapheme_boundary(self.current(), self.cursor) else {
            return;
        };
        let end = self.cursor;
        self.current_mut().replace_range(prev..end, "");
        self.cursor = prev;
    }

    pub fn delete_forward(&mut self) {
        let Some(next) = unicode::next_grapheme_boundary(self.current(), self.cursor) else {
            return;
        };
        let start = self.cursor;
        self.current_mut().replace_range(start..next, "");
    }

    pub fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(self.current(), self.cursor);
        let end = self.cursor;
        self.current_mut().replace_range(start..end, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(self.current(), self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(self.current(), self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.current().len();
    }

    /// Clear text and description after a successful add; the date stays.
    fn clear_entry(&mut self) {
        self.text.clear();
        self.description.clear();
        self.focus_field(FormField::Text);
    }
}

/// Main application state
pub struct App {
    pub coord: Coordinator,
    pub focus: Focus,
    /// Index into the 42 grid cells
    pub grid_cursor: usize,
    /// Index into `list_entries()`
    pub list_cursor: usize,
    pub form: FormState,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// One-line message for the status row, cleared on the next key
    pub status: Option<String>,
}

impl App {
    pub fn new(coord: Coordinator, ui: &UiConfig) -> Self {
        let mut app = App {
            form: FormState::new(coord.selected_date()),
            coord,
            focus: Focus::Grid,
            grid_cursor: 0,
            list_cursor: 0,
            theme: Theme::from_config(ui),
            show_help: false,
            show_key_hints: ui.show_key_hints,
            should_quit: false,
            status: None,
        };
        app.place_grid_cursor();
        app
    }

    // -----------------------------------------------------------------------
    // Grid
    // -----------------------------------------------------------------------

    pub fn cursor_cell(&self) -> Option<&CalendarCell> {
        self.coord.grid().get(self.grid_cursor)
    }

    /// Move the grid cursor by rows and columns, clamped to the grid
    pub fn move_grid(&mut self, rows: isize, cols: isize) {
        let delta = rows * GRID_COLUMNS as isize + cols;
        let next = (self.grid_cursor as isize + delta).clamp(0, GRID_CELLS as isize - 1);
        self.grid_cursor = next as usize;
    }

    /// Select the day under the cursor. Filler cells change nothing.
    pub fn select_cursor_cell(&mut self) {
        let date = self.cursor_cell().and_then(|c| c.date);
        self.coord.select_date(date);
        self.sync_form_date();
    }

    pub fn change_month(&mut self, delta: i64) {
        self.coord.change_month(delta);
        self.place_grid_cursor();
    }

    pub fn go_to_today(&mut self) {
        self.coord.go_to_today();
        self.sync_form_date();
        self.place_grid_cursor();
    }

    /// Put the cursor on the selected date when it is visible, else on the
    /// first of the month.
    fn place_grid_cursor(&mut self) {
        let cursor = self.coord.cursor();
        self.grid_cursor = self
            .coord
            .selected_date()
            .and_then(|d| calendar::cell_index_of(cursor, d))
            .or_else(|| calendar::first_weekday(cursor).map(|w| w as usize))
            .unwrap_or(0);
    }

    /// Open the nth task (0-based) of the day under the grid cursor
    pub fn open_from_grid(&mut self, n: usize) {
        let date = self.cursor_cell().and_then(|c| c.date);
        if !self.coord.open_detail(date, Some(n)) {
            self.status = Some(format!("No task {} on that day", n + 1));
        }
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    /// Every task in list order as `(date, index)`
    pub fn list_entries(&self) -> Vec<(DateKey, usize)> {
        self.coord
            .flat_list()
            .flat_map(|(date, tasks)| (0..tasks.len()).map(move |i| (*date, i)))
            .collect()
    }

    pub fn move_list(&mut self, delta: isize) {
        let len = self.list_entries().len();
        if len == 0 {
            self.list_cursor = 0;
            return;
        }
        let next = (self.list_cursor as isize)
            .saturating_add(delta)
            .clamp(0, len as isize - 1);
        self.list_cursor = next as usize;
    }

    fn list_target(&self) -> Option<(DateKey, usize)> {
        self.list_entries().get(self.list_cursor).copied()
    }

    pub fn open_from_list(&mut self) {
        if let Some((date, index)) = self.list_target() {
            self.coord.open_detail(Some(date), Some(index));
        }
    }

    pub fn toggle_from_list(&mut self) {
        let Some((date, index)) = self.list_target() else {
            return;
        };
        let result = self.coord.toggle_completion(date, index);
        self.report(result, || None);
    }

    pub fn delete_from_list(&mut self) {
        let Some((date, index)) = self.list_target() else {
            return;
        };
        let result = self.coord.delete_task(date, index);
        self.report(result, || Some(format!("Deleted {} #{}", date, index)));
        self.move_list(0);
    }

    // -----------------------------------------------------------------------
    // Detail modal
    // -----------------------------------------------------------------------

    pub fn toggle_detail(&mut self) {
        let result = self.coord.toggle_detail();
        self.report(result, || None);
    }

    pub fn delete_detail(&mut self) {
        let result = self.coord.delete_detail();
        self.report(result, || Some("Deleted".to_string()));
        self.move_list(0);
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    /// The date field changed: mirror it into the selection, and bring its
    /// month into view once it parses.
    pub fn form_date_changed(&mut self) {
        let date = self.form.date.parse::<DateKey>().ok();
        self.coord.set_selected_date(date);
        if let Some(date) = date {
            let target = MonthCursor::containing(date);
            let current = self.coord.cursor();
            let delta = (i64::from(target.year) * 12 + i64::from(target.month))
                - (i64::from(current.year) * 12 + i64::from(current.month));
            if delta != 0 {
                self.coord.change_month(delta);
            }
            self.place_grid_cursor();
        }
    }

    fn sync_form_date(&mut self) {
        self.form.date = self
            .coord
            .selected_date()
            .map(|d| d.to_string())
            .unwrap_or_default();
        if self.form.field == FormField::Date {
            self.form.cursor = self.form.date.len();
        }
    }

    pub fn submit_form(&mut self) {
        let date = self.coord.selected_date();
        match self.coord.add_task(&self.form.text, &self.form.description) {
            Ok(index) => {
                self.form.clear_entry();
                self.status = date.map(|d| format!("Added {} #{}", d, index));
                self.report_persist_error();
            }
            Err(CommandError::NoDateSelected) => {
                self.status = Some("Enter a date as YYYY-MM-DD".into());
            }
            Err(e) => self.status = Some(capitalize(&e.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    fn report(
        &mut self,
        result: Result<(), CommandError>,
        on_success: impl FnOnce() -> Option<String>,
    ) {
        match result {
            Ok(()) => {
                self.status = on_success();
                self.report_persist_error();
            }
            Err(e) => self.status = Some(capitalize(&e.to_string())),
        }
    }

    fn report_persist_error(&mut self) {
        if let Some(e) = self.coord.last_persist_error() {
            self.status = Some(format!("Not saved: {}", e));
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Run the TUI application
pub fn run(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config()?;
    let path = config_io::resolve_storage_path(&config, file);
    let store = JsonFileStore::new(path);
    logging::init_logging(&config.log.level, LogSink::File(store.dir()))?;
    log::info!("starting TUI on {}", store.path().display());

    let port: Box<dyn PersistencePort> = Box::new(store);
    let coord = ViewCoordinator::new(port, DateKey::today()?);
    let mut app = App::new(coord, &config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
