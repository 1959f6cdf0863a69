use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::coordinator::ViewCoordinator;
use crate::io::persistence::{MemoryStore, PersistencePort};
use crate::model::{DateKey, UiConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

/// An App over an empty in-memory store, with "today" fixed.
pub fn app_on(today: &str) -> App {
    let port: Box<dyn PersistencePort> = Box::new(MemoryStore::new());
    App::new(ViewCoordinator::new(port, key(today)), &UiConfig::default())
}

/// An App whose store is loaded from a JSON payload.
pub fn app_with_payload(today: &str, json: &str) -> App {
    let port: Box<dyn PersistencePort> = Box::new(MemoryStore::with_payload(json));
    App::new(ViewCoordinator::new(port, key(today)), &UiConfig::default())
}

/// Two days of tasks, one completed.
pub const TWO_DAYS_JSON: &str = r#"{
  "2024-03-05": [
    {"text": "Dentist", "description": "Bring the forms", "completed": false}
  ],
  "2024-03-01": [
    {"text": "Buy milk", "description": "", "completed": true},
    {"text": "Call mum", "description": "", "completed": false}
  ]
}"#;
