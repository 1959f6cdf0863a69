use serde::Serialize;

use crate::model::{DateKey, MonthCursor, Task, TaskStore, WEEKDAY_LABELS};
use crate::ops::calendar::{self, CalendarCell, GRID_COLUMNS};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub date: DateKey,
    pub index: usize,
    pub text: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct DayJson {
    pub date: DateKey,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct MonthJson {
    pub year: i32,
    /// 1-based, as in a date key
    pub month: u32,
    pub title: String,
    pub cells: Vec<CellJson>,
}

#[derive(Serialize)]
pub struct CellJson {
    pub day: i32,
    pub date: Option<DateKey>,
    pub tasks: usize,
    pub completed: usize,
}

pub fn task_to_json(date: DateKey, index: usize, task: &Task) -> TaskJson {
    TaskJson {
        date,
        index,
        text: task.text.clone(),
        description: task.description.clone(),
        completed: task.completed,
    }
}

pub fn day_to_json(date: DateKey, tasks: &[Task]) -> DayJson {
    DayJson {
        date,
        tasks: tasks
            .iter()
            .enumerate()
            .map(|(i, t)| task_to_json(date, i, t))
            .collect(),
    }
}

pub fn month_to_json(cursor: MonthCursor, cells: &[CalendarCell], store: &TaskStore) -> MonthJson {
    MonthJson {
        year: cursor.year,
        month: cursor.month1(),
        title: calendar::month_title(cursor),
        cells: cells
            .iter()
            .map(|cell| {
                let tasks = cell.date.map_or(&[][..], |d| store.tasks_on(&d));
                CellJson {
                    day: cell.day,
                    date: cell.date,
                    tasks: tasks.len(),
                    completed: tasks.iter().filter(|t| t.completed).count(),
                }
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn checkbox(task: &Task) -> &'static str {
    if task.completed { "[x]" } else { "[ ]" }
}

/// One task line within a day block: `  0 [ ] Buy milk`
pub fn format_task_line(index: usize, task: &Task) -> String {
    format!("  {} {} {}", index, checkbox(task), task.text)
}

/// A day header followed by its task lines
pub fn format_day(date: DateKey, tasks: &[Task]) -> String {
    let mut lines = vec![date.to_string()];
    lines.extend(
        tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format_task_line(i, t)),
    );
    lines.join("\n")
}

/// Full detail of one task
pub fn format_task_detail(date: DateKey, index: usize, task: &Task) -> String {
    let mut out = format!(
        "{} {}\ndate: {} #{}\n",
        checkbox(task),
        task.text,
        date,
        index
    );
    if !task.description.is_empty() {
        out.push('\n');
        out.push_str(&task.description);
        if !task.description.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Width of one grid cell in the text calendar
const CELL_WIDTH: usize = 6;

/// Text month grid. Each day shows its number and, when it has tasks, the
/// count of open tasks in brackets (`[0]` once all are done).
pub fn format_month(cursor: MonthCursor, cells: &[CalendarCell], store: &TaskStore) -> String {
    let row_width = CELL_WIDTH * GRID_COLUMNS;
    let title = calendar::month_title(cursor);
    let pad = row_width.saturating_sub(title.len()) / 2;

    let mut lines = vec![format!("{}{}", " ".repeat(pad), title)];
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:<width$}", label, width = CELL_WIDTH))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    for week in cells.chunks(GRID_COLUMNS) {
        let row: String = week
            .iter()
            .map(|cell| {
                let text = match cell.date {
                    None => String::new(),
                    Some(date) => {
                        let tasks = store.tasks_on(&date);
                        if tasks.is_empty() {
                            format!("{:>3}", cell.day)
                        } else {
                            let open = tasks.iter().filter(|t| !t.completed).count();
                            format!("{:>3}[{}]", cell.day, open)
                        }
                    }
                };
                format!("{:<width$}", text, width = CELL_WIDTH)
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    // Months that fit in five weeks leave a blank sixth row
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
