use crate::model::date_key::DateKey;
use crate::model::store::TaskStore;
use crate::model::task::Task;

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("no tasks on {0}")]
    DateNotFound(DateKey),
    #[error("no task #{index} on {date} ({len} task(s) there)")]
    IndexOutOfRange {
        date: DateKey,
        index: usize,
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Checked transformations
// ---------------------------------------------------------------------------

/// Append a new task to `date`, creating the day if needed.
pub fn try_add_task(
    store: &TaskStore,
    date: &DateKey,
    text: &str,
    description: &str,
) -> Result<TaskStore, TaskError> {
    if text.is_empty() {
        return Err(TaskError::EmptyText);
    }
    let mut next = store.clone();
    next.days
        .entry(*date)
        .or_default()
        .push(Task::new(text, description));
    Ok(next)
}

/// Flip the completion flag of the task at `index` on `date`.
pub fn try_toggle_completion(
    store: &TaskStore,
    date: &DateKey,
    index: usize,
) -> Result<TaskStore, TaskError> {
    check_index(store, date, index)?;
    let mut next = store.clone();
    if let Some(task) = next.days.get_mut(date).and_then(|tasks| tasks.get_mut(index)) {
        task.completed = !task.completed;
    }
    Ok(next)
}

/// Remove the task at `index` on `date`. The day disappears with its last task.
pub fn try_delete_task(
    store: &TaskStore,
    date: &DateKey,
    index: usize,
) -> Result<TaskStore, TaskError> {
    check_index(store, date, index)?;
    let mut next = store.clone();
    let now_empty = match next.days.get_mut(date) {
        Some(tasks) => {
            tasks.remove(index);
            tasks.is_empty()
        }
        None => false,
    };
    if now_empty {
        // shift_remove keeps the order of the other days intact
        next.days.shift_remove(date);
    }
    Ok(next)
}

/// Resolve `(date, index)` against the store without changing anything.
pub fn check_index(store: &TaskStore, date: &DateKey, index: usize) -> Result<(), TaskError> {
    let tasks = store
        .days
        .get(date)
        .ok_or(TaskError::DateNotFound(*date))?;
    if index >= tasks.len() {
        return Err(TaskError::IndexOutOfRange {
            date: *date,
            index,
            len: tasks.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Forgiving transformations: invalid input leaves the store unchanged
// ---------------------------------------------------------------------------

pub fn add_task(store: &TaskStore, date: &DateKey, text: &str, description: &str) -> TaskStore {
    try_add_task(store, date, text, description).unwrap_or_else(|_| store.clone())
}

pub fn toggle_completion(store: &TaskStore, date: &DateKey, index: usize) -> TaskStore {
    try_toggle_completion(store, date, index).unwrap_or_else(|_| store.clone())
}

pub fn delete_task(store: &TaskStore, date: &DateKey, index: usize) -> TaskStore {
    try_delete_task(store, date, index).unwrap_or_else(|_| store.clone())
}
