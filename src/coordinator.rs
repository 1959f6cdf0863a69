use crate::io::persistence::{PersistencePort, StorageError};
use crate::model::{DateKey, MonthCursor, Task, TaskStore};
use crate::ops::calendar::{self, CalendarCell};
use crate::ops::task_ops::{self, TaskError};

/// Error type for commands the coordinator did not apply
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("no date selected")]
    NoDateSelected,
    #[error("no task is open")]
    NoOpenTask,
    #[error(transparent)]
    Task(#[from] TaskError),
}

/// Back-reference from the modal into the store. Not owning: the task it
/// names may disappear, so it is resolved again before every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalRef {
    pub date: DateKey,
    pub index: usize,
}

/// The open detail overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailModal {
    pub target: ModalRef,
    /// The task as it was when the modal opened
    pub snapshot: Task,
}

/// Owns the current store, the selected date, the visible month and the
/// detail modal. Every accepted mutation replaces the store and is saved
/// through the port before the call returns.
pub struct ViewCoordinator<P: PersistencePort> {
    port: P,
    store: TaskStore,
    today: DateKey,
    selected_date: Option<DateKey>,
    cursor: MonthCursor,
    grid: Vec<CalendarCell>,
    modal: Option<DetailModal>,
    last_persist_error: Option<String>,
}

impl<P: PersistencePort> ViewCoordinator<P> {
    /// Load the store through `port` and start on today's month.
    ///
    /// A missing payload starts an empty store. So does an unreadable one,
    /// after logging why; the port then decides whether saves may proceed.
    pub fn new(mut port: P, today: DateKey) -> Self {
        let store = match port.load() {
            Ok(Some(store)) => store,
            Ok(None) => TaskStore::new(),
            Err(StorageError::Format(e)) => {
                log::warn!("task file is malformed, starting empty: {}", e);
                TaskStore::new()
            }
            Err(e) => {
                log::error!("could not load tasks, starting empty: {}", e);
                TaskStore::new()
            }
        };
        let cursor = MonthCursor::containing(today);

        ViewCoordinator {
            port,
            store,
            today,
            selected_date: Some(today),
            cursor,
            grid: calendar::generate_for(cursor),
            modal: None,
            last_persist_error: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn selected_date(&self) -> Option<DateKey> {
        self.selected_date
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    /// The 42 cells of the visible month
    pub fn grid(&self) -> &[CalendarCell] {
        &self.grid
    }

    pub fn modal(&self) -> Option<&DetailModal> {
        self.modal.as_ref()
    }

    /// Message of the most recent failed save, cleared by the next good one
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn tasks_on(&self, date: &DateKey) -> &[Task] {
        self.store.tasks_on(date)
    }

    /// Every day with tasks, in store order, for the list view
    pub fn flat_list(&self) -> impl Iterator<Item = (&DateKey, &[Task])> {
        self.store.iter()
    }

    // -----------------------------------------------------------------------
    // Selection and navigation
    // -----------------------------------------------------------------------

    /// Select a grid cell's date. Filler cells carry no date and are ignored.
    pub fn select_date(&mut self, date: Option<DateKey>) {
        if let Some(date) = date {
            self.selected_date = Some(date);
        }
    }

    /// Mirror the add form's date field, which may be cleared or invalid.
    pub fn set_selected_date(&mut self, date: Option<DateKey>) {
        self.selected_date = date;
    }

    pub fn change_month(&mut self, delta: i64) {
        let (year, month) = calendar::change_month(self.cursor.year, self.cursor.month, delta);
        self.show_month(MonthCursor { year, month });
    }

    pub fn go_to_today(&mut self) {
        self.selected_date = Some(self.today);
        self.show_month(MonthCursor::containing(self.today));
    }

    fn show_month(&mut self, cursor: MonthCursor) {
        if cursor != self.cursor {
            self.cursor = cursor;
            self.grid = calendar::generate_for(cursor);
        }
    }

    // -----------------------------------------------------------------------
    // Store commands
    // -----------------------------------------------------------------------

    /// Add a task on the selected date. Returns its index within that day.
    pub fn add_task(&mut self, text: &str, description: &str) -> Result<usize, CommandError> {
        let Some(date) = self.selected_date else {
            log::debug!("add ignored: no date selected");
            return Err(CommandError::NoDateSelected);
        };
        let next = task_ops::try_add_task(&self.store, &date, text, description)
            .inspect_err(|e| log::debug!("add ignored: {}", e))?;
        let index = next.tasks_on(&date).len().saturating_sub(1);
        self.commit(next);
        Ok(index)
    }

    /// Flip completion of a task. Closes the modal, whichever view asked.
    pub fn toggle_completion(&mut self, date: DateKey, index: usize) -> Result<(), CommandError> {
        let next = task_ops::try_toggle_completion(&self.store, &date, index)
            .inspect_err(|e| log::debug!("toggle ignored: {}", e))?;
        self.commit(next);
        self.modal = None;
        Ok(())
    }

    /// Delete a task. Closes the modal, whichever view asked.
    pub fn delete_task(&mut self, date: DateKey, index: usize) -> Result<(), CommandError> {
        let next = task_ops::try_delete_task(&self.store, &date, index)
            .inspect_err(|e| log::debug!("delete ignored: {}", e))?;
        self.commit(next);
        self.modal = None;
        Ok(())
    }

    fn commit(&mut self, next: TaskStore) {
        self.store = next;
        match self.port.save(&self.store) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                log::error!("could not save tasks: {}", e);
                self.last_persist_error = Some(e.to_string());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Detail modal
    // -----------------------------------------------------------------------

    /// Open the modal on `(date, index)`. Returns whether it opened.
    pub fn open_detail(&mut self, date: Option<DateKey>, index: Option<usize>) -> bool {
        let (Some(date), Some(index)) = (date, index) else {
            return false;
        };
        let Some(task) = self.store.task(&date, index) else {
            log::debug!("open ignored: no task #{} on {}", index, date);
            return false;
        };
        self.modal = Some(DetailModal {
            target: ModalRef { date, index },
            snapshot: task.clone(),
        });
        true
    }

    pub fn close_detail(&mut self) {
        self.modal = None;
    }

    /// Toggle the task shown in the modal
    pub fn toggle_detail(&mut self) -> Result<(), CommandError> {
        let target = self.resolve_modal()?;
        self.toggle_completion(target.date, target.index)
    }

    /// Delete the task shown in the modal
    pub fn delete_detail(&mut self) -> Result<(), CommandError> {
        let target = self.resolve_modal()?;
        self.delete_task(target.date, target.index)
    }

    /// Check the modal still points at a task; close it when it does not.
    fn resolve_modal(&mut self) -> Result<ModalRef, CommandError> {
        let target = self
            .modal
            .as_ref()
            .map(|m| m.target)
            .ok_or(CommandError::NoOpenTask)?;
        if let Err(e) = task_ops::check_index(&self.store, &target.date, target.index) {
            log::debug!("modal reference is stale, closing: {}", e);
            self.modal = None;
            return Err(e.into());
        }
        Ok(target)
    }
}
