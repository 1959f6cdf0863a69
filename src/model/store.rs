use indexmap::IndexMap;

use crate::model::date_key::DateKey;
use crate::model::task::Task;

/// All tasks, grouped by day.
///
/// Days keep the order in which they first received a task, and tasks keep
/// insertion order within a day. A day with no tasks is never present.
///
/// The store is a value: the transformations in `ops::task_ops` take a store
/// by reference and hand back a new one.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    pub(crate) days: IndexMap<DateKey, Vec<Task>>,
}

/// Equal only when days appear in the same order with the same tasks
impl PartialEq for TaskStore {
    fn eq(&self, other: &Self) -> bool {
        self.days.iter().eq(other.days.iter())
    }
}

impl Eq for TaskStore {}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of days that have at least one task
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn contains_date(&self, date: &DateKey) -> bool {
        self.days.contains_key(date)
    }

    /// Tasks on a day, in display order (empty slice when the day has none)
    pub fn tasks_on(&self, date: &DateKey) -> &[Task] {
        self.days.get(date).map_or(&[], |tasks| tasks.as_slice())
    }

    pub fn task(&self, date: &DateKey, index: usize) -> Option<&Task> {
        self.days.get(date)?.get(index)
    }

    /// Days and their tasks in display order
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[Task])> {
        self.days.iter().map(|(date, tasks)| (date, tasks.as_slice()))
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.days.keys()
    }

    /// Total number of tasks across all days
    pub fn task_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.days
            .values()
            .flatten()
            .filter(|task| task.completed)
            .count()
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = (&'a DateKey, &'a Vec<Task>);
    type IntoIter = indexmap::map::Iter<'a, DateKey, Vec<Task>>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
