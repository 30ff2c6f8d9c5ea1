//! Client-side task cache.
//!
//! Holds the last list the service returned for the active owner. The
//! cache never mutates individual records on its own: after every
//! mutation the coordinator reloads the full list and calls
//! [`TaskCache::replace_all`], so the service stays the single source
//! of truth. The one exception is the optimistic reorder splice, which
//! goes through [`crate::reorder::plan_move`].

use chrono::NaiveDate;
use taskdeck_proto::task::{Category, Priority, Task, TaskId};

/// Snapshot of the active owner's tasks, in service order.
#[derive(Debug, Default)]
pub struct TaskCache {
    tasks: Vec<Task>,
}

impl TaskCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full contents with a fresh list from the service.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Drop everything. Called synchronously on owner switch so tasks
    /// from the previous owner are never rendered for the next one.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// All cached tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable access for the optimistic reorder splice.
    pub fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a cached task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Completion percentage, rounded to the nearest whole percent.
    /// Zero when the cache is empty.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_percent(&self) -> u8 {
        let total = self.tasks.len();
        if total == 0 {
            return 0;
        }
        ((self.completed_count() * 100 + total / 2) / total) as u8
    }

    /// Advisory duplicate check used before submitting a create form.
    ///
    /// A duplicate is an existing task whose trimmed, lowercased title
    /// matches and whose priority and category both match. This only
    /// guards the local snapshot; the service itself accepts duplicates.
    #[must_use]
    pub fn has_duplicate(&self, title: &str, priority: Priority, category: Category) -> bool {
        let needle = title.trim().to_lowercase();
        self.tasks.iter().any(|t| {
            t.priority == priority
                && t.category == category
                && t.title.trim().to_lowercase() == needle
        })
    }

    /// Ids of all completed tasks.
    #[must_use]
    pub fn completed_ids(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect()
    }

    /// Ids of all tasks overdue as of `today`.
    #[must_use]
    pub fn overdue_ids(&self, today: NaiveDate) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.is_overdue(today))
            .map(|t| t.id)
            .collect()
    }

    /// Ids of every cached task.
    #[must_use]
    pub fn all_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id).collect()
    }
}
