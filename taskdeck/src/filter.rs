//! Task list filtering.
//!
//! Three independent criteria combined with AND: a case-insensitive
//! title substring, an exact priority, and an exact category. Filtering
//! is a pure view over the cache; it never touches stored order, and
//! while any filter is active manual reordering is disabled so that
//! positions in the narrowed view can't be mistaken for positions in
//! the full list.

use taskdeck_proto::task::{Category, Priority, Task};

/// Current filter criteria. Default is "show everything".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against titles.
    pub query: String,
    /// Exact priority to keep, or `None` for all.
    pub priority: Option<Priority>,
    /// Exact category to keep, or `None` for all.
    pub category: Option<Category>,
}

impl FilterState {
    /// Whether any criterion narrows the view.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.priority.is_some() || self.category.is_some()
    }

    /// Whether `task` passes every active criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !task.title.to_lowercase().contains(&query) {
            return false;
        }
        if self.priority.is_some_and(|p| task.priority != p) {
            return false;
        }
        if self.category.is_some_and(|c| task.category != c) {
            return false;
        }
        true
    }

    /// Narrow `tasks` to those matching, preserving relative order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// Reset all criteria to "show everything".
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
