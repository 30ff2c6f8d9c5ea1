//! Task record and its value types.
//!
//! A [`Task`] is a document owned by exactly one owner identifier and
//! positioned within that owner's list by an integer `order` field.
//! Due dates always carry a fixed 12:00:00 time-of-day so that
//! day-granularity comparisons survive timezone round-trips.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a fresh random task identifier (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority. Defaults to `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent, surfaced first visually.
    High,
    /// The default priority.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Task category. Defaults to `General`; tasks persisted without a
/// category deserialize as `General`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The default catch-all category.
    #[default]
    General,
    /// Work-related tasks.
    Work,
    /// Personal errands.
    Personal,
    /// Study and learning.
    Study,
    /// Household chores.
    Home,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Work,
        Self::Personal,
        Self::Study,
        Self::Home,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "General"),
            Self::Work => write!(f, "Work"),
            Self::Personal => write!(f, "Personal"),
            Self::Study => write!(f, "Study"),
            Self::Home => write!(f, "Home"),
        }
    }
}

/// A task document, scoped to one owner.
///
/// `order` defines the display position within the owner's list. It is
/// dense (`0..N-1`) immediately after a reorder but may contain gaps
/// after deletes; ties are broken by arrival order at the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned unique identifier.
    pub id: TaskId,
    /// Non-empty task title.
    pub title: String,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Opaque owner identifier scoping all queries.
    pub owner_id: String,
    /// Optional due date, always at 12:00:00.
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    /// Task priority.
    #[serde(default)]
    pub priority: Priority,
    /// Task category.
    #[serde(default)]
    pub category: Category,
    /// Display position within the owner's list.
    #[serde(default)]
    pub order: u32,
}

impl Task {
    /// Whether this task is overdue as of `today`: due strictly before
    /// today (day granularity) and not completed. A task due today is
    /// never overdue.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due.date() < today)
    }
}

/// Pins a calendar date to the fixed 12:00:00 time-of-day used for all
/// stored due dates.
#[must_use]
pub fn due_date_at_noon(date: NaiveDate) -> NaiveDateTime {
    // 12:00:00 is valid on every calendar day.
    date.and_hms_opt(12, 0, 0).unwrap_or_default()
}
