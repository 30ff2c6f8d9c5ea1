//! In-memory document store for task records.
//!
//! The [`TaskStore`] keys tasks by [`TaskId`] and scopes every query by
//! an owner identifier. Listing sorts by the mutable `order` field with
//! ties broken by arrival sequence, so two tasks that end up with the
//! same order value keep a stable relative position.

use std::collections::HashMap;

use taskdeck_proto::api::UpdateTaskRequest;
use taskdeck_proto::task::{Task, TaskId};
use tokio::sync::RwLock;

/// A stored task plus the arrival sequence used for order tie-breaking.
#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    seq: u64,
}

/// Thread-safe in-memory task store.
///
/// All multi-record operations at higher layers are expressed as
/// independent calls into this store; the store itself offers no
/// cross-record transactions.
#[derive(Debug, Default)]
pub struct TaskStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: HashMap<TaskId, StoredTask>,
    next_seq: u64,
}

impl TaskStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all tasks for the given owner, ascending by
    /// (`order`, arrival sequence).
    pub async fn list_for_owner(&self, owner_id: &str) -> Vec<Task> {
        let inner = self.inner.read().await;
        let mut stored: Vec<&StoredTask> = inner
            .tasks
            .values()
            .filter(|s| s.task.owner_id == owner_id)
            .collect();
        stored.sort_by_key(|s| (s.task.order, s.seq));
        stored.iter().map(|s| s.task.clone()).collect()
    }

    /// Returns the number of tasks currently held for the given owner.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn count_for_owner(&self, owner_id: &str) -> u32 {
        let inner = self.inner.read().await;
        // Safe: a single owner's task count stays well within u32 range.
        inner
            .tasks
            .values()
            .filter(|s| s.task.owner_id == owner_id)
            .count() as u32
    }

    /// Inserts a new task record.
    pub async fn insert(&self, task: Task) {
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.tasks.insert(task.id, StoredTask { task, seq });
    }

    /// Merges the given partial update onto an existing record and
    /// returns the updated task, or `None` if the id is unknown.
    ///
    /// Absent fields are left unchanged; an explicit `Some(None)` due
    /// date clears the date.
    pub async fn apply_patch(&self, id: TaskId, patch: &UpdateTaskRequest) -> Option<Task> {
        let mut inner = self.inner.write().await;
        let stored = inner.tasks.get_mut(&id)?;
        if let Some(title) = &patch.title {
            stored.task.title = title.clone();
        }
        if let Some(due_date) = patch.due_date {
            stored.task.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            stored.task.priority = priority;
        }
        if let Some(category) = patch.category {
            stored.task.category = category;
        }
        if let Some(completed) = patch.completed {
            stored.task.completed = completed;
        }
        if let Some(order) = patch.order {
            stored.task.order = order;
        }
        Some(stored.task.clone())
    }

    /// Sets the `order` field of one record. Returns whether the id was
    /// known; unknown ids are a silent no-op for callers that apply a
    /// batch non-transactionally.
    pub async fn set_order(&self, id: TaskId, order: u32) -> bool {
        let mut inner = self.inner.write().await;
        match inner.tasks.get_mut(&id) {
            Some(stored) => {
                stored.task.order = order;
                true
            }
            None => false,
        }
    }

    /// Removes a record permanently. Returns whether it existed.
    pub async fn remove(&self, id: TaskId) -> bool {
        let mut inner = self.inner.write().await;
        inner.tasks.remove(&id).is_some()
    }
}
