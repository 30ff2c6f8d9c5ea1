//! Ordering reconciler.
//!
//! Manual reordering splices the moved task into its new position
//! locally, rewrites every task's `order` to its positional index, and
//! hands back the full list of (id, order) pairs for the service. The
//! local splice is optimistic: it is applied before the batch request
//! and never rolled back on failure, so a failed persist leaves local
//! and stored order divergent until the next reload.

use taskdeck_proto::api::ReorderEntry;
use taskdeck_proto::task::Task;

/// Plan a move of the task at `source` to `destination`.
///
/// Returns `None` without touching `tasks` when the move is a no-op:
/// the drop was cancelled (`destination` is `None`), the indices are
/// equal, or either index is out of range. Otherwise the list is
/// spliced in place, every task's `order` is rewritten to its new
/// index, and the full batch of entries to persist is returned.
#[must_use]
pub fn plan_move(
    tasks: &mut Vec<Task>,
    source: usize,
    destination: Option<usize>,
) -> Option<Vec<ReorderEntry>> {
    let destination = destination?;
    if source == destination || source >= tasks.len() || destination >= tasks.len() {
        return None;
    }

    let moved = tasks.remove(source);
    tasks.insert(destination, moved);

    Some(renumber(tasks))
}

/// Rewrite `order` to the positional index for every task and collect
/// the full batch to send. Every task is included, not just the ones
/// whose order changed, matching what the service's batch endpoint
/// expects.
#[allow(clippy::cast_possible_truncation)]
fn renumber(tasks: &mut [Task]) -> Vec<ReorderEntry> {
    tasks
        .iter_mut()
        .enumerate()
        .map(|(index, task)| {
            task.order = index as u32;
            ReorderEntry {
                id: task.id,
                order: task.order,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_proto::task::{Category, Priority, TaskId};

    fn task(title: &str, order: u32) -> Task {
        Task {
            id: TaskId::new(),
            title: title.to_string(),
            completed: false,
            owner_id: "u-1".to_string(),
            due_date: None,
            priority: Priority::Medium,
            category: Category::General,
            order,
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn move_down_splices_and_renumbers() {
        let mut tasks = vec![task("a", 0), task("b", 1), task("c", 2)];
        let entries = plan_move(&mut tasks, 0, Some(2)).unwrap();

        assert_eq!(titles(&tasks), vec!["b", "c", "a"]);
        assert_eq!(tasks.iter().map(|t| t.order).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].id, tasks[2].id);
        assert_eq!(entries[2].order, 2);
    }

    #[test]
    fn move_up_splices_and_renumbers() {
        let mut tasks = vec![task("a", 0), task("b", 1), task("c", 2)];
        plan_move(&mut tasks, 2, Some(0)).unwrap();
        assert_eq!(titles(&tasks), vec!["c", "a", "b"]);
    }

    #[test]
    fn cancelled_drop_is_a_noop() {
        let mut tasks = vec![task("a", 0), task("b", 1)];
        assert!(plan_move(&mut tasks, 0, None).is_none());
        assert_eq!(titles(&tasks), vec!["a", "b"]);
    }

    #[test]
    fn same_position_is_a_noop() {
        let mut tasks = vec![task("a", 0), task("b", 1)];
        assert!(plan_move(&mut tasks, 1, Some(1)).is_none());
    }

    #[test]
    fn out_of_range_indices_are_noops() {
        let mut tasks = vec![task("a", 0), task("b", 1)];
        assert!(plan_move(&mut tasks, 5, Some(0)).is_none());
        assert!(plan_move(&mut tasks, 0, Some(5)).is_none());
        assert_eq!(titles(&tasks), vec!["a", "b"]);
    }

    #[test]
    fn batch_covers_every_task() {
        let mut tasks = vec![task("a", 0), task("b", 1), task("c", 2), task("d", 3)];
        let entries = plan_move(&mut tasks, 1, Some(2)).unwrap();
        // Even tasks whose order did not change are resent.
        assert_eq!(entries.len(), 4);
        for (index, entry) in entries.iter().enumerate() {
            assert_eq!(entry.order, u32::try_from(index).unwrap());
        }
    }
}
