//! Property-based wire-format tests.
//!
//! Uses proptest to verify:
//! 1. Any valid `Task` survives a JSON serialize → deserialize round-trip.
//! 2. Partial update requests keep the null-vs-absent distinction for
//!    the due date through a round-trip.
//! 3. Arbitrary JSON text never causes a panic in deserialization.
//! 4. Wire keys stay camelCase regardless of field values.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use proptest::prelude::*;
use taskdeck_proto::api::{CreateTaskRequest, ReorderBatchRequest, ReorderEntry, UpdateTaskRequest};
use taskdeck_proto::task::{Category, Priority, Task, TaskId, due_date_at_noon};
use uuid::Uuid;

// --- Strategies for protocol types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    any::<u128>().prop_map(|n| TaskId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating arbitrary priorities.
fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL.to_vec())
}

/// Strategy for generating arbitrary categories.
fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Strategy for generating arbitrary noon-pinned due dates.
fn arb_due_date() -> impl Strategy<Value = Option<chrono::NaiveDateTime>> {
    prop::option::of((2000i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        due_date_at_noon(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
    }))
}

/// Strategy for generating arbitrary tasks.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        "[^\x00]{1,64}",
        any::<bool>(),
        "[a-z0-9-]{1,32}",
        arb_due_date(),
        arb_priority(),
        arb_category(),
        any::<u32>(),
    )
        .prop_map(
            |(id, title, completed, owner_id, due_date, priority, category, order)| Task {
                id,
                title,
                completed,
                owner_id,
                due_date,
                priority,
                category,
                order,
            },
        )
}

proptest! {
    #[test]
    fn task_json_round_trip(task in arb_task()) {
        let json = serde_json::to_string(&task).expect("serialize");
        let back: Task = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(task, back);
    }

    #[test]
    fn task_wire_keys_are_camel_case(task in arb_task()) {
        let value = serde_json::to_value(&task).expect("serialize");
        let object = value.as_object().expect("task serializes to an object");
        prop_assert!(object.contains_key("ownerId"));
        prop_assert!(object.contains_key("completed"));
        prop_assert!(!object.contains_key("owner_id"));
        prop_assert!(!object.contains_key("due_date"));
    }

    #[test]
    fn create_request_round_trip(
        title in "[^\x00]{1,64}",
        owner_id in "[a-z0-9-]{1,32}",
        due_date in arb_due_date(),
        priority in arb_priority(),
        category in arb_category(),
    ) {
        let request = CreateTaskRequest { title, owner_id, due_date, priority, category };
        let json = serde_json::to_string(&request).expect("serialize");
        let back: CreateTaskRequest = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(request, back);
    }

    #[test]
    fn update_request_due_date_round_trip(due_date in arb_due_date()) {
        // An explicit slot always survives: Some(None) serializes to
        // null and comes back as a clear, Some(Some(_)) as a set.
        let request = UpdateTaskRequest {
            due_date: Some(due_date),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).expect("serialize");
        let back: UpdateTaskRequest = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back.due_date, Some(due_date));
    }

    #[test]
    fn reorder_batch_round_trip(
        orders in prop::collection::vec((any::<u128>(), any::<u32>()), 0..32)
    ) {
        let batch = ReorderBatchRequest {
            tasks: orders
                .into_iter()
                .map(|(n, order)| ReorderEntry {
                    id: TaskId::from_uuid(Uuid::from_u128(n)),
                    order,
                })
                .collect(),
        };
        let json = serde_json::to_string(&batch).expect("serialize");
        let back: ReorderBatchRequest = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(batch, back);
    }

    #[test]
    fn arbitrary_text_never_panics(input in "\\PC{0,256}") {
        // Deserialization of junk must fail cleanly, never panic.
        let _ = serde_json::from_str::<Task>(&input);
        let _ = serde_json::from_str::<UpdateTaskRequest>(&input);
    }
}
