//! Integration tests for the task service REST API.
//!
//! Starts the real service in-process on an OS-assigned port and
//! exercises it through the client's `ApiClient`: the full task
//! lifecycle, owner scoping, ordering, and the forgiving delete and
//! reorder semantics.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskdeck::api::{ApiClient, ApiError};
use taskdeck::cache::TaskCache;
use taskdeck::reorder;
use taskdeck_proto::api::{CreateTaskRequest, ReorderEntry, UpdateTaskRequest};
use taskdeck_proto::task::{Category, Priority, Task, TaskId, due_date_at_noon};
use taskdeck_server::server::{AppState, start_server_with_state};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts the service on `127.0.0.1:0` and returns a client for it.
async fn start_service() -> ApiClient {
    let state = Arc::new(AppState::new());
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("start test service");
    ApiClient::new(format!("http://{addr}"))
}

/// Creates a task with default priority and category.
async fn create_task(client: &ApiClient, owner: &str, title: &str) -> Task {
    client
        .create(&CreateTaskRequest {
            title: title.to_string(),
            owner_id: owner.to_string(),
            due_date: None,
            priority: Priority::default(),
            category: Category::default(),
        })
        .await
        .expect("create task")
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

// ===========================================================================
// Lifecycle
// ===========================================================================

#[tokio::test]
async fn full_task_lifecycle() {
    let client = start_service().await;
    let owner = "lifecycle-owner";

    // Create two tasks: orders are assigned by position.
    let first = create_task(&client, owner, "first").await;
    let second = create_task(&client, owner, "second").await;
    assert_eq!(first.order, 0);
    assert_eq!(second.order, 1);

    // Move "first" below "second" through the reconciler.
    let mut tasks = client.list(owner).await.expect("list");
    let entries = reorder::plan_move(&mut tasks, 0, Some(1)).expect("plan move");
    client.reorder_batch(entries).await.expect("reorder");

    let tasks = client.list(owner).await.expect("list");
    assert_eq!(titles(&tasks), vec!["second", "first"]);

    // Complete one of the two: half done.
    let updated = client
        .update(tasks[0].id, &UpdateTaskRequest::completion(true))
        .await
        .expect("complete");
    assert!(updated.completed);
    let mut cache = TaskCache::new();
    cache.replace_all(client.list(owner).await.expect("list"));
    assert_eq!(cache.completed_count(), 1);
    assert_eq!(cache.progress_percent(), 50);

    // Delete the still-open task; only the completed one survives.
    client.delete(tasks[1].id).await.expect("delete");
    let tasks = client.list(owner).await.expect("list");
    assert_eq!(titles(&tasks), vec!["second"]);
    assert!(tasks[0].completed);
}

#[tokio::test]
async fn owners_never_see_each_others_tasks() {
    let client = start_service().await;

    create_task(&client, "owner-a", "a's task").await;
    create_task(&client, "owner-b", "b's task").await;

    let a = client.list("owner-a").await.expect("list a");
    let b = client.list("owner-b").await.expect("list b");
    assert_eq!(titles(&a), vec!["a's task"]);
    assert_eq!(titles(&b), vec!["b's task"]);

    // Orders are assigned per owner, not globally.
    assert_eq!(a[0].order, 0);
    assert_eq!(b[0].order, 0);
}

#[tokio::test]
async fn new_task_order_equals_current_count() {
    let client = start_service().await;
    let owner = "count-owner";

    let mut tasks = Vec::new();
    for title in ["a", "b", "c"] {
        tasks.push(create_task(&client, owner, title).await);
    }
    client.delete(tasks[0].id).await.expect("delete");

    // Two tasks remain, so the next create gets order 2 even though a
    // task with order 2 already exists. The list stays stable because
    // ties keep arrival order.
    let fourth = create_task(&client, owner, "d").await;
    assert_eq!(fourth.order, 2);

    let listed = client.list(owner).await.expect("list");
    assert_eq!(titles(&listed), vec!["b", "c", "d"]);
}

// ===========================================================================
// Due dates
// ===========================================================================

#[tokio::test]
async fn due_date_round_trips_pinned_to_noon() {
    let client = start_service().await;
    let date = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    let created = client
        .create(&CreateTaskRequest {
            title: "dated".to_string(),
            owner_id: "date-owner".to_string(),
            due_date: Some(due_date_at_noon(date)),
            priority: Priority::High,
            category: Category::Work,
        })
        .await
        .expect("create");

    let due = created.due_date.expect("due date kept");
    assert_eq!(due.date(), date);
    assert_eq!(due.time(), chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap());

    // Clearing via an explicit null.
    let cleared = client
        .update(
            created.id,
            &UpdateTaskRequest {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .expect("clear due date");
    assert!(cleared.due_date.is_none());
}

// ===========================================================================
// Forgiving semantics
// ===========================================================================

#[tokio::test]
async fn delete_of_unknown_id_is_success_shaped() {
    let client = start_service().await;
    let response = client.delete(TaskId::new()).await.expect("delete unknown");
    assert_eq!(response.message, "task deleted");
}

#[tokio::test]
async fn reorder_skips_unknown_ids_and_applies_the_rest() {
    let client = start_service().await;
    let owner = "skip-owner";

    let a = create_task(&client, owner, "a").await;
    let b = create_task(&client, owner, "b").await;

    client
        .reorder_batch(vec![
            ReorderEntry { id: a.id, order: 1 },
            ReorderEntry { id: b.id, order: 0 },
            ReorderEntry {
                id: TaskId::new(),
                order: 5,
            },
        ])
        .await
        .expect("batch with unknown id still succeeds");

    let tasks = client.list(owner).await.expect("list");
    assert_eq!(titles(&tasks), vec!["b", "a"]);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let client = start_service().await;
    let result = client
        .update(TaskId::new(), &UpdateTaskRequest::completion(true))
        .await;

    match result {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let client = start_service().await;
    let result = client
        .create(&CreateTaskRequest {
            title: "   ".to_string(),
            owner_id: "owner".to_string(),
            due_date: None,
            priority: Priority::default(),
            category: Category::default(),
        })
        .await;

    match result {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 400),
        other => panic!("expected 400, got {other:?}"),
    }
}
