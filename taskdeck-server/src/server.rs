//! REST surface of the task service: shared state, router, and handlers.
//!
//! Stateless request handlers translate HTTP verbs into [`TaskStore`]
//! operations: list-by-owner, create, partial update, delete, and batch
//! reorder. Handlers hold no in-process state beyond the shared store.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use taskdeck_proto::api::{
    CreateTaskRequest, MessageResponse, ReorderBatchRequest, UpdateTaskRequest,
};
use taskdeck_proto::task::{Task, TaskId};

use crate::error::ServiceError;
use crate::store::TaskStore;

/// Shared service state holding the document store.
#[derive(Debug, Default)]
pub struct AppState {
    /// The task document store.
    pub store: TaskStore,
}

impl AppState {
    /// Creates state backed by an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Query parameters of `GET /tasks`.
#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(rename = "ownerId", default)]
    owner_id: Option<String>,
}

/// Builds the service router.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/reorder/batch", put(reorder_batch))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(state)
}

/// `GET /tasks?ownerId=<id>` — all tasks for an owner, ascending order.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Task>>, ServiceError> {
    let owner_id = query
        .owner_id
        .filter(|o| !o.is_empty())
        .ok_or(ServiceError::Validation("ownerId"))?;
    let tasks = state.store.list_for_owner(&owner_id).await;
    tracing::debug!(owner_id = %owner_id, count = tasks.len(), "listed tasks");
    Ok(Json(tasks))
}

/// `POST /tasks` — create a task, appended at the end of the owner's
/// list (`order` = current count). Duplicate titles are permitted; the
/// duplicate guard is a client-side advisory check only.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ServiceError> {
    if req.title.trim().is_empty() {
        return Err(ServiceError::Validation("title"));
    }
    if req.owner_id.is_empty() {
        return Err(ServiceError::Validation("ownerId"));
    }

    let order = state.store.count_for_owner(&req.owner_id).await;
    let task = Task {
        id: TaskId::new(),
        title: req.title,
        completed: false,
        owner_id: req.owner_id,
        due_date: req.due_date,
        priority: req.priority,
        category: req.category,
        order,
    };
    state.store.insert(task.clone()).await;
    tracing::info!(id = %task.id, owner_id = %task.owner_id, order = order, "task created");
    Ok(Json(task))
}

/// `PUT /tasks/{id}` — merge any subset of fields onto the record.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ServiceError> {
    if req.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ServiceError::Validation("title"));
    }
    let updated = state
        .store
        .apply_patch(id, &req)
        .await
        .ok_or(ServiceError::NotFound(id))?;
    tracing::info!(id = %id, "task updated");
    Ok(Json(updated))
}

/// `PUT /tasks/reorder/batch` — apply each `{id, order}` entry as an
/// independent update. Not transactional: unknown ids are skipped and
/// the remaining entries still apply; no per-item detail is returned.
async fn reorder_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReorderBatchRequest>,
) -> Json<MessageResponse> {
    let mut applied = 0usize;
    for entry in &req.tasks {
        if state.store.set_order(entry.id, entry.order).await {
            applied += 1;
        } else {
            tracing::warn!(id = %entry.id, "reorder entry skipped, unknown id");
        }
    }
    tracing::info!(applied = applied, total = req.tasks.len(), "order updated");
    Json(MessageResponse {
        message: "order updated".to_string(),
    })
}

/// `DELETE /tasks/{id}` — remove the record permanently. Deleting an
/// unknown id still answers success-shaped.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TaskId>,
) -> Json<MessageResponse> {
    let existed = state.store.remove(id).await;
    if existed {
        tracing::info!(id = %id, "task deleted");
    } else {
        tracing::warn!(id = %id, "delete of unknown id (treated as success)");
    }
    Json(MessageResponse {
        message: "task deleted".to_string(),
    })
}

/// Starts the task service on the given address and returns the bound
/// address and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(AppState::new())).await
}

/// Starts the task service with pre-configured [`AppState`].
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<AppState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task service error");
        }
    });

    Ok((bound_addr, handle))
}

/// Starts the task service in-process for testing.
///
/// Binds to `127.0.0.1:0` (OS-assigned port) and returns the bound
/// address and a [`tokio::task::JoinHandle`] for cleanup.
#[cfg(test)]
pub async fn start_test_server() -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server")
}
