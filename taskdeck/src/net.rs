//! Bridge between the UI loop and the task service.
//!
//! The UI thread never performs HTTP itself. It sends [`ApiCommand`]s
//! into an mpsc channel; a background tokio task owns the
//! [`ApiClient`], executes each command, and reports back with
//! [`ApiEvent`]s. After every successful mutation the worker reloads
//! the owner's full list and emits [`ApiEvent::Loaded`], keeping the
//! service as the single source of truth. Load results are tagged with
//! the owner they were fetched for so the app can drop responses that
//! arrive after an owner switch.

use futures_util::future::join_all;
use taskdeck_proto::api::{CreateTaskRequest, ReorderEntry, UpdateTaskRequest};
use taskdeck_proto::task::{Task, TaskId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::ApiClient;

/// Channel capacity for both directions.
const CHANNEL_CAPACITY: usize = 256;

/// Commands from the UI loop to the API worker.
#[derive(Debug)]
pub enum ApiCommand {
    /// Fetch the full task list for an owner.
    Load { owner_id: String },
    /// Create a task (owner id travels inside the request).
    Create { request: CreateTaskRequest },
    /// Partially update one task.
    Update {
        owner_id: String,
        id: TaskId,
        patch: UpdateTaskRequest,
    },
    /// Delete one task.
    Delete { owner_id: String, id: TaskId },
    /// Delete several tasks as independent requests.
    DeleteMany {
        owner_id: String,
        ids: Vec<TaskId>,
    },
    /// Persist a full set of order assignments.
    ReorderBatch {
        owner_id: String,
        entries: Vec<ReorderEntry>,
    },
    /// Stop the worker.
    Shutdown,
}

/// Events from the API worker back to the UI loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// A fresh task list for `owner_id`.
    Loaded { owner_id: String, tasks: Vec<Task> },
    /// A request failed; `context` names the operation.
    Failed {
        context: &'static str,
        message: String,
    },
}

/// Spawn the background API worker.
///
/// Returns the command sender, the event receiver, and the worker's
/// join handle. The worker runs until it receives
/// [`ApiCommand::Shutdown`] or the command channel closes.
#[must_use]
pub fn spawn_api_worker(
    client: ApiClient,
) -> (
    mpsc::Sender<ApiCommand>,
    mpsc::Receiver<ApiEvent>,
    JoinHandle<()>,
) {
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let handle = tokio::spawn(run_worker(client, command_rx, event_tx));

    (command_tx, event_rx, handle)
}

async fn run_worker(
    client: ApiClient,
    mut commands: mpsc::Receiver<ApiCommand>,
    events: mpsc::Sender<ApiEvent>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            ApiCommand::Load { owner_id } => {
                load_and_emit(&client, &events, &owner_id).await;
            }
            ApiCommand::Create { request } => {
                let owner_id = request.owner_id.clone();
                match client.create(&request).await {
                    Ok(task) => {
                        tracing::debug!(id = %task.id, "task created");
                        load_and_emit(&client, &events, &owner_id).await;
                    }
                    Err(e) => emit_failure(&events, "create", &e.to_string()).await,
                }
            }
            ApiCommand::Update {
                owner_id,
                id,
                patch,
            } => match client.update(id, &patch).await {
                Ok(_) => load_and_emit(&client, &events, &owner_id).await,
                Err(e) => emit_failure(&events, "update", &e.to_string()).await,
            },
            ApiCommand::Delete { owner_id, id } => match client.delete(id).await {
                Ok(_) => load_and_emit(&client, &events, &owner_id).await,
                Err(e) => emit_failure(&events, "delete", &e.to_string()).await,
            },
            ApiCommand::DeleteMany { owner_id, ids } => {
                // Independent requests, no transaction. A partial
                // failure still triggers the reload so the cache shows
                // whatever actually survived.
                let results = join_all(ids.iter().map(|id| client.delete(*id))).await;
                let failures = results.iter().filter(|r| r.is_err()).count();
                if failures > 0 {
                    emit_failure(&events, "bulk delete", &format!("{failures} requests failed"))
                        .await;
                }
                load_and_emit(&client, &events, &owner_id).await;
            }
            ApiCommand::ReorderBatch { owner_id, entries } => {
                // The local splice already happened and is never rolled
                // back; a failure just leaves local order ahead of the
                // service until the next reload.
                match client.reorder_batch(entries).await {
                    Ok(()) => load_and_emit(&client, &events, &owner_id).await,
                    Err(e) => emit_failure(&events, "reorder", &e.to_string()).await,
                }
            }
            ApiCommand::Shutdown => break,
        }
    }

    tracing::debug!("api worker stopped");
}

async fn load_and_emit(client: &ApiClient, events: &mpsc::Sender<ApiEvent>, owner_id: &str) {
    match client.list(owner_id).await {
        Ok(tasks) => {
            let _ = events
                .send(ApiEvent::Loaded {
                    owner_id: owner_id.to_string(),
                    tasks,
                })
                .await;
        }
        Err(e) => emit_failure(events, "load", &e.to_string()).await,
    }
}

async fn emit_failure(events: &mpsc::Sender<ApiEvent>, context: &'static str, message: &str) {
    tracing::warn!(context, message, "api request failed");
    let _ = events
        .send(ApiEvent::Failed {
            context,
            message: message.to_string(),
        })
        .await;
}
