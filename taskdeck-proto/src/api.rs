//! Request and response bodies for the TaskDeck REST surface.
//!
//! All bodies are JSON with camelCase field names. Partial updates
//! distinguish "key absent" (leave unchanged) from an explicit `null`
//! (clear the field) for the due date, which is the only clearable
//! optional field.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::task::{Category, Priority, TaskId};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Title of the new task.
    pub title: String,
    /// Owner the task belongs to.
    pub owner_id: String,
    /// Optional due date at 12:00:00.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    /// Priority, defaulting to `Medium` when absent.
    #[serde(default)]
    pub priority: Priority,
    /// Category, defaulting to `General` when absent.
    #[serde(default)]
    pub category: Category,
}

/// Body of `PUT /tasks/{id}`. Any subset of fields may be supplied;
/// absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New due date. `Some(None)` (an explicit JSON `null`) clears the
    /// date; an absent key leaves it unchanged.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDateTime>>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// New completion state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// New display position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl UpdateTaskRequest {
    /// A patch that only flips the completion flag.
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

/// One entry of a batch reorder: the task and its new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    /// Task to reposition.
    pub id: TaskId,
    /// New display position.
    pub order: u32,
}

/// Body of `PUT /tasks/reorder/batch`.
///
/// The batch is applied as independent per-record updates; partial
/// application is possible and no per-item detail is reported back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBatchRequest {
    /// The complete new ordering, one entry per task.
    pub tasks: Vec<ReorderEntry>,
}

/// Success-shaped response for operations that return no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Error body accompanying a 4xx/5xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Deserializes a field so that an explicit `null` becomes `Some(None)`
/// while an absent key (via `#[serde(default)]`) stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
