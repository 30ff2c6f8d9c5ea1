//! HTTP client for the TaskDeck task service.
//!
//! Thin wrapper over [`reqwest::Client`] that speaks the JSON API
//! defined in `taskdeck-proto`. Each method maps to exactly one
//! endpoint; no retries or timeouts are layered on top, callers decide
//! how to react to failures.

use taskdeck_proto::api::{
    CreateTaskRequest, ErrorResponse, MessageResponse, ReorderBatchRequest, ReorderEntry,
    UpdateTaskRequest,
};
use taskdeck_proto::task::{Task, TaskId};

/// Errors returned by the task service client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, etc.).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service answered {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, if any.
        message: String,
    },
}

/// Client for the task service REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client targeting `base_url` (e.g. `http://127.0.0.1:5000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch all tasks for `owner_id`, sorted by the service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(format!("{}/tasks", self.base_url))
            .query(&[("ownerId", owner_id)])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Create a task; the service assigns id and order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(format!("{}/tasks", self.base_url))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Apply a partial update to one task and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, unknown id, or
    /// validation failure.
    pub async fn update(&self, id: TaskId, patch: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let response = self
            .http
            .put(format!("{}/tasks/{id}", self.base_url))
            .json(patch)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Delete one task. Succeeds even when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure.
    pub async fn delete(&self, id: TaskId) -> Result<MessageResponse, ApiError> {
        let response = self
            .http
            .delete(format!("{}/tasks/{id}", self.base_url))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Persist new order values for a batch of tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn reorder_batch(&self, entries: Vec<ReorderEntry>) -> Result<(), ApiError> {
        let response = self
            .http
            .put(format!("{}/tasks/reorder/batch", self.base_url))
            .json(&ReorderBatchRequest { tasks: entries })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ApiError::Status`], extracting the
/// service's error message when the body carries one.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let client = ApiClient::new("http://localhost:5000///");
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[test]
    fn bare_url_is_kept() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
