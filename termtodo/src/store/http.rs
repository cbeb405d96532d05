//! REST client for the remote todo service.
//!
//! Speaks the JSON API described in the service contract: task collections
//! under `/todos`, owner scoping via the `userId` query parameter, and the
//! owner carried in the body for creation. HTTP statuses are mapped onto
//! the [`StoreError`] taxonomy: 404 becomes [`StoreError::NotFound`],
//! 400/422 become [`StoreError::Validation`], connection-level failures
//! become [`StoreError::Transport`].

use std::time::Duration;

use reqwest::{Response, StatusCode};
use termtodo_model::{Task, TaskDraft, TaskPatch};

use super::{StoreError, TaskStore};

/// How much of an error response body to keep for display.
const MAX_ERROR_BODY_LEN: usize = 200;

/// HTTP-backed [`TaskStore`] implementation.
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskStore {
    /// Creates a store client for the given API base URL
    /// (e.g. `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

/// Maps a reqwest-level failure (connect, timeout, body read) to a
/// transport error.
fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

/// Converts a non-success response into the matching [`StoreError`].
///
/// `not_found` names the task id a 404 refers to; endpoints where a 404
/// has no task-level meaning pass `None` and get
/// [`StoreError::Unexpected`] instead.
async fn check(resp: Response, not_found: Option<i64>) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body: String = resp
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(MAX_ERROR_BODY_LEN)
        .collect();
    match (status, not_found) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(StoreError::NotFound(id)),
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            Err(StoreError::Validation(body))
        }
        _ => Err(StoreError::Unexpected {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Deserializes a task from a successful response body.
async fn read_task(resp: Response) -> Result<Task, StoreError> {
    resp.json::<Task>().await.map_err(transport)
}

impl TaskStore for HttpTaskStore {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let resp = self
            .client
            .get(self.todos_url())
            .query(&[("userId", owner)])
            .send()
            .await
            .map_err(transport)?;
        let resp = check(resp, None).await?;
        resp.json::<Vec<Task>>().await.map_err(transport)
    }

    async fn get_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        let resp = self
            .client
            .get(self.todo_url(id))
            .query(&[("userId", owner)])
            .send()
            .await
            .map_err(transport)?;
        read_task(check(resp, Some(id)).await?).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let resp = self
            .client
            .post(self.todos_url())
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        read_task(check(resp, None).await?).await
    }

    async fn update_task(&self, id: i64, patch: &TaskPatch, owner: &str) -> Result<Task, StoreError> {
        let resp = self
            .client
            .put(self.todo_url(id))
            .query(&[("userId", owner)])
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        read_task(check(resp, Some(id)).await?).await
    }

    async fn delete_task(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.todo_url(id))
            .query(&[("userId", owner)])
            .send()
            .await
            .map_err(transport)?;
        check(resp, Some(id)).await?;
        Ok(())
    }

    async fn toggle_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        let resp = self
            .client
            .patch(format!("{}/toggle", self.todo_url(id)))
            .query(&[("userId", owner)])
            .send()
            .await
            .map_err(transport)?;
        read_task(check(resp, Some(id)).await?).await
    }

    async fn list_by_status(&self, completed: bool, owner: &str) -> Result<Vec<Task>, StoreError> {
        let resp = self
            .client
            .get(format!("{}/todos/completed/{completed}", self.base_url))
            .query(&[("userId", owner)])
            .send()
            .await
            .map_err(transport)?;
        let resp = check(resp, None).await?;
        resp.json::<Vec<Task>>().await.map_err(transport)
    }
}
