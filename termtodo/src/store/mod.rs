//! Remote task store access.
//!
//! Defines the [`TaskStore`] trait that all store backends satisfy.
//! Concrete implementations:
//! - [`http::HttpTaskStore`] — REST client against the remote todo service
//! - [`memory::InMemoryTaskStore`] — in-process store for offline demo mode
//!   and tests
//!
//! Every operation is scoped to an owner; a task that exists but belongs
//! to a different owner is indistinguishable from an absent one.

pub mod http;
pub mod memory;

pub use http::HttpTaskStore;
pub use memory::InMemoryTaskStore;

use termtodo_model::{Task, TaskDraft, TaskPatch};
use thiserror::Error;

/// Errors that can occur when talking to a task store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store was unreachable or the request failed in transit.
    #[error("store unreachable: {0}")]
    Transport(String),

    /// No task with this id exists for the requesting owner.
    #[error("task {0} not found")]
    NotFound(i64),

    /// The store rejected the payload.
    #[error("store rejected request: {0}")]
    Validation(String),

    /// The store answered with something the client does not understand.
    #[error("unexpected store response (status {status}): {body}")]
    Unexpected {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },
}

/// Trait for CRUD access to a remote task store.
///
/// All calls look synchronous but suspend at the point of awaiting the
/// remote response; none of them block the caller.
pub trait TaskStore: Send + Sync {
    /// Fetch all tasks belonging to `owner`.
    fn list_tasks(
        &self,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Fetch a single task by id.
    ///
    /// Fails with [`StoreError::NotFound`] if the task is absent or owned
    /// by a different owner.
    fn get_task(
        &self,
        id: i64,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Create a new task from a validated draft (the draft carries the owner).
    ///
    /// Returns the stored task with its assigned id and timestamps.
    fn create_task(
        &self,
        draft: &TaskDraft,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Apply a partial update, returning the store's updated representation.
    fn update_task(
        &self,
        id: i64,
        patch: &TaskPatch,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Delete a task. Succeeds with `()` only once the store confirms.
    fn delete_task(
        &self,
        id: i64,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Flip a task's completion flag, returning the updated task.
    fn toggle_task(
        &self,
        id: i64,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Fetch tasks filtered by completion status on the store side.
    fn list_by_status(
        &self,
        completed: bool,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;
}

/// Shared references delegate, so a store can back several controllers
/// over its lifetime without being cloned.
impl<S: TaskStore> TaskStore for &S {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        (**self).list_tasks(owner).await
    }

    async fn get_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        (**self).get_task(id, owner).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        (**self).create_task(draft).await
    }

    async fn update_task(&self, id: i64, patch: &TaskPatch, owner: &str) -> Result<Task, StoreError> {
        (**self).update_task(id, patch, owner).await
    }

    async fn delete_task(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        (**self).delete_task(id, owner).await
    }

    async fn toggle_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        (**self).toggle_task(id, owner).await
    }

    async fn list_by_status(&self, completed: bool, owner: &str) -> Result<Vec<Task>, StoreError> {
        (**self).list_by_status(completed, owner).await
    }
}
