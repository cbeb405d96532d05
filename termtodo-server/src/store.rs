//! In-memory task table shared across request handlers.

use std::collections::HashMap;

use chrono::Utc;
use termtodo_model::{Task, TaskDraft, TaskError, TaskPatch, normalize_title};
use tokio::sync::RwLock;

/// Errors surfaced by table operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TableError {
    /// No row with this id is visible to the requesting owner.
    #[error("task {0} not found")]
    NotFound(i64),

    /// A title failed validation.
    #[error(transparent)]
    InvalidTitle(#[from] TaskError),
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<i64, Task>,
    next_id: i64,
}

/// Owner-scoped task storage behind an async lock.
///
/// Ids are assigned sequentially. A row whose owner does not match the
/// requesting owner is indistinguishable from an absent row, so one
/// user cannot probe another's ids.
#[derive(Debug, Default)]
pub struct TaskTable {
    inner: RwLock<Inner>,
}

impl TaskTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All of `owner`'s tasks, ordered by id.
    pub async fn list(&self, owner: &str) -> Vec<Task> {
        let inner = self.inner.read().await;
        let mut rows: Vec<Task> = inner
            .rows
            .values()
            .filter(|t| t.owner_id == owner)
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.id);
        rows
    }

    /// `owner`'s tasks with the given completion state, ordered by id.
    pub async fn list_by_status(&self, owner: &str, completed: bool) -> Vec<Task> {
        let mut rows = self.list(owner).await;
        rows.retain(|t| t.completed == completed);
        rows
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotFound`] if the row is absent or belongs
    /// to a different owner.
    pub async fn get(&self, id: i64, owner: &str) -> Result<Task, TableError> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(&id)
            .filter(|t| t.owner_id == owner)
            .cloned()
            .ok_or(TableError::NotFound(id))
    }

    /// Inserts a new task, assigning its id and timestamps.
    ///
    /// New tasks always start incomplete regardless of what the draft
    /// carries.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidTitle`] if the title fails
    /// validation.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, TableError> {
        let title = normalize_title(&draft.title)?;
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();
        let task = Task {
            id: Some(id),
            title,
            description: draft.description,
            completed: false,
            created_at: Some(now),
            updated_at: Some(now),
            owner_id: draft.owner_id,
        };
        inner.rows.insert(id, task.clone());
        Ok(task)
    }

    /// Applies a partial edit, bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidTitle`] if a provided title fails
    /// validation, or [`TableError::NotFound`] if the row is absent or
    /// belongs to a different owner.
    pub async fn update(&self, id: i64, owner: &str, patch: TaskPatch) -> Result<Task, TableError> {
        let patch = patch.validated()?;
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(&id)
            .filter(|t| t.owner_id == owner)
            .ok_or(TableError::NotFound(id))?;
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    /// Flips the completion flag, bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotFound`] if the row is absent or belongs
    /// to a different owner.
    pub async fn toggle(&self, id: i64, owner: &str) -> Result<Task, TableError> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(&id)
            .filter(|t| t.owner_id == owner)
            .ok_or(TableError::NotFound(id))?;
        row.completed = !row.completed;
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotFound`] if the row is absent or belongs
    /// to a different owner.
    pub async fn delete(&self, id: i64, owner: &str) -> Result<(), TableError> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .rows
            .get(&id)
            .is_some_and(|t| t.owner_id == owner);
        if !owned {
            return Err(TableError::NotFound(id));
        }
        inner.rows.remove(&id);
        Ok(())
    }
}
