//! In-process task store for offline demo mode and tests.
//!
//! Mimics the remote service's observable behavior: it assigns ids and
//! timestamps, enforces owner scoping (a task owned by someone else is
//! reported as absent), and rejects invalid patches the way the real
//! store would.

use std::collections::HashMap;

use chrono::Utc;
use termtodo_model::{Task, TaskDraft, TaskPatch, normalize_title};
use tokio::sync::RwLock;

use super::{StoreError, TaskStore};

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<i64, Task>,
    next_id: i64,
}

/// In-memory [`TaskStore`] backed by a `tokio` `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    inner: RwLock<Inner>,
}

impl InMemoryTaskStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks across all owners.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    /// Returns true if the store holds no tasks at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

/// Rows sorted by id so listings are deterministic.
fn sorted(mut rows: Vec<Task>) -> Vec<Task> {
    rows.sort_by_key(|t| t.id);
    rows
}

impl TaskStore for InMemoryTaskStore {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        Ok(sorted(
            inner
                .rows
                .values()
                .filter(|t| t.owner_id == owner)
                .cloned()
                .collect(),
        ))
    }

    async fn get_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        let inner = self.inner.read().await;
        inner
            .rows
            .get(&id)
            .filter(|t| t.owner_id == owner)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        let title =
            normalize_title(&draft.title).map_err(|e| StoreError::Validation(e.to_string()))?;
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();
        let task = Task {
            id: Some(id),
            title,
            description: draft.description.clone(),
            // New tasks start incomplete regardless of the draft's flag.
            completed: false,
            created_at: Some(now),
            updated_at: Some(now),
            owner_id: draft.owner_id.clone(),
        };
        inner.rows.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i64, patch: &TaskPatch, owner: &str) -> Result<Task, StoreError> {
        let title = match &patch.title {
            Some(t) => {
                Some(normalize_title(t).map_err(|e| StoreError::Validation(e.to_string()))?)
            }
            None => None,
        };
        let mut inner = self.inner.write().await;
        let task = inner
            .rows
            .get_mut(&id)
            .filter(|t| t.owner_id == owner)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let owned = inner
            .rows
            .get(&id)
            .is_some_and(|t| t.owner_id == owner);
        if !owned {
            return Err(StoreError::NotFound(id));
        }
        inner.rows.remove(&id);
        Ok(())
    }

    async fn toggle_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        let task = inner
            .rows
            .get_mut(&id)
            .filter(|t| t.owner_id == owner)
            .ok_or(StoreError::NotFound(id))?;
        task.completed = !task.completed;
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn list_by_status(&self, completed: bool, owner: &str) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        Ok(sorted(
            inner
                .rows
                .values()
                .filter(|t| t.owner_id == owner && t.completed == completed)
                .cloned()
                .collect(),
        ))
    }
}
