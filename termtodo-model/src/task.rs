//! Task record and mutation payload types for `TermTodo`.
//!
//! Matches the remote store's JSON wire format: camelCase field names,
//! the owner carried as `userId`, and `id`/timestamps assigned by the
//! store (absent until first successful creation).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum allowed task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Errors that can occur when validating task input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task title cannot be empty or whitespace-only.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Task title exceeds the maximum length.
    #[error("task title too long (max {MAX_TITLE_LENGTH} characters)")]
    TitleTooLong,
}

/// A single todo entity as stored by the remote service.
///
/// A task with `id == None` has never been persisted; the client must
/// never reference it by identity. `created_at`/`updated_at` are set by
/// the store and echoed back on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, absent until first successful creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Task title. Never empty or whitespace-only once accepted.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp, set by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp, set by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Owner of this task. Every task belongs to exactly one owner.
    #[serde(rename = "userId")]
    pub owner_id: String,
}

/// Payload for creating a new task. The store assigns the id and
/// timestamps; `completed` is always false for new tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag (false for new tasks).
    pub completed: bool,
    /// Owner the new task belongs to.
    #[serde(rename = "userId")]
    pub owner_id: String,
}

impl TaskDraft {
    /// Builds a validated draft for the given owner.
    ///
    /// The title is trimmed; `completed` starts false.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TitleEmpty`] or [`TaskError::TitleTooLong`]
    /// if the title fails validation after trimming.
    pub fn new(
        title: &str,
        description: Option<String>,
        owner_id: impl Into<String>,
    ) -> Result<Self, TaskError> {
        let title = normalize_title(title)?;
        Ok(Self {
            title,
            description,
            completed: false,
            owner_id: owner_id.into(),
        })
    }
}

/// Partial update payload. Absent fields are omitted from the wire body
/// so the store only touches what the client actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskPatch {
    /// Returns true if the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Validates the patch: a provided title must survive normalization.
    ///
    /// Returns the patch with the title trimmed in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TitleEmpty`] or [`TaskError::TitleTooLong`]
    /// if a provided title fails validation.
    pub fn validated(mut self) -> Result<Self, TaskError> {
        if let Some(title) = self.title.take() {
            self.title = Some(normalize_title(&title)?);
        }
        Ok(self)
    }
}

/// Trims a title and validates it.
///
/// # Errors
///
/// Returns [`TaskError::TitleEmpty`] if the trimmed title is empty, or
/// [`TaskError::TitleTooLong`] if it exceeds [`MAX_TITLE_LENGTH`]
/// characters.
pub fn normalize_title(title: &str) -> Result<String, TaskError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskError::TitleEmpty);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(TaskError::TitleTooLong);
    }
    Ok(trimmed.to_string())
}
