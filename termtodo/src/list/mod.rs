//! List state for one owner's tasks.
//!
//! The [`ListController`] owns the authoritative local mirror of the
//! session owner's tasks. Every mutation goes through the remote store
//! and the local list is touched only after the store confirms; there
//! are no optimistic updates. Failures surface as a dismissible
//! [`Notice`] tied to the attempted action.

pub mod controller;

pub use controller::ListController;

/// Top-level lifecycle of the task list.
///
/// Item operations (create/update/delete/toggle) never change the phase;
/// only `load` moves between `Loading`, `Ready`, and `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No load has been attempted yet.
    #[default]
    Uninitialized,
    /// A load request is in flight.
    Loading,
    /// The last load succeeded; the local list mirrors the store.
    Ready,
    /// The last load failed. Retrying transitions back to `Loading`;
    /// the previous list (possibly empty) is kept as-is.
    Error(String),
}

/// Which user action a transient error notice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    /// Creating a new task.
    Create,
    /// Editing a task's title or description.
    Update,
    /// Deleting a task.
    Delete,
    /// Flipping a task's completion flag.
    Toggle,
}

impl NoticeAction {
    /// Human-readable verb for error messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Create => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Toggle => "toggle",
        }
    }
}

/// A dismissible, per-action error notification.
///
/// At most one notice is shown at a time; a newer failure replaces an
/// older one. The caller dismisses it explicitly; nothing retries
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The action that failed.
    pub action: NoticeAction,
    /// Human-readable message referencing the failed action.
    pub message: String,
}

impl Notice {
    fn new(action: NoticeAction, detail: impl std::fmt::Display) -> Self {
        Self {
            action,
            message: format!("Failed to {} task: {detail}", action.verb()),
        }
    }
}
