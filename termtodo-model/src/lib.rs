//! Shared task model for `TermTodo`.
//!
//! Defines the [`task::Task`] record exchanged with the remote store,
//! the create/update payload types, title validation, and the pure
//! filter/sort view derivation used by the client.

pub mod task;
pub mod view;

pub use task::{MAX_TITLE_LENGTH, Task, TaskDraft, TaskError, TaskPatch, normalize_title};
pub use view::{FilterMode, SortMode, derive_view};
