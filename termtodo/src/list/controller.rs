//! The list state controller: local mirror plus remote reconciliation.

use termtodo_model::{FilterMode, SortMode, Task, TaskDraft, TaskPatch, derive_view};

use crate::store::TaskStore;

use super::{Notice, NoticeAction, Phase};

/// Owns one owner's in-memory task list and mediates every mutation
/// through the remote store.
///
/// The session owner is passed in explicitly at construction; there is
/// no ambient "current user" state. All local mutations are discrete
/// replace/append/remove steps applied when the store's response
/// arrives, so responses for different tasks may land in any order
/// (per-task last-write-wins by arrival).
pub struct ListController<S> {
    store: S,
    owner: String,
    tasks: Vec<Task>,
    phase: Phase,
    notice: Option<Notice>,
}

impl<S: TaskStore> ListController<S> {
    /// Creates a controller for `owner` backed by `store`.
    ///
    /// The list starts empty in [`Phase::Uninitialized`]; call
    /// [`load`](Self::load) to populate it.
    pub fn new(store: S, owner: impl Into<String>) -> Self {
        Self {
            store,
            owner: owner.into(),
            tasks: Vec::new(),
            phase: Phase::default(),
            notice: None,
        }
    }

    /// The session owner this controller was built for.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The pending transient error notice, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Read-only access to the raw local list (unfiltered, unsorted).
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the local list.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of completed tasks in the local list.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Fetches all tasks for the owner and replaces the local list.
    ///
    /// While the request is in flight the phase is [`Phase::Loading`].
    /// On success the entire list is replaced with the store's rows
    /// (filtered to the owner, deduplicated by id, rows without an id
    /// dropped) and the phase becomes [`Phase::Ready`]. On failure the
    /// phase becomes [`Phase::Error`] and the previous list is left
    /// unchanged; calling `load` again is the retry.
    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        match self.store.list_tasks(&self.owner).await {
            Ok(rows) => {
                self.tasks.clear();
                for task in rows {
                    if task.owner_id != self.owner || task.id.is_none() {
                        continue;
                    }
                    self.upsert(task);
                }
                self.phase = Phase::Ready;
                tracing::debug!(owner = %self.owner, count = self.tasks.len(), "task list loaded");
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, error = %e, "task list load failed");
                self.phase = Phase::Error(format!("Failed to load tasks: {e}"));
            }
        }
    }

    /// Creates a new task from raw form input.
    ///
    /// The title is validated locally (trimmed, non-empty, bounded)
    /// before any remote call. On success the store's returned task,
    /// carrying its assigned id, is appended to the local list. On
    /// failure nothing is inserted and a Create notice is surfaced; a
    /// failed create never leaves a phantom entry behind.
    pub async fn create(&mut self, title: &str, description: Option<String>) {
        let draft = match TaskDraft::new(title, description, &self.owner) {
            Ok(d) => d,
            Err(e) => {
                self.fail(NoticeAction::Create, &e);
                return;
            }
        };
        match self.store.create_task(&draft).await {
            Ok(task) => {
                tracing::debug!(owner = %self.owner, id = ?task.id, "task created");
                self.upsert(task);
                self.notice = None;
            }
            Err(e) => self.fail(NoticeAction::Create, &e),
        }
    }

    /// Flips the completion flag of a locally known task.
    ///
    /// The local entry is replaced wholesale with the task the store
    /// returns; on failure the entry is left untouched.
    pub async fn toggle_completion(&mut self, id: i64) {
        if !self.contains(id) {
            // Only loaded entries are toggleable; an unknown id here is a
            // caller bug surfaced as a notice rather than a panic.
            self.fail(NoticeAction::Toggle, &format!("task {id} is not loaded"));
            return;
        }
        match self.store.toggle_task(id, &self.owner).await {
            Ok(task) => {
                self.upsert(task);
                self.notice = None;
            }
            Err(e) => self.fail(NoticeAction::Toggle, &e),
        }
    }

    /// Applies a partial edit to a task.
    ///
    /// A patch that carries a title must survive trimming; invalid
    /// patches are rejected locally before any remote call. On success
    /// the local entry is replaced with the store's representation.
    pub async fn update(&mut self, id: i64, patch: TaskPatch) {
        let patch = match patch.validated() {
            Ok(p) => p,
            Err(e) => {
                self.fail(NoticeAction::Update, &e);
                return;
            }
        };
        if patch.is_empty() {
            return;
        }
        match self.store.update_task(id, &patch, &self.owner).await {
            Ok(task) => {
                self.upsert(task);
                self.notice = None;
            }
            Err(e) => self.fail(NoticeAction::Update, &e),
        }
    }

    /// Deletes a task, removing the local entry only after the store
    /// confirms. On failure the entry stays and a Delete notice is
    /// surfaced.
    pub async fn delete(&mut self, id: i64) {
        match self.store.delete_task(id, &self.owner).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != Some(id));
                self.notice = None;
            }
            Err(e) => self.fail(NoticeAction::Delete, &e),
        }
    }

    /// Clears the pending transient notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drops all local state, returning to [`Phase::Uninitialized`].
    ///
    /// Used on logout; the session layer clears the persisted identity.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.phase = Phase::Uninitialized;
        self.notice = None;
    }

    /// Consumes the controller, handing the store back to the caller.
    ///
    /// Logging in as a different owner builds a new controller around
    /// the same store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Computes a fresh filtered/sorted view of the local list.
    ///
    /// Pure over current state: the stored list is never reordered or
    /// mutated, and every call returns a new sequence.
    #[must_use]
    pub fn derive_view(&self, filter: FilterMode, sort: SortMode) -> Vec<Task> {
        derive_view(&self.tasks, &self.owner, filter, sort)
    }

    fn contains(&self, id: i64) -> bool {
        self.tasks.iter().any(|t| t.id == Some(id))
    }

    /// Replaces the entry with the same id, or appends. The store's
    /// representation always wins wholesale; fields are never patched
    /// piecemeal into an existing entry.
    fn upsert(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        } else {
            self.tasks.push(task);
        }
    }

    fn fail(&mut self, action: NoticeAction, detail: &impl std::fmt::Display) {
        tracing::warn!(owner = %self.owner, action = ?action, error = %detail, "task operation failed");
        self.notice = Some(Notice::new(action, detail));
    }
}
