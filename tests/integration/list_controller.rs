//! Integration tests for the list state controller.
//!
//! Drives a [`ListController`] against the in-memory store plus an
//! instrumented wrapper that counts remote calls and can be switched to
//! fail, covering the load/retry lifecycle, local-first validation, and
//! owner isolation.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use termtodo::list::{ListController, NoticeAction, Phase};
use termtodo::store::{InMemoryTaskStore, StoreError, TaskStore};
use termtodo_model::{FilterMode, SortMode, Task, TaskDraft, TaskPatch};

// ---------------------------------------------------------------------------
// Instrumented store wrapper
// ---------------------------------------------------------------------------

/// Wraps the in-memory store, counting every remote call and optionally
/// failing all of them with a transport error.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryTaskStore,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyStore {
    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl TaskStore for FlakyStore {
    async fn list_tasks(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        self.check()?;
        self.inner.list_tasks(owner).await
    }

    async fn get_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        self.check()?;
        self.inner.get_task(id, owner).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, StoreError> {
        self.check()?;
        self.inner.create_task(draft).await
    }

    async fn update_task(&self, id: i64, patch: &TaskPatch, owner: &str) -> Result<Task, StoreError> {
        self.check()?;
        self.inner.update_task(id, patch, owner).await
    }

    async fn delete_task(&self, id: i64, owner: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete_task(id, owner).await
    }

    async fn toggle_task(&self, id: i64, owner: &str) -> Result<Task, StoreError> {
        self.check()?;
        self.inner.toggle_task(id, owner).await
    }

    async fn list_by_status(&self, completed: bool, owner: &str) -> Result<Vec<Task>, StoreError> {
        self.check()?;
        self.inner.list_by_status(completed, owner).await
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_failure_enters_error_phase_and_reload_recovers() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");

    store.set_failing(true);
    ctl.load().await;
    let Phase::Error(message) = ctl.phase() else {
        panic!("expected error phase, got {:?}", ctl.phase());
    };
    assert!(message.contains("Failed to load tasks"));

    // Retry is just another load.
    store.set_failing(false);
    ctl.load().await;
    assert_eq!(*ctl.phase(), Phase::Ready);
}

#[tokio::test]
async fn load_failure_keeps_previous_list() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");
    ctl.load().await;
    ctl.create("Survives the outage", None).await;

    store.set_failing(true);
    ctl.load().await;
    assert!(matches!(ctl.phase(), Phase::Error(_)));
    assert_eq!(ctl.total_count(), 1);
    assert_eq!(ctl.tasks()[0].title, "Survives the outage");
}

// ---------------------------------------------------------------------------
// Local-first validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_create_never_reaches_the_store() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");

    ctl.create("   ", None).await;

    assert_eq!(store.calls(), 0);
    assert!(ctl.tasks().is_empty());
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Create);
}

#[tokio::test]
async fn invalid_update_never_reaches_the_store() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");
    ctl.create("Original", None).await;
    let id = ctl.tasks()[0].id.unwrap();
    let calls_before = store.calls();

    let patch = TaskPatch {
        title: Some("  ".to_string()),
        description: None,
    };
    ctl.update(id, patch).await;

    assert_eq!(store.calls(), calls_before);
    assert_eq!(ctl.tasks()[0].title, "Original");
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Update);
}

#[tokio::test]
async fn toggle_of_unknown_id_never_reaches_the_store() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");

    ctl.toggle_completion(404).await;

    assert_eq!(store.calls(), 0);
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Toggle);
}

// ---------------------------------------------------------------------------
// Confirmed-only mutations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_create_leaves_no_phantom_entry() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");
    ctl.load().await;

    store.set_failing(true);
    ctl.create("Never made it", None).await;

    assert!(ctl.tasks().is_empty());
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Create);

    // The entry appears only after the store confirms.
    store.set_failing(false);
    ctl.create("Made it", None).await;
    assert_eq!(ctl.total_count(), 1);
    assert!(ctl.notice().is_none());
}

#[tokio::test]
async fn failed_delete_keeps_entry_until_confirmed() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");
    ctl.create("Sticky", None).await;
    let id = ctl.tasks()[0].id.unwrap();

    store.set_failing(true);
    ctl.delete(id).await;
    assert_eq!(ctl.total_count(), 1);
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Delete);

    ctl.dismiss_notice();
    assert!(ctl.notice().is_none());

    store.set_failing(false);
    ctl.delete(id).await;
    assert!(ctl.tasks().is_empty());
}

#[tokio::test]
async fn failed_toggle_leaves_completion_untouched() {
    let store = FlakyStore::default();
    let mut ctl = ListController::new(&store, "alice");
    ctl.create("Stuck open", None).await;
    let id = ctl.tasks()[0].id.unwrap();

    store.set_failing(true);
    ctl.toggle_completion(id).await;

    assert!(!ctl.tasks()[0].completed);
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Toggle);
}

// ---------------------------------------------------------------------------
// Owner isolation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_only_sees_own_tasks() {
    let shared = InMemoryTaskStore::new();
    let alice_draft = TaskDraft::new("Alice's task", None, "alice").unwrap();
    let bob_draft = TaskDraft::new("Bob's task", None, "bob").unwrap();
    shared.create_task(&alice_draft).await.unwrap();
    shared.create_task(&bob_draft).await.unwrap();

    let mut ctl = ListController::new(&shared, "alice");
    ctl.load().await;

    assert_eq!(ctl.total_count(), 1);
    assert_eq!(ctl.tasks()[0].title, "Alice's task");

    let view = ctl.derive_view(FilterMode::All, SortMode::Date);
    assert!(view.iter().all(|t| t.owner_id == "alice"));
}

#[tokio::test]
async fn cannot_touch_another_owners_task() {
    let shared = InMemoryTaskStore::new();
    let bob_draft = TaskDraft::new("Bob's secret", None, "bob").unwrap();
    let bob_task = shared.create_task(&bob_draft).await.unwrap();
    let bob_id = bob_task.id.unwrap();

    let mut ctl = ListController::new(&shared, "alice");
    ctl.load().await;

    ctl.delete(bob_id).await;
    assert_eq!(ctl.notice().unwrap().action, NoticeAction::Delete);

    // Bob's task is still there.
    assert_eq!(shared.list_tasks("bob").await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Views and session teardown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn derived_view_tracks_filter_without_reordering_state() {
    let store = InMemoryTaskStore::new();
    let mut ctl = ListController::new(store, "alice");
    ctl.create("banana", None).await;
    ctl.create("apple", None).await;
    let done_id = ctl.tasks()[0].id.unwrap();
    ctl.toggle_completion(done_id).await;

    let active = ctl.derive_view(FilterMode::Active, SortMode::Title);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, "apple");

    let all = ctl.derive_view(FilterMode::All, SortMode::Title);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "apple");

    // The controller's own list keeps insertion order.
    assert_eq!(ctl.tasks()[0].title, "banana");
}

#[tokio::test]
async fn logout_clear_then_login_reuses_the_store() {
    let store = InMemoryTaskStore::new();
    let mut ctl = ListController::new(store, "alice");
    ctl.create("Persisted remotely", None).await;

    ctl.clear();
    assert!(ctl.tasks().is_empty());
    assert_eq!(*ctl.phase(), Phase::Uninitialized);

    // Logging back in as the same owner finds the data again.
    let mut ctl = ListController::new(ctl.into_store(), "alice");
    ctl.load().await;
    assert_eq!(ctl.total_count(), 1);
    assert_eq!(ctl.tasks()[0].title, "Persisted remotely");
}
