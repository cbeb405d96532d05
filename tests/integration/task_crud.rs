//! End-to-end CRUD tests over real HTTP.
//!
//! Boots the todo server in-process on an OS-assigned port and drives it
//! through [`HttpTaskStore`], then through a full [`ListController`],
//! checking the wire contract: status mapping, owner scoping, and the
//! JSON field names.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use termtodo::list::{ListController, Phase};
use termtodo::store::{HttpTaskStore, StoreError, TaskStore};
use termtodo_model::{TaskDraft, TaskPatch};
use termtodo_server::routes::start_server_with_state;
use termtodo_server::store::TaskTable;

/// Boots a fresh server and returns a store client pointed at it.
async fn start_store() -> (HttpTaskStore, tokio::task::JoinHandle<()>) {
    let (addr, handle) = start_server_with_state("127.0.0.1:0", Arc::new(TaskTable::new()))
        .await
        .expect("server should bind to an ephemeral port");
    let store = HttpTaskStore::new(format!("http://{addr}/api"), Duration::from_secs(5))
        .expect("client should build");
    (store, handle)
}

#[tokio::test]
async fn create_then_list_round_trips() {
    let (store, server) = start_store().await;

    let draft = TaskDraft::new("Buy milk", Some("2 liters".to_string()), "alice").unwrap();
    let created = store.create_task(&draft).await.unwrap();
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description.as_deref(), Some("2 liters"));
    assert_eq!(created.owner_id, "alice");
    assert!(created.id.is_some());
    assert!(created.created_at.is_some());
    assert!(!created.completed);

    let listed = store.list_tasks("alice").await.unwrap();
    assert_eq!(listed, vec![created]);

    server.abort();
}

#[tokio::test]
async fn get_scopes_to_owner() {
    let (store, server) = start_store().await;

    let draft = TaskDraft::new("Alice only", None, "alice").unwrap();
    let id = store.create_task(&draft).await.unwrap().id.unwrap();

    assert!(store.get_task(id, "alice").await.is_ok());
    assert_eq!(
        store.get_task(id, "bob").await.unwrap_err(),
        StoreError::NotFound(id)
    );

    server.abort();
}

#[tokio::test]
async fn update_toggle_delete_flow() {
    let (store, server) = start_store().await;

    let draft = TaskDraft::new("Draft title", None, "alice").unwrap();
    let id = store.create_task(&draft).await.unwrap().id.unwrap();

    let patch = TaskPatch {
        title: Some("Final title".to_string()),
        description: Some("now with notes".to_string()),
    };
    let updated = store.update_task(id, &patch, "alice").await.unwrap();
    assert_eq!(updated.title, "Final title");
    assert_eq!(updated.description.as_deref(), Some("now with notes"));

    let toggled = store.toggle_task(id, "alice").await.unwrap();
    assert!(toggled.completed);

    store.delete_task(id, "alice").await.unwrap();
    assert_eq!(
        store.get_task(id, "alice").await.unwrap_err(),
        StoreError::NotFound(id)
    );

    server.abort();
}

#[tokio::test]
async fn delete_of_missing_task_is_not_found() {
    let (store, server) = start_store().await;

    assert_eq!(
        store.delete_task(12345, "alice").await.unwrap_err(),
        StoreError::NotFound(12345)
    );

    server.abort();
}

#[tokio::test]
async fn blank_title_is_rejected_as_validation_error() {
    let (store, server) = start_store().await;

    // Bypass the client-side draft constructor to exercise the server's
    // own validation path.
    let raw = TaskDraft {
        title: "   ".to_string(),
        description: None,
        completed: false,
        owner_id: "alice".to_string(),
    };
    let err = store.create_task(&raw).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    server.abort();
}

#[tokio::test]
async fn list_by_status_splits_server_side() {
    let (store, server) = start_store().await;

    let open = TaskDraft::new("Open", None, "alice").unwrap();
    let done = TaskDraft::new("Done", None, "alice").unwrap();
    store.create_task(&open).await.unwrap();
    let done_id = store.create_task(&done).await.unwrap().id.unwrap();
    store.toggle_task(done_id, "alice").await.unwrap();

    let completed = store.list_by_status(true, "alice").await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Done");

    let active = store.list_by_status(false, "alice").await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].title, "Open");

    server.abort();
}

#[tokio::test]
async fn controller_full_session_over_http() {
    let (store, server) = start_store().await;

    let mut ctl = ListController::new(store, "alice");
    ctl.load().await;
    assert_eq!(*ctl.phase(), Phase::Ready);

    ctl.create("Buy milk", None).await;
    assert_eq!(ctl.total_count(), 1);
    let id = ctl.tasks()[0].id.unwrap();

    ctl.toggle_completion(id).await;
    assert!(ctl.tasks()[0].completed);

    ctl.delete(id).await;
    assert!(ctl.tasks().is_empty());
    assert!(ctl.notice().is_none());

    server.abort();
}

#[tokio::test]
async fn two_owners_share_a_server_without_seeing_each_other() {
    let (addr, server) = start_server_with_state("127.0.0.1:0", Arc::new(TaskTable::new()))
        .await
        .unwrap();
    let base = format!("http://{addr}/api");

    let mut alice = ListController::new(
        HttpTaskStore::new(base.clone(), Duration::from_secs(5)).unwrap(),
        "alice",
    );
    let mut bob = ListController::new(
        HttpTaskStore::new(base, Duration::from_secs(5)).unwrap(),
        "bob",
    );

    alice.load().await;
    bob.load().await;
    alice.create("Alice's task", None).await;
    bob.create("Bob's task", None).await;

    alice.load().await;
    bob.load().await;
    assert_eq!(alice.total_count(), 1);
    assert_eq!(alice.tasks()[0].title, "Alice's task");
    assert_eq!(bob.total_count(), 1);
    assert_eq!(bob.tasks()[0].title, "Bob's task");

    server.abort();
}
