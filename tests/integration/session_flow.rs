//! Integration tests for persisted session identity.
//!
//! Exercises the session file through full login/logout cycles against a
//! temp directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use termtodo::session::SessionStore;

fn temp_store(name: &str) -> SessionStore {
    let path = std::env::temp_dir()
        .join(format!("termtodo-session-it-{name}-{}", std::process::id()))
        .join("session");
    let store = SessionStore::with_path(path);
    let _ = store.clear();
    store
}

#[test]
fn fresh_start_has_no_session() {
    let store = temp_store("fresh");
    assert!(store.load().unwrap().is_none());
}

#[test]
fn login_logout_cycle() {
    let store = temp_store("cycle");

    store.save("alice").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("alice"));

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn relogin_replaces_previous_owner() {
    let store = temp_store("relogin");

    store.save("alice").unwrap();
    store.save("bob").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("bob"));

    store.clear().unwrap();
}

#[test]
fn session_survives_across_store_instances() {
    let path = std::env::temp_dir()
        .join(format!("termtodo-session-it-restart-{}", std::process::id()))
        .join("session");

    let first = SessionStore::with_path(path.clone());
    let _ = first.clear();
    first.save("alice").unwrap();
    drop(first);

    // A new instance at the same path sees the same session, as a
    // restarted client would.
    let second = SessionStore::with_path(path);
    assert_eq!(second.load().unwrap().as_deref(), Some("alice"));
    second.clear().unwrap();
}
