//! Property-based tests for the JSON wire format.
//!
//! Uses proptest to verify:
//! 1. Any `Task` survives a serialize → deserialize round-trip.
//! 2. Drafts and patches round-trip the same way.
//! 3. The owner always travels as `userId` on the wire.
//! 4. Arbitrary input never causes a panic in the parser (returns `Err`
//!    gracefully).

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use termtodo_model::{Task, TaskDraft, TaskPatch};

// --- Strategies for wire types ---

/// Strategy for owner identifiers.
fn arb_owner() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}"
}

/// Strategy for titles. Serialization must round-trip any string, not
/// just titles that pass validation.
fn arb_title() -> impl Strategy<Value = String> {
    "[^\\x00]{0,64}"
}

/// Strategy for optional descriptions.
fn arb_description() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[^\\x00]{0,128}")
}

/// Strategy for store-assigned timestamps (millisecond precision, as the
/// store reports them).
fn arb_timestamp() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop::option::of(
        (0i64..=4_102_444_800_000i64)
            .prop_map(|ms| Utc.timestamp_millis_opt(ms).single().unwrap()),
    )
}

/// Strategy for arbitrary `Task` values.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        prop::option::of(1i64..1_000_000),
        arb_title(),
        arb_description(),
        any::<bool>(),
        arb_timestamp(),
        arb_timestamp(),
        arb_owner(),
    )
        .prop_map(
            |(id, title, description, completed, created_at, updated_at, owner_id)| Task {
                id,
                title,
                description,
                completed,
                created_at,
                updated_at,
                owner_id,
            },
        )
}

/// Strategy for arbitrary `TaskDraft` values.
fn arb_draft() -> impl Strategy<Value = TaskDraft> {
    (arb_title(), arb_description(), any::<bool>(), arb_owner()).prop_map(
        |(title, description, completed, owner_id)| TaskDraft {
            title,
            description,
            completed,
            owner_id,
        },
    )
}

/// Strategy for arbitrary `TaskPatch` values.
fn arb_patch() -> impl Strategy<Value = TaskPatch> {
    (prop::option::of(arb_title()), arb_description())
        .prop_map(|(title, description)| TaskPatch { title, description })
}

// --- Round-trip properties ---

proptest! {
    #[test]
    fn task_round_trips(task in arb_task()) {
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(task, back);
    }

    #[test]
    fn draft_round_trips(draft in arb_draft()) {
        let json = serde_json::to_string(&draft).unwrap();
        let back: TaskDraft = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(draft, back);
    }

    #[test]
    fn patch_round_trips(patch in arb_patch()) {
        let json = serde_json::to_string(&patch).unwrap();
        let back: TaskPatch = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(patch, back);
    }

    #[test]
    fn owner_travels_as_user_id(task in arb_task()) {
        let json = serde_json::to_value(&task).unwrap();
        prop_assert_eq!(json["userId"].as_str(), Some(task.owner_id.as_str()));
        prop_assert!(json.get("ownerId").is_none());
        prop_assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn absent_optionals_are_omitted_from_the_wire(
        title in arb_title(),
        owner in arb_owner(),
    ) {
        let task = Task {
            id: None,
            title,
            description: None,
            completed: false,
            created_at: None,
            updated_at: None,
            owner_id: owner,
        };
        let json = serde_json::to_value(&task).unwrap();
        prop_assert!(json.get("id").is_none());
        prop_assert!(json.get("description").is_none());
        prop_assert!(json.get("createdAt").is_none());
        prop_assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn garbage_input_never_panics(input in ".{0,256}") {
        // Malformed bodies must surface as Err, never a panic.
        let _ = serde_json::from_str::<Task>(&input);
        let _ = serde_json::from_str::<TaskPatch>(&input);
    }
}
