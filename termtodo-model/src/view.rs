//! Pure filter/sort view derivation over a task list.
//!
//! The client's list controller delegates here so the ordering and
//! filtering laws can be tested without any store or rendering layer.
//! A derived view is computed fresh on every call and never persisted.

use crate::task::Task;

/// Which subset of tasks to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// All tasks for the owner.
    #[default]
    All,
    /// Only tasks not yet completed.
    Active,
    /// Only completed tasks.
    Completed,
}

impl FilterMode {
    /// Display label for the filter control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Cycles to the next filter mode.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

/// How to order the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first by creation timestamp; tasks without one sort last.
    #[default]
    Date,
    /// Case-respecting lexicographic ascending by title.
    Title,
}

impl SortMode {
    /// Display label for the sort control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Title => "Title",
        }
    }

    /// Toggles between the two sort modes.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Date => Self::Title,
            Self::Title => Self::Date,
        }
    }
}

/// Derives a fresh, filtered, sorted view of `tasks` for `owner`.
///
/// Tasks belonging to other owners are dropped first (enforced here even
/// if the store returned extra rows), then the filter mode is applied,
/// then the result is sorted per `sort`. The input is never mutated.
#[must_use]
pub fn derive_view(tasks: &[Task], owner: &str, filter: FilterMode, sort: SortMode) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|t| t.owner_id == owner)
        .filter(|t| match filter {
            FilterMode::All => true,
            FilterMode::Active => !t.completed,
            FilterMode::Completed => t.completed,
        })
        .cloned()
        .collect();

    match sort {
        SortMode::Title => view.sort_by(|a, b| a.title.cmp(&b.title)),
        // Missing created_at is treated as epoch 0, so it sorts last.
        SortMode::Date => view.sort_by_key(|t| {
            std::cmp::Reverse(t.created_at.map_or(0, |ts| ts.timestamp_millis()))
        }),
    }

    view
}
