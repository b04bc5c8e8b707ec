//! Search and status filtering over the task list.
//!
//! Pure functions: the visible list is recomputed from the full collection
//! on every read, never cached. At dashboard scale (tens to low hundreds of
//! tasks) a single pass is cheap enough that no index is warranted.

use crate::task::{Task, TaskStatus};

/// Status predicate: a wildcard or one exact status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// The active filter: free-text query composed with a status predicate.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub search_query: String,
    pub status: StatusFilter,
}

/// Apply the filter, preserving the input order of matches.
pub fn apply<'a>(tasks: &'a [Task], filter: &FilterState) -> Vec<&'a Task> {
    let query = filter.search_query.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            let matches_search = task.title.to_lowercase().contains(&query)
                || task.description.to_lowercase().contains(&query);
            matches_search && filter.status.matches(task.status)
        })
        .collect()
}
