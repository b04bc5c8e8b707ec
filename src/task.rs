//! Task collection: create, update, delete, list.
//!
//! The collection is the single owner of tasks. Ids are assigned at
//! creation, strictly increasing, and never reused; the newest task sits at
//! the front of the list. Create and update go through a simulated remote
//! round-trip so callers see the same async surface a real backend would
//! present.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub type TaskId = u64;

/// Lifecycle status of a task.
///
/// Serialized with the display labels (`"In Progress"`, not `"InProgress"`)
/// so persisted data matches what users see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Ordered task collection with simulated remote latency.
#[derive(Debug)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    next_id: TaskId,
    latency: Duration,
}

impl Default for TaskCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskCollection {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            latency: Duration::ZERO,
        }
    }

    /// Adopt an existing set of tasks, e.g. seed data loaded elsewhere.
    /// The id counter resumes above the highest adopted id.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().map_or(1, |id| id + 1);
        Self {
            tasks,
            next_id,
            latency: Duration::ZERO,
        }
    }

    /// Delay applied to create and update, modelling the remote round-trip.
    /// Tests pass `Duration::ZERO` for deterministic completion.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Create a task and prepend it to the collection.
    ///
    /// The title is validated before the round-trip starts; a title that
    /// trims to empty never reaches the collection.
    pub async fn create(
        &mut self,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(Error::validation("title", "Title is required"));
        }

        self.round_trip().await;

        let task = Task {
            id: self.allocate_id(),
            title: title.to_string(),
            description: description.to_string(),
            status,
        };
        debug!(id = task.id, "task created");
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    /// Replace the supplied fields of the task with `id`, preserving the id.
    pub async fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        if let Some(title) = patch.title.as_deref() {
            if title.trim().is_empty() {
                return Err(Error::validation("title", "Title is required"));
            }
        }

        self.round_trip().await;

        let task = &mut self.tasks[index];
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        debug!(id, "task updated");
        Ok(task.clone())
    }

    /// Remove the task with `id`. Deleting an id that is not present is a
    /// no-op; returns whether anything was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() < before;
        if removed {
            debug!(id, "task deleted");
        }
        removed
    }

    /// The full collection in display order (newest first).
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
