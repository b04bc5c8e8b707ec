//! Dashboard state: the task collection, the active filter, and the modal
//! form.
//!
//! One instance per signed-in dashboard, constructed once and passed by
//! reference; no ambient globals. The presentation layer reads
//! `visible_tasks`/`form` and forwards user intents to the methods here;
//! after any mutating call returns, a fresh read reflects the new state.

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::events::{Event, EventKind, EventSink};
use crate::filter::{self, FilterState, StatusFilter};
use crate::form::{FormMode, TaskForm};
use crate::task::{Task, TaskCollection, TaskId, TaskPatch, TaskStatus};

/// Result of a submit intent.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new task was created.
    Created(Task),
    /// An existing task was updated.
    Updated(Task),
    /// Validation failed; the form stays open with field errors set.
    Rejected,
    /// No form was open, or a submit was already in flight. Rejected, not
    /// queued.
    Ignored,
}

#[derive(Serialize)]
struct TaskEventData<'a> {
    id: TaskId,
    title: &'a str,
}

pub struct Dashboard {
    tasks: TaskCollection,
    filter: FilterState,
    form: Option<TaskForm>,
    events: Option<EventSink>,
}

impl Dashboard {
    pub fn new(tasks: TaskCollection) -> Self {
        Self {
            tasks,
            filter: FilterState::default(),
            form: None,
            events: None,
        }
    }

    pub fn with_events(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    /// The collection with the current filter applied, recomputed on every
    /// call.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::apply(self.tasks.list(), &self.filter)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    /// Mutable access for field edits while the modal is open.
    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.form.as_mut()
    }

    // =========================================================================
    // Filter intents
    // =========================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    // =========================================================================
    // Modal intents
    // =========================================================================

    /// Open the modal in create mode with default fields. Ignored while a
    /// form is already open.
    pub fn open_create(&mut self) {
        if self.form.is_none() {
            self.form = Some(TaskForm::create());
        }
    }

    /// Open the modal pre-populated from the task with `id`. Ignored while
    /// a form is already open.
    pub fn open_edit(&mut self, id: TaskId) -> Result<()> {
        if self.form.is_some() {
            return Ok(());
        }
        let task = self.tasks.get(id).ok_or(Error::TaskNotFound(id))?;
        self.form = Some(TaskForm::edit(task));
        Ok(())
    }

    /// Close the modal, discarding edits. The collection is untouched.
    pub fn cancel(&mut self) {
        self.form = None;
    }

    /// Submit the open form: create or update depending on mode.
    ///
    /// Validation failures keep the form open with field errors and never
    /// reach the collection. A second submit while one is in flight is
    /// ignored. Only success closes and resets the modal; a collection
    /// error clears `is_submitting` and leaves the form open for retry.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let (mode, title, description, status) = {
            let Some(form) = self.form.as_mut() else {
                return Ok(SubmitOutcome::Ignored);
            };
            if form.is_submitting() {
                return Ok(SubmitOutcome::Ignored);
            }
            if !form.validate() {
                return Ok(SubmitOutcome::Rejected);
            }
            form.set_submitting(true);
            (
                form.mode(),
                form.title.clone(),
                form.description.clone(),
                form.status,
            )
        };

        let result = match mode {
            FormMode::Create => self
                .tasks
                .create(&title, &description, status)
                .await
                .map(SubmitOutcome::Created),
            FormMode::Edit(id) => self
                .tasks
                .update(
                    id,
                    TaskPatch {
                        title: Some(title),
                        description: Some(description),
                        status: Some(status),
                    },
                )
                .await
                .map(SubmitOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                match &outcome {
                    SubmitOutcome::Created(task) => {
                        self.emit(EventKind::TaskCreated, task.id, &task.title)
                    }
                    SubmitOutcome::Updated(task) => {
                        self.emit(EventKind::TaskUpdated, task.id, &task.title)
                    }
                    _ => {}
                }
                self.form = None;
                Ok(outcome)
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_submitting(false);
                }
                Err(err)
            }
        }
    }

    // =========================================================================
    // Direct task intents
    // =========================================================================

    /// Delete a task. Deleting an id that is no longer present is a no-op;
    /// returns whether anything was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let title = self.tasks.get(id).map(|task| task.title.clone());
        if !self.tasks.delete(id) {
            return false;
        }
        if let Some(title) = title {
            self.emit(EventKind::TaskDeleted, id, &title);
        }
        true
    }

    /// Direct status transition outside the modal.
    pub async fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task> {
        let task = self
            .tasks
            .update(
                id,
                TaskPatch {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await?;
        self.emit(EventKind::TaskUpdated, task.id, &task.title);
        Ok(task)
    }

    fn emit(&mut self, kind: EventKind, id: TaskId, title: &str) {
        let Some(sink) = self.events.as_mut() else {
            return;
        };
        let event = match Event::new(kind).with_data(TaskEventData { id, title }) {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "failed to encode task event");
                return;
            }
        };
        if let Err(err) = sink.emit(&event) {
            warn!(%err, "failed to emit task event");
        }
    }
}
