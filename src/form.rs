//! Create/edit form state for the task modal.
//!
//! The form never aliases a live task: `edit` copies the fields in, and the
//! dashboard's submit hands them back through the collection. While a
//! submit is in flight the form stays open with `is_submitting` set;
//! presentation layers should disable inputs for that window.

use crate::task::{Task, TaskId, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

/// Field-level validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    errors: FieldErrors,
    is_submitting: bool,
}

impl TaskForm {
    /// Blank form for creating a task.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            errors: FieldErrors::default(),
            is_submitting: false,
        }
    }

    /// Form pre-populated from an existing task.
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            errors: FieldErrors::default(),
            is_submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Check the form, recording field errors. Returns true when clean.
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.title = Some("Title is required".to_string());
        }
        let clean = errors.is_empty();
        self.errors = errors;
        clean
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_form_starts_with_defaults() {
        let form = TaskForm::create();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.title, "");
        assert_eq!(form.description, "");
        assert_eq!(form.status, TaskStatus::Pending);
        assert!(form.errors().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn edit_form_copies_the_task() {
        let task = Task {
            id: 3,
            title: "Code review".to_string(),
            description: "open pull requests".to_string(),
            status: TaskStatus::InProgress,
        };
        let form = TaskForm::edit(&task);
        assert_eq!(form.mode(), FormMode::Edit(3));
        assert_eq!(form.title, "Code review");
        assert_eq!(form.description, "open pull requests");
        assert_eq!(form.status, TaskStatus::InProgress);
    }

    #[test]
    fn validate_requires_a_title() {
        let mut form = TaskForm::create();
        assert!(!form.validate());
        assert_eq!(form.errors().title.as_deref(), Some("Title is required"));

        form.title = "   ".to_string();
        assert!(!form.validate());

        form.title = "Ship it".to_string();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn validate_clears_stale_errors() {
        let mut form = TaskForm::create();
        form.validate();
        assert!(!form.errors().is_empty());

        form.title = "Fixed".to_string();
        form.validate();
        assert!(form.errors().is_empty());
    }
}
