//! Task and subtask values nested inside board columns.

use super::{BoardDomainError, TaskId};
use serde::{Deserialize, Serialize};

/// Checklist item inside a task. Subtasks have no identifier and are
/// addressed by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    title: String,
    completed: bool,
}

impl Subtask {
    /// Creates a subtask.
    #[must_use]
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask is ticked off.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }
}

/// A card living in exactly one column.
///
/// `status` mirrors the title of the containing column. The board keeps the
/// two in sync; callers never set it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    subtasks: Vec<Subtask>,
    status: String,
}

impl Task {
    pub(super) fn from_draft(draft: TaskDraft) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description.unwrap_or_default(),
            subtasks: draft.subtasks.unwrap_or_default(),
            status: draft.status,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description; empty when never set.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the ordered subtasks.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the title of the column holding this task.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub(super) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Overwrites every field present in the patch except `status`, which the
    /// board resolves separately.
    pub(super) fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            subtasks,
            status: _,
        } = patch;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = subtasks {
            self.subtasks = value;
        }
    }
}

/// Input for creating a task. The status selects the destination column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    subtasks: Option<Vec<Subtask>>,
    status: String,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            subtasks: None,
            status: status.into(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task subtasks.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = Subtask>) -> Self {
        self.subtasks = Some(subtasks.into_iter().collect());
        self
    }

    /// Returns the requested status.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub(super) fn validate(&self) -> Result<(), BoardDomainError> {
        validate_title(&self.title)?;
        validate_subtasks(self.subtasks.as_deref())
    }
}

/// Partial task update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    subtasks: Option<Vec<Subtask>>,
    status: Option<String>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the whole subtask list.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = Subtask>) -> Self {
        self.subtasks = Some(subtasks.into_iter().collect());
        self
    }

    /// Moves the task to the column with this title.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the requested status, if any.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(super) fn validate(&self) -> Result<(), BoardDomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_subtasks(self.subtasks.as_deref())
    }
}

fn validate_title(title: &str) -> Result<(), BoardDomainError> {
    if title.trim().is_empty() {
        return Err(BoardDomainError::EmptyTaskTitle);
    }
    Ok(())
}

fn validate_subtasks(subtasks: Option<&[Subtask]>) -> Result<(), BoardDomainError> {
    let has_blank = subtasks
        .unwrap_or_default()
        .iter()
        .any(|subtask| subtask.title.trim().is_empty());
    if has_blank {
        return Err(BoardDomainError::EmptySubtaskTitle);
    }
    Ok(())
}
