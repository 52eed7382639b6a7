//! Board columns and their ordered task lists.

use super::{ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};

/// A titled, ordered list of tasks within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    tasks: Vec<Task>,
}

impl Column {
    pub(super) fn new(title: String) -> Self {
        Self {
            id: ColumnId::new(),
            title,
            tasks: Vec::new(),
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the index of the task within this column.
    #[must_use]
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    /// Renames the column and re-points the status of every contained task.
    pub(super) fn rename(&mut self, title: String) {
        for task in &mut self.tasks {
            task.set_status(title.clone());
        }
        self.title = title;
    }

    pub(super) fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Inserts at `index`; the caller guarantees `index <= len`.
    pub(super) fn insert(&mut self, index: usize, task: Task) {
        self.tasks.insert(index, task);
    }

    pub(super) fn take(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub(super) fn task_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }
}
