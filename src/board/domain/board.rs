//! Board aggregate root.
//!
//! A board owns its columns and, through them, every task. All mutations go
//! through the methods here so the two aggregate invariants hold after each
//! call: column titles are unique within the board, and each task's status
//! equals the title of the column holding it.

use super::{BoardDomainError, BoardId, Column, ColumnId, Task, TaskDraft, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum board title length stored in a `VARCHAR(255)` column.
pub const MAX_BOARD_TITLE_LENGTH: usize = 255;

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    title: String,
    columns: Vec<Column>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted title.
    pub title: String,
    /// Persisted columns with their nested tasks.
    pub columns: Vec<Column>,
    /// Optimistic concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Position of a task inside a board: column index, then task index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLocation {
    /// Index of the containing column.
    pub column: usize,
    /// Index of the task within that column.
    pub task: usize,
}

impl Board {
    /// Creates a board with the given title and initial columns, in order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardTitle`] for a blank title,
    /// [`BoardDomainError::BoardTitleTooLong`] for a title longer than
    /// [`MAX_BOARD_TITLE_LENGTH`] characters,
    /// [`BoardDomainError::EmptyColumnTitle`] for a blank column title, or
    /// [`BoardDomainError::DuplicateColumn`] when two initial columns share a
    /// title.
    pub fn new<I, S>(
        title: impl Into<String>,
        column_titles: I,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BoardDomainError::EmptyBoardTitle);
        }
        let len = title.chars().count();
        if len > MAX_BOARD_TITLE_LENGTH {
            return Err(BoardDomainError::BoardTitleTooLong {
                max: MAX_BOARD_TITLE_LENGTH,
                len,
            });
        }
        let timestamp = clock.utc();
        let mut board = Self {
            id: BoardId::new(),
            title,
            columns: Vec::new(),
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        };
        for column_title in column_titles {
            board.push_column(column_title.into())?;
        }
        Ok(board)
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            columns: data.columns,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Decomposes the board into its persisted form.
    #[must_use]
    pub fn into_persisted(self) -> PersistedBoardData {
        PersistedBoardData {
            id: self.id,
            title: self.title,
            columns: self.columns,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the version this board was loaded at.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the column with the identifier.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == column_id)
    }

    /// Returns the first column, in stored order, carrying the title.
    #[must_use]
    pub fn column_titled(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.title() == title)
    }

    /// Finds a task by scanning columns in order; the first match wins.
    #[must_use]
    pub fn locate_task(&self, task_id: TaskId) -> Option<TaskLocation> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(column, candidate)| {
                candidate
                    .position_of(task_id)
                    .map(|task| TaskLocation { column, task })
            })
    }

    /// Returns the task with the identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        let location = self.locate_task(task_id)?;
        self.columns
            .get(location.column)
            .and_then(|column| column.tasks().get(location.task))
    }

    /// Checks that no two columns share a title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`] naming the first repeated
    /// title.
    pub fn ensure_unique_column_titles(&self) -> Result<(), BoardDomainError> {
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.title()) {
                return Err(BoardDomainError::DuplicateColumn(column.title().to_owned()));
            }
        }
        Ok(())
    }

    /// Appends an empty column and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] or
    /// [`BoardDomainError::DuplicateColumn`].
    pub fn insert_column(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<ColumnId, BoardDomainError> {
        let column_id = self.push_column(title.into())?;
        self.touch(clock);
        Ok(column_id)
    }

    /// Renames a column in place. Tasks in the column follow the new title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`],
    /// [`BoardDomainError::EmptyColumnTitle`], or
    /// [`BoardDomainError::DuplicateColumn`] when a different column already
    /// uses the title.
    pub fn rename_column(
        &mut self,
        column_id: ColumnId,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        let title = non_blank_column_title(title.into())?;
        let index = self
            .column_index(column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))?;
        let clashes = self
            .columns
            .iter()
            .enumerate()
            .any(|(other, column)| other != index && column.title() == title);
        if clashes {
            return Err(BoardDomainError::DuplicateColumn(title));
        }

        let column = self
            .columns
            .get_mut(index)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))?;
        column.rename(title);
        self.touch(clock);
        Ok(())
    }

    /// Removes a column together with every task it holds.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`].
    pub fn delete_column(
        &mut self,
        column_id: ColumnId,
        clock: &impl Clock,
    ) -> Result<Column, BoardDomainError> {
        let index = self
            .column_index(column_id)
            .ok_or(BoardDomainError::ColumnNotFound(column_id))?;
        let removed = self.columns.remove(index);
        self.touch(clock);
        Ok(removed)
    }

    /// Appends a task to the column whose title equals the draft status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidStatus`] when no column matches, or a
    /// title validation error.
    pub fn insert_task(
        &mut self,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<TaskId, BoardDomainError> {
        draft.validate()?;
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.title() == draft.status())
            .ok_or_else(|| BoardDomainError::InvalidStatus(draft.status().to_owned()))?;
        let task = Task::from_draft(draft);
        let task_id = task.id();
        column.push(task);
        self.touch(clock);
        Ok(task_id)
    }

    /// Applies a partial update to a task.
    ///
    /// A status that differs from the current one moves the task to the end
    /// of the matching column before the remaining fields are written.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`],
    /// [`BoardDomainError::InvalidStatus`], or a title validation error.
    pub fn update_task(
        &mut self,
        task_id: TaskId,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        patch.validate()?;
        let mut location = self
            .locate_task(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;

        if let Some(status) = patch.status() {
            let destination = self.column_index_titled(status)?;
            let current = self.task(task_id).map(Task::status);
            if current != Some(status) {
                let task = self.take_task(location, task_id)?;
                let column = self.column_holding(destination, task_id)?;
                column.push(task);
                location = TaskLocation {
                    column: destination,
                    task: column.tasks().len().saturating_sub(1),
                };
            }
        }

        let column = self.column_holding(location.column, task_id)?;
        let title = column.title().to_owned();
        let task = column
            .task_mut(location.task)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        task.apply(patch);
        task.set_status(title);
        self.touch(clock);
        Ok(())
    }

    /// Removes a task from whichever column holds it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`].
    pub fn delete_task(
        &mut self,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Result<Task, BoardDomainError> {
        let location = self
            .locate_task(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let task = self.take_task(location, task_id)?;
        self.touch(clock);
        Ok(task)
    }

    /// Moves a task to `position` in the destination column.
    ///
    /// The destination is the column titled `target_status` when given, else
    /// the column currently holding the task. `position` must be below the
    /// destination's task count measured before the task leaves its source,
    /// so a same-column reorder can reach at most index `count - 1` and a
    /// cross-column move into an empty column is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`],
    /// [`BoardDomainError::InvalidStatus`], or
    /// [`BoardDomainError::InvalidPosition`]. The board is unchanged on error.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        target_status: Option<&str>,
        position: i64,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        let source = self
            .locate_task(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let destination = match target_status {
            Some(status) => self.column_index_titled(status)?,
            None => source.column,
        };
        let len = self
            .columns
            .get(destination)
            .map_or(0, |column| column.tasks().len());
        let index = usize::try_from(position)
            .ok()
            .filter(|index| *index < len)
            .ok_or(BoardDomainError::InvalidPosition { position, len })?;

        let mut task = self.take_task(source, task_id)?;
        let column = self.column_holding(destination, task_id)?;
        task.set_status(column.title());
        column.insert(index, task);
        self.touch(clock);
        Ok(())
    }

    fn push_column(&mut self, title: String) -> Result<ColumnId, BoardDomainError> {
        let title = non_blank_column_title(title)?;
        if self.column_titled(&title).is_some() {
            return Err(BoardDomainError::DuplicateColumn(title));
        }
        let column = Column::new(title);
        let column_id = column.id();
        self.columns.push(column);
        Ok(column_id)
    }

    fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.id() == column_id)
    }

    fn column_index_titled(&self, title: &str) -> Result<usize, BoardDomainError> {
        self.columns
            .iter()
            .position(|column| column.title() == title)
            .ok_or_else(|| BoardDomainError::InvalidStatus(title.to_owned()))
    }

    /// Returns the column at `index` that is about to hold `task_id`.
    fn column_holding(
        &mut self,
        index: usize,
        task_id: TaskId,
    ) -> Result<&mut Column, BoardDomainError> {
        self.columns
            .get_mut(index)
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    fn take_task(
        &mut self,
        location: TaskLocation,
        task_id: TaskId,
    ) -> Result<Task, BoardDomainError> {
        self.columns
            .get_mut(location.column)
            .and_then(|column| column.take(location.task))
            .ok_or(BoardDomainError::TaskNotFound(task_id))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn non_blank_column_title(title: String) -> Result<String, BoardDomainError> {
    if title.trim().is_empty() {
        return Err(BoardDomainError::EmptyColumnTitle);
    }
    Ok(title)
}
