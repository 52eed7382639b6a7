//! Service layer applying single mutations to board aggregates.
//!
//! Every operation follows the same protocol: authorize the caller, load the
//! board, apply one domain change, persist with the loaded version. Nothing is
//! written when validation fails.

use crate::board::{
    domain::{Board, BoardDomainError, BoardId, ColumnId, TaskDraft, TaskId, TaskPatch},
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::error::ErrorKind;
use crate::observability::board_span;
use crate::user::domain::{AccessError, Identity};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Request payload for repositioning a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    target_status: Option<String>,
    position: i64,
}

impl MoveTaskRequest {
    /// Creates a reorder within the task's current column.
    #[must_use]
    pub const fn new(task_id: TaskId, position: i64) -> Self {
        Self {
            task_id,
            target_status: None,
            position,
        }
    }

    /// Moves the task into the column with this title instead.
    #[must_use]
    pub fn with_target_status(mut self, status: impl Into<String>) -> Self {
        self.target_status = Some(status.into());
        self
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The caller may not access the board.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

impl BoardServiceError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::BoardNotFound(_) => ErrorKind::NotFound,
            Self::Domain(err) => err.kind(),
            Self::Repository(err) => err.kind(),
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board mutation and query service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns a snapshot of a board the caller may access.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Access`] or
    /// [`BoardServiceError::BoardNotFound`] when the board is not visible.
    pub async fn get_board(
        &self,
        identity: &Identity,
        board_id: BoardId,
    ) -> BoardServiceResult<Board> {
        identity.authorize(board_id)?;
        self.load(board_id).await
    }

    /// Returns every existing board in the caller's board set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the lookup fails.
    pub async fn list_boards(&self, identity: &Identity) -> BoardServiceResult<Vec<Board>> {
        let ids: Vec<BoardId> = identity.board_ids().iter().copied().collect();
        Ok(self.repository.find_many(&ids).await?)
    }

    /// Appends a column and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateColumn`] when the title is taken.
    pub async fn insert_column(
        &self,
        identity: &Identity,
        board_id: BoardId,
        title: impl Into<String> + Send,
    ) -> BoardServiceResult<ColumnId> {
        let title = title.into();
        self.mutate(identity, board_id, "insert_column", |board, clock| {
            board.insert_column(title, clock)
        })
        .await
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`] or
    /// [`BoardDomainError::DuplicateColumn`].
    pub async fn rename_column(
        &self,
        identity: &Identity,
        board_id: BoardId,
        column_id: ColumnId,
        title: impl Into<String> + Send,
    ) -> BoardServiceResult<()> {
        let title = title.into();
        self.mutate(identity, board_id, "rename_column", |board, clock| {
            board.rename_column(column_id, title, clock)
        })
        .await
    }

    /// Deletes a column and its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ColumnNotFound`].
    pub async fn delete_column(
        &self,
        identity: &Identity,
        board_id: BoardId,
        column_id: ColumnId,
    ) -> BoardServiceResult<()> {
        self.mutate(identity, board_id, "delete_column", |board, clock| {
            board.delete_column(column_id, clock).map(|_| ())
        })
        .await
    }

    /// Appends a task to the column named by the draft status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidStatus`] when no column matches.
    pub async fn insert_task(
        &self,
        identity: &Identity,
        board_id: BoardId,
        draft: TaskDraft,
    ) -> BoardServiceResult<TaskId> {
        self.mutate(identity, board_id, "insert_task", |board, clock| {
            board.insert_task(draft, clock)
        })
        .await
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] or
    /// [`BoardDomainError::InvalidStatus`].
    pub async fn update_task(
        &self,
        identity: &Identity,
        board_id: BoardId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> BoardServiceResult<()> {
        self.mutate(identity, board_id, "update_task", |board, clock| {
            board.update_task(task_id, patch, clock)
        })
        .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`].
    pub async fn delete_task(
        &self,
        identity: &Identity,
        board_id: BoardId,
        task_id: TaskId,
    ) -> BoardServiceResult<()> {
        self.mutate(identity, board_id, "delete_task", |board, clock| {
            board.delete_task(task_id, clock).map(|_| ())
        })
        .await
    }

    /// Moves a task within or across columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`],
    /// [`BoardDomainError::InvalidStatus`], or
    /// [`BoardDomainError::InvalidPosition`].
    pub async fn move_task(
        &self,
        identity: &Identity,
        board_id: BoardId,
        request: MoveTaskRequest,
    ) -> BoardServiceResult<()> {
        let MoveTaskRequest {
            task_id,
            target_status,
            position,
        } = request;
        self.mutate(identity, board_id, "move_task", |board, clock| {
            board.move_task(task_id, target_status.as_deref(), position, clock)
        })
        .await
    }

    async fn load(&self, board_id: BoardId) -> BoardServiceResult<Board> {
        self.repository
            .find_by_id(board_id)
            .await?
            .ok_or(BoardServiceError::BoardNotFound(board_id))
    }

    async fn mutate<T, F>(
        &self,
        identity: &Identity,
        board_id: BoardId,
        operation: &'static str,
        apply: F,
    ) -> BoardServiceResult<T>
    where
        F: FnOnce(&mut Board, &C) -> Result<T, BoardDomainError>,
    {
        let span = board_span(operation, board_id, identity.user_id());
        async move {
            identity.authorize(board_id)?;
            let mut board = self.load(board_id).await?;
            let outcome = apply(&mut board, &*self.clock).inspect_err(|err| {
                tracing::debug!(error = %err, "board mutation rejected");
            })?;
            self.repository.update(&board).await.inspect_err(|err| {
                tracing::warn!(error = %err, "board update failed");
            })?;
            tracing::info!(base_version = board.version(), "board updated");
            Ok::<T, BoardServiceError>(outcome)
        }
        .instrument(span)
        .await
    }
}
