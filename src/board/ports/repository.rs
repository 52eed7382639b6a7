//! Repository port for board aggregate persistence.

use crate::board::domain::{Board, BoardDomainError, BoardId};
use crate::error::ErrorKind;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
///
/// Boards are stored whole: columns and tasks travel with the aggregate.
/// Implementations must re-validate unique column titles on every write and
/// persist nothing when the check fails.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a new board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateBoard`] when the identifier
    /// already exists or [`BoardRepositoryError::InvariantViolation`] when the
    /// board fails validation.
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Persists a mutated board loaded earlier from this repository.
    ///
    /// The write succeeds only when the stored version still equals
    /// [`Board::version`]; the stored version is then incremented.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NotFound`] when the board no longer
    /// exists, [`BoardRepositoryError::VersionConflict`] when another write won
    /// the race, or [`BoardRepositoryError::InvariantViolation`].
    async fn update(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Finds a board by identifier.
    ///
    /// Returns `None` when the board does not exist.
    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Returns every existing board among `ids`. Unknown identifiers are
    /// skipped.
    async fn find_many(&self, ids: &[BoardId]) -> BoardRepositoryResult<Vec<Board>>;

    /// Deletes a board with all nested columns and tasks. Deleting an absent
    /// board succeeds.
    async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// The board was not found.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The board changed since it was loaded.
    #[error("board {id} was modified concurrently; loaded version {expected} is stale")]
    VersionConflict {
        /// Board identifier.
        id: BoardId,
        /// Version the caller loaded.
        expected: u64,
    },

    /// The board would violate an aggregate invariant.
    #[error("invalid board state: {0}")]
    InvariantViolation(#[from] BoardDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateBoard(_) | Self::VersionConflict { .. } => ErrorKind::Conflict,
            Self::InvariantViolation(_) => ErrorKind::InvalidState,
            Self::Persistence(_) => ErrorKind::StoreUnavailable,
        }
    }
}
