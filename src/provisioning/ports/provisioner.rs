//! Unit-of-work port linking boards to their owner's board set.

use crate::board::domain::{Board, BoardId};
use crate::board::ports::BoardRepositoryError;
use crate::error::ErrorKind;
use crate::user::domain::UserId;
use crate::user::ports::UserRepositoryError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for provisioning operations.
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

/// Atomic board creation and deletion on behalf of an owner.
#[async_trait]
pub trait BoardProvisioner: Send + Sync {
    /// Persists `board` and adds it to the owner's board set as one unit.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::OwnerNotFound`] for an unknown owner, or a
    /// store error. On error neither the board nor the index entry exists.
    async fn create_for_owner(&self, owner: &UserId, board: &Board) -> ProvisioningResult<()>;

    /// Removes the board from the owner's board set and deletes it as one
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningError::OwnerNotFound`] for an unknown owner, or a
    /// store error. On error both the board and the index entry remain.
    async fn delete_for_owner(&self, owner: &UserId, board_id: BoardId)
    -> ProvisioningResult<()>;
}

/// Errors returned by provisioning adapters.
#[derive(Debug, Clone, Error)]
pub enum ProvisioningError {
    /// The owning user does not exist.
    #[error("owner not found: {0}")]
    OwnerNotFound(UserId),

    /// The board store rejected a step before anything was written.
    #[error(transparent)]
    Board(#[from] BoardRepositoryError),

    /// The user index rejected a step before anything was written.
    #[error(transparent)]
    User(#[from] UserRepositoryError),

    /// The enclosing store transaction could not begin or commit; nothing was
    /// written.
    #[error("transaction error: {0}")]
    Transaction(Arc<dyn std::error::Error + Send + Sync>),

    /// A later step failed and the earlier steps were undone.
    #[error("provisioning of board {board_id} rolled back: {source}")]
    RolledBack {
        /// Board being created or deleted.
        board_id: BoardId,
        /// Failure that triggered the rollback.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// A later step failed and undoing the earlier steps failed too.
    #[error("provisioning of board {board_id} failed and could not be undone: {source}")]
    RollbackIncomplete {
        /// Board left in an inconsistent state.
        board_id: BoardId,
        /// Failure of the undo step.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ProvisioningError {
    /// Wraps a store transaction failure.
    pub fn transaction(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transaction(Arc::new(err))
    }

    /// Builds a [`ProvisioningError::RolledBack`] error.
    pub fn rolled_back(
        board_id: BoardId,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RolledBack {
            board_id,
            source: Arc::new(err),
        }
    }

    /// Builds a [`ProvisioningError::RollbackIncomplete`] error.
    pub fn rollback_incomplete(
        board_id: BoardId,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RollbackIncomplete {
            board_id,
            source: Arc::new(err),
        }
    }

    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OwnerNotFound(_) => ErrorKind::NotFound,
            Self::Board(err) => err.kind(),
            Self::User(err) => err.kind(),
            Self::Transaction(_) | Self::RolledBack { .. } | Self::RollbackIncomplete { .. } => {
                ErrorKind::TransactionFailed
            }
        }
    }
}
