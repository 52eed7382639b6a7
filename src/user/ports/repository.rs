//! Repository port for users and their board-identifier sets.

use crate::board::domain::BoardId;
use crate::error::ErrorKind;
use crate::user::domain::{ExternalId, User, UserId};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
///
/// The board-set mutators are set-semantic: adding a present board or
/// removing an absent one succeeds without change.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier is
    /// taken or [`UserRepositoryError::DuplicateExternalId`] when another user
    /// already carries the external identity.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds the user linked to an external identity.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> UserRepositoryResult<Option<User>>;

    /// Returns the boards the user may access.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] for an unknown user.
    async fn boards_of(&self, id: &UserId) -> UserRepositoryResult<BTreeSet<BoardId>>;

    /// Adds a board to the user's set.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] for an unknown user.
    async fn add_board(&self, id: &UserId, board_id: BoardId) -> UserRepositoryResult<()>;

    /// Removes a board from the user's set.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] for an unknown user.
    async fn remove_board(&self, id: &UserId, board_id: BoardId) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Another user is linked to the external identity.
    #[error("external identity already registered: {0}")]
    DuplicateExternalId(ExternalId),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateUser(_) | Self::DuplicateExternalId(_) => ErrorKind::Conflict,
            Self::Persistence(_) => ErrorKind::StoreUnavailable,
        }
    }
}
