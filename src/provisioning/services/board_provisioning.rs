//! Service layer for creating and deleting boards on behalf of their owner.

use crate::board::domain::{Board, BoardDomainError, BoardId};
use crate::error::ErrorKind;
use crate::provisioning::ports::{BoardProvisioner, ProvisioningError};
use crate::user::domain::{AccessError, Identity};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBoardRequest {
    title: String,
    #[serde(default)]
    columns: Vec<String>,
}

impl CreateBoardRequest {
    /// Creates a request for a board without columns.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
        }
    }

    /// Sets the initial column titles, in display order.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Service-level errors for provisioning operations.
#[derive(Debug, Error)]
pub enum BoardProvisioningError {
    /// The caller may not access the board.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The provisioning unit of work failed.
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
}

impl BoardProvisioningError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Provisioning(err) => err.kind(),
        }
    }
}

/// Result type for provisioning service operations.
pub type BoardProvisioningResult<T> = Result<T, BoardProvisioningError>;

/// Board creation and deletion orchestration service.
#[derive(Clone)]
pub struct BoardProvisioningService<P, C>
where
    P: BoardProvisioner,
    C: Clock + Send + Sync,
{
    provisioner: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> BoardProvisioningService<P, C>
where
    P: BoardProvisioner,
    C: Clock + Send + Sync,
{
    /// Creates a new provisioning service.
    #[must_use]
    pub const fn new(provisioner: Arc<P>, clock: Arc<C>) -> Self {
        Self { provisioner, clock }
    }

    /// Creates a board owned by the caller.
    ///
    /// The board, including the uniqueness of its initial column titles, is
    /// validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`BoardProvisioningError::Domain`] for an invalid board, or
    /// [`BoardProvisioningError::Provisioning`] when the unit of work fails.
    pub async fn create_board(
        &self,
        identity: &Identity,
        request: CreateBoardRequest,
    ) -> BoardProvisioningResult<Board> {
        let CreateBoardRequest { title, columns } = request;
        let board = Board::new(title, columns, &*self.clock)?;
        self.provisioner
            .create_for_owner(identity.user_id(), &board)
            .await?;
        tracing::info!(
            board_id = %board.id(),
            user_id = %identity.user_id(),
            columns = board.columns().len(),
            "board created"
        );
        Ok(board)
    }

    /// Deletes a board the caller may access, with all of its columns and
    /// tasks, and removes it from the caller's board set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardProvisioningError::Access`] when the board is not in the
    /// caller's set, or [`BoardProvisioningError::Provisioning`] when the unit
    /// of work fails.
    pub async fn delete_board(
        &self,
        identity: &Identity,
        board_id: BoardId,
    ) -> BoardProvisioningResult<()> {
        identity.authorize(board_id)?;
        self.provisioner
            .delete_for_owner(identity.user_id(), board_id)
            .await?;
        tracing::info!(%board_id, user_id = %identity.user_id(), "board deleted");
        Ok(())
    }
}
