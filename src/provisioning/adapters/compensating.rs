//! Provisioning over two independent repositories with compensating undo.
//!
//! Used where the stores share no transaction, such as the in-memory
//! adapters. The owner is checked before any write. A failure in the second
//! step undoes the first; the board is never reachable through an index entry
//! while it does not exist.

use crate::board::domain::{Board, BoardId};
use crate::board::ports::BoardRepository;
use crate::provisioning::ports::{BoardProvisioner, ProvisioningError, ProvisioningResult};
use crate::user::domain::UserId;
use crate::user::ports::UserRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Two-phase provisioner over a board repository and a user repository.
#[derive(Debug)]
pub struct CompensatingBoardProvisioner<B, U>
where
    B: BoardRepository,
    U: UserRepository,
{
    boards: Arc<B>,
    users: Arc<U>,
}

impl<B, U> Clone for CompensatingBoardProvisioner<B, U>
where
    B: BoardRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            boards: Arc::clone(&self.boards),
            users: Arc::clone(&self.users),
        }
    }
}

impl<B, U> CompensatingBoardProvisioner<B, U>
where
    B: BoardRepository,
    U: UserRepository,
{
    /// Creates a provisioner over the given repositories.
    #[must_use]
    pub const fn new(boards: Arc<B>, users: Arc<U>) -> Self {
        Self { boards, users }
    }

    async fn ensure_owner(&self, owner: &UserId) -> ProvisioningResult<()> {
        match self.users.find_by_id(owner).await? {
            Some(_) => Ok(()),
            None => Err(ProvisioningError::OwnerNotFound(owner.clone())),
        }
    }
}

#[async_trait]
impl<B, U> BoardProvisioner for CompensatingBoardProvisioner<B, U>
where
    B: BoardRepository,
    U: UserRepository,
{
    async fn create_for_owner(&self, owner: &UserId, board: &Board) -> ProvisioningResult<()> {
        self.ensure_owner(owner).await?;
        self.boards.store(board).await?;

        let Err(index_err) = self.users.add_board(owner, board.id()).await else {
            return Ok(());
        };
        tracing::warn!(
            board_id = %board.id(),
            user_id = %owner,
            error = %index_err,
            "owner index update failed; removing board"
        );
        match self.boards.delete(board.id()).await {
            Ok(()) => Err(ProvisioningError::rolled_back(board.id(), index_err)),
            Err(undo_err) => {
                tracing::error!(
                    board_id = %board.id(),
                    error = %undo_err,
                    "board removal after failed provisioning did not complete"
                );
                Err(ProvisioningError::rollback_incomplete(board.id(), undo_err))
            }
        }
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        board_id: BoardId,
    ) -> ProvisioningResult<()> {
        self.ensure_owner(owner).await?;
        self.users.remove_board(owner, board_id).await?;

        let Err(delete_err) = self.boards.delete(board_id).await else {
            return Ok(());
        };
        tracing::warn!(
            %board_id,
            user_id = %owner,
            error = %delete_err,
            "board deletion failed; restoring owner index entry"
        );
        match self.users.add_board(owner, board_id).await {
            Ok(()) => Err(ProvisioningError::rolled_back(board_id, delete_err)),
            Err(undo_err) => {
                tracing::error!(
                    %board_id,
                    error = %undo_err,
                    "owner index restore after failed deletion did not complete"
                );
                Err(ProvisioningError::rollback_incomplete(board_id, undo_err))
            }
        }
    }
}
