//! `PostgreSQL` provisioner running both writes in one database transaction.

use crate::board::adapters::postgres::{delete_board, insert_board, to_new_row};
use crate::board::domain::{Board, BoardId};
use crate::board::ports::BoardRepositoryError;
use crate::db::KanbanPgPool;
use crate::provisioning::ports::{BoardProvisioner, ProvisioningError, ProvisioningResult};
use crate::user::adapters::postgres::{append_board_id, remove_board_id};
use crate::user::domain::UserId;
use crate::user::ports::UserRepositoryError;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

impl From<DieselError> for ProvisioningError {
    fn from(err: DieselError) -> Self {
        Self::transaction(err)
    }
}

/// Transactional provisioner over the shared `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PostgresBoardProvisioner {
    pool: KanbanPgPool,
}

impl PostgresBoardProvisioner {
    /// Creates a provisioner from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: KanbanPgPool) -> Self {
        Self { pool }
    }

    async fn run_in_transaction<F>(&self, f: F) -> ProvisioningResult<()>
    where
        F: FnOnce(&mut PgConnection) -> ProvisioningResult<()> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(ProvisioningError::transaction)?;
            let connection: &mut PgConnection = &mut pooled;
            connection.transaction::<_, ProvisioningError, _>(f)
        })
        .await
        .map_err(ProvisioningError::transaction)?
    }
}

/// Reports an unknown owner as such rather than as a generic user error.
fn owner_error(err: UserRepositoryError) -> ProvisioningError {
    match err {
        UserRepositoryError::NotFound(id) => ProvisioningError::OwnerNotFound(id),
        other => ProvisioningError::User(other),
    }
}

#[async_trait]
impl BoardProvisioner for PostgresBoardProvisioner {
    async fn create_for_owner(&self, owner: &UserId, board: &Board) -> ProvisioningResult<()> {
        board
            .ensure_unique_column_titles()
            .map_err(BoardRepositoryError::from)?;
        let new_row = to_new_row(board)?;
        let board_id = board.id();
        let owner = owner.clone();

        self.run_in_transaction(move |connection| {
            insert_board(connection, &new_row)?;
            append_board_id(connection, &owner, board_id).map_err(owner_error)
        })
        .await
        .inspect_err(|err| {
            tracing::warn!(%board_id, error = %err, "board creation transaction rolled back");
        })
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        board_id: BoardId,
    ) -> ProvisioningResult<()> {
        let owner = owner.clone();

        self.run_in_transaction(move |connection| {
            remove_board_id(connection, &owner, board_id).map_err(owner_error)?;
            delete_board(connection, board_id)?;
            Ok(())
        })
        .await
        .inspect_err(|err| {
            tracing::warn!(%board_id, error = %err, "board deletion transaction rolled back");
        })
    }
}
