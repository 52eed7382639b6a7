//! `PostgreSQL` repository implementation for board storage.

use super::models::{BoardRow, NewBoardRow};
use crate::board::{
    domain::{Board, BoardId, Column, PersistedBoardData},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::db::{KanbanPgPool, schema::boards};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed board repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: KanbanPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: KanbanPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        board.ensure_unique_column_titles()?;
        let new_row = to_new_row(board)?;
        self.run_blocking(move |connection| insert_board(connection, &new_row))
            .await
    }

    async fn update(&self, board: &Board) -> BoardRepositoryResult<()> {
        board.ensure_unique_column_titles()?;
        let id = board.id();
        let expected = board.version();
        let loaded_version = to_db_version(expected)?;
        let next_version = loaded_version
            .checked_add(1)
            .ok_or_else(|| version_overflow(expected))?;
        let title = board.title().to_owned();
        let columns =
            serde_json::to_value(board.columns()).map_err(BoardRepositoryError::persistence)?;
        let updated_at = board.updated_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                boards::table
                    .filter(boards::id.eq(id.into_inner()))
                    .filter(boards::version.eq(loaded_version)),
            )
            .set((
                boards::title.eq(title),
                boards::columns_json.eq(columns),
                boards::version.eq(next_version),
                boards::updated_at.eq(updated_at),
            ))
            .execute(connection)
            .map_err(BoardRepositoryError::persistence)?;
            if updated == 1 {
                return Ok(());
            }

            let exists = diesel::select(diesel::dsl::exists(
                boards::table.filter(boards::id.eq(id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(BoardRepositoryError::persistence)?;
            if exists {
                tracing::debug!(board_id = %id, expected, "board version conflict");
                Err(BoardRepositoryError::VersionConflict { id, expected })
            } else {
                Err(BoardRepositoryError::NotFound(id))
            }
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .filter(boards::id.eq(id.into_inner()))
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn find_many(&self, ids: &[BoardId]) -> BoardRepositoryResult<Vec<Board>> {
        let requested: Vec<BoardId> = ids.to_vec();
        self.run_blocking(move |connection| {
            let uuids: Vec<uuid::Uuid> = requested.iter().map(|id| id.into_inner()).collect();
            let rows = boards::table
                .filter(boards::id.eq_any(uuids))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            let mut by_id = rows
                .into_iter()
                .map(|row| row_to_board(row).map(|board| (board.id(), board)))
                .collect::<BoardRepositoryResult<HashMap<_, _>>>()?;
            Ok(requested.iter().filter_map(|id| by_id.remove(id)).collect())
        })
        .await
    }

    async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| delete_board(connection, id))
            .await
    }
}

/// Inserts a board row on an open connection, possibly inside a transaction.
pub(crate) fn insert_board(
    connection: &mut PgConnection,
    new_row: &NewBoardRow,
) -> BoardRepositoryResult<()> {
    diesel::insert_into(boards::table)
        .values(new_row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                BoardRepositoryError::DuplicateBoard(BoardId::from_uuid(new_row.id))
            }
            _ => BoardRepositoryError::persistence(err),
        })?;
    Ok(())
}

/// Deletes a board row on an open connection, possibly inside a transaction.
pub(crate) fn delete_board(connection: &mut PgConnection, id: BoardId) -> BoardRepositoryResult<()> {
    diesel::delete(boards::table.filter(boards::id.eq(id.into_inner())))
        .execute(connection)
        .map_err(BoardRepositoryError::persistence)?;
    Ok(())
}

pub(crate) fn to_new_row(board: &Board) -> BoardRepositoryResult<NewBoardRow> {
    let columns =
        serde_json::to_value(board.columns()).map_err(BoardRepositoryError::persistence)?;
    Ok(NewBoardRow {
        id: board.id().into_inner(),
        title: board.title().to_owned(),
        columns,
        version: to_db_version(board.version())?,
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    })
}

fn row_to_board(row: BoardRow) -> BoardRepositoryResult<Board> {
    let BoardRow {
        id,
        title,
        columns: persisted_columns,
        version,
        created_at,
        updated_at,
    } = row;

    let columns = serde_json::from_value::<Vec<Column>>(persisted_columns)
        .map_err(BoardRepositoryError::persistence)?;
    let version = u64::try_from(version).map_err(BoardRepositoryError::persistence)?;

    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(id),
        title,
        columns,
        version,
        created_at,
        updated_at,
    }))
}

fn to_db_version(version: u64) -> BoardRepositoryResult<i64> {
    i64::try_from(version).map_err(BoardRepositoryError::persistence)
}

fn version_overflow(version: u64) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(format!(
        "board version {version} cannot be incremented"
    )))
}
