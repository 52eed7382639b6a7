//! `PostgreSQL` repository implementation for user storage.

use super::models::{NewUserRow, UserRow};
use crate::board::domain::BoardId;
use crate::db::{KanbanPgPool, schema::users};
use crate::user::{
    domain::{Email, ExternalId, PersistedUserData, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeSet;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: KanbanPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: KanbanPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id().clone();
        let external_id = user.external_id().cloned();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match (err, external_id) {
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info),
                        Some(external),
                    ) if is_external_id_unique_violation(info.as_ref()) => {
                        UserRepositoryError::DuplicateExternalId(external)
                    }
                    (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    (other, _) => UserRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        let lookup = id.clone();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(lookup.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> UserRepositoryResult<Option<User>> {
        let lookup = external_id.clone();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::google_id.eq(lookup.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn boards_of(&self, id: &UserId) -> UserRepositoryResult<BTreeSet<BoardId>> {
        let lookup = id.clone();
        self.run_blocking(move |connection| {
            let board_ids = users::table
                .filter(users::id.eq(lookup.as_str()))
                .select(users::board_ids)
                .first::<Vec<uuid::Uuid>>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?
                .ok_or_else(|| UserRepositoryError::NotFound(lookup.clone()))?;
            Ok(board_ids.into_iter().map(BoardId::from_uuid).collect())
        })
        .await
    }

    async fn add_board(&self, id: &UserId, board_id: BoardId) -> UserRepositoryResult<()> {
        let user_id = id.clone();
        self.run_blocking(move |connection| append_board_id(connection, &user_id, board_id))
            .await
    }

    async fn remove_board(&self, id: &UserId, board_id: BoardId) -> UserRepositoryResult<()> {
        let user_id = id.clone();
        self.run_blocking(move |connection| remove_board_id(connection, &user_id, board_id))
            .await
    }
}

/// Appends a board to the user's set on an open connection.
pub(crate) fn append_board_id(
    connection: &mut PgConnection,
    user_id: &UserId,
    board_id: BoardId,
) -> UserRepositoryResult<()> {
    let query = diesel::sql_query(concat!(
        "UPDATE users SET board_ids = array_append(board_ids, $1) ",
        "WHERE id = $2 AND NOT ($1 = ANY(board_ids))",
    ));
    run_board_set_update(connection, query, user_id, board_id)
}

/// Removes a board from the user's set on an open connection.
pub(crate) fn remove_board_id(
    connection: &mut PgConnection,
    user_id: &UserId,
    board_id: BoardId,
) -> UserRepositoryResult<()> {
    let query = diesel::sql_query(concat!(
        "UPDATE users SET board_ids = array_remove(board_ids, $1) ",
        "WHERE id = $2 AND $1 = ANY(board_ids)",
    ));
    run_board_set_update(connection, query, user_id, board_id)
}

/// Runs a set-semantic board update; zero affected rows is fine as long as
/// the user exists.
fn run_board_set_update(
    connection: &mut PgConnection,
    query: diesel::query_builder::SqlQuery,
    user_id: &UserId,
    board_id: BoardId,
) -> UserRepositoryResult<()> {
    let affected = query
        .bind::<diesel::sql_types::Uuid, _>(board_id.into_inner())
        .bind::<diesel::sql_types::Text, _>(user_id.as_str())
        .execute(connection)
        .map_err(UserRepositoryError::persistence)?;
    if affected > 0 {
        return Ok(());
    }

    let exists = diesel::select(diesel::dsl::exists(
        users::table.filter(users::id.eq(user_id.as_str())),
    ))
    .get_result::<bool>(connection)
    .map_err(UserRepositoryError::persistence)?;
    if exists {
        Ok(())
    } else {
        Err(UserRepositoryError::NotFound(user_id.clone()))
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        google_id: user.external_id().map(|id| id.as_str().to_owned()),
        board_ids: user.board_ids().iter().map(|id| id.into_inner()).collect(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        email,
        google_id,
        board_ids,
        created_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::new(id).map_err(UserRepositoryError::persistence)?,
        email: Email::new(email).map_err(UserRepositoryError::persistence)?,
        external_id: google_id
            .map(ExternalId::new)
            .transpose()
            .map_err(UserRepositoryError::persistence)?,
        board_ids: board_ids.into_iter().map(BoardId::from_uuid).collect(),
        created_at,
    };
    Ok(User::from_persisted(data))
}

fn is_external_id_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_google_id_unique")
}
