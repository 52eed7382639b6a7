//! `PostgreSQL` connection pooling and schema bootstrap.
//!
//! The pool is built once at process start and handed to every adapter that
//! needs it; no adapter opens connections on its own.

pub(crate) mod schema;

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool shared by the board, user, and provisioning
/// adapters.
pub type KanbanPgPool = Pool<ConnectionManager<PgConnection>>;

/// DDL creating the tables, idempotently.
pub const SCHEMA_SQL: &str = include_str!("../../migrations/0001_boards_and_users/up.sql");

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<KanbanPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Creates the board and user tables when they do not exist yet.
///
/// # Errors
///
/// Returns the diesel error reported by the server.
pub fn apply_schema(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(SCHEMA_SQL)
}
