//! Diesel row models for board persistence.

use crate::db::schema::boards;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Columns JSON payload.
    #[diesel(column_name = columns_json)]
    pub columns: Value,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for board records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Columns JSON payload.
    #[diesel(column_name = columns_json)]
    pub columns: Value,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
