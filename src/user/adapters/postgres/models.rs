//! Diesel row models for user persistence.

use crate::db::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// External identity subject.
    pub google_id: Option<String>,
    /// Accessible board identifiers.
    pub board_ids: Vec<uuid::Uuid>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// External identity subject.
    pub google_id: Option<String>,
    /// Accessible board identifiers.
    pub board_ids: Vec<uuid::Uuid>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
