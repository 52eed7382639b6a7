//! Diesel schema for board and user persistence.

diesel::table! {
    /// Board aggregates with columns and tasks embedded as JSON.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board title.
        #[max_length = 255]
        title -> Varchar,
        /// Ordered columns, each with ordered tasks.
        #[sql_name = "columns"]
        columns_json -> Jsonb,
        /// Optimistic concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Users and the set of boards they may access.
    users (id) {
        /// Opaque user identifier.
        #[max_length = 64]
        id -> Varchar,
        /// Email address.
        #[max_length = 320]
        email -> Varchar,
        /// External (OAuth subject) identifier.
        #[max_length = 255]
        google_id -> Nullable<Varchar>,
        /// Accessible board identifiers.
        board_ids -> Array<Uuid>,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(boards, users);
