//! `PostgreSQL` adapters for user persistence.

mod models;
mod repository;

pub use repository::PostgresUserRepository;
pub(crate) use repository::{append_board_id, remove_board_id};
