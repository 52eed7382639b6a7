//! `PostgreSQL` adapters for board persistence.

mod models;
mod repository;

pub use repository::PostgresBoardRepository;
pub(crate) use repository::{delete_board, insert_board, to_new_row};
