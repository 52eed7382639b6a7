//! Domain model for boards, columns, and tasks.
//!
//! The board is the single consistency boundary: columns and tasks only exist
//! nested inside it, and every mutation is a method on [`Board`].

mod board;
mod column;
mod error;
mod ids;
mod task;

pub use board::{Board, MAX_BOARD_TITLE_LENGTH, PersistedBoardData, TaskLocation};
pub use column::Column;
pub use error::BoardDomainError;
pub use ids::{BoardId, ColumnId, TaskId};
pub use task::{Subtask, Task, TaskDraft, TaskPatch};
