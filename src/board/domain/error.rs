//! Error types for board aggregate validation and mutation.

use super::{ColumnId, TaskId};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating a board aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board title is empty after trimming.
    #[error("board title must not be empty")]
    EmptyBoardTitle,

    /// The board title exceeds the stored column width.
    #[error("board title exceeds {max} characters: {len}")]
    BoardTitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        len: usize,
    },

    /// A column title is empty after trimming.
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    /// A task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// A subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// Another column in the board already carries this title.
    #[error("column already exists: {0}")]
    DuplicateColumn(String),

    /// No column in the board has the identifier.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// No column in the board holds a task with the identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The status does not name any column of the board.
    #[error("invalid status '{0}': no column has this title")]
    InvalidStatus(String),

    /// The move position falls outside the destination column.
    #[error("invalid position {position}: destination column holds {len} tasks")]
    InvalidPosition {
        /// Requested insertion index.
        position: i64,
        /// Destination task count measured before the task is removed.
        len: usize,
    },

    /// The value is not a well-formed board identifier.
    #[error("invalid board ID: {0}")]
    InvalidBoardId(String),

    /// The value is not a well-formed column identifier.
    #[error("invalid column ID: {0}")]
    InvalidColumnId(String),

    /// The value is not a well-formed task identifier.
    #[error("invalid task ID: {0}")]
    InvalidTaskId(String),
}

impl BoardDomainError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ColumnNotFound(_) | Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateColumn(_) => ErrorKind::InvalidState,
            Self::EmptyBoardTitle
            | Self::BoardTitleTooLong { .. }
            | Self::EmptyColumnTitle
            | Self::EmptyTaskTitle
            | Self::EmptySubtaskTitle
            | Self::InvalidStatus(_)
            | Self::InvalidPosition { .. }
            | Self::InvalidBoardId(_)
            | Self::InvalidColumnId(_)
            | Self::InvalidTaskId(_) => ErrorKind::InvalidRequest,
        }
    }
}
