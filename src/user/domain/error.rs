//! Error types for user validation and board access.

use crate::board::domain::BoardId;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is empty after trimming.
    #[error("user ID must not be empty")]
    EmptyUserId,

    /// The external identity subject is empty after trimming.
    #[error("external identity must not be empty")]
    EmptyExternalId,

    /// The external identity subject exceeds the stored column width.
    #[error("external identity exceeds {max} characters: {len}")]
    ExternalIdTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        len: usize,
    },

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email address exceeds the stored column width.
    #[error("email address exceeds {max} characters: {len}")]
    EmailTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected address in characters.
        len: usize,
    },
}

impl UserDomainError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidRequest
    }
}

/// Authorization failures for board access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// No identity accompanied the request.
    #[error("authentication required")]
    Unauthenticated,

    /// The board is absent from the caller's board set. Reported as not found
    /// so callers cannot discover other users' boards.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
}

impl AccessError {
    /// Classifies the error for the transport boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::BoardNotFound(_) => ErrorKind::NotFound,
        }
    }
}
