//! Error taxonomy shared by every bounded context.
//!
//! Each layer keeps its own typed error enum; all of them classify into an
//! [`ErrorKind`] so the transport boundary can pick a status code and decide
//! how much detail to reveal.

use serde::Serialize;
use std::fmt;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The aggregate or sub-entity is absent, or the caller may not see it.
    NotFound,
    /// The change would violate an aggregate invariant.
    InvalidState,
    /// The input is malformed or out of range.
    InvalidRequest,
    /// The aggregate changed since it was loaded.
    Conflict,
    /// No caller identity accompanied the request.
    Unauthenticated,
    /// A multi-aggregate write could not complete.
    TransactionFailed,
    /// The backing store failed at the I/O level.
    StoreUnavailable,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidState | Self::InvalidRequest => 400,
            Self::Conflict => 409,
            Self::Unauthenticated => 401,
            Self::TransactionFailed | Self::StoreUnavailable => 500,
        }
    }

    /// Returns whether the error message may be shown to the caller verbatim.
    #[must_use]
    pub const fn is_client_facing(self) -> bool {
        !matches!(self, Self::TransactionFailed | Self::StoreUnavailable)
    }

    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidState => "invalid_state",
            Self::InvalidRequest => "invalid_request",
            Self::Conflict => "conflict",
            Self::Unauthenticated => "unauthenticated",
            Self::TransactionFailed => "transaction_failed",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code.
    pub status: u16,
    /// Error classification.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// Builds a response from a classified error.
    ///
    /// Store and transaction failures are logged in full and reported with a
    /// generic message.
    #[must_use]
    pub fn new(kind: ErrorKind, error: &(dyn std::error::Error + 'static)) -> Self {
        let message = if kind.is_client_facing() {
            error.to_string()
        } else {
            tracing::error!(kind = %kind, error = %error, "request failed");
            format!("internal error ({kind})")
        };
        Self {
            status: kind.http_status(),
            kind,
            message,
        }
    }
}
