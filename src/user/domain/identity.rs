//! Authenticated caller identity as handed over by the auth collaborator.

use super::{AccessError, User, UserId};
use crate::board::domain::BoardId;
use std::collections::BTreeSet;

/// Resolved caller: the user and the boards they may touch, captured when the
/// request was authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    board_ids: BTreeSet<BoardId>,
}

impl Identity {
    /// Creates an identity from its parts.
    #[must_use]
    pub fn new(user_id: UserId, board_ids: impl IntoIterator<Item = BoardId>) -> Self {
        Self {
            user_id,
            board_ids: board_ids.into_iter().collect(),
        }
    }

    /// Captures the identity of a stored user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id().clone(),
            board_ids: user.board_ids().clone(),
        }
    }

    /// Turns the auth collaborator's output into an identity.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Unauthenticated`] when no identity was resolved.
    pub fn require(identity: Option<Self>) -> Result<Self, AccessError> {
        identity.ok_or(AccessError::Unauthenticated)
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the boards the caller may access.
    #[must_use]
    pub const fn board_ids(&self) -> &BTreeSet<BoardId> {
        &self.board_ids
    }

    /// Checks that the caller may access the board.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::BoardNotFound`] when the board is not in the
    /// caller's set.
    pub fn authorize(&self, board_id: BoardId) -> Result<(), AccessError> {
        if self.board_ids.contains(&board_id) {
            Ok(())
        } else {
            Err(AccessError::BoardNotFound(board_id))
        }
    }
}
