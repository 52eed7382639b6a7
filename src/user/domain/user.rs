//! User record and its board-identifier set.

use super::{Email, ExternalId, UserId};
use crate::board::domain::BoardId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    external_id: Option<ExternalId>,
    board_ids: BTreeSet<BoardId>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted email address.
    pub email: Email,
    /// Persisted external identity subject, if any.
    pub external_id: Option<ExternalId>,
    /// Persisted accessible boards.
    pub board_ids: BTreeSet<BoardId>,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user with an empty board set.
    #[must_use]
    pub fn register(
        id: UserId,
        email: Email,
        external_id: Option<ExternalId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            email,
            external_id,
            board_ids: BTreeSet::new(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            external_id: data.external_id,
            board_ids: data.board_ids,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the external identity subject, if any.
    #[must_use]
    pub const fn external_id(&self) -> Option<&ExternalId> {
        self.external_id.as_ref()
    }

    /// Returns the boards this user may access.
    #[must_use]
    pub const fn board_ids(&self) -> &BTreeSet<BoardId> {
        &self.board_ids
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Adds a board to the set. Returns `false` when it was already present.
    pub fn add_board(&mut self, board_id: BoardId) -> bool {
        self.board_ids.insert(board_id)
    }

    /// Removes a board from the set. Returns `false` when it was absent.
    pub fn remove_board(&mut self, board_id: BoardId) -> bool {
        self.board_ids.remove(&board_id)
    }
}
