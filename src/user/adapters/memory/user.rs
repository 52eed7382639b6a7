//! In-memory user repository.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::board::domain::BoardId;
use crate::user::{
    domain::{ExternalId, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    external_index: HashMap<ExternalId, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryUserState {
    fn user_mut(&mut self, id: &UserId) -> UserRepositoryResult<&mut User> {
        self.users
            .get_mut(id)
            .ok_or_else(|| UserRepositoryError::NotFound(id.clone()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.users.contains_key(user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id().clone()));
        }
        if let Some(external_id) = user.external_id() {
            if state.external_index.contains_key(external_id) {
                return Err(UserRepositoryError::DuplicateExternalId(
                    external_id.clone(),
                ));
            }
            state
                .external_index
                .insert(external_id.clone(), user.id().clone());
        }
        state.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .external_index
            .get(external_id)
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(user)
    }

    async fn boards_of(&self, id: &UserId) -> UserRepositoryResult<BTreeSet<BoardId>> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .users
            .get(id)
            .map(|user| user.board_ids().clone())
            .ok_or_else(|| UserRepositoryError::NotFound(id.clone()))
    }

    async fn add_board(&self, id: &UserId, board_id: BoardId) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.user_mut(id)?.add_board(board_id);
        Ok(())
    }

    async fn remove_board(&self, id: &UserId, board_id: BoardId) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.user_mut(id)?.remove_board(board_id);
        Ok(())
    }
}
