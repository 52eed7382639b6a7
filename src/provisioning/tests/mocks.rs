//! Repository mocks for injecting store failures.

use crate::board::domain::{Board, BoardId};
use crate::board::ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
use crate::user::domain::User;
use crate::user::ports::UserRepositoryError;
use async_trait::async_trait;
use mockall::mock;

pub(super) use crate::user::tests::mocks::MockUsers;

mock! {
    pub Boards {}

    #[async_trait]
    impl BoardRepository for Boards {
        async fn store(&self, board: &Board) -> BoardRepositoryResult<()>;
        async fn update(&self, board: &Board) -> BoardRepositoryResult<()>;
        async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;
        async fn find_many(&self, ids: &[BoardId]) -> BoardRepositoryResult<Vec<Board>>;
        async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()>;
    }
}

pub(super) fn board_store_down() -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other("board store unavailable"))
}

pub(super) fn user_store_down() -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other("user store unavailable"))
}

/// User mock that knows `owner` and fails every board-set write.
pub(super) fn users_failing_index_writes(owner: &User) -> MockUsers {
    let mut users = MockUsers::new();
    let known = owner.clone();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(known.clone())));
    users
        .expect_add_board()
        .returning(|_, _| Err(user_store_down()));
    users
}
