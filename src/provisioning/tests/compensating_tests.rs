//! Atomicity tests for the compensating provisioner.

use std::sync::Arc;

use super::mocks::{MockBoards, board_store_down, users_failing_index_writes};
use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::Board,
    ports::{BoardRepository, BoardRepositoryError},
};
use crate::error::ErrorKind;
use crate::provisioning::{
    adapters::CompensatingBoardProvisioner,
    ports::{BoardProvisioner, ProvisioningError},
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Email, User, UserId},
    ports::UserRepository,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn owner() -> User {
    User::register(
        UserId::new("owner-1").expect("valid user id"),
        Email::new("owner@example.com").expect("valid email"),
        None,
        &DefaultClock,
    )
}

#[fixture]
fn board() -> Board {
    Board::new("Roadmap", ["Todo", "Done"], &DefaultClock).expect("valid board")
}

async fn users_with(owner: &User) -> Arc<InMemoryUserRepository> {
    let users = Arc::new(InMemoryUserRepository::new());
    users.store(owner).await.expect("owner stores");
    users
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_links_board_and_owner(owner: User, board: Board) {
    let boards = Arc::new(InMemoryBoardRepository::new());
    let users = users_with(&owner).await;
    let provisioner = CompensatingBoardProvisioner::new(Arc::clone(&boards), Arc::clone(&users));

    provisioner
        .create_for_owner(owner.id(), &board)
        .await
        .expect("provisioning succeeds");

    assert_eq!(
        boards.find_by_id(board.id()).await.expect("lookup succeeds"),
        Some(board.clone())
    );
    assert!(
        users
            .boards_of(owner.id())
            .await
            .expect("lookup succeeds")
            .contains(&board.id())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_for_unknown_owner_writes_nothing(owner: User, board: Board) {
    let boards = Arc::new(InMemoryBoardRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let provisioner = CompensatingBoardProvisioner::new(Arc::clone(&boards), users);

    let result = provisioner.create_for_owner(owner.id(), &board).await;

    assert!(matches!(result, Err(ProvisioningError::OwnerNotFound(_))));
    assert_eq!(
        boards.find_by_id(board.id()).await.expect("lookup succeeds"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_removes_board_when_index_update_fails(owner: User, board: Board) {
    let boards = Arc::new(InMemoryBoardRepository::new());
    let users = Arc::new(users_failing_index_writes(&owner));
    let provisioner = CompensatingBoardProvisioner::new(Arc::clone(&boards), users);

    let result = provisioner.create_for_owner(owner.id(), &board).await;

    let Err(err) = result else {
        panic!("index failure must fail provisioning");
    };
    assert!(matches!(err, ProvisioningError::RolledBack { board_id, .. } if board_id == board.id()));
    assert_eq!(err.kind(), ErrorKind::TransactionFailed);
    assert_eq!(
        boards.find_by_id(board.id()).await.expect("lookup succeeds"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_reports_incomplete_rollback(owner: User, board: Board) {
    let mut boards = MockBoards::new();
    boards.expect_store().times(1).returning(|_| Ok(()));
    boards
        .expect_delete()
        .times(1)
        .returning(|_| Err(board_store_down()));
    let users = Arc::new(users_failing_index_writes(&owner));
    let provisioner = CompensatingBoardProvisioner::new(Arc::new(boards), users);

    let result = provisioner.create_for_owner(owner.id(), &board).await;

    let Err(err) = result else {
        panic!("index failure must fail provisioning");
    };
    assert!(matches!(err, ProvisioningError::RollbackIncomplete { .. }));
    assert_eq!(err.kind(), ErrorKind::TransactionFailed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_of_duplicate_board_leaves_index_untouched(owner: User, board: Board) {
    let boards = Arc::new(InMemoryBoardRepository::new());
    boards.store(&board).await.expect("board stores");
    let users = users_with(&owner).await;
    let provisioner = CompensatingBoardProvisioner::new(boards, Arc::clone(&users));

    let result = provisioner.create_for_owner(owner.id(), &board).await;

    assert!(matches!(
        result,
        Err(ProvisioningError::Board(BoardRepositoryError::DuplicateBoard(_)))
    ));
    assert!(
        users
            .boards_of(owner.id())
            .await
            .expect("lookup succeeds")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_board_and_index_entry(owner: User, board: Board) {
    let boards = Arc::new(InMemoryBoardRepository::new());
    let users = users_with(&owner).await;
    let provisioner = CompensatingBoardProvisioner::new(Arc::clone(&boards), Arc::clone(&users));
    provisioner
        .create_for_owner(owner.id(), &board)
        .await
        .expect("provisioning succeeds");

    provisioner
        .delete_for_owner(owner.id(), board.id())
        .await
        .expect("deletion succeeds");

    assert_eq!(
        boards.find_by_id(board.id()).await.expect("lookup succeeds"),
        None
    );
    assert!(
        users
            .boards_of(owner.id())
            .await
            .expect("lookup succeeds")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_restores_index_entry_when_board_delete_fails(owner: User, board: Board) {
    let mut boards = MockBoards::new();
    boards
        .expect_delete()
        .times(1)
        .returning(|_| Err(board_store_down()));
    let users = users_with(&owner).await;
    users
        .add_board(owner.id(), board.id())
        .await
        .expect("index entry adds");
    let provisioner = CompensatingBoardProvisioner::new(Arc::new(boards), Arc::clone(&users));

    let result = provisioner.delete_for_owner(owner.id(), board.id()).await;

    assert!(matches!(result, Err(ProvisioningError::RolledBack { .. })));
    assert!(
        users
            .boards_of(owner.id())
            .await
            .expect("lookup succeeds")
            .contains(&board.id())
    );
}
