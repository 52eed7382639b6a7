//! Board creation and deletion against users' board sets.

use crate::in_memory::helpers::{app, identity_of, runtime, sign_in};
use kanban::app::InMemoryKanbanApp;
use kanban::error::ErrorKind;
use kanban::provisioning::services::CreateBoardRequest;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn created_boards_are_listed_for_their_owner_only(
    runtime: io::Result<Runtime>,
    app: InMemoryKanbanApp,
) -> eyre::Result<()> {
    let rt = runtime?;
    rt.block_on(async {
        let ada = sign_in(&app, "ada").await?;
        let grace = sign_in(&app, "grace").await?;
        for title in ["Alpha", "Beta"] {
            app.provisioning()
                .create_board(&identity_of(&app, &ada).await?, CreateBoardRequest::new(title))
                .await?;
        }

        let mut ada_titles: Vec<String> = app
            .boards()
            .list_boards(&identity_of(&app, &ada).await?)
            .await?
            .iter()
            .map(|board| board.title().to_owned())
            .collect();
        ada_titles.sort();
        let grace_boards = app
            .boards()
            .list_boards(&identity_of(&app, &grace).await?)
            .await?;

        assert_eq!(ada_titles, ["Alpha", "Beta"]);
        assert!(grace_boards.is_empty());
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn deleted_board_disappears_from_store_and_index(
    runtime: io::Result<Runtime>,
    app: InMemoryKanbanApp,
) -> eyre::Result<()> {
    let rt = runtime?;
    rt.block_on(async {
        let user = sign_in(&app, "ada").await?;
        let board = app
            .provisioning()
            .create_board(
                &identity_of(&app, &user).await?,
                CreateBoardRequest::new("Temp").with_columns(["Todo"]),
            )
            .await?;
        let stale_identity = identity_of(&app, &user).await?;

        app.provisioning()
            .delete_board(&stale_identity, board.id())
            .await?;

        let fresh_identity = identity_of(&app, &user).await?;
        assert!(fresh_identity.board_ids().is_empty());
        let lookup = app
            .boards()
            .get_board(&stale_identity, board.id())
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("deleted board must not load"))?;
        assert_eq!(lookup.kind(), ErrorKind::NotFound);
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn invalid_board_is_never_linked(
    runtime: io::Result<Runtime>,
    app: InMemoryKanbanApp,
) -> eyre::Result<()> {
    let rt = runtime?;
    rt.block_on(async {
        let user = sign_in(&app, "ada").await?;

        let result = app
            .provisioning()
            .create_board(
                &identity_of(&app, &user).await?,
                CreateBoardRequest::new("Dupes").with_columns(["Todo", "Todo"]),
            )
            .await;

        assert!(result.is_err());
        assert!(identity_of(&app, &user).await?.board_ids().is_empty());
        Ok::<(), eyre::Report>(())
    })
}
