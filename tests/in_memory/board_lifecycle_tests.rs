//! End-to-end board editing through the public services.

use crate::in_memory::helpers::{app, identity_of, layout, runtime, sign_in, task_titled};
use kanban::app::InMemoryKanbanApp;
use kanban::board::domain::{Subtask, TaskDraft, TaskPatch};
use kanban::board::services::MoveTaskRequest;
use kanban::error::{ErrorKind, ErrorResponse};
use kanban::provisioning::services::CreateBoardRequest;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn owned(column: &str, tasks: &[&str]) -> (String, Vec<String>) {
    (
        column.to_owned(),
        tasks.iter().map(|task| (*task).to_owned()).collect(),
    )
}

#[rstest]
fn full_board_workflow(runtime: io::Result<Runtime>, app: InMemoryKanbanApp) -> eyre::Result<()> {
    let rt = runtime?;
    rt.block_on(async {
        let user = sign_in(&app, "ada").await?;
        let board = app
            .provisioning()
            .create_board(
                &identity_of(&app, &user).await?,
                CreateBoardRequest::new("Release").with_columns(["Todo", "Doing"]),
            )
            .await?;
        let identity = identity_of(&app, &user).await?;
        let boards = app.boards();

        boards
            .insert_column(&identity, board.id(), "Done")
            .await?;
        for title in ["Design", "Build", "Ship"] {
            boards
                .insert_task(
                    &identity,
                    board.id(),
                    TaskDraft::new(title, "Todo")
                        .with_subtasks([Subtask::new(format!("{title} checklist"), false)]),
                )
                .await?;
        }

        let snapshot = boards.get_board(&identity, board.id()).await?;
        let design = task_titled(&snapshot, "Design")?;
        let ship = task_titled(&snapshot, "Ship")?;
        boards
            .move_task(&identity, board.id(), MoveTaskRequest::new(ship, 0))
            .await?;
        boards
            .update_task(
                &identity,
                board.id(),
                design,
                TaskPatch::new().with_status("Done").with_description("approved"),
            )
            .await?;

        let done_column = boards
            .get_board(&identity, board.id())
            .await?
            .column_titled("Done")
            .map(kanban::board::domain::Column::id)
            .ok_or_else(|| eyre::eyre!("Done column exists"))?;
        boards
            .rename_column(&identity, board.id(), done_column, "Shipped")
            .await?;

        let final_board = boards.get_board(&identity, board.id()).await?;
        assert_eq!(
            layout(&final_board),
            vec![
                owned("Todo", &["Ship", "Build"]),
                owned("Doing", &[]),
                owned("Shipped", &["Design"]),
            ]
        );
        let design_task = final_board
            .task(design)
            .ok_or_else(|| eyre::eyre!("Design task exists"))?;
        assert_eq!(design_task.status(), "Shipped");
        assert_eq!(design_task.description(), "approved");
        assert_eq!(final_board.version(), 7);
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn failed_mutations_map_to_transport_errors(
    runtime: io::Result<Runtime>,
    app: InMemoryKanbanApp,
) -> eyre::Result<()> {
    let rt = runtime?;
    rt.block_on(async {
        let user = sign_in(&app, "grace").await?;
        let board = app
            .provisioning()
            .create_board(
                &identity_of(&app, &user).await?,
                CreateBoardRequest::new("Ops").with_columns(["Todo"]),
            )
            .await?;
        let identity = identity_of(&app, &user).await?;

        let duplicate = app
            .boards()
            .insert_column(&identity, board.id(), "Todo")
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("duplicate column must fail"))?;
        let response = ErrorResponse::new(duplicate.kind(), &duplicate);
        assert_eq!(response.status, 400);
        assert!(response.message.contains("Todo"));

        let bad_status = app
            .boards()
            .insert_task(&identity, board.id(), TaskDraft::new("Fix", "Later"))
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("unknown status must fail"))?;
        assert_eq!(bad_status.kind(), ErrorKind::InvalidRequest);

        let outsider = sign_in(&app, "mallory").await?;
        let hidden = app
            .boards()
            .get_board(&identity_of(&app, &outsider).await?, board.id())
            .await
            .err()
            .ok_or_else(|| eyre::eyre!("foreign board must be hidden"))?;
        assert_eq!(ErrorResponse::new(hidden.kind(), &hidden).status, 404);
        Ok::<(), eyre::Report>(())
    })
}
