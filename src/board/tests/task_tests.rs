//! Tests for task insertion, update, and deletion.

use super::fixtures::{assert_statuses_match_columns, clock, seeded_board, task_id, titles};
use crate::board::domain::{Board, BoardDomainError, Subtask, TaskDraft, TaskId, TaskPatch};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn insert_task_appends_to_matching_column(mut seeded_board: Board, clock: DefaultClock) {
    let draft = TaskDraft::new("E", "Todo")
        .with_description("write release notes")
        .with_subtasks([Subtask::new("draft", true), Subtask::new("review", false)]);

    let id = seeded_board.insert_task(draft, &clock).expect("task inserts");

    assert_eq!(titles(&seeded_board, "Todo"), ["A", "B", "C", "E"]);
    let task = seeded_board.task(id).expect("task is stored");
    assert_eq!(task.description(), "write release notes");
    assert_eq!(task.subtasks().len(), 2);
    assert!(task.subtasks().first().is_some_and(Subtask::completed));
    assert_eq!(task.status(), "Todo");
}

#[rstest]
fn insert_task_defaults_optional_fields(mut seeded_board: Board, clock: DefaultClock) {
    let id = seeded_board
        .insert_task(TaskDraft::new("E", "Done"), &clock)
        .expect("task inserts");

    let task = seeded_board.task(id).expect("task is stored");
    assert_eq!(task.description(), "");
    assert!(task.subtasks().is_empty());
}

#[rstest]
fn insert_task_rejects_unknown_status(mut seeded_board: Board, clock: DefaultClock) {
    let before = seeded_board.clone();

    let result = seeded_board.insert_task(TaskDraft::new("E", "todo"), &clock);

    assert_eq!(
        result,
        Err(BoardDomainError::InvalidStatus("todo".to_owned()))
    );
    assert_eq!(seeded_board, before);
}

#[rstest]
#[case::blank_title(TaskDraft::new("  ", "Todo"), BoardDomainError::EmptyTaskTitle)]
#[case::blank_subtask(
    TaskDraft::new("E", "Todo").with_subtasks([Subtask::new("", false)]),
    BoardDomainError::EmptySubtaskTitle
)]
fn insert_task_validates_draft(
    mut seeded_board: Board,
    clock: DefaultClock,
    #[case] draft: TaskDraft,
    #[case] expected: BoardDomainError,
) {
    let result = seeded_board.insert_task(draft, &clock);

    assert_eq!(result, Err(expected));
}

#[rstest]
fn task_ids_are_unique_within_board(mut seeded_board: Board, clock: DefaultClock) {
    let first = seeded_board
        .insert_task(TaskDraft::new("Same", "Todo"), &clock)
        .expect("task inserts");
    let second = seeded_board
        .insert_task(TaskDraft::new("Same", "Todo"), &clock)
        .expect("task inserts");

    assert_ne!(first, second);
}

#[rstest]
fn update_task_applies_only_supplied_fields(mut seeded_board: Board, clock: DefaultClock) {
    let id = seeded_board
        .insert_task(
            TaskDraft::new("E", "Todo").with_description("original"),
            &clock,
        )
        .expect("task inserts");

    seeded_board
        .update_task(id, TaskPatch::new().with_title("E2"), &clock)
        .expect("update succeeds");

    let task = seeded_board.task(id).expect("task is stored");
    assert_eq!(task.title(), "E2");
    assert_eq!(task.description(), "original");
    assert_eq!(titles(&seeded_board, "Todo"), ["A", "B", "C", "E2"]);
}

#[rstest]
fn update_task_with_new_status_appends_to_destination(
    mut seeded_board: Board,
    clock: DefaultClock,
) {
    let id = task_id(&seeded_board, "A");

    seeded_board
        .update_task(
            id,
            TaskPatch::new().with_status("Doing").with_title("A2"),
            &clock,
        )
        .expect("update succeeds");

    assert_eq!(titles(&seeded_board, "Todo"), ["B", "C"]);
    assert_eq!(titles(&seeded_board, "Doing"), ["D", "A2"]);
    assert_statuses_match_columns(&seeded_board);
}

#[rstest]
fn update_task_with_new_status_can_target_empty_column(
    mut seeded_board: Board,
    clock: DefaultClock,
) {
    let id = task_id(&seeded_board, "B");

    seeded_board
        .update_task(id, TaskPatch::new().with_status("Done"), &clock)
        .expect("update succeeds");

    assert_eq!(titles(&seeded_board, "Done"), ["B"]);
    assert_eq!(
        seeded_board.task(id).map(|task| task.status().to_owned()),
        Some("Done".to_owned())
    );
}

#[rstest]
fn update_task_with_unchanged_status_keeps_position(
    mut seeded_board: Board,
    clock: DefaultClock,
) {
    let id = task_id(&seeded_board, "A");

    seeded_board
        .update_task(
            id,
            TaskPatch::new().with_status("Todo").with_description("first"),
            &clock,
        )
        .expect("update succeeds");

    assert_eq!(titles(&seeded_board, "Todo"), ["A", "B", "C"]);
}

#[rstest]
fn update_task_rejects_unknown_status(mut seeded_board: Board, clock: DefaultClock) {
    let id = task_id(&seeded_board, "A");
    let before = seeded_board.clone();

    let result = seeded_board.update_task(
        id,
        TaskPatch::new().with_status("Archived").with_title("A2"),
        &clock,
    );

    assert_eq!(
        result,
        Err(BoardDomainError::InvalidStatus("Archived".to_owned()))
    );
    assert_eq!(seeded_board, before);
}

#[rstest]
fn update_task_rejects_blank_title(mut seeded_board: Board, clock: DefaultClock) {
    let id = task_id(&seeded_board, "A");

    let result = seeded_board.update_task(id, TaskPatch::new().with_title(" "), &clock);

    assert_eq!(result, Err(BoardDomainError::EmptyTaskTitle));
}

#[rstest]
fn update_task_replaces_subtasks(mut seeded_board: Board, clock: DefaultClock) {
    let id = task_id(&seeded_board, "D");

    seeded_board
        .update_task(
            id,
            TaskPatch::new().with_subtasks([Subtask::new("only", false)]),
            &clock,
        )
        .expect("update succeeds");

    let task = seeded_board.task(id).expect("task is stored");
    let subtask_titles: Vec<&str> = task.subtasks().iter().map(Subtask::title).collect();
    assert_eq!(subtask_titles, ["only"]);
}

#[rstest]
fn task_patch_deserializes_partial_json() {
    let patch: TaskPatch =
        serde_json::from_str(r#"{"title":"New","status":"Done"}"#).expect("patch parses");

    assert_eq!(patch, TaskPatch::new().with_title("New").with_status("Done"));
}

#[rstest]
fn delete_task_removes_it(mut seeded_board: Board, clock: DefaultClock) {
    let id = task_id(&seeded_board, "B");

    let removed = seeded_board.delete_task(id, &clock).expect("task deletes");

    assert_eq!(removed.title(), "B");
    assert_eq!(titles(&seeded_board, "Todo"), ["A", "C"]);
    assert_eq!(
        seeded_board.delete_task(id, &clock),
        Err(BoardDomainError::TaskNotFound(id))
    );
}

#[rstest]
fn delete_task_reports_unknown_task(mut seeded_board: Board, clock: DefaultClock) {
    let missing = TaskId::new();

    let result = seeded_board.delete_task(missing, &clock);

    assert_eq!(result, Err(BoardDomainError::TaskNotFound(missing)));
}

#[rstest]
fn task_placement_follows_columns_after_an_earlier_column_is_deleted(
    mut seeded_board: Board,
    clock: DefaultClock,
) {
    let todo = seeded_board.column_titled("Todo").expect("column").id();
    seeded_board
        .delete_column(todo, &clock)
        .expect("column deletes");

    let inserted = seeded_board
        .insert_task(TaskDraft::new("E", "Done"), &clock)
        .expect("task inserts");
    let d = task_id(&seeded_board, "D");
    seeded_board
        .update_task(d, TaskPatch::new().with_status("Done"), &clock)
        .expect("status change moves the task");
    seeded_board
        .move_task(inserted, None, 0, &clock)
        .expect("reorder within Done");

    assert_eq!(titles(&seeded_board, "Done"), ["E", "D"]);
    assert_eq!(titles(&seeded_board, "Doing"), Vec::<&str>::new());
    assert_statuses_match_columns(&seeded_board);
}
