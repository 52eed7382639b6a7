//! Shared test helpers for in-memory integration tests.

use eyre::{WrapErr, eyre};
use kanban::app::InMemoryKanbanApp;
use kanban::board::domain::{Board, TaskId};
use kanban::user::domain::{Identity, User};
use kanban::user::services::ExternalSignIn;
use rstest::fixture;
use std::io;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh application over empty stores.
#[fixture]
pub fn app() -> InMemoryKanbanApp {
    InMemoryKanbanApp::in_memory()
}

/// Signs a user in through an external identity.
///
/// # Errors
///
/// Returns an error if sign-in fails.
pub async fn sign_in(app: &InMemoryKanbanApp, subject: &str) -> eyre::Result<User> {
    app.accounts()
        .sign_in(ExternalSignIn::new(subject, format!("{subject}@example.com")))
        .await
        .wrap_err_with(|| format!("sign in as {subject}"))
}

/// Resolves the current identity of `user`.
///
/// # Errors
///
/// Returns an error if the lookup fails or the user is gone.
pub async fn identity_of(app: &InMemoryKanbanApp, user: &User) -> eyre::Result<Identity> {
    app.accounts()
        .identity_for(user.id())
        .await
        .wrap_err("identity lookup")?
        .ok_or_else(|| eyre!("user {} no longer exists", user.id()))
}

/// Returns the identifier of the first task titled `title`.
///
/// # Errors
///
/// Returns an error if no task carries the title.
pub fn task_titled(board: &Board, title: &str) -> eyre::Result<TaskId> {
    board
        .columns()
        .iter()
        .flat_map(|column| column.tasks())
        .find(|task| task.title() == title)
        .map(kanban::board::domain::Task::id)
        .ok_or_else(|| eyre!("no task titled {title}"))
}

/// Returns the task titles per column, in display order.
pub fn layout(board: &Board) -> Vec<(String, Vec<String>)> {
    board
        .columns()
        .iter()
        .map(|column| {
            let tasks = column
                .tasks()
                .iter()
                .map(|task| task.title().to_owned())
                .collect();
            (column.title().to_owned(), tasks)
        })
        .collect()
}
