//! Creates the Kanban tables in the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! KANBAN_DATABASE_URL=postgres://localhost/kanban kanban-migrate
//! ```
//!
//! The schema statements are idempotent, so running the command against an
//! initialised database changes nothing.

use kanban::config::Config;
use kanban::db;
use kanban::observability::init_logging;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    let url = config.require_database_url()?;
    let pool = db::build_pool(url, 1)?;
    let mut connection = pool.get()?;
    db::apply_schema(&mut connection).inspect_err(|err| {
        tracing::error!(error = %err, "schema bootstrap failed");
    })?;
    tracing::info!("schema applied");
    Ok(())
}
