//! Service wiring for each storage backend.
//!
//! [`KanbanApp`] bundles the board, account, and provisioning services over
//! one set of adapters. The transport layer holds one instance per process.

use crate::board::adapters::memory::InMemoryBoardRepository;
use crate::board::adapters::postgres::PostgresBoardRepository;
use crate::board::ports::BoardRepository;
use crate::board::services::BoardService;
use crate::config::{Config, ConfigError};
use crate::db::{self, KanbanPgPool};
use crate::provisioning::adapters::{CompensatingBoardProvisioner, PostgresBoardProvisioner};
use crate::provisioning::ports::BoardProvisioner;
use crate::provisioning::services::BoardProvisioningService;
use crate::user::adapters::memory::InMemoryUserRepository;
use crate::user::adapters::postgres::PostgresUserRepository;
use crate::user::ports::UserRepository;
use crate::user::services::AccountService;
use diesel::r2d2::PoolError;
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration was missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The database pool could not be built.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// The application services over one set of adapters.
pub struct KanbanApp<B, U, P>
where
    B: BoardRepository,
    U: UserRepository,
    P: BoardProvisioner,
{
    boards: BoardService<B, DefaultClock>,
    accounts: AccountService<U, DefaultClock>,
    provisioning: BoardProvisioningService<P, DefaultClock>,
}

/// Application backed by `PostgreSQL`.
pub type PostgresKanbanApp =
    KanbanApp<PostgresBoardRepository, PostgresUserRepository, PostgresBoardProvisioner>;

/// Application backed by process memory.
pub type InMemoryKanbanApp = KanbanApp<
    InMemoryBoardRepository,
    InMemoryUserRepository,
    CompensatingBoardProvisioner<InMemoryBoardRepository, InMemoryUserRepository>,
>;

impl<B, U, P> KanbanApp<B, U, P>
where
    B: BoardRepository,
    U: UserRepository,
    P: BoardProvisioner,
{
    /// Wires the services over the given adapters.
    #[must_use]
    pub fn new(boards: Arc<B>, users: Arc<U>, provisioner: Arc<P>) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            boards: BoardService::new(boards, Arc::clone(&clock)),
            accounts: AccountService::new(users, Arc::clone(&clock)),
            provisioning: BoardProvisioningService::new(provisioner, clock),
        }
    }

    /// Returns the board mutation and query service.
    #[must_use]
    pub const fn boards(&self) -> &BoardService<B, DefaultClock> {
        &self.boards
    }

    /// Returns the account service.
    #[must_use]
    pub const fn accounts(&self) -> &AccountService<U, DefaultClock> {
        &self.accounts
    }

    /// Returns the board creation and deletion service.
    #[must_use]
    pub const fn provisioning(&self) -> &BoardProvisioningService<P, DefaultClock> {
        &self.provisioning
    }
}

impl PostgresKanbanApp {
    /// Builds the `PostgreSQL` pool from `config` and wires the services.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when no database URL is configured or
    /// [`AppError::Pool`] when the pool cannot connect.
    pub fn connect(config: &Config) -> Result<Self, AppError> {
        let url = config.require_database_url()?;
        let pool = db::build_pool(url, config.pool_size)?;
        tracing::info!(pool_size = config.pool_size, "database pool ready");
        Ok(Self::from_pool(&pool))
    }

    /// Wires the services over an existing pool.
    #[must_use]
    pub fn from_pool(pool: &KanbanPgPool) -> Self {
        Self::new(
            Arc::new(PostgresBoardRepository::new(pool.clone())),
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresBoardProvisioner::new(pool.clone())),
        )
    }
}

impl InMemoryKanbanApp {
    /// Wires the services over empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        let boards = Arc::new(InMemoryBoardRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let provisioner = Arc::new(CompensatingBoardProvisioner::new(
            Arc::clone(&boards),
            Arc::clone(&users),
        ));
        Self::new(boards, users, provisioner)
    }
}
