//! Kanban: board, column, and task management backend.
//!
//! Each board is an aggregate that owns an ordered list of columns. Each column
//! owns an ordered list of tasks. Users hold the set of boards they may
//! access. Creating or deleting a board updates that set in the same unit of
//! work.
//!
//! # Architecture
//!
//! Kanban follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//! - **Services**: Orchestration of domain operations over ports
//!
//! # Modules
//!
//! - [`board`]: Board aggregate, mutations, and persistence
//! - [`user`]: Users, board sets, and caller identities
//! - [`provisioning`]: Atomic board creation and deletion
//! - [`app`]: Service wiring for each storage backend

pub mod app;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod provisioning;
pub mod user;
