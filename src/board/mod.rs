//! Board aggregate management.
//!
//! Boards hold an ordered list of columns, each holding an ordered list of
//! tasks. The module follows hexagonal architecture:
//!
//! - Domain types and mutation rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
