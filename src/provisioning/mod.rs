//! Board provisioning: the one write spanning two aggregates.
//!
//! Creating a board also adds it to the owner's board set, and deleting a
//! board removes it from that set. Both happen as one unit: either every step
//! takes effect or none does.
//!
//! - Port contract in [`ports`]
//! - Transactional and compensating adapters in [`adapters`]
//! - Orchestration service in [`services`]

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
