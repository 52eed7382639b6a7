//! Adapter implementations for the provisioning port.

pub mod compensating;
pub mod postgres;

pub use compensating::CompensatingBoardProvisioner;
pub use postgres::PostgresBoardProvisioner;
