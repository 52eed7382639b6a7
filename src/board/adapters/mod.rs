//! Adapter implementations for the board repository port.

pub mod memory;
pub mod postgres;
