//! User accounts and their board-identifier sets.
//!
//! Users are registered on their first external sign-in and own the set of
//! boards they may access. The set is only changed through
//! [`crate::provisioning`]. Callers are represented by an
//! [`domain::Identity`] resolved once per request.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
