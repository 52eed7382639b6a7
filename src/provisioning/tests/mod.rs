//! Unit tests for the provisioning module.

mod compensating_tests;
mod mocks;
