//! Port contracts for board provisioning.

pub mod provisioner;

pub use provisioner::{BoardProvisioner, ProvisioningError, ProvisioningResult};
