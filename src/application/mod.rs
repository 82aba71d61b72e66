//! Business logic and use-case orchestration

pub mod directory;
pub mod provisioning;

#[cfg(test)]
pub(crate) mod testing;

pub use directory::{DirectoryService, RoleListing};
pub use provisioning::{NewAccount, ProvisionedAccount, ProvisioningService};
