//! Account provisioning — creation and deletion of staff accounts

pub mod service;

pub use service::{NewAccount, ProvisionedAccount, ProvisioningService};
