//! Directory — read-only role-filtered user listings

pub mod service;

pub use service::{DirectoryService, RoleListing};
