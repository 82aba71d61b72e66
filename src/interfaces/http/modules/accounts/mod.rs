//! Accounts module — admin-only account provisioning and role listings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
