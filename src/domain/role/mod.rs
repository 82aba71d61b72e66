//! Role aggregate
//!
//! Roles are a fixed reference set seeded at startup; the API never
//! creates or mutates them.

pub mod model;
pub mod repository;

pub use model::{Role, RoleName};
pub use repository::RoleRepositoryInterface;
