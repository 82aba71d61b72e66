//! Shared types used across all layers

pub mod types;

pub use types::errors::{DomainError, DomainResult};
