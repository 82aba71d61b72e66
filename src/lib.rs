//! # CarePort Admin
//!
//! Administrative backend for staff account provisioning and
//! role-based access.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, role model and repository traits
//! - **application**: Provisioning and directory services
//! - **infrastructure**: External concerns (database, crypto, mail, documents)
//! - **interfaces**: HTTP REST API with Swagger documentation
//! - **shared**: Cross-cutting error types

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
