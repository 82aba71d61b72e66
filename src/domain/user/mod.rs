//! User aggregate
//!
//! Contains the User entity, DTOs, and repository interface.

pub mod dto_create;
pub mod model;
pub mod repository;

pub use dto_create::CreateUserDto;
pub use model::{full_name, User};
pub use repository::UserRepositoryInterface;
