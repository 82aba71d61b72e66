//! Core business entities, DTOs and repository traits

pub mod doctor;
pub mod role;
pub mod user;

pub use crate::shared::{DomainError, DomainResult};
pub use doctor::{DoctorProfile, LicenseProof, NewDoctorProfile};
pub use role::{Role, RoleName, RoleRepositoryInterface};
pub use user::{CreateUserDto, User, UserRepositoryInterface};
