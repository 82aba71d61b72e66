//! Database entities module

pub mod doctor_profile;
pub mod role;
pub mod user;

pub use doctor_profile::Entity as DoctorProfile;
pub use role::Entity as Role;
pub use user::Entity as User;
